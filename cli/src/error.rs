use thiserror::Error;

use inferno_core::ConfigError;

use crate::script::ScriptError;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("no script loaded (use `load --path <file>`)")]
    NoScript,

    #[error(transparent)]
    Script(#[from] ScriptError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("failed to encode snapshot")]
    Json(#[from] serde_json::Error),
}
