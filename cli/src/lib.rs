pub mod commands;
pub mod context;
pub mod error;
pub mod logging;
pub mod printer;
pub mod repl;
pub mod script;

pub use context::CliContext;
pub use error::CliError;
pub use repl::readline;
