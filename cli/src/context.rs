use std::io::Stdout;

use inferno_core::{InfernoEngine, Settings, SettingsExt, SignalHandler, Tile};

use crate::printer::SignalPrinter;
use crate::script::{Script, ScriptTick};

/// Holds all state for the CLI application.
/// This is a lightweight container - replay logic lives in `commands`.
pub struct CliContext {
    /// Persisted settings; a script's own settings only apply while it runs
    pub settings: Settings,
    pub engine: InfernoEngine,
    pub printer: SignalPrinter<Stdout>,
    /// Player tile on the last replayed tick
    pub player: Option<Tile>,
    script: Option<Script>,
    cursor: usize,
}

impl CliContext {
    pub fn new() -> Self {
        Self::with_settings(Settings::load())
    }

    pub fn with_settings(settings: Settings) -> Self {
        Self {
            engine: InfernoEngine::new(settings.clone()),
            settings,
            printer: SignalPrinter::default(),
            player: None,
            script: None,
            cursor: 0,
        }
    }

    /// Replace the loaded script and start a fresh run
    pub fn start_script(&mut self, script: Script) {
        let settings = script.settings.clone().unwrap_or_else(|| self.settings.clone());
        self.engine.set_settings(settings);
        self.engine.reset();
        self.player = None;
        self.cursor = 0;
        self.script = Some(script);
        self.printer.on_encounter_start();
    }

    pub fn has_script(&self) -> bool {
        self.script.is_some()
    }

    /// Ticks left to replay
    pub fn remaining(&self) -> usize {
        self.script
            .as_ref()
            .map_or(0, |script| script.ticks.len().saturating_sub(self.cursor))
    }

    /// Take the next scripted tick, advancing the cursor
    pub fn next_tick(&mut self) -> Option<ScriptTick> {
        let tick = self.script.as_ref()?.ticks.get(self.cursor)?.clone();
        self.cursor += 1;
        Some(tick)
    }
}

impl Default for CliContext {
    fn default() -> Self {
        Self::new()
    }
}
