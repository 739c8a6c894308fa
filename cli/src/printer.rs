use std::io::Write;

use inferno_core::{EngineSignal, SignalHandler, TickSnapshot};

/// Writes one line per signal to the wrapped writer
pub struct SignalPrinter<W: Write> {
    out: W,
}

impl<W: Write> SignalPrinter<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl Default for SignalPrinter<std::io::Stdout> {
    fn default() -> Self {
        Self::new(std::io::stdout())
    }
}

pub fn describe(signal: &EngineSignal) -> String {
    match signal {
        EngineSignal::RecommendationChanged {
            recommendation,
            source,
            tick,
        } => format!("[{tick:>5}] pray {recommendation} ({source:?})"),
        EngineSignal::WaveChanged { wave, next_wave } => {
            if *next_wave < 0 {
                format!("wave {wave} (final)")
            } else {
                format!("wave {wave}, next {next_wave}")
            }
        }
        EngineSignal::BossSpawned { actor } => format!("boss spawned ({actor})"),
        EngineSignal::FinalPhaseStarted { tick } => format!("[{tick:>5}] final phase started"),
        EngineSignal::BossDespawned { actor } => format!("boss despawned ({actor})"),
        EngineSignal::NpcTracked { actor, npc_type } => {
            format!("+ {} ({actor})", npc_type.name())
        }
        EngineSignal::NpcRemoved { actor, npc_type } => {
            format!("- {} ({actor})", npc_type.name())
        }
    }
}

impl<W: Write> SignalHandler for SignalPrinter<W> {
    fn handle_signal(&mut self, signal: &EngineSignal, _snapshot: Option<&TickSnapshot>) {
        if let Err(err) = writeln!(self.out, "{}", describe(signal)) {
            tracing::warn!(error = %err, "failed to print signal");
        }
    }

    fn on_encounter_start(&mut self) {
        let _ = writeln!(self.out, "-- encounter started --");
    }

    fn on_encounter_end(&mut self) {
        let _ = writeln!(self.out, "-- encounter ended --");
    }
}
