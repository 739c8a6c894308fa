use super::signal::EngineSignal;
use super::snapshot::TickSnapshot;

/// Trait for systems that react to engine signals.
/// Implement this for prayer switchers, overlays, loggers, etc.
pub trait SignalHandler {
    /// Handle a single signal with the latest tick snapshot, if any.
    ///
    /// The snapshot gives read access to the threat window, safe tiles and
    /// labels so handlers don't need to maintain duplicate state.
    fn handle_signal(&mut self, signal: &EngineSignal, snapshot: Option<&TickSnapshot>);

    /// Handle multiple signals (default implementation calls handle_signal for each)
    fn handle_signals(&mut self, signals: &[EngineSignal], snapshot: Option<&TickSnapshot>) {
        for signal in signals {
            self.handle_signal(signal, snapshot);
        }
    }

    /// Called when a run starts (optional hook for reset logic)
    fn on_encounter_start(&mut self) {}

    /// Called when the player leaves the encounter (optional hook for cleanup)
    fn on_encounter_end(&mut self) {}
}
