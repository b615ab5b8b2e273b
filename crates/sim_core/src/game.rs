use crate::envelope::ActionEnvelope;
use crate::types::Tick;

/// A deterministic fixed-timestep game simulation.
///
/// A game is fully reproducible from `(config, seed)` plus the ordered
/// action stream; `step` must not consult any ambient source of time or
/// randomness.
pub trait Game: Sized {
    type Config: Clone + Send + Sync + 'static;
    type Action: Clone + Send + Sync + 'static;
    type Observation: Clone + Send + Sync + 'static;
    type Event: Clone + Send + Sync + 'static;
    /// Terminal summary handed to the score-reporting collaborator.
    type Report: Clone + Send + Sync + 'static;

    fn new(config: Self::Config, seed: u64) -> Self;

    fn step(
        &mut self,
        tick: Tick,
        actions: &[ActionEnvelope<Self::Action>],
        out_events: &mut Vec<Self::Event>,
    );

    fn observe(&self, tick: Tick) -> Self::Observation;

    /// True once the session has reached its terminal state. A terminal game
    /// must ignore further `step` calls.
    fn is_over(&self) -> bool;

    /// Final session stats; `Some` exactly when `is_over` returns true.
    fn report(&self) -> Option<Self::Report>;
}
