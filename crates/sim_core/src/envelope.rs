use crate::types::{ActionId, Tick};

/// A player action stamped with scheduling metadata by the session host.
#[derive(Clone, Debug)]
pub struct ActionEnvelope<A> {
    pub action_id: ActionId,
    pub intended_tick: Tick,
    pub payload: A,
}
