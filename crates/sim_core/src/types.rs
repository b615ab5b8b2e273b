/// Simulation tick counter. Tick 0 is "before the first step".
pub type Tick = u64;

/// Monotonic id stamped onto each action submitted within a session.
pub type ActionId = u64;

/// Server-assigned identifier for one play session.
pub type SessionId = u64;
