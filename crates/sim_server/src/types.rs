use sim_core::{SessionId, Tick};

/// Tracks position in an event stream for cursor-based retrieval.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct EventCursor(pub u64);

/// Status of a play session.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionStatus {
    Running,
    /// The game reached its terminal condition on its own.
    Finished,
    /// The session was torn down externally before finishing.
    Terminated,
}

/// Summary of a session for listings.
#[derive(Clone, Debug)]
pub struct SessionInfo {
    pub session_id: SessionId,
    pub status: SessionStatus,
    pub current_tick: Tick,
}

/// An event stamped with a sequence number for cursor tracking.
#[derive(Clone, Debug)]
pub struct ServerEvent<E> {
    pub sequence: u64,
    pub tick: Tick,
    pub event: E,
}

/// Configuration for the session server.
#[derive(Clone, Debug)]
pub struct ServerConfig {
    /// Tick rate for sessions (ticks per second).
    pub tick_hz: u32,
    /// Maximum number of concurrent sessions.
    pub max_sessions: usize,
    /// Capacity of the event ring buffer per session.
    pub event_buffer_capacity: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            tick_hz: 60,
            max_sessions: 64,
            event_buffer_capacity: 1024,
        }
    }
}
