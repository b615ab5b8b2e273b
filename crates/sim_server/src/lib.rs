pub mod errors;
pub mod events;
pub mod reporting;
pub mod server;
pub mod session_handle;
pub mod tick_loop;
pub mod types;

pub use errors::{CreateSessionError, SessionError, SubmitError};
pub use events::EventBuffer;
pub use reporting::{NullReporter, ScoreReporter};
pub use server::GameServer;
pub use session_handle::SessionHandle;
pub use types::{EventCursor, ServerConfig, ServerEvent, SessionInfo, SessionStatus};
