//! Score-submission backend: in-memory persistence, validation, date-window
//! leaderboards and the settlement relay seam.

pub mod leaderboard;
pub mod relay;
pub mod reporter;
pub mod routes;
pub mod store;

pub use relay::{DisabledRelay, MockRelay, RelayError, SettlementRelay};
pub use reporter::{SessionScoreReporter, PLACEHOLDER_SIGNATURE};
pub use routes::{router, ScoreKeeper};
pub use store::{ScoreEntry, ScoreStore, SubmitRejection, ValidationLimits};

use std::time::{SystemTime, UNIX_EPOCH};

/// Current wall-clock time in unix milliseconds.
pub fn now_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}
