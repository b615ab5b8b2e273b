use crate::store::ScoreEntry;
use std::fmt;

/// On-chain settlement collaborator: the `updatePlayerData(player, score,
/// transactions)` relay. Signing, RPC transport and confirmation live in an
/// external service; this crate only sees the outcome. Implementations must
/// return promptly: a real relay hands the call off and reports the queued
/// transaction hash.
pub trait SettlementRelay: Send + Sync {
    fn submit(&self, entry: &ScoreEntry) -> Result<String, RelayError>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RelayError {
    /// No relay configured for this deployment.
    Disabled,
    /// The external service refused or failed the transaction.
    Rejected(String),
}

impl fmt::Display for RelayError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RelayError::Disabled => write!(f, "settlement relay not configured"),
            RelayError::Rejected(reason) => write!(f, "settlement rejected: {}", reason),
        }
    }
}

impl std::error::Error for RelayError {}

/// Deployment without settlement. Scores still land in the off-chain store.
pub struct DisabledRelay;

impl SettlementRelay for DisabledRelay {
    fn submit(&self, _entry: &ScoreEntry) -> Result<String, RelayError> {
        Err(RelayError::Disabled)
    }
}

/// Accepts everything and fabricates a transaction hash. For demos and
/// tests.
pub struct MockRelay;

impl SettlementRelay for MockRelay {
    fn submit(&self, entry: &ScoreEntry) -> Result<String, RelayError> {
        use std::hash::{Hash, Hasher};
        let mut hasher = std::collections::hash_map::DefaultHasher::new();
        entry.address.hash(&mut hasher);
        entry.seed.hash(&mut hasher);
        entry.timestamp.hash(&mut hasher);
        Ok(format!("0x{:016x}", hasher.finish()))
    }
}
