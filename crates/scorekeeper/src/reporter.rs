use crate::routes::ScoreKeeper;
use sim_core::SessionId;
use sim_server::ScoreReporter;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};
use survival_types::{PlayerProfile, ScoreSubmission, SessionReport};

/// Placeholder accepted while signing is delegated to the identity service.
pub const PLACEHOLDER_SIGNATURE: &str = "mock_signature";

/// Bridges finished sessions to the score store: builds the wire submission
/// from the terminal report plus the player profile registered at session
/// start, then hands it off on a spawned task so the tick loop never waits
/// on persistence or settlement.
///
/// Sessions without a registered profile (anonymous play) are not submitted;
/// their stats remain available through the session API regardless.
pub struct SessionScoreReporter {
    keeper: Arc<ScoreKeeper>,
    profiles: Mutex<HashMap<SessionId, PlayerProfile>>,
}

impl SessionScoreReporter {
    pub fn new(keeper: Arc<ScoreKeeper>) -> Self {
        Self {
            keeper,
            profiles: Mutex::new(HashMap::new()),
        }
    }

    pub fn register_profile(&self, session_id: SessionId, profile: PlayerProfile) {
        self.profiles
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(session_id, profile);
    }

    fn take_profile(&self, session_id: SessionId) -> Option<PlayerProfile> {
        self.profiles
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&session_id)
    }
}

impl ScoreReporter<SessionReport> for SessionScoreReporter {
    fn deliver(&self, session_id: SessionId, report: SessionReport) {
        let Some(profile) = self.take_profile(session_id) else {
            tracing::debug!(session_id, "anonymous session, skipping score submission");
            return;
        };

        let submission = ScoreSubmission {
            address: profile.address,
            username: if profile.username.is_empty() {
                "Anonymous".to_string()
            } else {
                profile.username
            },
            score_delta: report.score,
            tx_delta: report.kills,
            duration_ms: report.survived_ms,
            cps_max: report.cps_max,
            seed: report.seed.to_string(),
            timestamp: crate::now_ms(),
            signature: PLACEHOLDER_SIGNATURE.to_string(),
        };

        let keeper = Arc::clone(&self.keeper);
        tokio::spawn(async move {
            let outcome = keeper.submit(submission).await;
            if outcome.success {
                tracing::info!(session_id, tx = ?outcome.transaction_hash, "session score submitted");
            } else {
                tracing::warn!(session_id, error = ?outcome.error, "session score refused");
            }
        });
    }
}
