use crate::leaderboard;
use crate::relay::SettlementRelay;
use crate::store::ScoreStore;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Deserialize;
use std::sync::Arc;
use survival_types::{LeaderboardResponse, Period, ScoreSubmission, SubmitOutcome};

/// Store plus settlement relay behind one handle.
pub struct ScoreKeeper {
    store: Arc<ScoreStore>,
    relay: Arc<dyn SettlementRelay>,
}

impl ScoreKeeper {
    pub fn new(store: Arc<ScoreStore>, relay: Arc<dyn SettlementRelay>) -> Self {
        Self { store, relay }
    }

    pub fn store(&self) -> &Arc<ScoreStore> {
        &self.store
    }

    /// Record a submission off-chain, then attempt settlement. A relay
    /// failure is non-fatal: the entry is already stored and the response
    /// still reports success, carrying the relay error for display.
    pub async fn submit(&self, submission: ScoreSubmission) -> SubmitOutcome {
        let entry = match self.store.record(&submission).await {
            Ok(entry) => entry,
            Err(rejection) => {
                tracing::warn!(%rejection, address = %submission.address, "submission refused");
                return SubmitOutcome {
                    success: false,
                    transaction_hash: None,
                    error: Some(rejection.to_string()),
                };
            }
        };

        match self.relay.submit(&entry) {
            Ok(hash) => {
                tracing::info!(%hash, address = %entry.address, score = entry.score, "score settled");
                SubmitOutcome {
                    success: true,
                    transaction_hash: Some(hash),
                    error: None,
                }
            }
            Err(err) => {
                tracing::warn!(%err, address = %entry.address, "settlement failed, score kept off-chain");
                SubmitOutcome {
                    success: true,
                    transaction_hash: None,
                    error: Some(err.to_string()),
                }
            }
        }
    }

    pub async fn leaderboard(&self, period: Period, now_ms: u64) -> LeaderboardResponse {
        let entries = self.store.snapshot().await;
        let ranked = leaderboard::rank(&entries, period, now_ms);
        LeaderboardResponse {
            period,
            total: ranked.len(),
            entries: ranked,
            last_updated: now_ms,
        }
    }
}

#[derive(Debug, Deserialize)]
struct LeaderboardParams {
    period: Option<Period>,
}

pub fn router(keeper: Arc<ScoreKeeper>) -> Router {
    Router::new()
        .route("/api/submit-score", post(submit_score))
        .route("/api/leaderboard", get(get_leaderboard))
        .with_state(keeper)
}

async fn submit_score(
    State(keeper): State<Arc<ScoreKeeper>>,
    Json(submission): Json<ScoreSubmission>,
) -> (StatusCode, Json<SubmitOutcome>) {
    let outcome = keeper.submit(submission).await;
    let status = if outcome.success {
        StatusCode::OK
    } else {
        StatusCode::BAD_REQUEST
    };
    (status, Json(outcome))
}

async fn get_leaderboard(
    State(keeper): State<Arc<ScoreKeeper>>,
    Query(params): Query<LeaderboardParams>,
) -> Json<LeaderboardResponse> {
    let period = params.period.unwrap_or(Period::All);
    Json(keeper.leaderboard(period, crate::now_ms()).await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::relay::{DisabledRelay, MockRelay};
    use crate::store::ValidationLimits;

    fn submission(seed: &str) -> ScoreSubmission {
        ScoreSubmission {
            address: "0x00112233445566778899aabbccddeeff00112233".into(),
            username: "kara".into(),
            score_delta: 150,
            tx_delta: 12,
            duration_ms: 61_000,
            cps_max: 5,
            seed: seed.into(),
            timestamp: 1_700_000_000_000,
            signature: "mock_signature".into(),
        }
    }

    #[tokio::test]
    async fn relay_failure_is_non_fatal() {
        let keeper = ScoreKeeper::new(
            Arc::new(ScoreStore::new(ValidationLimits::default())),
            Arc::new(DisabledRelay),
        );

        let outcome = keeper.submit(submission("1")).await;
        assert!(outcome.success);
        assert!(outcome.transaction_hash.is_none());
        assert!(outcome.error.is_some());
        assert_eq!(keeper.store().snapshot().await.len(), 1);
    }

    #[tokio::test]
    async fn settled_submission_reports_a_hash() {
        let keeper = ScoreKeeper::new(
            Arc::new(ScoreStore::new(ValidationLimits::default())),
            Arc::new(MockRelay),
        );

        let outcome = keeper.submit(submission("2")).await;
        assert!(outcome.success);
        assert!(outcome.transaction_hash.is_some());
        assert!(outcome.error.is_none());
    }

    #[tokio::test]
    async fn invalid_submission_is_refused() {
        let keeper = ScoreKeeper::new(
            Arc::new(ScoreStore::new(ValidationLimits::default())),
            Arc::new(MockRelay),
        );

        let mut bad = submission("3");
        bad.cps_max = 20;
        let outcome = keeper.submit(bad).await;
        assert!(!outcome.success);
        assert!(keeper.store().snapshot().await.is_empty());
    }
}
