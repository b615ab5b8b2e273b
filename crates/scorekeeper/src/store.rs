use std::collections::HashSet;
use std::fmt;
use survival_types::ScoreSubmission;
use tokio::sync::RwLock;

/// Bounds a submission must satisfy before it is recorded.
#[derive(Clone, Copy, Debug)]
pub struct ValidationLimits {
    pub min_duration_ms: u64,
    pub max_duration_ms: u64,
    pub max_cps: u32,
    pub min_score: u32,
    pub max_score: u32,
}

impl Default for ValidationLimits {
    fn default() -> Self {
        Self {
            min_duration_ms: 5_000,
            max_duration_ms: 300_000,
            max_cps: 8,
            min_score: 10,
            max_score: 10_000,
        }
    }
}

/// Why a submission was refused.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitRejection {
    /// This (address, seed, timestamp) combination was already recorded.
    DuplicateSession,
    BadDuration(u64),
    CpsTooHigh(u32),
    ScoreOutOfRange(u32),
    BadAddress,
}

impl fmt::Display for SubmitRejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SubmitRejection::DuplicateSession => write!(f, "session already processed"),
            SubmitRejection::BadDuration(ms) => write!(f, "invalid game duration: {}ms", ms),
            SubmitRejection::CpsTooHigh(cps) => write!(f, "cps too high: {}", cps),
            SubmitRejection::ScoreOutOfRange(score) => {
                write!(f, "score out of range: {}", score)
            }
            SubmitRejection::BadAddress => write!(f, "invalid address format"),
        }
    }
}

impl std::error::Error for SubmitRejection {}

/// One recorded play session.
#[derive(Clone, Debug, PartialEq)]
pub struct ScoreEntry {
    pub address: String,
    pub username: String,
    pub score: u64,
    pub transactions: u64,
    pub timestamp: u64,
    pub seed: String,
    pub duration_ms: u64,
    pub cps_max: u32,
}

struct StoreInner {
    entries: Vec<ScoreEntry>,
    processed: HashSet<String>,
}

/// In-memory score persistence with per-session de-duplication. Signature
/// verification belongs to the external identity service and is not
/// re-checked here.
pub struct ScoreStore {
    inner: RwLock<StoreInner>,
    limits: ValidationLimits,
}

impl ScoreStore {
    pub fn new(limits: ValidationLimits) -> Self {
        Self {
            inner: RwLock::new(StoreInner {
                entries: Vec::new(),
                processed: HashSet::new(),
            }),
            limits,
        }
    }

    pub fn limits(&self) -> ValidationLimits {
        self.limits
    }

    /// Validate and record one submission.
    pub async fn record(&self, submission: &ScoreSubmission) -> Result<ScoreEntry, SubmitRejection> {
        validate(submission, &self.limits)?;

        let session_key = format!(
            "{}_{}_{}",
            submission.address, submission.seed, submission.timestamp
        );

        let mut inner = self.inner.write().await;
        if !inner.processed.insert(session_key) {
            return Err(SubmitRejection::DuplicateSession);
        }

        let entry = ScoreEntry {
            address: submission.address.clone(),
            username: submission.username.clone(),
            score: submission.score_delta as u64,
            transactions: submission.tx_delta as u64,
            timestamp: submission.timestamp,
            seed: submission.seed.clone(),
            duration_ms: submission.duration_ms,
            cps_max: submission.cps_max,
        };
        inner.entries.push(entry.clone());
        Ok(entry)
    }

    pub async fn snapshot(&self) -> Vec<ScoreEntry> {
        let inner = self.inner.read().await;
        inner.entries.clone()
    }
}

fn validate(submission: &ScoreSubmission, limits: &ValidationLimits) -> Result<(), SubmitRejection> {
    if submission.duration_ms < limits.min_duration_ms
        || submission.duration_ms > limits.max_duration_ms
    {
        return Err(SubmitRejection::BadDuration(submission.duration_ms));
    }
    if submission.cps_max > limits.max_cps {
        return Err(SubmitRejection::CpsTooHigh(submission.cps_max));
    }
    if submission.score_delta < limits.min_score || submission.score_delta > limits.max_score {
        return Err(SubmitRejection::ScoreOutOfRange(submission.score_delta));
    }
    if !is_hex_address(&submission.address) {
        return Err(SubmitRejection::BadAddress);
    }
    Ok(())
}

/// `0x` followed by exactly 40 hex digits.
fn is_hex_address(address: &str) -> bool {
    let Some(hex) = address.strip_prefix("0x") else {
        return false;
    };
    hex.len() == 40 && hex.bytes().all(|b| b.is_ascii_hexdigit())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn submission() -> ScoreSubmission {
        ScoreSubmission {
            address: "0x00112233445566778899aabbccddeeff00112233".into(),
            username: "kara".into(),
            score_delta: 150,
            tx_delta: 12,
            duration_ms: 61_000,
            cps_max: 5,
            seed: "42".into(),
            timestamp: 1_700_000_000_000,
            signature: "mock_signature".into(),
        }
    }

    #[tokio::test]
    async fn records_a_valid_submission() {
        let store = ScoreStore::new(ValidationLimits::default());
        let entry = store.record(&submission()).await.unwrap();
        assert_eq!(entry.score, 150);
        assert_eq!(entry.transactions, 12);
        assert_eq!(store.snapshot().await.len(), 1);
    }

    #[tokio::test]
    async fn rejects_duplicate_session() {
        let store = ScoreStore::new(ValidationLimits::default());
        store.record(&submission()).await.unwrap();
        assert_eq!(
            store.record(&submission()).await,
            Err(SubmitRejection::DuplicateSession)
        );
        assert_eq!(store.snapshot().await.len(), 1);
    }

    #[tokio::test]
    async fn rejects_out_of_bounds_submissions() {
        let store = ScoreStore::new(ValidationLimits::default());

        let mut short = submission();
        short.duration_ms = 1_000;
        assert_eq!(
            store.record(&short).await,
            Err(SubmitRejection::BadDuration(1_000))
        );

        let mut fast = submission();
        fast.cps_max = 9;
        assert_eq!(store.record(&fast).await, Err(SubmitRejection::CpsTooHigh(9)));

        let mut low = submission();
        low.score_delta = 5;
        assert_eq!(
            store.record(&low).await,
            Err(SubmitRejection::ScoreOutOfRange(5))
        );

        let mut bad_addr = submission();
        bad_addr.address = "0xnothex".into();
        assert_eq!(store.record(&bad_addr).await, Err(SubmitRejection::BadAddress));

        assert!(store.snapshot().await.is_empty());
    }

    #[test]
    fn address_format() {
        assert!(is_hex_address(
            "0x00112233445566778899AABBccddeeff00112233"
        ));
        assert!(!is_hex_address("00112233445566778899aabbccddeeff00112233"));
        assert!(!is_hex_address("0x0011"));
    }
}
