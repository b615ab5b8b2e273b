//! Canonical serializable types for the survival castle-defense game.
//!
//! Shared between `sim_survival` (the simulation + HTTP server) and
//! `scorekeeper` (the score-submission backend). Score-submission and
//! leaderboard payloads keep the camelCase field names of the upstream wire
//! format; everything else uses the default snake_case.

use serde::{Deserialize, Serialize};

/// Player identity supplied by the external identity collaborator at session
/// start. Opaque, read-only input as far as the engine is concerned.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PlayerProfile {
    pub address: String,
    pub username: String,
    pub has_username: bool,
}

/// One live enemy, as seen by a client.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct EnemyInfo {
    pub x: f32,
    pub y: f32,
    pub kind: String,
    pub hp: i32,
    pub max_hp: i32,
    pub attached: bool,
}

/// One projectile in flight.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ProjectileInfo {
    pub x: f32,
    pub y: f32,
}

/// Where the boss cycle currently stands.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum BossStatus {
    /// Next boss due at this tick.
    Scheduled { due_tick: u64 },
    /// Warning shown; boss entity appears at this tick.
    Alerting { spawn_tick: u64 },
    /// Boss is on the field.
    Active { hp: i32, max_hp: i32 },
}

/// A timed skill window.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize)]
pub struct SkillWindow {
    pub active: bool,
    pub remaining_ticks: u64,
}

/// Full game-state snapshot for clients.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SurvivalObservation {
    pub tick: u64,
    pub ticks_per_second: u32,

    pub score: u32,
    pub kills: u32,
    pub structure_hp: i32,
    pub structure_max_hp: i32,
    pub survived_secs: u64,
    /// Display wave counter shown on the HUD.
    pub wave: u64,

    pub boss_wave: u32,
    pub boss: BossStatus,

    pub freeze: SkillWindow,
    pub damage_boost: SkillWindow,
    pub shot_ready: bool,
    pub spawn_interval_ms: u32,

    pub enemies: Vec<EnemyInfo>,
    pub projectiles: Vec<ProjectileInfo>,
}

/// Terminal session stats handed to the score-reporting collaborator.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SessionReport {
    pub score: u32,
    pub kills: u32,
    pub shots_fired: u32,
    pub shots_hit: u32,
    pub survived_ms: u64,
    pub cps_max: u32,
    pub seed: u64,
}

/// Score-submission payload. Field names are fixed by the wire format.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreSubmission {
    pub address: String,
    pub username: String,
    pub score_delta: u32,
    pub tx_delta: u32,
    pub duration_ms: u64,
    pub cps_max: u32,
    pub seed: String,
    pub timestamp: u64,
    pub signature: String,
}

/// Response to a score submission.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitOutcome {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transaction_hash: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Leaderboard time window.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Period {
    Daily,
    Weekly,
    All,
}

/// One ranked leaderboard row.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    pub rank: u32,
    pub username: String,
    pub score: u64,
    pub address: String,
    pub timestamp: u64,
    pub transactions: u64,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct LeaderboardResponse {
    pub period: Period,
    pub entries: Vec<LeaderboardEntry>,
    pub total: usize,
    pub last_updated: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn submission_uses_camel_case_wire_names() {
        let sub = ScoreSubmission {
            address: "0x0000000000000000000000000000000000000001".into(),
            username: "kara".into(),
            score_delta: 120,
            tx_delta: 9,
            duration_ms: 61_000,
            cps_max: 5,
            seed: "42".into(),
            timestamp: 1_700_000_000_000,
            signature: "mock_signature".into(),
        };

        let json = serde_json::to_value(&sub).unwrap();
        assert_eq!(json["scoreDelta"], 120);
        assert_eq!(json["txDelta"], 9);
        assert_eq!(json["durationMs"], 61_000);
        assert_eq!(json["cpsMax"], 5);
    }

    #[test]
    fn period_parses_lowercase() {
        let p: Period = serde_json::from_str("\"weekly\"").unwrap();
        assert_eq!(p, Period::Weekly);
    }
}
