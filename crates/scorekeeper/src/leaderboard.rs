use crate::store::ScoreEntry;
use std::collections::HashMap;
use survival_types::{LeaderboardEntry, Period};

const DAY_MS: u64 = 86_400_000;
const TOP_N: usize = 100;

/// Start of the requested window in unix ms, or `None` for the full history.
/// Daily is the current UTC day; weekly starts on the most recent UTC
/// Monday. Day 0 of the unix epoch was a Thursday.
pub fn window_start(period: Period, now_ms: u64) -> Option<u64> {
    match period {
        Period::All => None,
        Period::Daily => Some(now_ms - now_ms % DAY_MS),
        Period::Weekly => {
            let day = now_ms / DAY_MS;
            let days_since_monday = (day + 3) % 7;
            Some((day - days_since_monday) * DAY_MS)
        }
    }
}

struct PlayerTotals {
    username: String,
    score: u64,
    transactions: u64,
    last_played: u64,
}

/// Aggregate recorded sessions per address within the window, rank by total
/// score descending, and keep the top 100.
pub fn rank(entries: &[ScoreEntry], period: Period, now_ms: u64) -> Vec<LeaderboardEntry> {
    let start = window_start(period, now_ms);

    let mut totals: HashMap<&str, PlayerTotals> = HashMap::new();
    for entry in entries {
        if start.is_some_and(|cutoff| entry.timestamp < cutoff) {
            continue;
        }
        let agg = totals
            .entry(entry.address.as_str())
            .or_insert_with(|| PlayerTotals {
                username: entry.username.clone(),
                score: 0,
                transactions: 0,
                last_played: 0,
            });
        agg.score += entry.score;
        agg.transactions += entry.transactions;
        agg.last_played = agg.last_played.max(entry.timestamp);
    }

    let mut ranked: Vec<(&str, PlayerTotals)> = totals.into_iter().collect();
    ranked.sort_by(|a, b| b.1.score.cmp(&a.1.score).then_with(|| a.0.cmp(b.0)));
    ranked.truncate(TOP_N);

    ranked
        .into_iter()
        .enumerate()
        .map(|(index, (address, agg))| LeaderboardEntry {
            rank: index as u32 + 1,
            username: if agg.username.is_empty() {
                short_address(address)
            } else {
                agg.username
            },
            score: agg.score,
            address: address.to_string(),
            timestamp: agg.last_played,
            transactions: agg.transactions,
        })
        .collect()
}

fn short_address(address: &str) -> String {
    if address.len() > 10 {
        format!("{}...{}", &address[..6], &address[address.len() - 4..])
    } else {
        address.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(address: &str, username: &str, score: u64, timestamp: u64) -> ScoreEntry {
        ScoreEntry {
            address: address.into(),
            username: username.into(),
            score,
            transactions: score / 10,
            timestamp,
            seed: "1".into(),
            duration_ms: 60_000,
            cps_max: 5,
        }
    }

    // 2024-01-01 was a Monday.
    const MONDAY_MS: u64 = 1_704_067_200_000;
    const WEDNESDAY_NOON_MS: u64 = MONDAY_MS + 2 * DAY_MS + DAY_MS / 2;

    #[test]
    fn daily_window_is_start_of_utc_day() {
        assert_eq!(
            window_start(Period::Daily, WEDNESDAY_NOON_MS),
            Some(MONDAY_MS + 2 * DAY_MS)
        );
    }

    #[test]
    fn weekly_window_starts_on_monday() {
        assert_eq!(window_start(Period::Weekly, WEDNESDAY_NOON_MS), Some(MONDAY_MS));
        // A Monday is its own week start.
        assert_eq!(window_start(Period::Weekly, MONDAY_MS + 60_000), Some(MONDAY_MS));
    }

    #[test]
    fn all_window_is_unbounded() {
        assert_eq!(window_start(Period::All, WEDNESDAY_NOON_MS), None);
    }

    #[test]
    fn aggregates_and_ranks_by_total_score() {
        let a = "0x00000000000000000000000000000000000000aa";
        let b = "0x00000000000000000000000000000000000000bb";
        let entries = vec![
            entry(a, "alpha", 100, WEDNESDAY_NOON_MS),
            entry(b, "beta", 120, WEDNESDAY_NOON_MS),
            entry(a, "alpha", 50, WEDNESDAY_NOON_MS + 1),
        ];

        let board = rank(&entries, Period::All, WEDNESDAY_NOON_MS + 10);
        assert_eq!(board.len(), 2);
        assert_eq!(board[0].rank, 1);
        assert_eq!(board[0].username, "alpha");
        assert_eq!(board[0].score, 150);
        assert_eq!(board[0].timestamp, WEDNESDAY_NOON_MS + 1);
        assert_eq!(board[1].rank, 2);
        assert_eq!(board[1].score, 120);
    }

    #[test]
    fn window_filters_older_sessions() {
        let a = "0x00000000000000000000000000000000000000aa";
        let entries = vec![
            entry(a, "alpha", 100, MONDAY_MS - 1), // previous week
            entry(a, "alpha", 40, WEDNESDAY_NOON_MS),
        ];

        let board = rank(&entries, Period::Weekly, WEDNESDAY_NOON_MS);
        assert_eq!(board.len(), 1);
        assert_eq!(board[0].score, 40);

        let board = rank(&entries, Period::All, WEDNESDAY_NOON_MS);
        assert_eq!(board[0].score, 140);
    }

    #[test]
    fn empty_username_falls_back_to_short_address() {
        let a = "0x00112233445566778899aabbccddeeff00112233";
        let entries = vec![entry(a, "", 30, WEDNESDAY_NOON_MS)];
        let board = rank(&entries, Period::All, WEDNESDAY_NOON_MS);
        assert_eq!(board[0].username, "0x0011...2233");
    }
}
