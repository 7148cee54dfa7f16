//! SDR leaderboard aggregation.
//!
//! Snapshot rows are grouped by performer display name. Two different people
//! sharing a display name therefore merge into one row; the display name is
//! the identity the product exposes.

use std::collections::HashMap;

use crate::types::DailySnapshot;

use super::ratios::rate;

/// One ranked performer row.
#[derive(Debug, Clone, PartialEq)]
pub struct LeaderboardRow {
    /// 1-based position after sorting.
    pub rank: usize,
    pub performer: String,
    pub dials: i64,
    pub answered: i64,
    pub dms_reached: i64,
    pub sqls: i64,
    /// answered / dials, percent.
    pub answer_rate: f64,
    /// sqls / dials, percent.
    pub conversion_rate: f64,
}

/// Group snapshots by performer, rank descending by SQLs.
///
/// Grouping is order-preserving on first occurrence, and the sort is stable,
/// so performers tied on SQLs keep their input order. An empty input yields
/// an empty leaderboard.
pub fn build_leaderboard(snapshots: &[DailySnapshot]) -> Vec<LeaderboardRow> {
    let mut order: Vec<String> = Vec::new();
    let mut groups: HashMap<String, (i64, i64, i64, i64)> = HashMap::new();

    for snapshot in snapshots {
        let entry = groups.entry(snapshot.performer.clone()).or_insert_with(|| {
            order.push(snapshot.performer.clone());
            (0, 0, 0, 0)
        });
        entry.0 += snapshot.dials_or_zero();
        entry.1 += snapshot.answered_or_zero();
        entry.2 += snapshot.dms_reached_or_zero();
        entry.3 += snapshot.sqls_or_zero();
    }

    let mut rows: Vec<LeaderboardRow> = order
        .into_iter()
        .map(|performer| {
            let (dials, answered, dms_reached, sqls) = groups[&performer];
            LeaderboardRow {
                rank: 0,
                performer,
                dials,
                answered,
                dms_reached,
                sqls,
                answer_rate: rate(answered, dials),
                conversion_rate: rate(sqls, dials),
            }
        })
        .collect();

    rows.sort_by_key(|row| std::cmp::Reverse(row.sqls));
    for (i, row) in rows.iter_mut().enumerate() {
        row.rank = i + 1;
    }
    rows
}

/// [`build_leaderboard`] truncated to `limit` rows (0 = unlimited); the hook
/// for `AnalyticsConfig::leaderboard_size`.
pub fn build_leaderboard_limited(snapshots: &[DailySnapshot], limit: usize) -> Vec<LeaderboardRow> {
    let mut rows = build_leaderboard(snapshots);
    if limit > 0 {
        rows.truncate(limit);
    }
    rows
}
