//! Conversion funnel: dials → answered → DM conversations → SQLs.

use super::aggregate::ActivityTotals;
use super::ratios::rate;

/// The four funnel stages, in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FunnelStageKind {
    Dials,
    Answered,
    DmConversations,
    Sqls,
}

impl FunnelStageKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            FunnelStageKind::Dials => "dials",
            FunnelStageKind::Answered => "answered",
            FunnelStageKind::DmConversations => "dm_conversations",
            FunnelStageKind::Sqls => "sqls",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            FunnelStageKind::Dials => "Dials",
            FunnelStageKind::Answered => "Answered",
            FunnelStageKind::DmConversations => "DM Conversations",
            FunnelStageKind::Sqls => "SQLs",
        }
    }
}

/// One stage of the funnel with both percentage labels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FunnelStage {
    pub kind: FunnelStageKind,
    pub count: i64,
    /// Percentage of the previous stage; `None` for the first stage.
    pub pct_of_previous: Option<f64>,
    /// Percentage of the first stage.
    pub pct_of_total: f64,
}

/// Arrange totals into the four-stage funnel.
///
/// A funnel with zero dials is a valid, fully-defined state: every
/// percentage is 0 (the divide-by-zero rule in [`rate`] takes care of it),
/// not undefined.
pub fn build_funnel(totals: &ActivityTotals) -> Vec<FunnelStage> {
    let counts = [
        (FunnelStageKind::Dials, totals.dials),
        (FunnelStageKind::Answered, totals.answered),
        (FunnelStageKind::DmConversations, totals.dm_conversations),
        (FunnelStageKind::Sqls, totals.sqls),
    ];
    let total = counts[0].1;

    counts
        .iter()
        .enumerate()
        .map(|(i, &(kind, count))| FunnelStage {
            kind,
            count,
            pct_of_previous: if i == 0 {
                None
            } else {
                Some(rate(count, counts[i - 1].1))
            },
            pct_of_total: rate(count, total),
        })
        .collect()
}
