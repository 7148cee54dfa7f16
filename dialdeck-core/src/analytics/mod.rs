//! Analytics engine for dialdeck
//!
//! Provides the computations behind the dashboard:
//! - Period resolution and previous-period comparison
//! - Event and snapshot aggregation
//! - Rates, deltas, and the conversion funnel
//! - Campaign pacing against working days
//! - SDR leaderboard
//! - Historical slices and record-level drill-down
//!
//! Every entry point is a pure function of its inputs; the caller owns
//! fetching rows and deciding when to recompute.

pub mod aggregate;
pub mod drilldown;
pub mod funnel;
pub mod leaderboard;
pub mod overview;
pub mod pacing;
pub mod period;
pub mod ratios;
pub mod slice;

pub use aggregate::{
    count_meetings, sum_events, sum_snapshots, ActivityTotals, EventScope, SnapshotScope,
    SnapshotTotals,
};
pub use drilldown::{select_records, DrillDownRows, DrillDownScope};
pub use funnel::{build_funnel, FunnelStage, FunnelStageKind};
pub use leaderboard::{build_leaderboard, build_leaderboard_limited, LeaderboardRow};
pub use overview::{build_overview, build_overview_with_cap, KpiValue, OverviewKpis};
pub use pacing::{campaign_pace, CampaignPace};
pub use period::{current_period, previous_period};
pub use ratios::{delta, delta_with_cap, rate, DEFAULT_DELTA_SUPPRESSION_PCT};
pub use slice::{resolve_slice, SliceWindow};
