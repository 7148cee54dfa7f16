//! Campaign pacing against a working-day calendar.

use chrono::NaiveDate;

use crate::calendar::{clamp_to_range, count_working_days};
use crate::types::CampaignWindow;

use super::ratios::rate;

/// Pacing figures for a campaign window.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CampaignPace {
    pub total_working_days: i64,
    pub elapsed_working_days: i64,
    pub remaining_working_days: i64,
    pub target_sqls: i64,
    pub achieved_sqls: i64,
    pub remaining_sqls: i64,
    /// Achieved SQLs as a percentage of target.
    pub sql_percentage: f64,
    /// Elapsed working days as a percentage of the whole window.
    pub time_percentage: f64,
    /// SQLs per remaining working day needed to hit target. When no working
    /// days remain, the whole remainder is due now.
    pub required_daily_rate: f64,
}

impl CampaignPace {
    /// Whether delivery is at or ahead of the time elapsed.
    pub fn on_track(&self) -> bool {
        self.sql_percentage >= self.time_percentage
    }
}

/// Compute pacing for a campaign as of `today`.
///
/// Returns `None` ("no campaign", distinct from a zero-valued campaign) when
/// the window is missing its start, end, or target.
pub fn campaign_pace(
    window: &CampaignWindow,
    achieved_sqls: i64,
    today: NaiveDate,
) -> Option<CampaignPace> {
    let (Some(start), Some(end), Some(target)) =
        (window.start_date, window.end_date, window.target_sqls)
    else {
        tracing::debug!(
            client = %window.client_id,
            "Campaign window incomplete, pacing undefined"
        );
        return None;
    };

    let total_working_days = count_working_days(start, end);
    let effective_today = clamp_to_range(today, start, end);
    let elapsed_working_days = count_working_days(start, effective_today);
    let remaining_working_days = (total_working_days - elapsed_working_days).max(0);
    let remaining_sqls = (target - achieved_sqls).max(0);

    let required_daily_rate = if remaining_working_days > 0 {
        remaining_sqls as f64 / remaining_working_days as f64
    } else {
        remaining_sqls as f64
    };

    Some(CampaignPace {
        total_working_days,
        elapsed_working_days,
        remaining_working_days,
        target_sqls: target,
        achieved_sqls,
        remaining_sqls,
        sql_percentage: rate(achieved_sqls, target),
        time_percentage: rate(elapsed_working_days, total_working_days),
        required_daily_rate,
    })
}
