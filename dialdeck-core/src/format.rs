//! Formatting helpers shared across UIs.

/// Format a rate as a percentage with one decimal (e.g., "23.5%").
pub fn format_pct(pct: f64) -> String {
    format!("{:.1}%", pct)
}

/// Format a delta for display (e.g., "+23%" or "-15%"); a suppressed or
/// absent delta renders as a dash.
pub fn format_delta(delta: Option<f64>) -> String {
    match delta {
        Some(delta) if delta >= 0.0 => format!("+{:.0}%", delta),
        Some(delta) => format!("{:.0}%", delta),
        None => "—".to_string(),
    }
}
