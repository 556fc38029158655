// Retention windows: duration-string parsing and history/trends routing.
// Both are pure; the resolver feeds them per-request wall-clock time.

use std::sync::OnceLock;

use regex::Regex;

pub const SECONDS_PER_DAY: i64 = 86_400;

/// Parses a compact duration like "1d2h30m" into fractional days, rounded
/// to two decimals. Tokens are extracted by pattern match: anything other
/// than `<digits><d|h|m>` (upstream strings may carry seconds or weeks) is
/// ignored, and empty or non-matching input is 0.0. The leniency matches
/// the upstream retention-string format and is deliberate.
pub fn parse_days(duration: &str) -> f64 {
    static TOKEN: OnceLock<Regex> = OnceLock::new();
    let token = TOKEN.get_or_init(|| Regex::new(r"(\d+)([dhm])").unwrap());

    let lower = duration.to_lowercase();
    let mut total = 0.0;
    for cap in token.captures_iter(&lower) {
        let value: f64 = cap[1].parse().unwrap_or(0.0);
        total += match &cap[2] {
            "d" => value,
            "h" => value / 24.0,
            _ => value / 1440.0,
        };
    }
    (total * 100.0).round() / 100.0
}

/// Which table family serves a request window, if any.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoutingDecision {
    UseHistory,
    UseTrends,
    /// The whole window predates the oldest retained rollup.
    TooOld,
    InvalidRange,
}

/// Classifies `[time_from, time_to]` against the per-item retention
/// cutoffs. Callers must reject `time_from > time_to` before calling.
pub fn classify(
    now: i64,
    time_from: i64,
    time_to: i64,
    history_retention_days: f64,
    trends_retention_days: f64,
) -> RoutingDecision {
    let history_cutoff = now - (history_retention_days * SECONDS_PER_DAY as f64) as i64;
    let trends_cutoff = now - (trends_retention_days * SECONDS_PER_DAY as f64) as i64;

    // The too-old check must run before the window-fit checks.
    if time_to < trends_cutoff {
        RoutingDecision::TooOld
    } else if time_from >= history_cutoff {
        RoutingDecision::UseHistory
    } else if time_to <= history_cutoff && time_from >= trends_cutoff {
        RoutingDecision::UseTrends
    } else if time_from < history_cutoff && time_to >= history_cutoff {
        // Straddles the raw/rollup boundary: serve rollups for the whole
        // window instead of merging the two sources.
        RoutingDecision::UseTrends
    } else {
        RoutingDecision::InvalidRange
    }
}
