use serde::Serialize;

/// One trigger event joined with its recovery event (if any).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AlertRecord {
    pub host: String,
    pub trigger_name: String,
    pub event_name: String,
    pub event_id: u64,
    pub acknowledged: bool,
    pub start_time: i64,
    /// Recovery clock, or "now" while the problem is still active.
    pub end_time: i64,
    pub duration: i64,
    pub recovery_event_id: Option<u64>,
}

/// Filters applied in memory after the full alert fetch.
#[derive(Debug, Clone, Default)]
pub struct AlertFilter {
    pub time_from: Option<i64>,
    pub time_to: Option<i64>,
    pub hostname: Option<String>,
    pub host_group: Option<String>,
    pub limit: Option<usize>,
}

/// Alerts grouped by event name with acknowledge counts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommonIssue {
    pub event_name: String,
    pub total_count: usize,
    pub acknowledged_count: usize,
    pub unacknowledged_count: usize,
}
