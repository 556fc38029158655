// Alert reporting: trigger-event listing and recurring-issue grouping.
// Plain vectors with explicit comparators; no shared state with the metric
// engine.

use std::collections::HashMap;

use crate::error::StoreError;
use crate::models::{AlertFilter, AlertRecord, CommonIssue};
use crate::store::AlertStore;

pub const DEFAULT_COMMON_ISSUES_LIMIT: usize = 10;

pub struct AlertReporter<S> {
    store: S,
}

impl<S: AlertStore> AlertReporter<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// All alerts matching the filter, most recent first. Time bounds are
    /// inclusive and apply to the event start time.
    pub async fn alerts(&self, filter: &AlertFilter) -> Result<Vec<AlertRecord>, StoreError> {
        let mut alerts = self.store.all_alerts().await?;

        if let Some(group) = &filter.host_group {
            let members = self.store.hosts_in_group(group).await?;
            alerts.retain(|a| members.contains(&a.host));
        }
        if let Some(from) = filter.time_from {
            alerts.retain(|a| a.start_time >= from);
        }
        if let Some(to) = filter.time_to {
            alerts.retain(|a| a.start_time <= to);
        }
        if let Some(host) = &filter.hostname {
            alerts.retain(|a| &a.host == host);
        }

        alerts.sort_by(|a, b| b.start_time.cmp(&a.start_time));
        if let Some(limit) = filter.limit {
            alerts.truncate(limit);
        }
        Ok(alerts)
    }

    /// Alerts grouped by event name with acknowledge counts, most frequent
    /// first. `limit` caps the number of groups, not the alerts fed into
    /// them; the filter's own limit is ignored for the same reason.
    pub async fn common_issues(
        &self,
        filter: &AlertFilter,
        limit: usize,
    ) -> Result<Vec<CommonIssue>, StoreError> {
        let unlimited = AlertFilter {
            limit: None,
            ..filter.clone()
        };
        let alerts = self.alerts(&unlimited).await?;

        let mut by_name: HashMap<String, CommonIssue> = HashMap::new();
        for a in alerts {
            let entry = by_name
                .entry(a.event_name.clone())
                .or_insert_with(|| CommonIssue {
                    event_name: a.event_name.clone(),
                    total_count: 0,
                    acknowledged_count: 0,
                    unacknowledged_count: 0,
                });
            entry.total_count += 1;
            if a.acknowledged {
                entry.acknowledged_count += 1;
            } else {
                entry.unacknowledged_count += 1;
            }
        }

        let mut out: Vec<CommonIssue> = by_name.into_values().collect();
        // Name tie-break keeps the order deterministic.
        out.sort_by(|a, b| {
            b.total_count
                .cmp(&a.total_count)
                .then_with(|| a.event_name.cmp(&b.event_name))
        });
        out.truncate(limit);
        Ok(out)
    }
}
