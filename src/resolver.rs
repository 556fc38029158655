// One metric-data request end to end: validate the window, check host and
// item status, route to history or trends, fetch, optionally reduce.

use std::str::FromStr;

use crate::error::{StatsError, StoreError};
use crate::models::{FailureReason, MetricData, MetricResponse};
use crate::retention::{self, RoutingDecision};
use crate::stats::{self, Operation, Reduced};
use crate::store::MetricStore;

pub struct MetricResolver<S> {
    store: S,
}

impl<S: MetricStore> MetricResolver<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Resolves one metric request against the current wall clock.
    ///
    /// Every user-facing problem comes back as a `Failure` response; the
    /// only `Err` is a collaborator contract breach, which aborts the
    /// request instead of masquerading as a normal error.
    pub async fn resolve(
        &self,
        hostname: &str,
        metric_name: &str,
        time_from: i64,
        time_to: i64,
        statistic: Option<&str>,
    ) -> Result<MetricResponse, StoreError> {
        self.resolve_at(unix_now(), hostname, metric_name, time_from, time_to, statistic)
            .await
    }

    /// Same as [`resolve`](Self::resolve) with an explicit clock, so
    /// routing is testable.
    pub async fn resolve_at(
        &self,
        now: i64,
        hostname: &str,
        metric_name: &str,
        time_from: i64,
        time_to: i64,
        statistic: Option<&str>,
    ) -> Result<MetricResponse, StoreError> {
        // Rejected before any collaborator call.
        if time_from > time_to {
            return Ok(failure(
                hostname,
                metric_name,
                "unknown",
                FailureReason::InvalidInput(
                    "invalid time range: time_from must not exceed time_to".into(),
                ),
            ));
        }

        let host = match self.store.host_status(hostname).await {
            Ok(host) => host,
            Err(e) => return fault(e, hostname, metric_name, "unknown"),
        };
        let item = match self.store.item_descriptor(hostname, metric_name).await {
            Ok(item) => item,
            Err(e) => return fault(e, hostname, metric_name, "unknown"),
        };

        let Some(item) = item else {
            return Ok(failure(
                hostname,
                metric_name,
                "unknown",
                FailureReason::NotFound(format!(
                    "item '{metric_name}' not found for host '{hostname}'"
                )),
            ));
        };
        // Host and item status are independent: a disabled host can still
        // carry individually enabled items.
        let Some(host) = host else {
            return Ok(failure(
                hostname,
                metric_name,
                &item.units,
                FailureReason::NotFound(format!("host '{hostname}' not found")),
            ));
        };
        if !host.enabled {
            return Ok(failure(
                hostname,
                metric_name,
                &item.units,
                FailureReason::Disabled(format!("host '{hostname}' is disabled")),
            ));
        }
        if !item.enabled {
            return Ok(failure(
                hostname,
                metric_name,
                &item.units,
                FailureReason::Disabled(format!("item '{metric_name}' is disabled")),
            ));
        }

        // Non-numeric kinds cannot be averaged or summed: statistics other
        // than "last" are dropped by policy, not rejected.
        let statistic = if item.value_kind.is_numeric() {
            statistic
        } else {
            statistic.filter(|s| *s == "last")
        };

        let operation = match statistic {
            Some(name) => match Operation::from_str(name) {
                Ok(op) => Some(op),
                Err(_) => {
                    return Ok(failure(
                        hostname,
                        metric_name,
                        &item.units,
                        FailureReason::InvalidInput(format!("invalid statistic: {name}")),
                    ));
                }
            },
            None => None,
        };

        let decision = if item.value_kind.is_numeric() {
            retention::classify(
                now,
                time_from,
                time_to,
                retention::parse_days(&item.history_retention),
                retention::parse_days(&item.trends_retention),
            )
        } else {
            // String/log/text items keep no rollups; always read raw rows.
            RoutingDecision::UseHistory
        };

        let table = match decision {
            RoutingDecision::UseHistory => item.value_kind.history_table(),
            RoutingDecision::UseTrends => match item.value_kind.trends_table() {
                Some(table) => table,
                None => {
                    return Ok(failure(
                        hostname,
                        metric_name,
                        &item.units,
                        FailureReason::NoDataPath(format!(
                            "no valid table for value kind {}",
                            item.value_kind.name()
                        )),
                    ));
                }
            },
            // Out-of-retention or unclassifiable windows are empty
            // successes: absence of data in range is not a fault.
            RoutingDecision::TooOld | RoutingDecision::InvalidRange => {
                return Ok(MetricResponse::Success {
                    hostname: hostname.to_string(),
                    metric_name: metric_name.to_string(),
                    unit: item.units.clone(),
                    statistic: operation,
                    data: MetricData::empty(),
                });
            }
        };

        let rows = match self
            .store
            .fetch_samples(item.item_id, time_from, time_to, table, operation)
            .await
        {
            Ok(rows) => rows,
            Err(e) => return fault(e, hostname, metric_name, &item.units),
        };

        let data = match operation {
            Some(op) => match stats::reduce(&rows, op) {
                Ok(reduced) => reduced_to_data(reduced),
                Err(e) => {
                    return Ok(failure(
                        hostname,
                        metric_name,
                        &item.units,
                        stats_failure(e),
                    ));
                }
            },
            None => MetricData::Samples(rows),
        };

        Ok(MetricResponse::Success {
            hostname: hostname.to_string(),
            metric_name: metric_name.to_string(),
            unit: item.units.clone(),
            statistic: operation,
            data,
        })
    }
}

pub(crate) fn unix_now() -> i64 {
    chrono::Utc::now().timestamp()
}

fn failure(hostname: &str, metric_name: &str, unit: &str, reason: FailureReason) -> MetricResponse {
    MetricResponse::Failure {
        hostname: hostname.to_string(),
        metric_name: metric_name.to_string(),
        unit: unit.to_string(),
        reason,
    }
}

/// Query faults become failure responses; a contract breach aborts.
fn fault(
    e: StoreError,
    hostname: &str,
    metric_name: &str,
    unit: &str,
) -> Result<MetricResponse, StoreError> {
    match e {
        StoreError::UnknownValueKind { .. } => Err(e),
        other => Ok(failure(
            hostname,
            metric_name,
            unit,
            FailureReason::CollaboratorFault(format!("query failed: {other}")),
        )),
    }
}

fn stats_failure(e: StatsError) -> FailureReason {
    match e {
        StatsError::InsufficientSamples { .. } => FailureReason::InsufficientSamples(e.to_string()),
        other => FailureReason::InvalidInput(other.to_string()),
    }
}

fn reduced_to_data(reduced: Reduced) -> MetricData {
    match reduced {
        Reduced::Samples(samples) => MetricData::Samples(samples),
        Reduced::Sample(sample) => MetricData::Sample(sample),
        Reduced::Scalar(value) => MetricData::Scalar(value),
        Reduced::Empty => MetricData::empty(),
    }
}
