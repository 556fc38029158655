// Cross-host fan-out: one metric name resolved on every enabled host that
// exposes it, flattened to rows sorted by value. Per-host resolutions are
// independent, so they run concurrently up to a configured bound; results
// are collected in full before sorting.

use std::cmp::Ordering;

use futures_util::{StreamExt, stream};
use tracing::warn;

use crate::error::StoreError;
use crate::models::{HostMetricRow, MetricData, MetricResponse, SampleValue};
use crate::resolver::{MetricResolver, unix_now};
use crate::store::MetricStore;

pub const DEFAULT_STATISTIC: &str = "last";

pub struct CrossHostAggregator<S> {
    resolver: MetricResolver<S>,
    concurrency: usize,
    default_window_secs: i64,
}

impl<S: MetricStore> CrossHostAggregator<S> {
    pub fn new(resolver: MetricResolver<S>, concurrency: usize, default_window_secs: i64) -> Self {
        Self {
            resolver,
            concurrency,
            default_window_secs,
        }
    }

    pub fn resolver(&self) -> &MetricResolver<S> {
        &self.resolver
    }

    /// Looks up `metric_name` on every enabled host that exposes it and
    /// flattens the per-host results into rows sorted by value descending,
    /// nulls last. `limit` truncates after the sort, never before. A host
    /// whose resolution fails is omitted; a metric on zero hosts yields an
    /// empty list, not a failure.
    pub async fn by_metric(
        &self,
        metric_name: &str,
        statistic: Option<&str>,
        time_from: Option<i64>,
        time_to: Option<i64>,
        limit: Option<usize>,
    ) -> Result<Vec<HostMetricRow>, StoreError> {
        let items = self.resolver.store().items_by_name(metric_name).await?;

        let statistic = statistic.unwrap_or(DEFAULT_STATISTIC);
        let time_to = time_to.unwrap_or_else(unix_now);
        let time_from = time_from.unwrap_or(time_to - self.default_window_secs);

        // Distinct hosts in first-seen order; the resolver re-reads the
        // item metadata itself.
        let mut hosts: Vec<String> = Vec::new();
        for item in &items {
            if !hosts.contains(&item.hostname) {
                hosts.push(item.hostname.clone());
            }
        }

        let resolver = &self.resolver;
        let results: Vec<(String, Result<MetricResponse, StoreError>)> = stream::iter(hosts)
            .map(|host| async move {
                let resolved = resolver
                    .resolve(&host, metric_name, time_from, time_to, Some(statistic))
                    .await;
                (host, resolved)
            })
            .buffer_unordered(self.concurrency.max(1))
            .collect()
            .await;

        let mut rows: Vec<HostMetricRow> = Vec::new();
        for (host, result) in results {
            match result {
                Ok(MetricResponse::Success { unit, data, .. }) => {
                    flatten(host, unit, data, &mut rows);
                }
                Ok(MetricResponse::Failure { reason, .. }) => {
                    warn!(host = %host, metric = metric_name, ?reason, "host omitted from cross-host lookup");
                }
                Err(e) => {
                    warn!(host = %host, metric = metric_name, error = %e, "host omitted from cross-host lookup");
                }
            }
        }

        rows.sort_by(compare_rows);
        if let Some(limit) = limit {
            rows.truncate(limit);
        }
        Ok(rows)
    }
}

/// One row per sample; scalar results get a null timestamp, empty results
/// a null value, so hosts without data still show up (sorted last).
fn flatten(hostname: String, unit: String, data: MetricData, out: &mut Vec<HostMetricRow>) {
    match data {
        MetricData::Samples(samples) if samples.is_empty() => out.push(HostMetricRow {
            hostname,
            unit,
            timestamp: None,
            value: None,
        }),
        MetricData::Samples(samples) => {
            for s in samples {
                out.push(HostMetricRow {
                    hostname: hostname.clone(),
                    unit: unit.clone(),
                    timestamp: Some(s.timestamp),
                    value: Some(s.value),
                });
            }
        }
        MetricData::Sample(s) => out.push(HostMetricRow {
            hostname,
            unit,
            timestamp: Some(s.timestamp),
            value: Some(s.value),
        }),
        MetricData::Scalar(v) => out.push(HostMetricRow {
            hostname,
            unit,
            timestamp: None,
            value: Some(SampleValue::Num(v)),
        }),
    }
}

/// Numeric values descending, then text descending, nulls last.
fn compare_rows(a: &HostMetricRow, b: &HostMetricRow) -> Ordering {
    match (&a.value, &b.value) {
        (Some(SampleValue::Num(x)), Some(SampleValue::Num(y))) => y.total_cmp(x),
        (Some(SampleValue::Num(_)), Some(SampleValue::Text(_))) => Ordering::Less,
        (Some(SampleValue::Text(_)), Some(SampleValue::Num(_))) => Ordering::Greater,
        (Some(SampleValue::Text(x)), Some(SampleValue::Text(y))) => y.cmp(x),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}
