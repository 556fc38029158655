use serde::Serialize;

use super::sample::{Sample, SampleValue};
use crate::stats::Operation;

/// Failure taxonomy for metric requests. Every variant carries a
/// human-readable message for the API response.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "message", rename_all = "snake_case")]
pub enum FailureReason {
    InvalidInput(String),
    NotFound(String),
    Disabled(String),
    NoDataPath(String),
    CollaboratorFault(String),
    InsufficientSamples(String),
}

/// Result payload of a metric request. Which arm you get depends on the
/// requested statistic: none returns the raw rows, min/max return the tied
/// extremal samples, last returns one sample, the rest return a scalar.
/// An empty row set is `Samples(vec![])` for every shape: no data in range
/// is a success, not a failure.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum MetricData {
    Samples(Vec<Sample>),
    Sample(Sample),
    Scalar(f64),
}

impl MetricData {
    pub fn empty() -> Self {
        MetricData::Samples(Vec::new())
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, MetricData::Samples(v) if v.is_empty())
    }
}

/// Uniform response of the metric resolver.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum MetricResponse {
    Success {
        hostname: String,
        metric_name: String,
        unit: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        statistic: Option<Operation>,
        data: MetricData,
    },
    Failure {
        hostname: String,
        metric_name: String,
        unit: String,
        reason: FailureReason,
    },
}

/// One flattened row of a cross-host lookup. `timestamp` is absent for
/// scalar statistics; `value` is absent when the host had no data in range.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HostMetricRow {
    pub hostname: String,
    pub unit: String,
    pub timestamp: Option<i64>,
    pub value: Option<SampleValue>,
}
