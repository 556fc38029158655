// Pure sample reductions. No I/O; operates on whatever rows the store
// returned, duplicates included.

use std::str::FromStr;

use serde::Serialize;

use crate::error::StatsError;
use crate::models::{Sample, SampleValue};

/// Closed set of reductions. Parsed from the request before any data is
/// touched, so an unsupported name is rejected even on an empty sample set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Operation {
    Min,
    Max,
    Mean,
    Median,
    Stdev,
    Sum,
    Count,
    Range,
    Mad,
    Last,
}

impl Operation {
    pub fn name(self) -> &'static str {
        match self {
            Operation::Min => "min",
            Operation::Max => "max",
            Operation::Mean => "mean",
            Operation::Median => "median",
            Operation::Stdev => "stdev",
            Operation::Sum => "sum",
            Operation::Count => "count",
            Operation::Range => "range",
            Operation::Mad => "mad",
            Operation::Last => "last",
        }
    }
}

impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Operation {
    type Err = StatsError;

    fn from_str(s: &str) -> Result<Self, StatsError> {
        match s {
            "min" => Ok(Operation::Min),
            "max" => Ok(Operation::Max),
            // "avg" is the upstream alias; "mean" is canonical.
            "mean" | "avg" => Ok(Operation::Mean),
            "median" => Ok(Operation::Median),
            "stdev" => Ok(Operation::Stdev),
            "sum" => Ok(Operation::Sum),
            "count" => Ok(Operation::Count),
            "range" => Ok(Operation::Range),
            "mad" => Ok(Operation::Mad),
            "last" => Ok(Operation::Last),
            other => Err(StatsError::UnsupportedOperation(other.to_string())),
        }
    }
}

/// Shape of a reduction result; which arm you get depends on the operation.
#[derive(Debug, Clone, PartialEq)]
pub enum Reduced {
    /// All samples tied at the extremal value (min/max).
    Samples(Vec<Sample>),
    /// The most recent sample (last).
    Sample(Sample),
    Scalar(f64),
    /// No input rows. Not a failure.
    Empty,
}

/// Round to two decimals to absorb storage-layer float noise. Applied to
/// values before any reduction that compares or averages them.
pub fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}

pub fn reduce(samples: &[Sample], operation: Operation) -> Result<Reduced, StatsError> {
    if samples.is_empty() {
        return Ok(Reduced::Empty);
    }
    match operation {
        Operation::Last => Ok(Reduced::Sample(last(samples))),
        Operation::Count => Ok(Reduced::Scalar(samples.len() as f64)),
        Operation::Sum => {
            let values = numeric_values(samples, operation)?;
            Ok(Reduced::Scalar(values.iter().sum()))
        }
        Operation::Min | Operation::Max => extremal(samples, operation),
        Operation::Mean => Ok(Reduced::Scalar(mean(&rounded_values(samples, operation)?))),
        Operation::Median => Ok(Reduced::Scalar(median(&rounded_values(
            samples, operation,
        )?))),
        Operation::Stdev => {
            let values = rounded_values(samples, operation)?;
            if values.len() < 2 {
                return Err(StatsError::InsufficientSamples {
                    operation: "stdev",
                    needed: 2,
                    got: values.len(),
                });
            }
            let m = mean(&values);
            let var =
                values.iter().map(|v| (v - m).powi(2)).sum::<f64>() / (values.len() - 1) as f64;
            Ok(Reduced::Scalar(var.sqrt()))
        }
        Operation::Range => {
            let values = rounded_values(samples, operation)?;
            let min = values.iter().copied().fold(f64::INFINITY, f64::min);
            let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
            Ok(Reduced::Scalar(max - min))
        }
        Operation::Mad => {
            let values = rounded_values(samples, operation)?;
            let med = median(&values);
            let deviations: Vec<f64> = values.iter().map(|v| (v - med).abs()).collect();
            Ok(Reduced::Scalar(median(&deviations)))
        }
    }
}

/// First sample encountered at the maximum timestamp, so the tie-break is
/// deterministic for a given input ordering.
fn last(samples: &[Sample]) -> Sample {
    let mut best = &samples[0];
    for s in &samples[1..] {
        if s.timestamp > best.timestamp {
            best = s;
        }
    }
    best.clone()
}

/// All samples whose rounded value equals the extremal rounded value. Ties
/// are preserved as a set, not collapsed to one row.
fn extremal(samples: &[Sample], operation: Operation) -> Result<Reduced, StatsError> {
    let values = rounded_values(samples, operation)?;
    let target = match operation {
        Operation::Min => values.iter().copied().fold(f64::INFINITY, f64::min),
        _ => values.iter().copied().fold(f64::NEG_INFINITY, f64::max),
    };
    let out = samples
        .iter()
        .zip(&values)
        .filter(|(_, v)| **v == target)
        .map(|(s, v)| Sample {
            timestamp: s.timestamp,
            value: SampleValue::Num(*v),
        })
        .collect();
    Ok(Reduced::Samples(out))
}

fn numeric_values(samples: &[Sample], operation: Operation) -> Result<Vec<f64>, StatsError> {
    samples
        .iter()
        .map(|s| {
            s.value.as_f64().ok_or(StatsError::NonNumeric {
                operation: operation.name(),
            })
        })
        .collect()
}

fn rounded_values(samples: &[Sample], operation: Operation) -> Result<Vec<f64>, StatsError> {
    Ok(numeric_values(samples, operation)?
        .into_iter()
        .map(round2)
        .collect())
}

fn mean(values: &[f64]) -> f64 {
    values.iter().sum::<f64>() / values.len() as f64
}

fn median(values: &[f64]) -> f64 {
    let mut v = values.to_vec();
    v.sort_by(f64::total_cmp);
    let n = v.len();
    if n % 2 == 1 {
        v[n / 2]
    } else {
        (v[n / 2 - 1] + v[n / 2]) / 2.0
    }
}
