use serde::Serialize;

/// A stored measurement value. Numeric tables decode to `Num`; the
/// string/log/text history tables decode to `Text`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum SampleValue {
    Num(f64),
    Text(String),
}

impl SampleValue {
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            SampleValue::Num(v) => Some(*v),
            SampleValue::Text(_) => None,
        }
    }
}

/// One timestamped measurement as returned by the sample fetch collaborator.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Sample {
    /// Unix seconds (the `clock` column).
    pub timestamp: i64,
    pub value: SampleValue,
}

impl Sample {
    pub fn num(timestamp: i64, value: f64) -> Self {
        Self {
            timestamp,
            value: SampleValue::Num(value),
        }
    }

    pub fn text(timestamp: i64, value: impl Into<String>) -> Self {
        Self {
            timestamp,
            value: SampleValue::Text(value.into()),
        }
    }
}
