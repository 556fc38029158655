// Domain models shared by the query engine and the HTTP layer

mod alert;
mod host;
mod item;
mod response;
mod sample;

pub use alert::{AlertFilter, AlertRecord, CommonIssue};
pub use host::HostStatus;
pub use item::{ItemDescriptor, TableKind, ValueKind};
pub use response::{FailureReason, HostMetricRow, MetricData, MetricResponse};
pub use sample::{Sample, SampleValue};
