// Store collaborators: metadata lookup, sample fetch, alert listing.
// The core only ever sees these traits; the MySQL implementation lives in
// store::mysql.

mod mysql;

pub use mysql::SqlStore;

use async_trait::async_trait;

use crate::error::StoreError;
use crate::models::{AlertRecord, HostStatus, ItemDescriptor, Sample, TableKind};
use crate::stats::Operation;

/// Metadata and sample access for the metric engine.
///
/// Implementations return sample rows ordered by clock descending and may
/// only touch tables named by [`TableKind`]; the enum is the allow-list
/// that keeps request-derived strings out of the SQL text.
#[async_trait]
pub trait MetricStore: Send + Sync {
    /// Host snapshot by hostname, or `None` if the host does not exist.
    async fn host_status(&self, hostname: &str) -> Result<Option<HostStatus>, StoreError>;

    /// Item metadata for one (host, metric) pair.
    async fn item_descriptor(
        &self,
        hostname: &str,
        metric_name: &str,
    ) -> Result<Option<ItemDescriptor>, StoreError>;

    /// All items with the given name on enabled hosts.
    async fn items_by_name(&self, metric_name: &str) -> Result<Vec<ItemDescriptor>, StoreError>;

    /// Samples for one item in `[time_from, time_to]`, newest first.
    /// `measure` selects the value column on rollup tables (min/max pick
    /// the matching bound, everything else reads the average).
    async fn fetch_samples(
        &self,
        item_id: u64,
        time_from: i64,
        time_to: i64,
        table: TableKind,
        measure: Option<Operation>,
    ) -> Result<Vec<Sample>, StoreError>;
}

/// Alert listing and host-group membership for the reporting layer.
#[async_trait]
pub trait AlertStore: Send + Sync {
    /// Every problem event with its recovery event joined in, unfiltered.
    async fn all_alerts(&self) -> Result<Vec<AlertRecord>, StoreError>;

    /// Hostnames belonging to the named host group.
    async fn hosts_in_group(&self, group: &str) -> Result<Vec<String>, StoreError>;
}
