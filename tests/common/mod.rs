// Shared test helpers: in-memory store with call counters

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;

use metricgate::error::StoreError;
use metricgate::models::*;
use metricgate::stats::Operation;
use metricgate::store::{AlertStore, MetricStore};

/// In-memory collaborator double. Counters record how often each boundary
/// was crossed; `fetched_tables`/`fetched_measures` record what the
/// resolver asked the fetch boundary for.
#[derive(Default)]
pub struct MockStore {
    pub hosts: Vec<HostStatus>,
    pub items: Vec<ItemDescriptor>,
    /// Samples served for fetches against the given item id.
    pub samples: HashMap<u64, Vec<Sample>>,
    pub fail_fetch: bool,
    pub fail_item_contract: bool,
    pub host_status_calls: AtomicUsize,
    pub item_lookup_calls: AtomicUsize,
    pub fetch_calls: AtomicUsize,
    pub fetched_tables: Mutex<Vec<&'static str>>,
    pub fetched_measures: Mutex<Vec<Option<Operation>>>,
    pub alerts: Vec<AlertRecord>,
    pub groups: HashMap<String, Vec<String>>,
}

impl MockStore {
    pub fn collaborator_calls(&self) -> usize {
        self.host_status_calls.load(Ordering::SeqCst)
            + self.item_lookup_calls.load(Ordering::SeqCst)
            + self.fetch_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl MetricStore for MockStore {
    async fn host_status(&self, hostname: &str) -> Result<Option<HostStatus>, StoreError> {
        self.host_status_calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.hosts.iter().find(|h| h.name == hostname).cloned())
    }

    async fn item_descriptor(
        &self,
        hostname: &str,
        metric_name: &str,
    ) -> Result<Option<ItemDescriptor>, StoreError> {
        self.item_lookup_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_item_contract {
            return Err(StoreError::UnknownValueKind {
                item_id: 0,
                value_type: 9,
            });
        }
        Ok(self
            .items
            .iter()
            .find(|i| i.hostname == hostname && i.name == metric_name)
            .cloned())
    }

    async fn items_by_name(&self, metric_name: &str) -> Result<Vec<ItemDescriptor>, StoreError> {
        Ok(self
            .items
            .iter()
            .filter(|i| {
                i.name == metric_name
                    && self
                        .hosts
                        .iter()
                        .any(|h| h.name == i.hostname && h.enabled)
            })
            .cloned()
            .collect())
    }

    async fn fetch_samples(
        &self,
        item_id: u64,
        _time_from: i64,
        _time_to: i64,
        table: TableKind,
        measure: Option<Operation>,
    ) -> Result<Vec<Sample>, StoreError> {
        self.fetch_calls.fetch_add(1, Ordering::SeqCst);
        self.fetched_tables.lock().unwrap().push(table.table_name());
        self.fetched_measures.lock().unwrap().push(measure);
        if self.fail_fetch {
            return Err(StoreError::Query(sqlx::Error::PoolClosed));
        }
        Ok(self.samples.get(&item_id).cloned().unwrap_or_default())
    }
}

#[async_trait]
impl AlertStore for MockStore {
    async fn all_alerts(&self) -> Result<Vec<AlertRecord>, StoreError> {
        Ok(self.alerts.clone())
    }

    async fn hosts_in_group(&self, group: &str) -> Result<Vec<String>, StoreError> {
        Ok(self.groups.get(group).cloned().unwrap_or_default())
    }
}

pub fn host(id: u64, name: &str, enabled: bool) -> HostStatus {
    HostStatus {
        id,
        name: name.to_string(),
        enabled,
    }
}

pub fn item(
    item_id: u64,
    hostname: &str,
    name: &str,
    value_kind: ValueKind,
    enabled: bool,
) -> ItemDescriptor {
    ItemDescriptor {
        item_id,
        host_id: item_id,
        hostname: hostname.to_string(),
        name: name.to_string(),
        enabled,
        units: "%".to_string(),
        value_kind,
        history_retention: "7d".to_string(),
        trends_retention: "365d".to_string(),
    }
}

pub fn alert(host: &str, event_name: &str, event_id: u64, acknowledged: bool, start_time: i64) -> AlertRecord {
    AlertRecord {
        host: host.to_string(),
        trigger_name: format!("{event_name} trigger"),
        event_name: event_name.to_string(),
        event_id,
        acknowledged,
        start_time,
        end_time: start_time + 60,
        duration: 60,
        recovery_event_id: None,
    }
}
