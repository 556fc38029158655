// MySQL store over the Zabbix schema. Hosts with flags outside (0, 4) are
// discovery prototypes and are never returned.

use async_trait::async_trait;
use sqlx::Row;
use sqlx::mysql::{MySqlConnectOptions, MySqlPool, MySqlPoolOptions, MySqlRow};
use tracing::instrument;

use super::{AlertStore, MetricStore};
use crate::config::DatabaseConfig;
use crate::error::StoreError;
use crate::models::{AlertRecord, HostStatus, ItemDescriptor, Sample, SampleValue, TableKind, ValueKind};
use crate::stats::Operation;

#[derive(Clone)]
pub struct SqlStore {
    pool: MySqlPool,
}

impl SqlStore {
    pub async fn connect(cfg: &DatabaseConfig) -> anyhow::Result<Self> {
        let opts = MySqlConnectOptions::new()
            .host(&cfg.host)
            .port(cfg.port)
            .database(&cfg.database)
            .username(&cfg.user)
            .password(&cfg.password)
            .charset("utf8mb4");
        let pool = MySqlPoolOptions::new()
            .max_connections(cfg.max_pool_size)
            .connect_with(opts)
            .await?;
        Ok(Self { pool })
    }
}

const ITEM_COLUMNS: &str = "i.itemid, i.hostid, h.host, i.name, i.history, i.trends, \
                            i.value_type, i.status, i.units";

#[async_trait]
impl MetricStore for SqlStore {
    async fn host_status(&self, hostname: &str) -> Result<Option<HostStatus>, StoreError> {
        let row = sqlx::query(
            "SELECT h.hostid, h.host, h.status
             FROM hosts h
             WHERE h.host = ? AND h.flags IN (0, 4)",
        )
        .bind(hostname)
        .fetch_optional(&self.pool)
        .await?;

        let Some(row) = row else {
            return Ok(None);
        };
        Ok(Some(HostStatus {
            id: row.try_get("hostid")?,
            name: row.try_get("host")?,
            enabled: row.try_get::<i32, _>("status")? == 0,
        }))
    }

    async fn item_descriptor(
        &self,
        hostname: &str,
        metric_name: &str,
    ) -> Result<Option<ItemDescriptor>, StoreError> {
        let row = sqlx::query(&format!(
            "SELECT {ITEM_COLUMNS}
             FROM items i
             JOIN hosts h ON i.hostid = h.hostid
             WHERE h.host = ? AND i.name = ?"
        ))
        .bind(hostname)
        .bind(metric_name)
        .fetch_optional(&self.pool)
        .await?;

        row.as_ref().map(parse_item_row).transpose()
    }

    async fn items_by_name(&self, metric_name: &str) -> Result<Vec<ItemDescriptor>, StoreError> {
        let rows = sqlx::query(&format!(
            "SELECT {ITEM_COLUMNS}
             FROM items i
             JOIN hosts h ON i.hostid = h.hostid
             WHERE i.name = ? AND h.status = 0 AND h.flags IN (0, 4)
             ORDER BY h.host"
        ))
        .bind(metric_name)
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(parse_item_row).collect()
    }

    #[instrument(
        skip(self),
        fields(store = "mysql", operation = "fetch_samples", table = table.table_name())
    )]
    async fn fetch_samples(
        &self,
        item_id: u64,
        time_from: i64,
        time_to: i64,
        table: TableKind,
        measure: Option<Operation>,
    ) -> Result<Vec<Sample>, StoreError> {
        // Rollup tables keep min/avg/max per interval; serve the column
        // matching the requested statistic.
        let query = if table.is_trends() {
            let column = match measure {
                Some(Operation::Min) => "value_min",
                Some(Operation::Max) => "value_max",
                _ => "value_avg",
            };
            format!(
                "SELECT clock, {column} AS value FROM {table}
                 WHERE itemid = ? AND clock BETWEEN ? AND ?
                 ORDER BY clock DESC",
                table = table.table_name(),
            )
        } else {
            format!(
                "SELECT clock, value FROM {table}
                 WHERE itemid = ? AND clock BETWEEN ? AND ?
                 ORDER BY clock DESC",
                table = table.table_name(),
            )
        };

        let rows = sqlx::query(&query)
            .bind(item_id)
            .bind(time_from)
            .bind(time_to)
            .fetch_all(&self.pool)
            .await?;

        let mut out = Vec::with_capacity(rows.len());
        for row in rows {
            let clock: i64 = row.try_get("clock")?;
            let value = if table.is_text() {
                SampleValue::Text(row.try_get("value")?)
            } else if table.is_unsigned() {
                SampleValue::Num(row.try_get::<u64, _>("value")? as f64)
            } else {
                SampleValue::Num(row.try_get("value")?)
            };
            out.push(Sample {
                timestamp: clock,
                value,
            });
        }
        Ok(out)
    }
}

#[async_trait]
impl AlertStore for SqlStore {
    #[instrument(skip(self), fields(store = "mysql", operation = "all_alerts"))]
    async fn all_alerts(&self) -> Result<Vec<AlertRecord>, StoreError> {
        let rows = sqlx::query(
            "SELECT DISTINCT
                 h.name AS host,
                 t.description AS trigger_name,
                 e.name AS event_name,
                 e.eventid,
                 e.acknowledged,
                 e.clock AS start_time,
                 COALESCE(er.clock, UNIX_TIMESTAMP()) AS end_time,
                 COALESCE(er.clock, UNIX_TIMESTAMP()) - e.clock AS duration,
                 er.eventid AS recovery_eventid
             FROM hosts h
             JOIN items i ON i.hostid = h.hostid AND i.status = 0
             JOIN functions f ON f.itemid = i.itemid
             JOIN triggers t ON t.triggerid = f.triggerid AND t.status = 0
             JOIN events e ON e.objectid = t.triggerid AND e.object = 0 AND e.value = 1
             LEFT JOIN event_recovery erc ON erc.eventid = e.eventid
             LEFT JOIN events er ON er.eventid = erc.r_eventid
             WHERE h.status = 0
               AND h.flags IN (0, 4)",
        )
        .fetch_all(&self.pool)
        .await?;

        let mut out = Vec::with_capacity(rows.len());
        for row in rows {
            out.push(parse_alert_row(&row)?);
        }
        Ok(out)
    }

    async fn hosts_in_group(&self, group: &str) -> Result<Vec<String>, StoreError> {
        let rows = sqlx::query(
            "SELECT h.host
             FROM hstgrp g
             JOIN hosts_groups hg ON g.groupid = hg.groupid
             JOIN hosts h ON hg.hostid = h.hostid
             WHERE g.name = ?",
        )
        .bind(group)
        .fetch_all(&self.pool)
        .await?;

        rows.iter()
            .map(|row| row.try_get::<String, _>("host").map_err(StoreError::from))
            .collect()
    }
}

fn parse_item_row(row: &MySqlRow) -> Result<ItemDescriptor, StoreError> {
    let item_id: u64 = row.try_get("itemid")?;
    let value_type: i32 = row.try_get("value_type")?;
    let value_kind = ValueKind::from_raw(value_type).ok_or(StoreError::UnknownValueKind {
        item_id,
        value_type,
    })?;

    Ok(ItemDescriptor {
        item_id,
        host_id: row.try_get("hostid")?,
        hostname: row.try_get("host")?,
        name: row.try_get("name")?,
        enabled: row.try_get::<i32, _>("status")? == 0,
        units: row.try_get("units")?,
        value_kind,
        history_retention: row.try_get("history")?,
        trends_retention: row.try_get("trends")?,
    })
}

fn parse_alert_row(row: &MySqlRow) -> Result<AlertRecord, StoreError> {
    Ok(AlertRecord {
        host: row.try_get("host")?,
        trigger_name: row.try_get("trigger_name")?,
        event_name: row.try_get("event_name")?,
        event_id: row.try_get("eventid")?,
        acknowledged: row.try_get::<i32, _>("acknowledged")? == 1,
        start_time: row.try_get("start_time")?,
        end_time: row.try_get("end_time")?,
        duration: row.try_get("duration")?,
        recovery_event_id: row.try_get("recovery_eventid")?,
    })
}
