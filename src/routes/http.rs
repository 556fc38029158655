// GET handlers: version, metric queries, alert reports

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde::Deserialize;

use super::AppState;
use crate::alerts::DEFAULT_COMMON_ISSUES_LIMIT;
use crate::error::StoreError;
use crate::models::AlertFilter;
use crate::version::{NAME, VERSION};

/// GET /version — returns service name and version (from Cargo.toml at build time).
pub(super) async fn version_handler() -> impl IntoResponse {
    axum::Json(serde_json::json!({
        "name": NAME,
        "version": VERSION,
    }))
}

#[derive(Debug, Deserialize)]
pub(super) struct MetricQuery {
    host: String,
    metric: String,
    time_from: i64,
    time_to: i64,
    statistic: Option<String>,
}

/// GET /api/metric — one host, one metric, optional statistic.
pub(super) async fn metric_handler(
    State(state): State<AppState>,
    Query(q): Query<MetricQuery>,
) -> Result<impl IntoResponse, StatusCode> {
    let response = state
        .resolver
        .resolve(
            &q.host,
            &q.metric,
            q.time_from,
            q.time_to,
            q.statistic.as_deref(),
        )
        .await
        .map_err(internal_error)?;
    Ok(axum::Json(response))
}

#[derive(Debug, Deserialize)]
pub(super) struct MetricAllQuery {
    metric: String,
    statistic: Option<String>,
    time_from: Option<i64>,
    time_to: Option<i64>,
    limit: Option<usize>,
}

/// GET /api/metric/all — one metric across every enabled host exposing it.
pub(super) async fn metric_all_handler(
    State(state): State<AppState>,
    Query(q): Query<MetricAllQuery>,
) -> Result<impl IntoResponse, StatusCode> {
    let rows = state
        .aggregator
        .by_metric(
            &q.metric,
            q.statistic.as_deref(),
            q.time_from,
            q.time_to,
            q.limit,
        )
        .await
        .map_err(internal_error)?;
    Ok(axum::Json(rows))
}

#[derive(Debug, Deserialize)]
pub(super) struct AlertsQuery {
    time_from: Option<i64>,
    time_to: Option<i64>,
    host: Option<String>,
    group: Option<String>,
    limit: Option<usize>,
}

impl AlertsQuery {
    fn filter(&self) -> AlertFilter {
        AlertFilter {
            time_from: self.time_from,
            time_to: self.time_to,
            hostname: self.host.clone(),
            host_group: self.group.clone(),
            limit: self.limit,
        }
    }
}

/// GET /api/alerts — trigger events, most recent first.
pub(super) async fn alerts_handler(
    State(state): State<AppState>,
    Query(q): Query<AlertsQuery>,
) -> Result<impl IntoResponse, StatusCode> {
    let alerts = state
        .reporter
        .alerts(&q.filter())
        .await
        .map_err(internal_error)?;
    Ok(axum::Json(alerts))
}

/// GET /api/alerts/common — alerts grouped by event name, most frequent first.
pub(super) async fn common_issues_handler(
    State(state): State<AppState>,
    Query(q): Query<AlertsQuery>,
) -> Result<impl IntoResponse, StatusCode> {
    let limit = q.limit.unwrap_or(DEFAULT_COMMON_ISSUES_LIMIT);
    let issues = state
        .reporter
        .common_issues(&q.filter(), limit)
        .await
        .map_err(internal_error)?;
    Ok(axum::Json(issues))
}

fn internal_error(e: StoreError) -> StatusCode {
    tracing::error!(error = %e, "request aborted");
    StatusCode::INTERNAL_SERVER_ERROR
}
