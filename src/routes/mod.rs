// HTTP routes: thin read-only API over the resolver, aggregator and
// reporter. All decision logic stays in the library modules.

mod http;

use std::sync::Arc;

use axum::{Router, routing::get};
use tower_http::cors::{Any, CorsLayer};

use crate::alerts::AlertReporter;
use crate::crosshost::CrossHostAggregator;
use crate::resolver::MetricResolver;
use crate::store::SqlStore;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) resolver: Arc<MetricResolver<SqlStore>>,
    pub(crate) aggregator: Arc<CrossHostAggregator<SqlStore>>,
    pub(crate) reporter: Arc<AlertReporter<SqlStore>>,
}

pub fn app(
    resolver: Arc<MetricResolver<SqlStore>>,
    aggregator: Arc<CrossHostAggregator<SqlStore>>,
    reporter: Arc<AlertReporter<SqlStore>>,
) -> Router {
    let state = AppState {
        resolver,
        aggregator,
        reporter,
    };
    Router::new()
        .route("/version", get(http::version_handler)) // GET /version
        .route("/api/metric", get(http::metric_handler)) // GET /api/metric
        .route("/api/metric/all", get(http::metric_all_handler)) // GET /api/metric/all
        .route("/api/alerts", get(http::alerts_handler)) // GET /api/alerts
        .route("/api/alerts/common", get(http::common_issues_handler)) // GET /api/alerts/common
        .layer(CorsLayer::new().allow_origin(Any))
        .with_state(state)
}
