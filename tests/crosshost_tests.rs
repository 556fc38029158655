// CrossHostAggregator tests: fan-out, ordering, partial failure

mod common;

use common::{MockStore, host, item};
use metricgate::crosshost::CrossHostAggregator;
use metricgate::models::{Sample, SampleValue, ValueKind};
use metricgate::resolver::MetricResolver;

fn aggregator(store: MockStore) -> CrossHostAggregator<MockStore> {
    CrossHostAggregator::new(MetricResolver::new(store), 4, 3_600)
}

fn now() -> i64 {
    chrono::Utc::now().timestamp()
}

#[tokio::test]
async fn rows_sort_by_value_descending_with_nulls_last() {
    let now = now();
    let store = MockStore {
        hosts: vec![
            host(1, "web-1", true),
            host(2, "web-2", true),
            host(3, "web-3", true),
        ],
        items: vec![
            item(1, "web-1", "CPU utilization", ValueKind::Float, true),
            item(2, "web-2", "CPU utilization", ValueKind::Float, true),
            item(3, "web-3", "CPU utilization", ValueKind::Float, true),
        ],
        // web-3 has no samples inside the window and yields a null row.
        samples: [
            (1, vec![Sample::num(now - 10, 3.0)]),
            (2, vec![Sample::num(now - 10, 8.0)]),
        ]
        .into(),
        ..Default::default()
    };
    let rows = aggregator(store)
        .by_metric("CPU utilization", None, None, None, None)
        .await
        .unwrap();

    let order: Vec<(&str, Option<&SampleValue>)> = rows
        .iter()
        .map(|r| (r.hostname.as_str(), r.value.as_ref()))
        .collect();
    assert_eq!(
        order,
        vec![
            ("web-2", Some(&SampleValue::Num(8.0))),
            ("web-1", Some(&SampleValue::Num(3.0))),
            ("web-3", None),
        ]
    );
    // Default statistic is "last", so populated rows keep their timestamp.
    assert_eq!(rows[0].timestamp, Some(now - 10));
    assert_eq!(rows[2].timestamp, None);
}

#[tokio::test]
async fn limit_truncates_after_sorting() {
    let now = now();
    let store = MockStore {
        hosts: vec![host(1, "web-1", true), host(2, "web-2", true)],
        items: vec![
            item(1, "web-1", "CPU utilization", ValueKind::Float, true),
            item(2, "web-2", "CPU utilization", ValueKind::Float, true),
        ],
        samples: [
            (1, vec![Sample::num(now - 10, 1.0)]),
            (2, vec![Sample::num(now - 10, 9.0)]),
        ]
        .into(),
        ..Default::default()
    };
    let rows = aggregator(store)
        .by_metric("CPU utilization", None, None, None, Some(1))
        .await
        .unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].hostname, "web-2");
}

#[tokio::test]
async fn failing_host_is_omitted_not_fatal() {
    let now = now();
    let store = MockStore {
        hosts: vec![host(1, "web-1", true), host(2, "web-2", true)],
        items: vec![
            item(1, "web-1", "CPU utilization", ValueKind::Float, true),
            // Disabled item makes web-2's resolution fail.
            item(2, "web-2", "CPU utilization", ValueKind::Float, false),
        ],
        samples: [(1, vec![Sample::num(now - 10, 4.0)])].into(),
        ..Default::default()
    };
    let rows = aggregator(store)
        .by_metric("CPU utilization", None, None, None, None)
        .await
        .unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].hostname, "web-1");
}

#[tokio::test]
async fn metric_on_no_host_yields_empty_list() {
    let rows = aggregator(MockStore::default())
        .by_metric("CPU utilization", None, None, None, None)
        .await
        .unwrap();
    assert!(rows.is_empty());
}

#[tokio::test]
async fn scalar_statistic_rows_carry_no_timestamp() {
    let now = now();
    let store = MockStore {
        hosts: vec![host(1, "web-1", true)],
        items: vec![item(1, "web-1", "CPU utilization", ValueKind::Float, true)],
        samples: [(1, vec![Sample::num(now - 10, 1.0), Sample::num(now - 20, 3.0)])].into(),
        ..Default::default()
    };
    let rows = aggregator(store)
        .by_metric("CPU utilization", Some("mean"), None, None, None)
        .await
        .unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].timestamp, None);
    assert_eq!(rows[0].value, Some(SampleValue::Num(2.0)));
    assert_eq!(rows[0].unit, "%");
}

#[tokio::test]
async fn explicit_window_overrides_the_default() {
    let now = now();
    let store = MockStore {
        hosts: vec![host(1, "web-1", true)],
        items: vec![item(1, "web-1", "CPU utilization", ValueKind::Float, true)],
        samples: [(1, vec![Sample::num(now - 7_000, 2.0)])].into(),
        ..Default::default()
    };
    let rows = aggregator(store)
        .by_metric(
            "CPU utilization",
            None,
            Some(now - 8_000),
            Some(now - 6_000),
            None,
        )
        .await
        .unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].value, Some(SampleValue::Num(2.0)));
}
