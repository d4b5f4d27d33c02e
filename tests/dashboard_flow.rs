use std::sync::Arc;
use std::time::{Duration, Instant};

use chrono::Utc;
use httpmock::prelude::*;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use vibeguard_dashboard::api::{HttpMetricsClient, MetricsSource};
use vibeguard_dashboard::config::Config;
use vibeguard_dashboard::core::{
    AnimationDurations, DashboardStore, FetchDisposition, MetricAnimator, PollEvent, Poller,
};

async fn mock_api(server: &MockServer) {
    server
        .mock_async(|when, then| {
            when.method(GET).path("/api/stats");
            then.status(200)
                .header("content-type", "application/json")
                .body(r#"{"blocks":12450,"wallets":1420,"nft_minted":873,"bnb_price":600}"#);
        })
        .await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/api/global");
            then.status(200)
                .header("content-type", "application/json")
                .body(r#"{"total_protected_usd":1420000}"#);
        })
        .await;
}

#[tokio::test]
async fn network_error_after_success_keeps_metrics() {
    let server = MockServer::start_async().await;
    mock_api(&server).await;

    let live = HttpMetricsClient::new(&server.base_url(), Duration::from_secs(5)).unwrap();
    // 127.0.0.1:9 - 연결 거부
    let offline = HttpMetricsClient::new("http://127.0.0.1:9", Duration::from_millis(500)).unwrap();

    let start = Instant::now();
    let mut store = DashboardStore::seeded(Utc::now());
    let mut animator = MetricAnimator::new(AnimationDurations::from(&Config::default().animation), start);

    store.begin_fetch(1);
    let first = live.fetch_snapshot().await;
    assert_eq!(store.complete_fetch(1, first), FetchDisposition::Applied);
    animator.set_target(store.snapshot().unwrap(), start);

    let settled = start + Duration::from_secs(3);
    let before = animator.displayed(settled);
    let before_snapshot = store.snapshot().cloned().unwrap();

    store.begin_fetch(2);
    let second = offline.fetch_snapshot().await;
    assert!(second.is_err());
    assert_eq!(store.complete_fetch(2, second), FetchDisposition::Failed);

    assert!(!store.is_loading());
    assert!(!store.is_refreshing());
    assert!(store.last_error().is_some());
    assert_eq!(store.snapshot().unwrap().scans, before_snapshot.scans);
    assert_eq!(store.snapshot().unwrap().prevented, before_snapshot.prevented);
    assert_eq!(animator.displayed(settled + Duration::from_secs(10)), before);
    assert_eq!(before.scans, 12_450);
}

#[tokio::test]
async fn poller_drives_store_with_manual_refresh() {
    let server = MockServer::start_async().await;
    mock_api(&server).await;

    let source: Arc<dyn MetricsSource> =
        Arc::new(HttpMetricsClient::new(&server.base_url(), Duration::from_secs(5)).unwrap());
    let cancel = CancellationToken::new();
    let (tx, mut rx) = mpsc::unbounded_channel();
    let handle = Poller::spawn(source, Duration::from_secs(3600), cancel.clone(), tx);

    let mut store = DashboardStore::seeded(Utc::now());
    let mut applied = 0;

    while applied < 2 {
        let event = tokio::time::timeout(Duration::from_secs(10), rx.recv())
            .await
            .expect("poller stalled")
            .expect("poller channel closed");

        match event {
            PollEvent::Started { generation, manual } => {
                // 첫 요청은 즉시(주기), 두 번째는 수동 새로고침
                assert_eq!(manual, generation > 1);
                store.begin_fetch(generation);
            }
            PollEvent::Completed { generation, result } => {
                assert_eq!(store.complete_fetch(generation, result), FetchDisposition::Applied);
                applied += 1;
                if applied == 1 {
                    assert!(handle.refresh());
                }
            }
        }
    }

    assert_eq!(store.successes(), 2);
    assert_eq!(store.latest_started(), 2);
    assert_eq!(store.growth().last().unwrap().scans, 12_450);

    handle.shutdown().await;
    assert!(cancel.is_cancelled());
}
