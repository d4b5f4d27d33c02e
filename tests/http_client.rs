use std::time::Duration;

use httpmock::prelude::*;
use vibeguard_dashboard::api::{HttpMetricsClient, MetricsSource};
use vibeguard_dashboard::common::format_usd_compact;
use vibeguard_dashboard::types::DashboardError;

const STATS_BODY: &str = r#"{"blocks":12450,"wallets":1420,"nft_minted":873,"bnb_price":600}"#;
const GLOBAL_BODY: &str = r#"{"total_protected_usd":1420000}"#;

fn client(server: &MockServer) -> HttpMetricsClient {
    HttpMetricsClient::new(&server.base_url(), Duration::from_secs(5)).unwrap()
}

#[tokio::test]
async fn fetch_snapshot_merges_both_endpoints() {
    let server = MockServer::start_async().await;
    let stats = server
        .mock_async(|when, then| {
            when.method(GET).path("/api/stats");
            then.status(200)
                .header("content-type", "application/json")
                .body(STATS_BODY);
        })
        .await;
    let global = server
        .mock_async(|when, then| {
            when.method(GET).path("/api/global");
            then.status(200)
                .header("content-type", "application/json")
                .body(GLOBAL_BODY);
        })
        .await;

    let client = client(&server);
    let snapshot = client.fetch_snapshot().await.unwrap();

    stats.assert_async().await;
    global.assert_async().await;
    assert_eq!(snapshot.scans, 12_450);
    assert_eq!(snapshot.wallets, 1_420);
    assert_eq!(snapshot.active, 873);
    assert_eq!(snapshot.bnb_price, 600.0);
    assert_eq!(format_usd_compact(snapshot.prevented), "$1.4M");
    assert!(client.last_latency_ms().is_some());
}

#[tokio::test]
async fn unknown_fields_are_ignored() {
    let server = MockServer::start_async().await;
    let _stats = server
        .mock_async(|when, then| {
            when.method(GET).path("/api/stats");
            then.status(200)
                .header("content-type", "application/json")
                .body(r#"{"blocks":10,"wallets":2,"nft_minted":1,"bnb_price":612.5,"uptime":"99.9%"}"#);
        })
        .await;
    let _global = server
        .mock_async(|when, then| {
            when.method(GET).path("/api/global");
            then.status(200)
                .header("content-type", "application/json")
                .body(r#"{"total_protected_usd":999.0,"chains":["opbnb"]}"#);
        })
        .await;

    let snapshot = client(&server).fetch_snapshot().await.unwrap();
    assert_eq!(snapshot.scans, 10);
    assert_eq!(format_usd_compact(snapshot.prevented), "$999");
}

#[tokio::test]
async fn server_error_fails_whole_attempt() {
    let server = MockServer::start_async().await;
    let _stats = server
        .mock_async(|when, then| {
            when.method(GET).path("/api/stats");
            then.status(200)
                .header("content-type", "application/json")
                .body(STATS_BODY);
        })
        .await;
    let _global = server
        .mock_async(|when, then| {
            when.method(GET).path("/api/global");
            then.status(500).body("internal error");
        })
        .await;

    match client(&server).fetch_snapshot().await {
        Err(DashboardError::Status { endpoint, status }) => {
            assert_eq!(endpoint, "/api/global");
            assert_eq!(status, 500);
        }
        other => panic!("expected status error, got {:?}", other),
    }
}

#[tokio::test]
async fn missing_field_is_schema_error() {
    let server = MockServer::start_async().await;
    let _stats = server
        .mock_async(|when, then| {
            when.method(GET).path("/api/stats");
            then.status(200)
                .header("content-type", "application/json")
                .body(r#"{"blocks":12450,"nft_minted":873,"bnb_price":600}"#);
        })
        .await;
    let _global = server
        .mock_async(|when, then| {
            when.method(GET).path("/api/global");
            then.status(200)
                .header("content-type", "application/json")
                .body(GLOBAL_BODY);
        })
        .await;

    match client(&server).fetch_snapshot().await {
        Err(DashboardError::Schema { endpoint, field, .. }) => {
            assert_eq!(endpoint, "/api/stats");
            assert_eq!(field, "wallets");
        }
        other => panic!("expected schema error, got {:?}", other),
    }
}

#[tokio::test]
async fn non_json_body_is_decode_error() {
    let server = MockServer::start_async().await;
    let _stats = server
        .mock_async(|when, then| {
            when.method(GET).path("/api/stats");
            then.status(200)
                .header("content-type", "application/json")
                .body(STATS_BODY);
        })
        .await;
    let _global = server
        .mock_async(|when, then| {
            when.method(GET).path("/api/global");
            then.status(200).body("<html>maintenance</html>");
        })
        .await;

    let result = client(&server).fetch_snapshot().await;
    assert!(matches!(result, Err(DashboardError::Decode { .. })), "got {:?}", result);
}

#[tokio::test]
async fn negative_amount_is_rejected() {
    let server = MockServer::start_async().await;
    let _stats = server
        .mock_async(|when, then| {
            when.method(GET).path("/api/stats");
            then.status(200)
                .header("content-type", "application/json")
                .body(STATS_BODY);
        })
        .await;
    let _global = server
        .mock_async(|when, then| {
            when.method(GET).path("/api/global");
            then.status(200)
                .header("content-type", "application/json")
                .body(r#"{"total_protected_usd":-5}"#);
        })
        .await;

    let result = client(&server).fetch_snapshot().await;
    assert!(matches!(result, Err(DashboardError::Schema { .. })), "got {:?}", result);
}
