use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};
use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use tracing::debug;

use crate::common::validation::{validate_global, validate_stats};
use crate::constants::{GLOBAL_PATH, STATS_PATH};
use crate::types::{
    DashboardError, DashboardResult, GlobalPayload, MetricsSnapshot, StatsPayload,
};

/// Source of dashboard metric snapshots
#[async_trait]
pub trait MetricsSource: Send + Sync + std::fmt::Debug {
    /// Source name for logs and the status bar
    fn name(&self) -> &str;

    /// Fetch and merge one snapshot. Any partial failure fails the whole attempt.
    async fn fetch_snapshot(&self) -> DashboardResult<MetricsSnapshot>;

    /// Latency of the last completed fetch in milliseconds
    fn last_latency_ms(&self) -> Option<u64> {
        None
    }
}

/// VibeGuard metrics API client
#[derive(Debug)]
pub struct HttpMetricsClient {
    client: Client,
    base_url: String,
    last_latency_ms: AtomicU64,
}

impl HttpMetricsClient {
    pub fn new(base_url: &str, timeout: Duration) -> DashboardResult<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("vibeguard-dashboard/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            last_latency_ms: AtomicU64::new(u64::MAX),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint_url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// GET a JSON document; non-2xx and undecodable bodies are errors
    async fn get_json(&self, path: &str) -> DashboardResult<Value> {
        let url = self.endpoint_url(path);
        debug!("🌐 GET {}", url);

        let response = self.client.get(&url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(DashboardError::Status {
                endpoint: path.to_string(),
                status: status.as_u16(),
            });
        }

        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| DashboardError::Decode {
            endpoint: path.to_string(),
            message: e.to_string(),
        })
    }

    pub async fn fetch_stats(&self) -> DashboardResult<StatsPayload> {
        let body = self.get_json(STATS_PATH).await?;
        validate_stats(&body)
    }

    pub async fn fetch_global(&self) -> DashboardResult<GlobalPayload> {
        let body = self.get_json(GLOBAL_PATH).await?;
        validate_global(&body)
    }
}

#[async_trait]
impl MetricsSource for HttpMetricsClient {
    fn name(&self) -> &str {
        &self.base_url
    }

    async fn fetch_snapshot(&self) -> DashboardResult<MetricsSnapshot> {
        let start_time = Instant::now();

        // 두 요청을 동시에 보내고 하나라도 실패하면 전체 실패
        let (stats, global) = tokio::try_join!(self.fetch_stats(), self.fetch_global())?;

        let latency = start_time.elapsed().as_millis() as u64;
        self.last_latency_ms.store(latency, Ordering::Relaxed);
        debug!("📥 스냅샷 수신 완료 ({}ms)", latency);

        Ok(MetricsSnapshot::from_payloads(&stats, &global))
    }

    fn last_latency_ms(&self) -> Option<u64> {
        match self.last_latency_ms.load(Ordering::Relaxed) {
            u64::MAX => None,
            latency => Some(latency),
        }
    }
}
