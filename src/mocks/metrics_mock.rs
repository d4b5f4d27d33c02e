use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Mutex;
use async_trait::async_trait;
use rand::Rng;
use tracing::{debug, info};

use crate::api::MetricsSource;
use crate::constants::STATS_PATH;
use crate::types::{DashboardError, DashboardResult, GlobalPayload, MetricsSnapshot, StatsPayload};
use super::MockConfig;

/// Offline metrics source
///
/// 초기값에서 시작해 호출마다 스캔/지갑 수가 조금씩 증가합니다.
#[derive(Debug)]
pub struct MockMetricsSource {
    mock_config: MockConfig,
    stats: Mutex<StatsPayload>,
    global: Mutex<GlobalPayload>,
    failing: AtomicBool,
    fetch_count: AtomicU64,
}

impl MockMetricsSource {
    pub fn new(mock_config: MockConfig) -> Self {
        info!("🎭 MockMetricsSource initialized");
        debug!("Mock network latency: {}ms", mock_config.network_latency);

        Self {
            mock_config,
            stats: Mutex::new(StatsPayload {
                blocks: 12_450,
                wallets: 1_420,
                nft_minted: 873,
                bnb_price: 600.0,
            }),
            global: Mutex::new(GlobalPayload { total_protected_usd: 1_420_000.0 }),
            failing: AtomicBool::new(false),
            fetch_count: AtomicU64::new(0),
        }
    }

    /// Force every following fetch to fail (or succeed again)
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    pub fn fetch_count(&self) -> u64 {
        self.fetch_count.load(Ordering::SeqCst)
    }

    fn should_fail(&self) -> bool {
        if self.failing.load(Ordering::SeqCst) {
            return true;
        }
        self.mock_config.failure_rate > 0.0
            && rand::thread_rng().gen_bool(self.mock_config.failure_rate.clamp(0.0, 1.0))
    }

    fn advance(&self) -> MetricsSnapshot {
        let mut stats = self.stats.lock().unwrap_or_else(|e| e.into_inner());
        let global = self.global.lock().unwrap_or_else(|e| e.into_inner());

        let mut rng = rand::thread_rng();
        if self.mock_config.max_scan_growth > 0 {
            stats.blocks += rng.gen_range(0..self.mock_config.max_scan_growth);
        }
        if self.mock_config.max_wallet_growth > 0 {
            stats.wallets += rng.gen_range(0..self.mock_config.max_wallet_growth);
        }

        MetricsSnapshot::from_payloads(&stats, &global)
    }
}

#[async_trait]
impl MetricsSource for MockMetricsSource {
    fn name(&self) -> &str {
        "mock"
    }

    async fn fetch_snapshot(&self) -> DashboardResult<MetricsSnapshot> {
        self.fetch_count.fetch_add(1, Ordering::SeqCst);

        if self.mock_config.network_latency > 0 {
            tokio::time::sleep(tokio::time::Duration::from_millis(self.mock_config.network_latency)).await;
        }

        if self.should_fail() {
            debug!("🎭 [MOCK] 스냅샷 요청 실패 시뮬레이션");
            return Err(DashboardError::Status {
                endpoint: STATS_PATH.to_string(),
                status: 503,
            });
        }

        let snapshot = self.advance();
        debug!("🎭 [MOCK] scans={} wallets={}", snapshot.scans, snapshot.wallets);
        Ok(snapshot)
    }

    fn last_latency_ms(&self) -> Option<u64> {
        Some(self.mock_config.network_latency)
    }
}
