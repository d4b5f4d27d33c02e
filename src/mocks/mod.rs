pub mod metrics_mock;

pub use metrics_mock::MockMetricsSource;

use std::env;

/// Check if mock mode is enabled
pub fn is_mock_mode() -> bool {
    env::var("API_MODE").unwrap_or_default() == "mock"
}

/// Get mock configuration values
pub fn get_mock_config() -> MockConfig {
    MockConfig {
        network_latency: env::var("MOCK_NETWORK_LATENCY")
            .unwrap_or_else(|_| "800".to_string())
            .parse()
            .unwrap_or(800),
        max_scan_growth: env::var("MOCK_MAX_SCAN_GROWTH")
            .unwrap_or_else(|_| "50".to_string())
            .parse()
            .unwrap_or(50),
        max_wallet_growth: env::var("MOCK_MAX_WALLET_GROWTH")
            .unwrap_or_else(|_| "3".to_string())
            .parse()
            .unwrap_or(3),
        failure_rate: env::var("MOCK_FAILURE_RATE")
            .unwrap_or_else(|_| "0.0".to_string())
            .parse()
            .unwrap_or(0.0),
    }
}

#[derive(Debug, Clone)]
pub struct MockConfig {
    /// 응답 지연 (ms)
    pub network_latency: u64,
    /// 갱신마다 증가하는 스캔 수 상한 (exclusive)
    pub max_scan_growth: u64,
    /// 갱신마다 증가하는 지갑 수 상한 (exclusive)
    pub max_wallet_growth: u64,
    /// 0.0 ~ 1.0
    pub failure_rate: f64,
}

impl Default for MockConfig {
    fn default() -> Self {
        Self {
            network_latency: 0,
            max_scan_growth: 50,
            max_wallet_growth: 3,
            failure_rate: 0.0,
        }
    }
}
