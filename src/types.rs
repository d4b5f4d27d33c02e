use serde::{Deserialize, Serialize};
use chrono::{DateTime, Duration, Utc};

use crate::constants::DRAINER_SCORE_THRESHOLD;

/// 대시보드 카운터에 표시되는 지표 스냅샷
///
/// `/api/stats`와 `/api/global` 두 응답을 병합한 결과입니다.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MetricsSnapshot {
    /// 총 스캔 수 (remote `blocks`)
    pub scans: u64,
    /// 보호 중인 지갑 수 (remote `wallets`)
    pub wallets: u64,
    /// 방지된 손실 USD (remote `total_protected_usd`)
    pub prevented: f64,
    /// 활성 보호 수 (remote `nft_minted`)
    pub active: u64,
    /// BNB 가격 USD (remote `bnb_price`)
    pub bnb_price: f64,
    pub fetched_at: DateTime<Utc>,
}

impl MetricsSnapshot {
    pub fn from_payloads(stats: &StatsPayload, global: &GlobalPayload) -> Self {
        Self {
            scans: stats.blocks,
            wallets: stats.wallets,
            prevented: global.total_protected_usd,
            active: stats.nft_minted,
            bnb_price: stats.bnb_price,
            fetched_at: Utc::now(),
        }
    }
}

/// Validated shape of `GET /api/stats`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StatsPayload {
    pub blocks: u64,
    pub wallets: u64,
    pub nft_minted: u64,
    pub bnb_price: f64,
}

/// Validated shape of `GET /api/global`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GlobalPayload {
    pub total_protected_usd: f64,
}

/// 컨트랙트 스캔 판정
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum ScanStatus {
    Safe,
    Drainer,
}

impl ScanStatus {
    pub fn from_score(score: u8) -> Self {
        if score < DRAINER_SCORE_THRESHOLD {
            ScanStatus::Drainer
        } else {
            ScanStatus::Safe
        }
    }
}

impl std::fmt::Display for ScanStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ScanStatus::Safe => write!(f, "SAFE"),
            ScanStatus::Drainer => write!(f, "DRAINER"),
        }
    }
}

/// Recent contract scan row
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RecentScan {
    pub detected_at: DateTime<Utc>,
    pub contract: String,
    pub score: u8,
    pub status: ScanStatus,
}

impl RecentScan {
    pub fn new(minutes_ago: i64, contract: &str, score: u8, now: DateTime<Utc>) -> Self {
        Self {
            detected_at: now - Duration::minutes(minutes_ago),
            contract: contract.to_string(),
            score,
            status: ScanStatus::from_score(score),
        }
    }
}

/// Scan growth chart point
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct GrowthPoint {
    pub day: String,
    pub scans: u64,
}

/// Error types
#[derive(thiserror::Error, Debug)]
pub enum DashboardError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Unexpected status {status} from {endpoint}")]
    Status { endpoint: String, status: u16 },

    #[error("Decode error from {endpoint}: {message}")]
    Decode { endpoint: String, message: String },

    #[error("Schema error in {endpoint}: field `{field}` {reason}")]
    Schema { endpoint: String, field: String, reason: String },

    #[error("Configuration error: {0}")]
    Config(String),
}

/// Result type alias
pub type DashboardResult<T> = Result<T, DashboardError>;
