use chrono::{DateTime, Utc};
use tracing::{debug, info, warn};

use crate::constants::{SEED_GROWTH, SEED_RECENT_SCANS};
use crate::types::{DashboardResult, GrowthPoint, MetricsSnapshot, RecentScan};

/// Outcome of handing a completed fetch to the store
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchDisposition {
    /// 새 스냅샷 적용됨
    Applied,
    /// 실패 - 이전 값 유지
    Failed,
    /// 더 최근에 시작된 요청이 있어 무시됨
    Superseded,
}

/// Dashboard view-model
///
/// Holds the last successfully fetched snapshot plus the loading/refreshing
/// flags. Fetches are identified by a monotonically increasing generation;
/// only the most recently started one may change the snapshot.
#[derive(Debug, Clone)]
pub struct DashboardStore {
    snapshot: Option<MetricsSnapshot>,
    loading: bool,
    refreshing: bool,
    latest_started: u64,
    last_applied: u64,
    last_error: Option<String>,
    successes: u64,
    failures: u64,
    growth: Vec<GrowthPoint>,
    recent_scans: Vec<RecentScan>,
}

impl DashboardStore {
    pub fn new(growth: Vec<GrowthPoint>, recent_scans: Vec<RecentScan>) -> Self {
        Self {
            snapshot: None,
            loading: true,
            refreshing: false,
            latest_started: 0,
            last_applied: 0,
            last_error: None,
            successes: 0,
            failures: 0,
            growth,
            recent_scans,
        }
    }

    /// Store seeded with the 7-day growth series and the recent scan list
    pub fn seeded(now: DateTime<Utc>) -> Self {
        let growth = SEED_GROWTH
            .iter()
            .map(|(day, scans)| GrowthPoint { day: day.to_string(), scans: *scans })
            .collect();
        let recent_scans = SEED_RECENT_SCANS
            .iter()
            .map(|(minutes_ago, contract, score)| RecentScan::new(*minutes_ago, contract, *score, now))
            .collect();
        Self::new(growth, recent_scans)
    }

    pub fn begin_fetch(&mut self, generation: u64) {
        if generation > self.latest_started {
            self.latest_started = generation;
        }
        self.refreshing = true;
    }

    pub fn complete_fetch(
        &mut self,
        generation: u64,
        result: DashboardResult<MetricsSnapshot>,
    ) -> FetchDisposition {
        if generation < self.latest_started || generation <= self.last_applied {
            debug!("⏭️ 이전 요청 #{} 결과 무시 (최신 #{})", generation, self.latest_started);
            return FetchDisposition::Superseded;
        }
        self.refreshing = false;

        match result {
            Ok(snapshot) => {
                info!(
                    "✅ 지표 갱신 #{}: scans={} wallets={} prevented=${:.0} active={}",
                    generation, snapshot.scans, snapshot.wallets, snapshot.prevented, snapshot.active
                );
                self.update_growth(snapshot.scans);
                self.snapshot = Some(snapshot);
                self.last_applied = generation;
                self.loading = false;
                self.last_error = None;
                self.successes += 1;
                FetchDisposition::Applied
            }
            Err(e) => {
                // 실패 시 표시값은 그대로 유지
                warn!("⚠️ 지표 조회 실패 #{}: {}", generation, e);
                self.last_error = Some(e.to_string());
                self.failures += 1;
                FetchDisposition::Failed
            }
        }
    }

    /// 오늘(마지막) 포인트는 최신 스캔 수를 따라가며 감소하지 않음
    fn update_growth(&mut self, scans: u64) {
        if let Some(today) = self.growth.last_mut() {
            today.scans = today.scans.max(scans);
        }
    }

    pub fn snapshot(&self) -> Option<&MetricsSnapshot> {
        self.snapshot.as_ref()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn is_refreshing(&self) -> bool {
        self.refreshing
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn successes(&self) -> u64 {
        self.successes
    }

    pub fn failures(&self) -> u64 {
        self.failures
    }

    pub fn latest_started(&self) -> u64 {
        self.latest_started
    }

    pub fn growth(&self) -> &[GrowthPoint] {
        &self.growth
    }

    pub fn recent_scans(&self) -> &[RecentScan] {
        &self.recent_scans
    }
}
