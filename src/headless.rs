//! Headless mode
//!
//! 터미널 UI 없이 폴링만 수행하며, 적용된 스냅샷과 실패를 로그로 남깁니다.

use std::future::Future;
use std::sync::Arc;

use chrono::Utc;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use crate::api::MetricsSource;
use crate::common::{format_price_usd, format_thousands, format_usd_compact};
use crate::config::Config;
use crate::core::{DashboardStore, FetchDisposition, PollEvent, Poller};

/// Poll until `shutdown` resolves, returning the final store state
pub async fn run<F>(config: &Config, source: Arc<dyn MetricsSource>, shutdown: F) -> DashboardStore
where
    F: Future<Output = ()>,
{
    let mut store = DashboardStore::seeded(Utc::now());

    let cancel = CancellationToken::new();
    let (tx, mut rx) = mpsc::unbounded_channel();
    let poller = Poller::spawn(source, config.poll_interval(), cancel, tx);

    tokio::pin!(shutdown);
    loop {
        tokio::select! {
            _ = &mut shutdown => {
                warn!("🛑 종료 신호 수신됨, 폴링 중지 중...");
                break;
            }
            event = rx.recv() => match event {
                Some(PollEvent::Started { generation, .. }) => store.begin_fetch(generation),
                Some(PollEvent::Completed { generation, result }) => {
                    if store.complete_fetch(generation, result) == FetchDisposition::Applied {
                        log_snapshot(&store);
                    }
                }
                None => break,
            }
        }
    }

    poller.shutdown().await;
    info!("📊 헤드리스 종료 - 성공 {}회, 실패 {}회", store.successes(), store.failures());
    store
}

fn log_snapshot(store: &DashboardStore) {
    if let Some(s) = store.snapshot() {
        info!(
            "🛡️ scans {} | wallets {} | prevented {} | active {} | BNB {}",
            format_thousands(s.scans),
            format_thousands(s.wallets),
            format_usd_compact(s.prevented),
            format_thousands(s.active),
            format_price_usd(s.bnb_price),
        );
    }
}
