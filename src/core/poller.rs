//! 지표 폴링 루프
//!
//! 고정 주기(기본 30초)로 스냅샷을 요청하고, 수동 새로고침 요청도 처리합니다.
//! 각 요청은 세대(generation) 번호를 갖고 별도 태스크에서 실행되며, 결과는
//! `PollEvent`로 UI 루프에 전달됩니다. 대시보드가 닫히면 `CancellationToken`으로
//! 루프와 진행 중인 요청이 함께 중단됩니다.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use crate::api::MetricsSource;
use crate::types::{DashboardResult, MetricsSnapshot};

/// Events emitted by the poller
#[derive(Debug)]
pub enum PollEvent {
    Started { generation: u64, manual: bool },
    Completed { generation: u64, result: DashboardResult<MetricsSnapshot> },
}

/// Handle owned by the mounted dashboard
#[derive(Debug)]
pub struct PollerHandle {
    refresh_tx: mpsc::UnboundedSender<()>,
    cancel: CancellationToken,
    join: JoinHandle<()>,
}

impl PollerHandle {
    /// Request a manual refresh. Returns false once the poller has stopped.
    pub fn refresh(&self) -> bool {
        self.refresh_tx.send(()).is_ok()
    }

    pub fn is_running(&self) -> bool {
        !self.join.is_finished()
    }

    /// Stop polling and wait for the loop to exit
    pub async fn shutdown(self) {
        self.cancel.cancel();
        let _ = self.join.await;
    }
}

pub struct Poller {
    source: Arc<dyn MetricsSource>,
    interval: Duration,
    cancel: CancellationToken,
    events: mpsc::UnboundedSender<PollEvent>,
    in_flight: Arc<AtomicUsize>,
    generation: u64,
}

impl Poller {
    /// Spawn the polling loop. The first fetch starts immediately.
    pub fn spawn(
        source: Arc<dyn MetricsSource>,
        interval: Duration,
        cancel: CancellationToken,
        events: mpsc::UnboundedSender<PollEvent>,
    ) -> PollerHandle {
        let (refresh_tx, refresh_rx) = mpsc::unbounded_channel();

        let poller = Self {
            source,
            interval,
            cancel: cancel.clone(),
            events,
            in_flight: Arc::new(AtomicUsize::new(0)),
            generation: 0,
        };
        let join = tokio::spawn(poller.run(refresh_rx));

        PollerHandle { refresh_tx, cancel, join }
    }

    async fn run(mut self, mut refresh_rx: mpsc::UnboundedReceiver<()>) {
        info!("⏰ 지표 폴링 시작 ({}, {}초 간격)", self.source.name(), self.interval.as_secs());

        let mut ticker = tokio::time::interval(self.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                _ = self.cancel.cancelled() => break,
                _ = ticker.tick() => {
                    // 주기 요청은 진행 중인 요청을 대체
                    self.start_fetch(false);
                }
                Some(()) = refresh_rx.recv() => {
                    if self.in_flight.load(Ordering::SeqCst) > 0 {
                        debug!("🔁 요청 진행 중 - 수동 새로고침 병합");
                    } else {
                        self.start_fetch(true);
                    }
                }
            }

            if self.events.is_closed() {
                break;
            }
        }

        info!("⏹️ 지표 폴링 중지됨");
    }

    fn start_fetch(&mut self, manual: bool) {
        self.generation += 1;
        let generation = self.generation;
        self.in_flight.fetch_add(1, Ordering::SeqCst);

        if self.events.send(PollEvent::Started { generation, manual }).is_err() {
            self.in_flight.fetch_sub(1, Ordering::SeqCst);
            return;
        }
        debug!("📡 스냅샷 요청 #{} (manual={})", generation, manual);

        let source = Arc::clone(&self.source);
        let cancel = self.cancel.clone();
        let events = self.events.clone();
        let in_flight = Arc::clone(&self.in_flight);

        tokio::spawn(async move {
            let result = tokio::select! {
                _ = cancel.cancelled() => None,
                result = source.fetch_snapshot() => Some(result),
            };
            in_flight.fetch_sub(1, Ordering::SeqCst);

            if let Some(result) = result {
                let _ = events.send(PollEvent::Completed { generation, result });
            }
        });
    }
}
