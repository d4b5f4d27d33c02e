use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;
use tracing::debug;

/// Per-frame redraw signal tied to the dashboard lifetime
///
/// 느린 프레임은 건너뛰며(Skip) 취소되거나 수신측이 닫히면 종료됩니다.
pub struct FrameTicker;

impl FrameTicker {
    pub fn spawn(
        frame_interval: Duration,
        cancel: CancellationToken,
        frames: mpsc::Sender<Instant>,
    ) -> JoinHandle<()> {
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(frame_interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

            loop {
                tokio::select! {
                    _ = cancel.cancelled() => break,
                    at = ticker.tick() => {
                        // 이전 프레임이 아직 처리되지 않았으면 이번 프레임은 버림
                        match frames.try_send(at) {
                            Ok(()) | Err(mpsc::error::TrySendError::Full(_)) => {}
                            Err(mpsc::error::TrySendError::Closed(_)) => break,
                        }
                    }
                }
            }
            debug!("🎞️ 프레임 틱 중지됨");
        })
    }
}
