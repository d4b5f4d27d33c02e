//! 카운터 애니메이션
//!
//! 새 스냅샷이 적용되면 각 지표는 현재 표시값에서 새 값까지
//! 지표별 고정 시간 동안 선형 보간됩니다. 프레임 틱마다 `displayed(now)`를
//! 호출해 현재 표시값을 얻습니다.

use std::time::{Duration, Instant};

use crate::config::AnimationConfig;
use crate::types::MetricsSnapshot;

/// Linear interpolation of one value toward a target
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tween {
    from: f64,
    to: f64,
    started_at: Instant,
    duration: Duration,
}

impl Tween {
    /// A tween already resting at `value`
    pub fn settled(value: f64, now: Instant) -> Self {
        Self {
            from: value,
            to: value,
            started_at: now,
            duration: Duration::ZERO,
        }
    }

    pub fn new(from: f64, to: f64, started_at: Instant, duration: Duration) -> Self {
        Self { from, to, started_at, duration }
    }

    /// Interpolated value; exactly `to` once the duration has elapsed
    pub fn value_at(&self, now: Instant) -> f64 {
        let elapsed = now.saturating_duration_since(self.started_at);
        if self.duration.is_zero() || elapsed >= self.duration {
            return self.to;
        }

        let progress = elapsed.as_secs_f64() / self.duration.as_secs_f64();
        self.from + (self.to - self.from) * progress
    }

    /// Restart toward `to` from the value currently displayed
    pub fn retarget(&mut self, to: f64, duration: Duration, now: Instant) {
        self.from = self.value_at(now);
        self.to = to;
        self.started_at = now;
        self.duration = duration;
    }

    pub fn is_settled(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.started_at) >= self.duration
    }

    pub fn target(&self) -> f64 {
        self.to
    }
}

/// Animation durations for each dashboard metric
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnimationDurations {
    pub scans: Duration,
    pub wallets: Duration,
    pub prevented: Duration,
    pub active: Duration,
    pub bnb_price: Duration,
}

impl From<&AnimationConfig> for AnimationDurations {
    fn from(config: &AnimationConfig) -> Self {
        Self {
            scans: Duration::from_millis(config.scans_ms),
            wallets: Duration::from_millis(config.wallets_ms),
            prevented: Duration::from_millis(config.prevented_ms),
            active: Duration::from_millis(config.active_ms),
            bnb_price: Duration::from_millis(config.bnb_price_ms),
        }
    }
}

/// Values shown on the metric cards for one frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DisplayedMetrics {
    pub scans: u64,
    pub wallets: u64,
    pub prevented: f64,
    pub active: u64,
    pub bnb_price: f64,
}

#[derive(Debug, Clone)]
pub struct MetricAnimator {
    durations: AnimationDurations,
    scans: Tween,
    wallets: Tween,
    prevented: Tween,
    active: Tween,
    bnb_price: Tween,
}

impl MetricAnimator {
    /// 모든 지표는 0에서 시작 (첫 스냅샷은 카운트업)
    pub fn new(durations: AnimationDurations, now: Instant) -> Self {
        Self {
            durations,
            scans: Tween::settled(0.0, now),
            wallets: Tween::settled(0.0, now),
            prevented: Tween::settled(0.0, now),
            active: Tween::settled(0.0, now),
            bnb_price: Tween::settled(0.0, now),
        }
    }

    pub fn set_target(&mut self, snapshot: &MetricsSnapshot, now: Instant) {
        let d = self.durations;
        self.scans.retarget(snapshot.scans as f64, d.scans, now);
        self.wallets.retarget(snapshot.wallets as f64, d.wallets, now);
        self.prevented.retarget(snapshot.prevented, d.prevented, now);
        self.active.retarget(snapshot.active as f64, d.active, now);
        self.bnb_price.retarget(snapshot.bnb_price, d.bnb_price, now);
    }

    pub fn displayed(&self, now: Instant) -> DisplayedMetrics {
        DisplayedMetrics {
            scans: to_count(self.scans.value_at(now)),
            wallets: to_count(self.wallets.value_at(now)),
            prevented: self.prevented.value_at(now),
            active: to_count(self.active.value_at(now)),
            bnb_price: self.bnb_price.value_at(now),
        }
    }

    pub fn is_animating(&self, now: Instant) -> bool {
        [self.scans, self.wallets, self.prevented, self.active, self.bnb_price]
            .iter()
            .any(|tween| !tween.is_settled(now))
    }
}

fn to_count(value: f64) -> u64 {
    if value <= 0.0 {
        0
    } else {
        value.round() as u64
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn snapshot(scans: u64, wallets: u64, prevented: f64, active: u64, bnb_price: f64) -> MetricsSnapshot {
        MetricsSnapshot { scans, wallets, prevented, active, bnb_price, fetched_at: Utc::now() }
    }

    fn durations() -> AnimationDurations {
        AnimationDurations::from(&crate::config::Config::default().animation)
    }

    #[test]
    fn test_tween_linear_progress() {
        let start = Instant::now();
        let tween = Tween::new(0.0, 100.0, start, Duration::from_secs(2));

        assert_eq!(tween.value_at(start), 0.0);
        assert!((tween.value_at(start + Duration::from_millis(500)) - 25.0).abs() < 1e-9);
        assert!((tween.value_at(start + Duration::from_secs(1)) - 50.0).abs() < 1e-9);
        assert_eq!(tween.value_at(start + Duration::from_secs(2)), 100.0);
        assert_eq!(tween.value_at(start + Duration::from_secs(60)), 100.0);
        assert!(tween.is_settled(start + Duration::from_secs(2)));
        assert!(!tween.is_settled(start + Duration::from_secs(1)));
    }

    #[test]
    fn test_tween_zero_duration_jumps() {
        let start = Instant::now();
        let tween = Tween::new(5.0, 9.0, start, Duration::ZERO);
        assert_eq!(tween.value_at(start), 9.0);
        assert!(tween.is_settled(start));
    }

    #[test]
    fn test_tween_monotonic_toward_target() {
        let start = Instant::now();
        let up = Tween::new(10.0, 250.0, start, Duration::from_millis(2_400));
        let down = Tween::new(250.0, 10.0, start, Duration::from_millis(1_800));

        let mut last_up = f64::MIN;
        let mut last_down = f64::MAX;
        for step in 0..=60 {
            let now = start + Duration::from_millis(step * 50);
            let u = up.value_at(now);
            let d = down.value_at(now);
            assert!(u >= last_up && u <= 250.0);
            assert!(d <= last_down && d >= 10.0);
            last_up = u;
            last_down = d;
        }
        assert_eq!(last_up, 250.0);
        assert_eq!(last_down, 10.0);
    }

    #[test]
    fn test_retarget_mid_flight_is_continuous() {
        let start = Instant::now();
        let mut tween = Tween::new(0.0, 100.0, start, Duration::from_secs(2));

        let mid = start + Duration::from_secs(1);
        let before = tween.value_at(mid);
        tween.retarget(200.0, Duration::from_secs(2), mid);

        assert!((tween.value_at(mid) - before).abs() < 1e-9);
        assert_eq!(tween.target(), 200.0);
        assert_eq!(tween.value_at(mid + Duration::from_secs(2)), 200.0);
    }

    #[test]
    fn test_animator_counts_up_then_settles_on_fetched_values() {
        let start = Instant::now();
        let mut animator = MetricAnimator::new(durations(), start);
        assert!(!animator.is_animating(start));

        animator.set_target(&snapshot(12_450, 1_420, 1_420_000.0, 873, 600.0), start);
        assert!(animator.is_animating(start + Duration::from_millis(100)));

        let halfway = animator.displayed(start + Duration::from_millis(900));
        assert!(halfway.scans > 0 && halfway.scans < 12_450);
        assert!(halfway.active > 0 && halfway.active < 873);

        // 가장 긴 애니메이션(2.4s) 이후 모든 값이 정확히 목표값
        let done_at = start + Duration::from_millis(2_400);
        let done = animator.displayed(done_at);
        assert!(!animator.is_animating(done_at));
        assert_eq!(done.scans, 12_450);
        assert_eq!(done.wallets, 1_420);
        assert_eq!(done.prevented, 1_420_000.0);
        assert_eq!(done.active, 873);
        assert_eq!(done.bnb_price, 600.0);
    }

    #[test]
    fn test_metrics_finish_independently() {
        let start = Instant::now();
        let mut animator = MetricAnimator::new(durations(), start);
        animator.set_target(&snapshot(1_000, 1_000, 1_000.0, 1_000, 1_000.0), start);

        // active(1.8s)는 끝났지만 scans(2.4s)는 아직 진행 중
        let at = animator.displayed(start + Duration::from_millis(2_000));
        assert_eq!(at.active, 1_000);
        assert!(at.scans < 1_000);
    }
}
