//! Dashboard application state and event loop.

use std::io;
use std::sync::Arc;
use std::time::Instant;

use anyhow::{Context, Result};
use chrono::Utc;
use crossterm::{
    event::{Event, EventStream, KeyCode, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use futures::StreamExt;
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use super::ui;
use crate::api::MetricsSource;
use crate::config::Config;
use crate::core::{
    AnimationDurations, DashboardStore, DisplayedMetrics, FetchDisposition, FrameTicker,
    MetricAnimator, ParticleField, PollEvent, Poller, PollerHandle,
};

/// Initial particle area; resized to the hero panel on the first draw
const INITIAL_FIELD_SIZE: (f64, f64) = (80.0, 5.0);

/// Async work requested by a key press
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppAction {
    None,
    Refresh,
}

// ── App State ───────────────────────────────────────────────────────────────

/// View state owned by the UI task
pub struct App {
    pub store: DashboardStore,
    pub animator: MetricAnimator,
    pub particles: ParticleField,
    pub source: Arc<dyn MetricsSource>,
    pub show_notice: bool,
    pub should_quit: bool,
    last_frame: Instant,
}

impl App {
    pub fn new(config: &Config, source: Arc<dyn MetricsSource>, now: Instant) -> Self {
        let (width, height) = INITIAL_FIELD_SIZE;
        Self {
            store: DashboardStore::seeded(Utc::now()),
            animator: MetricAnimator::new(AnimationDurations::from(&config.animation), now),
            particles: ParticleField::from_entropy(&config.particles, width, height),
            source,
            show_notice: false,
            should_quit: false,
            last_frame: now,
        }
    }

    /// Feed one poller event into the store; applied snapshots retarget the animator
    pub fn handle_poll_event(&mut self, event: PollEvent, now: Instant) -> Option<FetchDisposition> {
        match event {
            PollEvent::Started { generation, manual } => {
                debug!("🔄 새로고침 시작 #{} (manual={})", generation, manual);
                self.store.begin_fetch(generation);
                None
            }
            PollEvent::Completed { generation, result } => {
                let disposition = self.store.complete_fetch(generation, result);
                if disposition == FetchDisposition::Applied {
                    if let Some(snapshot) = self.store.snapshot() {
                        self.animator.set_target(snapshot, now);
                    }
                }
                Some(disposition)
            }
        }
    }

    pub fn on_frame(&mut self, now: Instant) {
        let dt = now.saturating_duration_since(self.last_frame);
        self.particles.step(dt);
        self.last_frame = now;
    }

    pub fn displayed(&self, now: Instant) -> DisplayedMetrics {
        self.animator.displayed(now)
    }

    pub fn handle_key(&mut self, key: KeyCode) -> AppAction {
        match key {
            KeyCode::Char('q') => {
                self.should_quit = true;
                AppAction::None
            }
            KeyCode::Esc => {
                // 알림이 열려 있으면 먼저 닫기
                if self.show_notice {
                    self.show_notice = false;
                } else {
                    self.should_quit = true;
                }
                AppAction::None
            }
            KeyCode::Char('r') => AppAction::Refresh,
            KeyCode::Char('w') | KeyCode::Enter => {
                if !self.show_notice {
                    info!("🛡️ 지갑 보호 요청 - 모바일 앱 출시 예정");
                }
                self.show_notice = true;
                AppAction::None
            }
            _ => AppAction::None,
        }
    }
}

// ── Event Loop ──────────────────────────────────────────────────────────────

/// Set up the terminal, mount the dashboard and run until the user quits
pub async fn run(config: &Config, source: Arc<dyn MetricsSource>) -> Result<()> {
    install_panic_hook();

    enable_raw_mode().context("raw mode 활성화 실패")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let outcome = mount(&mut terminal, config, source).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    outcome
}

/// Spawn the poller and frame ticker, drive the UI, then cancel and join both
async fn mount<B: Backend>(
    terminal: &mut Terminal<B>,
    config: &Config,
    source: Arc<dyn MetricsSource>,
) -> Result<()> {
    let mut app = App::new(config, Arc::clone(&source), Instant::now());

    let cancel = CancellationToken::new();
    let (poll_tx, mut poll_rx) = mpsc::unbounded_channel();
    let poller = Poller::spawn(source, config.poll_interval(), cancel.clone(), poll_tx);
    let (frame_tx, mut frame_rx) = mpsc::channel(1);
    let frames = FrameTicker::spawn(config.frame_interval(), cancel.clone(), frame_tx);
    info!("🚀 대시보드 마운트 ({}fps)", config.ui.frame_rate_fps);

    let outcome = drive(terminal, &mut app, &poller, &mut poll_rx, &mut frame_rx).await;

    // unmount
    cancel.cancel();
    poller.shutdown().await;
    if let Err(e) = frames.await {
        warn!("⚠️ 프레임 태스크 종료 오류: {}", e);
    }
    info!("👋 대시보드 언마운트 (성공 {}회, 실패 {}회)", app.store.successes(), app.store.failures());

    outcome
}

async fn drive<B: Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    poller: &PollerHandle,
    poll_rx: &mut mpsc::UnboundedReceiver<PollEvent>,
    frame_rx: &mut mpsc::Receiver<tokio::time::Instant>,
) -> Result<()> {
    let mut events = EventStream::new();

    loop {
        tokio::select! {
            Some(at) = frame_rx.recv() => {
                let now = at.into_std();
                app.on_frame(now);
                terminal.draw(|f| ui::draw(f, app, now))?;
            }
            Some(event) = poll_rx.recv() => {
                app.handle_poll_event(event, Instant::now());
            }
            maybe_event = events.next() => {
                match maybe_event {
                    Some(Ok(Event::Key(key))) if key.kind == KeyEventKind::Press => {
                        if app.handle_key(key.code) == AppAction::Refresh && !poller.refresh() {
                            warn!("⚠️ 폴러가 중지되어 새로고침 불가");
                        }
                    }
                    Some(Ok(_)) => {}
                    Some(Err(e)) => return Err(e).context("터미널 이벤트 읽기 실패"),
                    None => return Ok(()),
                }
            }
        }

        if app.should_quit {
            return Ok(());
        }
    }
}

/// 패닉 시에도 터미널 상태 복구
fn install_panic_hook() {
    let original = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        original(panic_info);
    }));
}

// ── Tests ───────────────────────────────────────────────────────────────────
