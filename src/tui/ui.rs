//! Layout rendering for the dashboard.

use std::time::Instant;

use chrono::Utc;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    symbols,
    text::{Line, Span},
    widgets::{Axis, Block, BorderType, Borders, Chart, Clear, Dataset, GraphType, List, ListItem, Paragraph},
    Frame,
};

use super::app::App;
use super::widgets::{
    centered_rect, growth_chart_data, render_cta, status_color, MetricCard, ParticleLayer, DRAINER_RED, NEON,
    NEON_DIM, NEON_FAINT,
};
use crate::common::{format_age, format_clock, format_price_usd, format_thousands, format_usd_compact};
use crate::constants::{CTA_LABEL, CTA_NOTICE, FOOTER_TEXT, PRODUCT_NAME, PRODUCT_TAGLINE};

const LOADING: &str = "loading…";

/// Main draw function
pub fn draw(f: &mut Frame, app: &mut App, now: Instant) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(5), // Hero
            Constraint::Length(5), // Metric cards
            Constraint::Min(8),    // Growth chart + recent scans
            Constraint::Length(2), // CTA
            Constraint::Length(1), // Status bar
        ])
        .split(f.area());

    draw_hero(f, app, chunks[0], now);
    draw_metric_cards(f, app, chunks[1], now);
    draw_body(f, app, chunks[2]);
    render_cta(f, chunks[3], CTA_LABEL, FOOTER_TEXT);
    draw_status_bar(f, app, chunks[4]);

    if app.show_notice {
        draw_notice(f);
    }
}

// ── Hero ────────────────────────────────────────────────────────────────────

fn draw_hero(f: &mut Frame, app: &mut App, area: Rect, now: Instant) {
    // 입자 필드는 히어로 영역 크기를 따라감
    app.particles.resize(area.width as f64, area.height as f64);
    f.render_widget(ParticleLayer::new(app.particles.particles()), area);

    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(20), Constraint::Length(26)])
        .split(area);

    let title = vec![
        Line::from(""),
        Line::from(Span::styled(
            format!(" 🛡 {}", PRODUCT_NAME.to_uppercase()),
            Style::default().fg(NEON).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(format!(" {}", PRODUCT_TAGLINE), Style::default().fg(NEON_DIM))),
    ];
    f.render_widget(Paragraph::new(title), cols[0]);

    let bnb = if app.store.is_loading() {
        "BNB —".to_string()
    } else {
        format!("BNB {}", format_price_usd(app.displayed(now).bnb_price))
    };
    let refresh = if app.store.is_refreshing() {
        Span::styled("⟳ REFRESHING", Style::default().fg(Color::Yellow))
    } else {
        Span::styled("[r] REFRESH", Style::default().fg(NEON_DIM))
    };

    let status = vec![
        Line::from(""),
        Line::from(Span::styled(
            "● LIVE  opBNB MAINNET ",
            Style::default().fg(NEON).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(format!("{} ", bnb), Style::default().fg(NEON))),
        Line::from(vec![refresh, Span::raw(" ")]),
    ];
    f.render_widget(Paragraph::new(status).alignment(Alignment::Right), cols[1]);
}

// ── Metric cards ────────────────────────────────────────────────────────────

fn draw_metric_cards(f: &mut Frame, app: &App, area: Rect, now: Instant) {
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Ratio(1, 4),
            Constraint::Ratio(1, 4),
            Constraint::Ratio(1, 4),
            Constraint::Ratio(1, 4),
        ])
        .split(area);

    let values = if app.store.is_loading() {
        [LOADING.to_string(), LOADING.to_string(), LOADING.to_string(), LOADING.to_string()]
    } else {
        let shown = app.displayed(now);
        [
            format_thousands(shown.scans),
            format_thousands(shown.wallets),
            format_usd_compact(shown.prevented),
            format_thousands(shown.active),
        ]
    };
    let [scans, wallets, prevented, active] = values;

    MetricCard::new("TOTAL SCANS", scans, "↗").render(f, cols[0]);
    MetricCard::new("SHIELDED WALLETS", wallets, "◆").render(f, cols[1]);
    MetricCard::new("PREVENTED LOSSES", prevented, "⚠").render(f, cols[2]);
    MetricCard::new("ACTIVE PROTECTION", active, "●").render(f, cols[3]);
}

// ── Growth chart + recent scans ─────────────────────────────────────────────

fn draw_body(f: &mut Frame, app: &App, area: Rect) {
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(62), Constraint::Percentage(38)])
        .split(area);

    draw_growth_chart(f, app, cols[0]);
    draw_recent_scans(f, app, cols[1]);
}

fn draw_growth_chart(f: &mut Frame, app: &App, area: Rect) {
    let growth = app.store.growth();
    let (data, upper) = growth_chart_data(growth);
    let last_index = growth.len().saturating_sub(1).max(1) as f64;

    let x_labels: Vec<Span> = match (growth.first(), growth.last()) {
        (Some(first), Some(last)) => vec![Span::raw(first.day.clone()), Span::raw(last.day.clone())],
        _ => Vec::new(),
    };
    let y_labels = vec![
        Span::raw("0"),
        Span::raw(format_thousands((upper / 2.0) as u64)),
        Span::raw(format_thousands(upper as u64)),
    ];

    let dataset = Dataset::default()
        .name("scans")
        .marker(symbols::Marker::Braille)
        .graph_type(GraphType::Line)
        .style(Style::default().fg(NEON))
        .data(&data);

    let chart = Chart::new(vec![dataset])
        .block(panel(" SCAN GROWTH (LAST 7 DAYS) "))
        .x_axis(
            Axis::default()
                .style(Style::default().fg(NEON_DIM))
                .bounds([0.0, last_index])
                .labels(x_labels),
        )
        .y_axis(
            Axis::default()
                .style(Style::default().fg(NEON_DIM))
                .bounds([0.0, upper])
                .labels(y_labels),
        );
    f.render_widget(chart, area);
}

fn draw_recent_scans(f: &mut Frame, app: &App, area: Rect) {
    let now = Utc::now();
    let items: Vec<ListItem> = app
        .store
        .recent_scans()
        .iter()
        .map(|scan| {
            let color = status_color(scan.status);
            ListItem::new(Line::from(vec![
                Span::styled(format!("{:>8} ", format_age(scan.detected_at, now)), Style::default().fg(NEON_DIM)),
                Span::styled(format!("{:<14}", scan.contract), Style::default().fg(Color::White)),
                Span::styled(format!("{:>3} ", scan.score), Style::default().fg(color)),
                Span::styled(scan.status.to_string(), Style::default().fg(color).add_modifier(Modifier::BOLD)),
            ]))
        })
        .collect();

    f.render_widget(List::new(items).block(panel(" RECENT SCANS ")), area);
}

fn panel(title: &str) -> Block<'_> {
    Block::default()
        .title(Span::styled(title, Style::default().fg(NEON).add_modifier(Modifier::BOLD)))
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(NEON_FAINT))
}

// ── Status bar ──────────────────────────────────────────────────────────────

fn draw_status_bar(f: &mut Frame, app: &App, area: Rect) {
    let mut spans = vec![
        Span::styled(" LIVE ", Style::default().fg(Color::Black).bg(NEON).add_modifier(Modifier::BOLD)),
        Span::raw(" "),
        Span::styled(app.source.name().to_string(), Style::default().fg(NEON_DIM)),
    ];

    if let Some(snapshot) = app.store.snapshot() {
        spans.push(Span::raw(format!(" │ updated {}", format_clock(snapshot.fetched_at))));
    }
    if let Some(latency) = app.source.last_latency_ms() {
        spans.push(Span::raw(format!(" │ {}ms", latency)));
    }
    if app.store.failures() > 0 {
        spans.push(Span::raw(format!(" │ failures {}", app.store.failures())));
    }
    if let Some(error) = app.store.last_error() {
        spans.push(Span::raw(" │ "));
        spans.push(Span::styled(error.to_string(), Style::default().fg(DRAINER_RED)));
    }
    spans.push(Span::styled(
        "  q:quit  r:refresh  w:shield",
        Style::default().fg(Color::DarkGray),
    ));

    f.render_widget(Paragraph::new(Line::from(spans)), area);
}

// ── CTA notice ──────────────────────────────────────────────────────────────

fn draw_notice(f: &mut Frame) {
    let area = centered_rect(50, 25, f.area());
    f.render_widget(Clear, area);

    let text = vec![
        Line::from(""),
        Line::from(Span::styled(CTA_NOTICE, Style::default().fg(NEON).add_modifier(Modifier::BOLD))),
        Line::from(""),
        Line::from(Span::styled("[Esc] close", Style::default().fg(Color::DarkGray))),
    ];
    let notice = Paragraph::new(text)
        .alignment(Alignment::Center)
        .block(panel(" SHIELD MY WALLET "));
    f.render_widget(notice, area);
}

// ── Tests ───────────────────────────────────────────────────────────────────
