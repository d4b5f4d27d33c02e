//! Reusable widget pieces for the VibeGuard dashboard.
//!
//! - [`MetricCard`] - counter card with label, animated value and icon
//! - [`ParticleLayer`] - decorative particle field drawn straight into the buffer
//! - [`growth_chart_data`] - chart points and axis bounds for the scan growth series

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph, Widget},
    Frame,
};

use crate::core::Particle;
use crate::types::{GrowthPoint, ScanStatus};

pub const NEON: Color = Color::Rgb(0, 255, 159);
pub const NEON_DIM: Color = Color::Rgb(0, 153, 95);
pub const NEON_FAINT: Color = Color::Rgb(0, 77, 48);
pub const DRAINER_RED: Color = Color::Rgb(248, 113, 113);

// ── MetricCard ──────────────────────────────────────────────────────────────

pub struct MetricCard {
    pub label: String,
    pub value: String,
    pub icon: &'static str,
    pub color: Color,
}

impl MetricCard {
    pub fn new(label: impl Into<String>, value: impl Into<String>, icon: &'static str) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
            icon,
            color: NEON,
        }
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    pub fn render(&self, f: &mut Frame, area: Rect) {
        let lines = vec![
            Line::from(vec![
                Span::styled(self.label.as_str(), Style::default().fg(NEON_DIM)),
                Span::raw("  "),
                Span::styled(self.icon, Style::default().fg(NEON)),
            ]),
            Line::from(""),
            Line::from(Span::styled(
                self.value.as_str(),
                Style::default().fg(self.color).add_modifier(Modifier::BOLD),
            )),
        ];

        let paragraph = Paragraph::new(lines).block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(Style::default().fg(NEON_FAINT)),
        );
        f.render_widget(paragraph, area);
    }
}

// ── ParticleLayer ───────────────────────────────────────────────────────────

/// Draws particles whose coordinates are relative to the target area
pub struct ParticleLayer<'a> {
    particles: &'a [Particle],
}

impl<'a> ParticleLayer<'a> {
    pub fn new(particles: &'a [Particle]) -> Self {
        Self { particles }
    }
}

impl Widget for ParticleLayer<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        for particle in self.particles {
            if particle.x < 0.0 || particle.y < 0.0 {
                continue;
            }
            let (col, row) = (particle.x as u16, particle.y as u16);
            if col >= area.width || row >= area.height {
                continue;
            }

            // 빠른 입자일수록 밝게
            let color = if particle.speed > 1.6 { NEON_DIM } else { NEON_FAINT };
            if let Some(cell) = buf.cell_mut((area.x + col, area.y + row)) {
                cell.set_char(particle.glyph).set_fg(color);
            }
        }
    }
}

// ── Scan growth chart ───────────────────────────────────────────────────────

/// Points `(index, scans)` plus the y-axis upper bound (10% headroom)
pub fn growth_chart_data(points: &[GrowthPoint]) -> (Vec<(f64, f64)>, f64) {
    let data: Vec<(f64, f64)> = points
        .iter()
        .enumerate()
        .map(|(i, p)| (i as f64, p.scans as f64))
        .collect();

    let max = points.iter().map(|p| p.scans).max().unwrap_or(0) as f64;
    let upper = if max <= 0.0 { 1.0 } else { (max * 1.1).ceil() };
    (data, upper)
}

pub fn status_color(status: ScanStatus) -> Color {
    match status {
        ScanStatus::Safe => NEON,
        ScanStatus::Drainer => DRAINER_RED,
    }
}

/// Centered button-style call to action
pub fn render_cta(f: &mut Frame, area: Rect, label: &str, footer: &str) {
    let lines = vec![
        Line::from(Span::styled(
            format!("  {}  ", label),
            Style::default()
                .fg(Color::Black)
                .bg(NEON)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(footer, Style::default().fg(NEON_DIM))),
    ];
    f.render_widget(Paragraph::new(lines).alignment(Alignment::Center), area);
}

/// Helper function to create a centered rect using up certain percentage of the available rect.
pub fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

// ── Tests ───────────────────────────────────────────────────────────────────
