//! Forecast screen rendering
//!
//! Renders the summary line, the per-day forecast list, and a footer holding
//! the refresh control.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::app::{App, ForecastPanel};
use shoresquad::refresh::REFRESH_LABEL;
use shoresquad::render::{DayEntry, RenderedEntry};

/// Renders the whole forecast screen
pub fn render(frame: &mut Frame, app: &App, panel: &ForecastPanel) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(3),
            Constraint::Length(1),
        ])
        .split(frame.area());

    render_summary(frame, chunks[0], panel);
    render_entries(frame, chunks[1], app, panel);
    render_footer(frame, chunks[2], panel);
}

fn render_summary(frame: &mut Frame, area: Rect, panel: &ForecastPanel) {
    let style = if panel.is_loading() {
        Style::default().fg(Color::DarkGray)
    } else {
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD)
    };

    let block = Block::default()
        .title(" ShoreSquad Weather ")
        .borders(Borders::ALL);

    frame.render_widget(
        Paragraph::new(Span::styled(panel.summary.clone(), style)).block(block),
        area,
    );
}

fn render_entries(frame: &mut Frame, area: Rect, app: &App, panel: &ForecastPanel) {
    let lines: Vec<Line> = panel.entries.iter().map(entry_line).collect();

    let block = Block::default().title(" Forecast ").borders(Borders::ALL);
    let paragraph = Paragraph::new(lines)
        .block(block)
        .scroll((app.scroll_offset, 0));

    frame.render_widget(paragraph, area);
}

fn entry_line(entry: &RenderedEntry) -> Line<'static> {
    match entry {
        RenderedEntry::Day(day) => day_line(day),
        RenderedEntry::Unavailable(text) => Line::from(Span::styled(
            text.clone(),
            Style::default().fg(Color::Yellow),
        )),
    }
}

fn day_line(day: &DayEntry) -> Line<'static> {
    Line::from(vec![
        Span::styled(
            format!("{:<12}", day.label),
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Span::raw(format!("{:<28}", day.summary)),
        Span::styled(
            format!("{:<14}", day.temperature),
            Style::default().fg(Color::LightRed),
        ),
        Span::styled(
            format!("{:<16}", day.wind),
            Style::default().fg(Color::Green),
        ),
        Span::styled(day.humidity.clone(), Style::default().fg(Color::Blue)),
    ])
}

fn render_footer(frame: &mut Frame, area: Rect, panel: &ForecastPanel) {
    // The control is highlighted while it shows its acknowledgement
    let label_style = if panel.refresh_label == REFRESH_LABEL {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default()
            .fg(Color::Black)
            .bg(Color::Green)
    };

    let mut spans = vec![
        Span::styled(" [r] ", Style::default().fg(Color::Yellow)),
        Span::styled(panel.refresh_label.clone(), label_style),
        Span::raw("  [?] Help  [q] Quit"),
    ];
    if let Some(updated) = panel.last_update {
        spans.push(Span::styled(
            format!("  Updated {}", updated.format("%H:%M")),
            Style::default().fg(Color::DarkGray),
        ));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}
