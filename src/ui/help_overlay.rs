//! Help overlay listing the forecast screen's key bindings

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

const OVERLAY_WIDTH: u16 = 44;

/// Key, description
const BINDINGS: [(&str, &str); 4] = [
    ("r", "Refresh forecast"),
    ("↑/k ↓/j", "Scroll forecast list"),
    ("?", "Toggle this help"),
    ("q, Esc", "Quit"),
];

/// Draws the overlay centered over whatever is already on screen
pub fn render(frame: &mut Frame) {
    let mut lines = vec![
        Line::from(Span::styled(
            "Forecast keys",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
    ];
    lines.extend(BINDINGS.iter().map(|(key, description)| {
        Line::from(vec![
            Span::styled(format!(" {:<10}", key), Style::default().fg(Color::Yellow)),
            Span::raw(*description),
        ])
    }));
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "Esc or ? closes",
        Style::default().fg(Color::DarkGray),
    )));

    // Content plus top and bottom border
    let height = lines.len() as u16 + 2;
    let area = centered(frame.area(), OVERLAY_WIDTH, height);

    frame.render_widget(Clear, area);
    frame.render_widget(
        Paragraph::new(lines).block(
            Block::default()
                .title(" Help ")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan)),
        ),
        area,
    );
}

fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}
