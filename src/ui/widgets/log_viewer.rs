use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::log::LogKey;

/// Draw the combat log lines starting at `scroll_offset`
pub fn draw_log_viewer(
    f: &mut Frame,
    area: Rect,
    key: Option<LogKey>,
    lines: &[String],
    scroll_offset: usize,
) {
    let title = match key {
        Some(key) => format!(" Combat Log: {} ", key),
        None => " Combat Log ".to_string(),
    };

    // Borders take two rows
    let visible_lines = area.height.saturating_sub(2) as usize;
    let start = scroll_offset.min(lines.len());
    let end = (start + visible_lines).min(lines.len());

    let log_lines: Vec<Line> = if lines.is_empty() {
        vec![Line::from(Span::styled(
            "No combat log for this turn",
            Style::default().fg(Color::DarkGray),
        ))]
    } else {
        lines[start..end]
            .iter()
            .enumerate()
            .map(|(i, line)| {
                // The first line of a log is its header
                if start + i == 0 {
                    Line::from(Span::styled(
                        line.as_str(),
                        Style::default().add_modifier(Modifier::BOLD),
                    ))
                } else {
                    Line::from(line.as_str())
                }
            })
            .collect()
    };

    let mut title_parts = vec![title];
    if lines.len() > visible_lines && visible_lines > 0 {
        let position_pct = (start * 100) / lines.len().max(1);
        title_parts.push(format!("[{}%] ", position_pct));
    }

    let paragraph = Paragraph::new(log_lines).block(
        Block::default()
            .borders(Borders::ALL)
            .title(title_parts.join(""))
            .title_style(Style::default().add_modifier(Modifier::BOLD)),
    );

    f.render_widget(paragraph, area);
}
