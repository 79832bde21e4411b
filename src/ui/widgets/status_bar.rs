use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::input::Cue;
use crate::log::LogKey;

/// Draw the status bar: which log is open, how many lines survive the
/// filters, a flash for the most recent cue and the navigation keys
pub fn draw_status_bar(
    f: &mut Frame,
    area: Rect,
    key: Option<LogKey>,
    shown: usize,
    total: usize,
    cue: Option<Cue>,
    key_hint: &str,
) {
    let mut spans = Vec::new();

    match cue {
        Some(Cue::Rejected) => spans.push(Span::styled(
            " ✗ ",
            Style::default().bg(Color::Red).fg(Color::White),
        )),
        Some(Cue::Confirm) => spans.push(Span::styled(
            " ✓ ",
            Style::default().bg(Color::Green).fg(Color::Black),
        )),
        None => spans.push(Span::raw("   ")),
    }

    let location = match key {
        Some(key) => format!(" Level {} | Turn {} ", key.level, key.turn),
        None => " No combat logs ".to_string(),
    };
    spans.push(Span::styled(location, Style::default().fg(Color::Cyan)));

    let counts = if shown == total {
        format!("| {} lines ", total)
    } else {
        format!("| {} of {} lines ", shown, total)
    };
    spans.push(Span::styled(counts, Style::default().fg(Color::Gray)));

    spans.push(Span::styled(
        format!("| {}", key_hint),
        Style::default().fg(Color::DarkGray),
    ));

    let paragraph = Paragraph::new(Line::from(spans))
        .style(Style::default().bg(Color::Rgb(30, 30, 30)));

    f.render_widget(paragraph, area);
}
