use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::ui::display_state::{CategoryGlyph, HINT_PHASES, SearchDisplay};

/// Width of the filter panel, borders included
pub const FILTER_PANEL_WIDTH: u16 = 24;

/// Colours the `/` hint shimmers through
const HINT_COLORS: [Color; HINT_PHASES] = [
    Color::Rgb(255, 213, 79),
    Color::Rgb(255, 238, 88),
    Color::Rgb(246, 254, 141),
];

const DIMMED: Color = Color::Rgb(97, 97, 97);

/// Keep the end of `text` so it fits in `width` columns; the part being
/// typed is the part worth seeing
fn tail_fitting(text: &str, width: usize) -> &str {
    if text.width() <= width {
        return text;
    }
    let mut used = 0;
    let mut start = text.len();
    for (idx, c) in text.char_indices().rev() {
        let w = c.width().unwrap_or(0);
        if used + w > width {
            break;
        }
        used += w;
        start = idx;
    }
    &text[start..]
}

/// Draw the filter panel: title, prompt with caret, and category toggles
pub fn draw_filter_panel(f: &mut Frame, area: Rect, display: &SearchDisplay) {
    let hint_color = HINT_COLORS[display.hint_phase % HINT_PHASES];
    let prompt_color = if display.dimmed { DIMMED } else { hint_color };

    // Borders, the "/" and the caret
    let prompt_width = (area.width as usize).saturating_sub(4);
    let caret = if display.caret_visible { "_" } else { "" };

    let mut lines = vec![
        Line::from(Span::styled(
            display.title,
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(vec![
            Span::styled("/", Style::default().fg(hint_color)),
            Span::styled(
                tail_fitting(&display.prompt, prompt_width),
                Style::default().fg(prompt_color),
            ),
            Span::styled(caret, Style::default().fg(prompt_color)),
        ]),
        Line::from(""),
    ];

    for (category, glyph) in display.categories {
        let style = match glyph {
            CategoryGlyph::Active => Style::default().fg(Color::Yellow),
            CategoryGlyph::Inactive => Style::default().fg(DIMMED),
        };
        lines.push(Line::from(vec![
            Span::styled(glyph.symbol(), style),
            Span::raw(" "),
            Span::styled(category.name(), style),
        ]));
    }

    let border_style = if display.editing {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default()
    };

    let paragraph = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(border_style),
    );

    f.render_widget(paragraph, area);
}
