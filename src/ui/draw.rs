use ratatui::Frame;

use crate::view::LogRenderer;
use super::app::LogCanvas;

/// Draw one terminal frame of a (possibly decorated) combat-log view
pub fn draw<'a, 'f, V>(f: &'a mut Frame<'f>, view: &mut V)
where
    V: LogRenderer<LogCanvas<'a, 'f>>,
{
    let mut canvas = LogCanvas::new(f);
    view.draw_log(&mut canvas, &mut |_| {});
}
