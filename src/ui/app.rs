use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    Frame,
};
use tracing::debug;

use crate::input::{Action, Cue, KeyBindings, KeyPress};
use crate::log::{LogKey, LogReader, LogStore};
use crate::view::{CuePlayer, FrameClock, InputHandler, LogDisplayUpdater, LogRenderer, OverlayTarget};
use super::display_state::SearchDisplay;
use super::widgets::{draw_filter_panel, draw_log_viewer, draw_status_bar, FILTER_PANEL_WIDTH};

/// How many frames a cue stays visible in the status bar
pub const CUE_FLASH_FRAMES: u64 = 4;

/// Page size used before the first draw reports the real viewport height
const DEFAULT_PAGE_HEIGHT: usize = 20;

/// Terminal rendition of the game's combat-log view.
///
/// Knows nothing about filtering: it shows whatever lines it is given and
/// handles scrolling and turn/level navigation.
pub struct CombatLogView<R> {
    store: LogStore<R>,
    bindings: KeyBindings,
    key: Option<LogKey>,
    /// Lines currently shown
    lines: Vec<String>,
    /// Index of the first shown line at the top of the viewport
    pub scroll_offset: usize,
    page_height: usize,
    frame: u64,
    /// Last cue played and the frame it was played on
    pub last_cue: Option<(Cue, u64)>,
    /// Whether the view should close
    pub should_close: bool,
}

impl<R: LogReader> CombatLogView<R> {
    pub fn new(reader: R, bindings: KeyBindings) -> Self {
        Self {
            store: LogStore::new(reader),
            bindings,
            key: None,
            lines: Vec::new(),
            scroll_offset: 0,
            page_height: DEFAULT_PAGE_HEIGHT,
            frame: 0,
            last_cue: None,
            should_close: false,
        }
    }

    pub fn store(&self) -> &LogStore<R> {
        &self.store
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Advance the animation clock by one frame
    pub fn tick(&mut self) {
        self.frame = self.frame.wrapping_add(1);
    }

    /// The most recent turn of the deepest level, if the run has any logs
    pub fn latest_key(&self) -> Option<LogKey> {
        let reader = self.store.reader();
        let level = *reader.levels().last()?;
        let turn = *reader.turns(level).last()?;
        Some(LogKey::new(level, turn))
    }

    /// Cue to flash in the status bar, if one was played recently
    pub fn recent_cue(&self) -> Option<Cue> {
        self.last_cue
            .filter(|(_, at)| self.frame.wrapping_sub(*at) < CUE_FLASH_FRAMES)
            .map(|(cue, _)| cue)
    }

    /// Navigation keys for the status bar, as currently bound
    pub fn key_hint(&self) -> String {
        let b = &self.bindings;
        format!(
            "{} {} turn  {} {} level  {} close",
            b.hint(Action::PrevTurn),
            b.hint(Action::NextTurn),
            b.hint(Action::PrevLevel),
            b.hint(Action::NextLevel),
            b.hint(Action::Close),
        )
    }

    fn max_scroll(&self) -> usize {
        self.lines.len().saturating_sub(self.page_height)
    }

    pub fn scroll_up(&mut self, lines: usize) {
        self.scroll_offset = self.scroll_offset.saturating_sub(lines);
    }

    pub fn scroll_down(&mut self, lines: usize) {
        self.scroll_offset = (self.scroll_offset + lines).min(self.max_scroll());
    }

    /// Move to the neighbouring logged turn of the current level
    fn step_turn(&mut self, forward: bool) {
        let Some(key) = self.key else { return };
        let turns = self.store.reader().turns(key.level);
        let next = if forward {
            turns.iter().find(|t| **t > key.turn)
        } else {
            turns.iter().rev().find(|t| **t < key.turn)
        };
        if let Some(turn) = next {
            self.set_log_display(LogKey::new(key.level, *turn));
        }
    }

    /// Move to the last turn of the neighbouring level
    fn step_level(&mut self, forward: bool) {
        let Some(key) = self.key else { return };
        let reader = self.store.reader();
        let levels = reader.levels();
        let next = if forward {
            levels.iter().find(|l| **l > key.level)
        } else {
            levels.iter().rev().find(|l| **l < key.level)
        };
        let Some(level) = next.copied() else { return };
        if let Some(turn) = reader.turns(level).last().copied() {
            self.set_log_display(LogKey::new(level, turn));
        }
    }

    /// Apply one key. Returns true if the key was used.
    fn handle_key(&mut self, press: &KeyPress) -> bool {
        let action = [
            Action::ScrollUp,
            Action::ScrollDown,
            Action::PageUp,
            Action::PageDown,
            Action::PrevTurn,
            Action::NextTurn,
            Action::PrevLevel,
            Action::NextLevel,
            Action::Close,
        ]
        .into_iter()
        .find(|a| self.bindings.matches(*a, press.key));

        match action {
            Some(Action::ScrollUp) => self.scroll_up(1),
            Some(Action::ScrollDown) => self.scroll_down(1),
            Some(Action::PageUp) => self.scroll_up(self.page_height),
            Some(Action::PageDown) => self.scroll_down(self.page_height),
            Some(Action::PrevTurn) => self.step_turn(false),
            Some(Action::NextTurn) => self.step_turn(true),
            Some(Action::PrevLevel) => self.step_level(false),
            Some(Action::NextLevel) => self.step_level(true),
            Some(Action::Close) => self.should_close = true,
            _ => return false,
        }
        true
    }
}

impl<R: LogReader> InputHandler for CombatLogView<R> {
    fn process_input(&mut self, events: &mut Vec<KeyPress>) {
        let pending = std::mem::take(events);
        for press in pending {
            if !self.handle_key(&press) {
                events.push(press);
            }
        }
    }
}

impl<R: LogReader> LogDisplayUpdater for CombatLogView<R> {
    fn set_log_display(&mut self, key: LogKey) {
        if self.key != Some(key) {
            self.scroll_offset = 0;
        }
        self.key = Some(key);
        self.lines = self.store.lines(key).to_vec();
        self.scroll_offset = self.scroll_offset.min(self.max_scroll());
    }

    fn log_key(&self) -> Option<LogKey> {
        self.key
    }

    fn raw_lines(&self) -> &[String] {
        match self.key {
            Some(key) => self.store.cached(key),
            None => &[],
        }
    }

    fn show_lines(&mut self, lines: Vec<String>) {
        self.lines = lines;
        self.scroll_offset = self.scroll_offset.min(self.max_scroll());
    }
}

impl<R> CuePlayer for CombatLogView<R> {
    fn play_cue(&mut self, cue: Cue) {
        debug!(cue = cue.id(), "play cue");
        self.last_cue = Some((cue, self.frame));
    }
}

impl<R> FrameClock for CombatLogView<R> {
    fn frame(&self) -> u64 {
        self.frame
    }
}

/// Drawing surface for one terminal frame
pub struct LogCanvas<'a, 'f> {
    pub frame: &'a mut Frame<'f>,
    /// Area reserved for overlays, set by the view while drawing
    pub panel_area: Option<Rect>,
}

impl<'a, 'f> LogCanvas<'a, 'f> {
    pub fn new(frame: &'a mut Frame<'f>) -> Self {
        Self {
            frame,
            panel_area: None,
        }
    }
}

impl OverlayTarget for LogCanvas<'_, '_> {
    fn draw_search_overlay(&mut self, display: &SearchDisplay) {
        if let Some(area) = self.panel_area {
            draw_filter_panel(self.frame, area, display);
        }
    }
}

impl<'a, 'f, R: LogReader> LogRenderer<LogCanvas<'a, 'f>> for CombatLogView<R> {
    fn draw_log(&mut self, canvas: &mut LogCanvas<'a, 'f>, overlay: &mut dyn FnMut(&mut LogCanvas<'a, 'f>)) {
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Min(0),    // Log and side panel
                Constraint::Length(1), // Status bar
            ])
            .split(canvas.frame.area());

        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Min(0),
                Constraint::Length(FILTER_PANEL_WIDTH),
            ])
            .split(rows[0]);

        // Borders take two rows
        self.page_height = columns[0].height.saturating_sub(2).max(1) as usize;
        self.scroll_offset = self.scroll_offset.min(self.max_scroll());

        draw_log_viewer(canvas.frame, columns[0], self.key, &self.lines, self.scroll_offset);
        draw_status_bar(
            canvas.frame,
            rows[1],
            self.key,
            self.lines.len(),
            self.raw_lines().len(),
            self.recent_cue(),
            &self.key_hint(),
        );

        canvas.panel_area = Some(columns[1]);
        overlay(canvas);
        canvas.panel_area = None;
    }
}
