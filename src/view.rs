//! Host view interfaces and the search decorator.
//!
//! The host owns three behaviours of its combat-log view: reading input,
//! computing the lines to show and drawing them. [`SearchExtension`] wraps any
//! view implementing those interfaces, runs the filter logic, and then hands
//! control back to the wrapped view.

use tracing::{debug, info};

use crate::filter::{FilterState, LogFilterEngine};
use crate::input::{Action, Cue, KeyBindings, KeyPress, handle_key_presses};
use crate::log::LogKey;
use crate::ui::display_state::SearchDisplay;

/// Reacts to the key presses of one frame
pub trait InputHandler {
    /// Handle `events`. Anything an implementation acts on is removed.
    fn process_input(&mut self, events: &mut Vec<KeyPress>);
}

/// Computes the lines shown for a `(level, turn)` log
pub trait LogDisplayUpdater {
    /// Select `key` and show its lines
    fn set_log_display(&mut self, key: LogKey);

    /// The log currently selected, if any
    fn log_key(&self) -> Option<LogKey>;

    /// Unfiltered lines of the selected log
    fn raw_lines(&self) -> &[String];

    /// Replace the lines shown
    fn show_lines(&mut self, lines: Vec<String>);
}

/// Draws the combat log onto `C`.
///
/// Implementations call `overlay` exactly once per draw, after the log body
/// is composed and before the frame is flushed.
pub trait LogRenderer<C: ?Sized> {
    fn draw_log(&mut self, canvas: &mut C, overlay: &mut dyn FnMut(&mut C));
}

/// Plays audible cues
pub trait CuePlayer {
    fn play_cue(&mut self, cue: Cue);
}

/// A canvas that can host the filter panel
pub trait OverlayTarget {
    fn draw_search_overlay(&mut self, display: &SearchDisplay);
}

/// Clock the blink animation reads from
pub trait FrameClock {
    /// Monotonic frame counter
    fn frame(&self) -> u64;
}

/// Filter state and settings for one view session
#[derive(Debug, Clone)]
pub struct SearchSession {
    pub state: FilterState,
    pub bindings: KeyBindings,
    pub engine: LogFilterEngine,
    /// Frames per blink phase
    pub blink_subframes: u64,
}

impl SearchSession {
    pub fn new(bindings: KeyBindings, engine: LogFilterEngine, blink_subframes: u64) -> Self {
        Self {
            state: FilterState::new(),
            bindings,
            engine,
            blink_subframes,
        }
    }
}

impl Default for SearchSession {
    fn default() -> Self {
        Self::new(KeyBindings::default(), LogFilterEngine::default(), 8)
    }
}

/// Decorates a host view with text and category filtering
#[derive(Debug)]
pub struct SearchExtension<V> {
    inner: V,
    session: SearchSession,
}

impl<V> SearchExtension<V> {
    pub fn new(inner: V, session: SearchSession) -> Self {
        info!(
            toggle = %session.bindings.hint(Action::ToggleSearch),
            "combat log search enabled"
        );
        Self { inner, session }
    }

    pub fn inner(&self) -> &V {
        &self.inner
    }

    pub fn inner_mut(&mut self) -> &mut V {
        &mut self.inner
    }

    pub fn session(&self) -> &SearchSession {
        &self.session
    }

    pub fn state(&self) -> &FilterState {
        &self.session.state
    }
}

impl<V: FrameClock> SearchExtension<V> {
    /// Panel state for the current frame
    pub fn display(&self) -> SearchDisplay {
        SearchDisplay::new(
            &self.session.state,
            self.inner.frame(),
            self.session.blink_subframes,
        )
    }
}

impl<V: LogDisplayUpdater> LogDisplayUpdater for SearchExtension<V> {
    fn set_log_display(&mut self, key: LogKey) {
        self.inner.set_log_display(key);
        let visible = self
            .session
            .engine
            .visible_lines(self.inner.raw_lines(), &self.session.state);
        debug!(%key, raw = self.inner.raw_lines().len(), visible = visible.len(), "filtered combat log");
        self.inner.show_lines(visible);
    }

    fn log_key(&self) -> Option<LogKey> {
        self.inner.log_key()
    }

    fn raw_lines(&self) -> &[String] {
        self.inner.raw_lines()
    }

    fn show_lines(&mut self, lines: Vec<String>) {
        self.inner.show_lines(lines);
    }
}

impl<V> InputHandler for SearchExtension<V>
where
    V: InputHandler + LogDisplayUpdater + CuePlayer,
{
    fn process_input(&mut self, events: &mut Vec<KeyPress>) {
        let outcome = handle_key_presses(&mut self.session.state, &self.session.bindings, events);

        for cue in outcome.cues {
            self.inner.play_cue(cue);
        }

        if outcome.filter_changed {
            if let Some(key) = self.inner.log_key() {
                self.set_log_display(key);
            }
        }

        let before = self.inner.log_key();
        self.inner.process_input(events);

        // The base view may have moved to another log; it shows that one
        // unfiltered, so filter it here.
        match self.inner.log_key() {
            Some(key) if Some(key) != before => self.set_log_display(key),
            _ => {}
        }
    }
}

impl<V, C> LogRenderer<C> for SearchExtension<V>
where
    V: LogRenderer<C> + FrameClock,
    C: OverlayTarget + ?Sized,
{
    fn draw_log(&mut self, canvas: &mut C, overlay: &mut dyn FnMut(&mut C)) {
        let display = self.display();
        self.inner.draw_log(canvas, &mut |c: &mut C| {
            c.draw_search_overlay(&display);
            overlay(c);
        });
    }
}
