use std::collections::HashSet;

use tracing::debug;

use super::bindings::{Action, Key, KeyBindings};
use super::KeyPress;
use crate::filter::FilterState;

/// Audible feedback the host may play
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cue {
    /// A key was accepted
    Confirm,
    /// A key was understood but had nothing to act on
    Rejected,
}

impl Cue {
    /// Sound identifier in the host's sound bank
    pub fn id(self) -> &'static str {
        match self {
            Cue::Confirm => "menu_confirm",
            Cue::Rejected => "hit_4",
        }
    }
}

/// Result of handling one frame's key presses
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InputOutcome {
    /// The filter text or a category flag changed; the visible lines need
    /// one recomputation
    pub filter_changed: bool,
    /// One cue per consumed key press, in press order
    pub cues: Vec<Cue>,
}

/// Apply a frame's key presses to the filter state.
///
/// Every press is looked at once, in order. Presses acted on are removed from
/// `events`; the rest stay for the host's own handling.
pub fn handle_key_presses(
    state: &mut FilterState,
    bindings: &KeyBindings,
    events: &mut Vec<KeyPress>,
) -> InputOutcome {
    let mut outcome = InputOutcome::default();
    let mut consumed: HashSet<u64> = HashSet::new();

    for press in events.iter() {
        let handled = handle_key(state, bindings, press.key, &mut outcome);
        if let Some(cue) = handled {
            consumed.insert(press.id);
            outcome.cues.push(cue);
        }
    }

    if !consumed.is_empty() {
        events.retain(|press| !consumed.contains(&press.id));
        debug!(
            consumed = consumed.len(),
            filter_changed = outcome.filter_changed,
            editing = state.is_editing(),
            "handled combat log filter keys"
        );
    }

    outcome
}

/// Handle one key. Returns the cue to play if the key was consumed.
fn handle_key(
    state: &mut FilterState,
    bindings: &KeyBindings,
    key: Key,
    outcome: &mut InputOutcome,
) -> Option<Cue> {
    if bindings.matches(Action::ToggleSearch, key) {
        state.toggle_editing();
        return Some(Cue::Confirm);
    }

    if state.is_editing() {
        if bindings.matches(Action::Abort, key) {
            outcome.filter_changed |= state.abort();
            return Some(Cue::Confirm);
        }
        if bindings.matches(Action::Confirm, key) {
            state.confirm();
            return Some(Cue::Confirm);
        }
        if bindings.matches(Action::Backspace, key) {
            if state.pop_char() {
                outcome.filter_changed = true;
                return Some(Cue::Confirm);
            }
            return Some(Cue::Rejected);
        }
        if let Key::Char(c) = key {
            if key.is_text_entry() && state.push_char(c) {
                outcome.filter_changed = true;
                return Some(Cue::Confirm);
            }
        }
        return None;
    }

    if bindings.matches(Action::Reset, key) {
        outcome.filter_changed |= state.reset();
        return Some(Cue::Confirm);
    }
    if let Some(category) = bindings.category_for(key) {
        state.toggle_category(category);
        outcome.filter_changed = true;
        return Some(Cue::Confirm);
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::Category;

    fn presses(keys: &[Key]) -> Vec<KeyPress> {
        keys.iter().map(|k| KeyPress::new(*k)).collect()
    }

    fn typing(keys: &[Key]) -> (FilterState, InputOutcome, Vec<KeyPress>) {
        let mut state = FilterState::new();
        state.toggle_editing();
        let mut events = presses(keys);
        let outcome = handle_key_presses(&mut state, &KeyBindings::default(), &mut events);
        (state, outcome, events)
    }

    #[test]
    fn test_toggle_key_flips_editing_and_is_consumed() {
        let mut state = FilterState::new();
        let mut events = presses(&[Key::Char('/')]);
        let outcome = handle_key_presses(&mut state, &KeyBindings::default(), &mut events);

        assert!(state.is_editing());
        assert!(events.is_empty());
        assert!(!outcome.filter_changed);
        assert_eq!(outcome.cues, vec![Cue::Confirm]);
    }

    #[test]
    fn test_typing_appends_letters_and_spaces() {
        let (state, outcome, events) =
            typing(&[Key::Char('F'), Key::Char('i'), Key::Char(' '), Key::Char('r')]);
        assert_eq!(state.filter_text(), "fi r");
        assert!(outcome.filter_changed);
        assert!(events.is_empty());
        assert_eq!(outcome.cues.len(), 4);
    }

    #[test]
    fn test_non_text_keys_pass_through_while_editing() {
        let (state, outcome, events) = typing(&[Key::Char('7'), Key::Up, Key::Char(':')]);
        assert_eq!(state.filter_text(), "");
        assert!(!outcome.filter_changed);
        assert!(outcome.cues.is_empty());
        assert_eq!(events.len(), 3);
    }

    #[test]
    fn test_backspace_on_empty_is_rejected_without_change() {
        let (state, outcome, events) = typing(&[Key::Backspace]);
        assert_eq!(state.filter_text(), "");
        assert!(!outcome.filter_changed);
        assert_eq!(outcome.cues, vec![Cue::Rejected]);
        assert!(events.is_empty());
    }

    #[test]
    fn test_confirm_keeps_text() {
        let (state, outcome, _) = typing(&[Key::Char('o'), Key::Enter]);
        assert!(!state.is_editing());
        assert_eq!(state.filter_text(), "o");
        assert!(outcome.filter_changed);
    }

    #[test]
    fn test_abort_clears_text() {
        let (state, outcome, _) = typing(&[Key::Char('o'), Key::Esc]);
        assert!(!state.is_editing());
        assert_eq!(state.filter_text(), "");
        assert!(outcome.filter_changed);
    }

    #[test]
    fn test_command_keys_are_letters_while_editing() {
        let (state, _, _) = typing(&[Key::Char('r'), Key::Char('e'), Key::Char('w')]);
        assert_eq!(state.filter_text(), "rew");
        assert!(!state.categories().any());
    }

    #[test]
    fn test_category_toggles_outside_editing() {
        let mut state = FilterState::new();
        let mut events = presses(&[Key::Char('e'), Key::Char('w'), Key::Char('e'), Key::Down]);
        let outcome = handle_key_presses(&mut state, &KeyBindings::default(), &mut events);

        assert!(outcome.filter_changed);
        assert!(state.categories().is_active(Category::Wizard));
        assert!(!state.categories().is_active(Category::Enemy));
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].key, Key::Down);
    }

    #[test]
    fn test_reset_on_default_state_changes_nothing() {
        let mut state = FilterState::new();
        let mut events = presses(&[Key::Char('r')]);
        let outcome = handle_key_presses(&mut state, &KeyBindings::default(), &mut events);

        assert!(!outcome.filter_changed);
        assert_eq!(outcome.cues, vec![Cue::Confirm]);
        assert!(events.is_empty());
    }

    #[test]
    fn test_cue_ids() {
        assert_eq!(Cue::Confirm.id(), "menu_confirm");
        assert_eq!(Cue::Rejected.id(), "hit_4");
    }
}
