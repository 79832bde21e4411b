mod common;

use std::collections::BTreeMap;

use common::*;
use insta::assert_snapshot;
use message_search::input::{Key, KeyBindings};
use message_search::log::LogKey;
use message_search::ui::{CombatLogView, SearchDisplay, CUE_FLASH_FRAMES};
use message_search::view::{InputHandler, LogDisplayUpdater, SearchExtension, SearchSession};

#[test]
fn test_idle_view() {
    let mut view = create_test_view();
    let output = render_view_to_string(&mut view, 61, 10);
    assert_snapshot!(output, @r"
┌ Combat Log: level 1 turn 3 ───────┐┌──────────────────────┐
│Turn 3                             ││Filter by Text        │
│Wizard casts Fireball              ││/none                 │
│Goblin:enemy attacks               ││                      │
│Ally:ally heals                    ││□ wizard              │
│                                   ││□ ally                │
│                                   ││□ enemy               │
│                                   ││                      │
└───────────────────────────────────┘└──────────────────────┘
    Level 1 | Turn 3 | 4 lines | ← → turn  [ ] level  q close
");
}

#[test]
fn test_filtered_view_shows_only_matching_lines() {
    let mut view = create_test_view();
    let mut keys = vec![Key::Char('/')];
    keys.extend(typed("fire"));
    keys.push(Key::Enter);
    view.process_input(&mut presses(&keys));

    let output = render_view_to_string(&mut view, 66, 10);
    assert_snapshot!(output, @r"
┌ Combat Log: level 1 turn 3 ────────────┐┌──────────────────────┐
│Turn 3                                  ││Filter by Text        │
│Wizard casts Fireball                   ││/fire                 │
│                                        ││                      │
│                                        ││□ wizard              │
│                                        ││□ ally                │
│                                        ││□ enemy               │
│                                        ││                      │
└────────────────────────────────────────┘└──────────────────────┘
 ✓  Level 1 | Turn 3 | 2 of 4 lines | ← → turn  [ ] level  q close
");
}

#[test]
fn test_status_bar_follows_key_overrides() {
    let mut overrides = BTreeMap::new();
    overrides.insert("close".to_string(), vec!["x".to_string()]);
    overrides.insert("prev_level".to_string(), vec!["pageup".to_string()]);
    let base = CombatLogView::new(sample_logs(), KeyBindings::from_overrides(&overrides).unwrap());
    let mut view = SearchExtension::new(base, SearchSession::default());
    view.set_log_display(LogKey::new(1, 3));

    let output = render_view_to_string(&mut view, 80, 12);
    assert!(output.contains("← → turn  pageup ] level  x close"));
    assert!(!output.contains("q close"));
}

#[test]
fn test_active_category_is_marked() {
    let mut view = create_test_view();
    view.process_input(&mut presses(&[Key::Char('a')]));

    let output = render_view_to_string(&mut view, 80, 12);

    assert!(output.contains("■ ally"));
    assert!(output.contains("□ wizard"));
    assert!(output.contains("Ally:ally heals"));
    assert!(!output.contains("Wizard casts Fireball"));
}

#[test]
fn test_caret_blinks_while_editing() {
    let mut view = create_test_view();
    view.process_input(&mut presses(&[Key::Char('/')]));

    // Frame 0 is an even phase: no caret, and no placeholder while typing
    let output = render_view_to_string(&mut view, 80, 12);
    assert!(!output.contains("/_"));
    assert!(!output.contains("/none"));

    for _ in 0..8 {
        view.inner_mut().tick();
    }
    let output = render_view_to_string(&mut view, 80, 12);
    assert!(output.contains("/_"));
}

#[test]
fn test_rejected_cue_flashes_then_clears() {
    let mut view = create_test_view();
    view.process_input(&mut presses(&[Key::Char('/'), Key::Backspace]));

    let output = render_view_to_string(&mut view, 80, 12);
    assert!(output.contains("✗"));

    for _ in 0..CUE_FLASH_FRAMES {
        view.inner_mut().tick();
    }
    let output = render_view_to_string(&mut view, 80, 12);
    assert!(!output.contains("✗"));
}

#[test]
fn test_display_matches_what_is_drawn() {
    let view = create_test_view();
    let display: SearchDisplay = view.display();

    assert_eq!(display.prompt, "none");
    assert!(display.dimmed);
    assert!(!display.caret_visible);
}

#[test]
fn test_empty_log_message() {
    let mut view = create_test_view();
    view.set_log_display(LogKey::new(9, 9));

    let output = render_view_to_string(&mut view, 80, 12);
    assert!(output.contains("No combat log for this turn"));
    assert!(output.contains("Filter by Text"));
}
