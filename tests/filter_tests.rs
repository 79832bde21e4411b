mod common;

use common::*;
use insta::assert_snapshot;
use message_search::filter::{Category, FilterState, LogFilterEngine};

fn state_with(text: &str, categories: &[Category]) -> FilterState {
    let mut state = FilterState::new();
    for c in text.chars() {
        assert!(state.push_char(c));
    }
    for category in categories {
        state.toggle_category(*category);
    }
    state
}

/// Every combination of filters worth checking against the sample log
fn filter_states() -> Vec<FilterState> {
    let texts = ["", "fireball", "goblin", "zzz", "turn", " "];
    let category_sets: [&[Category]; 5] = [
        &[],
        &[Category::Wizard],
        &[Category::Enemy],
        &[Category::Ally, Category::Enemy],
        &[Category::Wizard, Category::Ally, Category::Enemy],
    ];

    texts
        .iter()
        .flat_map(|t| category_sets.iter().map(move |c| state_with(t, c)))
        .collect()
}

#[test]
fn test_enemy_category_keeps_header_and_enemy_lines() {
    let engine = LogFilterEngine::default();
    let visible = engine.visible_lines(&sample_lines(), &state_with("", &[Category::Enemy]));
    assert_snapshot!(visible.join(" | "), @"Turn 3 | Goblin:enemy attacks");
}

#[test]
fn test_text_filter_is_case_insensitive() {
    let engine = LogFilterEngine::default();
    let visible = engine.visible_lines(&sample_lines(), &state_with("fireball", &[]));
    assert_snapshot!(visible.join(" | "), @"Turn 3 | Wizard casts Fireball");
}

#[test]
fn test_wizard_category_matches_name_marker() {
    let engine = LogFilterEngine::default();
    let visible = engine.visible_lines(&sample_lines(), &state_with("", &[Category::Wizard]));
    assert_snapshot!(visible.join(" | "), @"Turn 3 | Wizard casts Fireball");
}

#[test]
fn test_active_categories_intersect() {
    let engine = LogFilterEngine::default();
    let visible = engine.visible_lines(
        &sample_lines(),
        &state_with("", &[Category::Ally, Category::Enemy]),
    );
    assert_eq!(visible, vec!["Turn 3".to_string()]);
}

#[test]
fn test_header_always_survives() {
    let engine = LogFilterEngine::default();
    let raw = sample_lines();
    for state in filter_states() {
        let visible = engine.visible_lines(&raw, &state);
        assert_eq!(visible.first(), Some(&raw[0]), "state {:?}", state);
    }
}

#[test]
fn test_filtering_is_idempotent_and_order_preserving() {
    let engine = LogFilterEngine::default();
    let raw = sample_lines();
    for state in filter_states() {
        let first = engine.visible_lines(&raw, &state);
        let second = engine.visible_lines(&raw, &state);
        assert_eq!(first, second);

        // Visible lines appear in raw order, each at most once
        let positions: Vec<usize> = first
            .iter()
            .map(|line| raw.iter().position(|r| r == line).unwrap())
            .collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]), "state {:?}", state);
    }
}

#[test]
fn test_empty_log_stays_empty_under_any_filter() {
    let engine = LogFilterEngine::default();
    for state in filter_states() {
        assert!(engine.visible_lines(&[], &state).is_empty());
    }
}

#[test]
fn test_filtering_the_filtered_set_changes_nothing() {
    let engine = LogFilterEngine::default();
    let raw = sample_lines();
    for state in filter_states() {
        let once = engine.visible_lines(&raw, &state);
        let twice = engine.visible_lines(&once, &state);
        assert_eq!(once, twice, "state {:?}", state);
    }
}
