use crate::filter::{Category, FilterState};

/// Title of the filter panel
pub const PANEL_TITLE: &str = "Filter by Text";

/// Prompt shown when no text filter is set and the user is not typing
pub const NO_FILTER_PLACEHOLDER: &str = "none";

/// Number of blink phases in one full animation cycle
const BLINK_PHASES: u64 = 6;

/// Number of colours the `/` hint cycles through
pub const HINT_PHASES: usize = 3;

/// Active/inactive marker drawn next to a category name
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CategoryGlyph {
    Active,
    Inactive,
}

impl CategoryGlyph {
    pub fn symbol(self) -> &'static str {
        match self {
            CategoryGlyph::Active => "■",
            CategoryGlyph::Inactive => "□",
        }
    }
}

/// Everything the renderer needs to draw the filter panel for one frame
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchDisplay {
    pub title: &'static str,
    /// Filter text, or the placeholder when there is none and nobody is typing
    pub prompt: String,
    /// Draw the prompt greyed out
    pub dimmed: bool,
    pub editing: bool,
    /// Caret blink; only ever on while editing
    pub caret_visible: bool,
    /// Index into the hint colour cycle, `0..HINT_PHASES`
    pub hint_phase: usize,
    pub categories: [(Category, CategoryGlyph); 3],
}

impl SearchDisplay {
    /// Derive the panel state from the filter and the host's frame counter.
    /// `blink_subframes` is how many frames each blink phase lasts.
    pub fn new(state: &FilterState, frame: u64, blink_subframes: u64) -> Self {
        let phase = frame / blink_subframes.max(1) % BLINK_PHASES;
        let text = state.filter_text();
        let editing = state.is_editing();

        let prompt = if text.is_empty() && !editing {
            NO_FILTER_PLACEHOLDER.to_string()
        } else {
            text.to_string()
        };

        let categories = Category::ALL.map(|c| {
            let glyph = if state.categories().is_active(c) {
                CategoryGlyph::Active
            } else {
                CategoryGlyph::Inactive
            };
            (c, glyph)
        });

        Self {
            title: PANEL_TITLE,
            prompt,
            dimmed: text.is_empty() && !editing,
            editing,
            caret_visible: editing && phase % 2 == 1,
            hint_phase: (phase % HINT_PHASES as u64) as usize,
            categories,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_placeholder_when_idle_and_empty() {
        let display = SearchDisplay::new(&FilterState::new(), 0, 8);
        assert_eq!(display.prompt, NO_FILTER_PLACEHOLDER);
        assert!(display.dimmed);
        assert!(!display.caret_visible);
    }

    #[test]
    fn test_empty_prompt_while_editing() {
        let mut state = FilterState::new();
        state.toggle_editing();
        let display = SearchDisplay::new(&state, 0, 8);
        assert_eq!(display.prompt, "");
        assert!(!display.dimmed);
    }

    #[test]
    fn test_caret_blinks_only_while_editing() {
        let mut state = FilterState::new();
        state.push_char('o');

        let blink: Vec<bool> = (0..6)
            .map(|phase| SearchDisplay::new(&state, phase * 8, 8).caret_visible)
            .collect();
        assert_eq!(blink, vec![false; 6]);

        state.toggle_editing();
        let blink: Vec<bool> = (0..6)
            .map(|phase| SearchDisplay::new(&state, phase * 8, 8).caret_visible)
            .collect();
        assert_eq!(blink, vec![false, true, false, true, false, true]);
    }

    #[test]
    fn test_hint_phase_cycles_and_wraps() {
        let state = FilterState::new();
        let phases: Vec<usize> = (0..8)
            .map(|f| SearchDisplay::new(&state, f, 1).hint_phase)
            .collect();
        assert_eq!(phases, vec![0, 1, 2, 0, 1, 2, 0, 1]);
    }

    #[test]
    fn test_zero_subframes_does_not_divide_by_zero() {
        let display = SearchDisplay::new(&FilterState::new(), 5, 0);
        assert_eq!(display.hint_phase, 2);
    }

    #[test]
    fn test_category_glyphs() {
        let mut state = FilterState::new();
        state.toggle_category(Category::Ally);
        let display = SearchDisplay::new(&state, 0, 8);
        assert_eq!(
            display.categories,
            [
                (Category::Wizard, CategoryGlyph::Inactive),
                (Category::Ally, CategoryGlyph::Active),
                (Category::Enemy, CategoryGlyph::Inactive),
            ]
        );
    }
}
