use std::fmt;
use std::str::FromStr;

pub mod engine;

pub use engine::{CategoryMarkers, LogFilterEngine};

/// Categorical line filters. The set is closed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Category {
    Wizard,
    Ally,
    Enemy,
}

impl Category {
    pub const ALL: [Category; 3] = [Category::Wizard, Category::Ally, Category::Enemy];

    pub fn name(self) -> &'static str {
        match self {
            Category::Wizard => "wizard",
            Category::Ally => "ally",
            Category::Enemy => "enemy",
        }
    }

    fn index(self) -> usize {
        match self {
            Category::Wizard => 0,
            Category::Ally => 1,
            Category::Enemy => 2,
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Category {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|c| c.name() == s)
            .ok_or_else(|| anyhow::anyhow!("Unknown category '{}'", s))
    }
}

/// One flag per category, all off by default
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CategoryFlags([bool; 3]);

impl CategoryFlags {
    pub fn is_active(&self, category: Category) -> bool {
        self.0[category.index()]
    }

    pub fn set(&mut self, category: Category, active: bool) {
        self.0[category.index()] = active;
    }

    pub fn toggle(&mut self, category: Category) {
        let flag = &mut self.0[category.index()];
        *flag = !*flag;
    }

    /// Categories that currently narrow the log, in declaration order
    pub fn active(&self) -> impl Iterator<Item = Category> + '_ {
        Category::ALL.into_iter().filter(|c| self.is_active(*c))
    }

    pub fn any(&self) -> bool {
        self.0.iter().any(|f| *f)
    }
}

/// Filter state for one combat-log view session.
///
/// `filter_text` only ever holds lowercase ASCII letters and spaces; every
/// mutation goes through the methods below so the invariant cannot be broken
/// from outside.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterState {
    filter_text: String,
    editing: bool,
    categories: CategoryFlags,
}

impl FilterState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn filter_text(&self) -> &str {
        &self.filter_text
    }

    pub fn is_editing(&self) -> bool {
        self.editing
    }

    pub fn categories(&self) -> &CategoryFlags {
        &self.categories
    }

    pub fn toggle_editing(&mut self) {
        self.editing = !self.editing;
    }

    /// Leave text entry keeping the text
    pub fn confirm(&mut self) {
        self.editing = false;
    }

    /// Leave text entry and drop the text. Returns true if the text changed.
    pub fn abort(&mut self) -> bool {
        self.editing = false;
        let changed = !self.filter_text.is_empty();
        self.filter_text.clear();
        changed
    }

    /// Append a typed character. Letters are folded to lowercase; anything
    /// other than a letter or a space is rejected and returns false.
    pub fn push_char(&mut self, c: char) -> bool {
        if c.is_ascii_alphabetic() || c == ' ' {
            self.filter_text.push(c.to_ascii_lowercase());
            true
        } else {
            false
        }
    }

    /// Remove the last character. Returns false when the text was already empty.
    pub fn pop_char(&mut self) -> bool {
        self.filter_text.pop().is_some()
    }

    pub fn toggle_category(&mut self, category: Category) {
        self.categories.toggle(category);
    }

    /// Clear the text and every category flag. Returns true if anything changed.
    pub fn reset(&mut self) -> bool {
        let changed = !self.filter_text.is_empty() || self.categories.any();
        self.filter_text.clear();
        self.categories = CategoryFlags::default();
        changed
    }

    /// Whether any filter narrows the log at all
    pub fn is_filtering(&self) -> bool {
        !self.filter_text.is_empty() || self.categories.any()
    }
}
