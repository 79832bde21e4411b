use std::collections::BTreeMap;

use super::{Category, FilterState};

/// Substrings that tag a log line as belonging to a category
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryMarkers {
    /// Lowercased markers per category
    markers: BTreeMap<Category, Vec<String>>,
}

impl CategoryMarkers {
    pub fn new() -> Self {
        Self {
            markers: BTreeMap::new(),
        }
    }

    /// Replace the markers for a category. Markers match case-insensitively.
    pub fn set(&mut self, category: Category, markers: &[String]) {
        let lowered = markers
            .iter()
            .filter(|m| !m.is_empty())
            .map(|m| m.to_lowercase())
            .collect();
        self.markers.insert(category, lowered);
    }

    pub fn get(&self, category: Category) -> &[String] {
        self.markers.get(&category).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Check a pre-computed lowercase line against a category
    pub fn matches_lowercase(&self, category: Category, line_lowercase: &str) -> bool {
        self.get(category)
            .iter()
            .any(|marker| line_lowercase.contains(marker.as_str()))
    }
}

impl Default for CategoryMarkers {
    fn default() -> Self {
        let mut markers = Self::new();
        markers.set(Category::Wizard, &["wizard".to_string()]);
        markers.set(Category::Ally, &[":ally".to_string()]);
        markers.set(Category::Enemy, &[":enemy".to_string()]);
        markers
    }
}

/// Derives the visible lines of a combat log from its raw lines
#[derive(Debug, Clone, Default)]
pub struct LogFilterEngine {
    markers: CategoryMarkers,
}

impl LogFilterEngine {
    pub fn new(markers: CategoryMarkers) -> Self {
        Self { markers }
    }

    pub fn markers(&self) -> &CategoryMarkers {
        &self.markers
    }

    /// Apply the state's filters to `raw`.
    ///
    /// The header (line 0) survives every filter. The text filter and each
    /// active category narrow the set independently, so a line must pass all
    /// of them. Order is kept and nothing is duplicated.
    pub fn visible_lines(&self, raw: &[String], state: &FilterState) -> Vec<String> {
        let Some((header, body)) = raw.split_first() else {
            return Vec::new();
        };

        if !state.is_filtering() {
            return raw.to_vec();
        }

        let text = state.filter_text();
        let active: Vec<Category> = state.categories().active().collect();

        let mut visible = Vec::with_capacity(raw.len());
        visible.push(header.clone());
        visible.extend(
            body.iter()
                .filter(|line| {
                    let line_lower = line.to_lowercase();
                    (text.is_empty() || line_lower.contains(text))
                        && active
                            .iter()
                            .all(|c| self.markers.matches_lowercase(*c, &line_lower))
                })
                .cloned(),
        );
        visible
    }
}
