use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;

use crate::filter::{Category, CategoryMarkers, LogFilterEngine};
use crate::input::KeyBindings;
use crate::view::SearchSession;

/// Default frames per caret blink phase
pub const DEFAULT_BLINK_SUBFRAMES: u64 = 8;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Directory holding one sub-directory per run
    #[serde(default = "default_saves_dir")]
    pub saves_dir: PathBuf,
    /// Run to open when none is given on the command line
    #[serde(skip_serializing_if = "Option::is_none")]
    pub run: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub blink_subframes: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_file: Option<PathBuf>,
    /// Key binding overrides, action name to key names
    #[serde(default)]
    pub keys: BTreeMap<String, Vec<String>>,
    /// Category marker overrides, category name to markers
    #[serde(default)]
    pub categories: BTreeMap<String, Vec<String>>,

    // This field is not serialized, just used at runtime
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

fn default_saves_dir() -> PathBuf {
    PathBuf::from("saves")
}

impl Default for Config {
    fn default() -> Self {
        Self {
            saves_dir: default_saves_dir(),
            run: None,
            blink_subframes: None,
            log_file: None,
            keys: BTreeMap::new(),
            categories: BTreeMap::new(),
            config_path: None,
        }
    }
}

impl Config {
    pub fn from_file(path: &str) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    pub fn save(&self, path: &str) -> anyhow::Result<()> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Config written by `--init`: every default spelled out so it can be edited
    pub fn with_defaults_spelled_out() -> Self {
        let bindings = KeyBindings::default();
        let keys = crate::input::Action::ALL
            .into_iter()
            .map(|a| {
                let names = bindings.keys(a).iter().map(|k| k.to_string()).collect();
                (a.name().to_string(), names)
            })
            .collect();

        let markers = CategoryMarkers::default();
        let categories = Category::ALL
            .into_iter()
            .map(|c| (c.name().to_string(), markers.get(c).to_vec()))
            .collect();

        Self {
            blink_subframes: Some(DEFAULT_BLINK_SUBFRAMES),
            keys,
            categories,
            ..Self::default()
        }
    }

    pub fn blink_subframes(&self) -> u64 {
        self.blink_subframes.unwrap_or(DEFAULT_BLINK_SUBFRAMES)
    }

    pub fn key_bindings(&self) -> anyhow::Result<KeyBindings> {
        KeyBindings::from_overrides(&self.keys)
    }

    pub fn category_markers(&self) -> anyhow::Result<CategoryMarkers> {
        let mut markers = CategoryMarkers::default();
        for (name, values) in &self.categories {
            let category: Category = name.parse()?;
            markers.set(category, values);
        }
        Ok(markers)
    }

    /// Build the filter session this config describes
    pub fn search_session(&self) -> anyhow::Result<SearchSession> {
        Ok(SearchSession::new(
            self.key_bindings()?,
            LogFilterEngine::new(self.category_markers()?),
            self.blink_subframes(),
        ))
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        if self.blink_subframes == Some(0) {
            anyhow::bail!("blink_subframes must be at least 1");
        }

        self.key_bindings()?;

        for (name, markers) in &self.categories {
            let category: Category = name.parse()?;
            if markers.iter().all(|m| m.is_empty()) {
                anyhow::bail!("Category '{}' needs at least one non-empty marker", category);
            }
        }

        if let Some(run) = &self.run {
            if run.is_empty() || run.contains(['/', '\\']) {
                anyhow::bail!("Invalid run '{}'", run);
            }
        }

        Ok(())
    }
}
