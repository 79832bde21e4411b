use anyhow::{anyhow, Context};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

use message_search::config::Config;
use message_search::filter::{Category, FilterState};
use message_search::log::{LogKey, LogReader, LogStore, RunLogs};

/// Combat log viewer with text and category filters
#[derive(Parser, Debug)]
#[command(name = "msearch")]
#[command(version)]
#[command(about = "Combat log viewer with text and category filters")]
#[command(long_about = "msearch browses the per-turn combat logs a run leaves under
saves/<run>/log/<level>/combat_log.<turn>.txt.

Keys (defaults, see --init to change them):
  /          start or stop typing a filter
  Enter/Esc  keep / clear the typed filter
  w a e      toggle the wizard, ally and enemy filters
  r          reset all filters
  ←/→ [ ]    previous/next turn, previous/next level
  q, Ctrl+C  close")]
pub struct Cli {
    /// Path to config file (defaults to .msearch.toml)
    #[arg(short, long, default_value = ".msearch.toml")]
    pub config: String,

    /// Write a config file with every default spelled out
    #[arg(long)]
    pub init: bool,

    /// Saves directory (overrides config file setting)
    #[arg(short, long)]
    pub saves: Option<PathBuf>,

    /// Run to open (defaults to config, then the highest numbered run)
    #[arg(short, long)]
    pub run: Option<String>,

    /// Level to open (defaults to the deepest level)
    #[arg(long)]
    pub level: Option<u32>,

    /// Turn to open (defaults to the last turn of the level)
    #[arg(long)]
    pub turn: Option<u32>,

    /// Log file for diagnostics (overrides config file setting)
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// List the runs in the saves directory
    Runs,
    /// Print the filtered lines of one combat log and exit
    Print {
        /// Text the lines must contain (letters and spaces, case-insensitive)
        #[arg(long, default_value = "")]
        filter: String,
        /// Category the lines must belong to; repeat for several
        #[arg(long = "category", value_parser = parse_category)]
        categories: Vec<Category>,
    },
}

fn parse_category(s: &str) -> Result<Category, String> {
    s.parse().map_err(|e: anyhow::Error| e.to_string())
}

/// Write a default config file unless one already exists
pub fn init_config(config_path: &str) -> anyhow::Result<()> {
    if Path::new(config_path).exists() {
        println!("Config file '{}' already exists.", config_path);
        return Ok(());
    }

    Config::with_defaults_spelled_out()
        .save(config_path)
        .with_context(|| format!("Failed to write config to '{}'", config_path))?;
    println!("Created {}", config_path);
    println!("\nNext steps:");
    println!("  1. Edit {} to point saves_dir at the game's saves folder", config_path);
    println!("  2. Run 'msearch' to browse the latest run");
    Ok(())
}

/// Load the config file if present, then apply command line overrides
pub fn load_config(cli: &Cli) -> anyhow::Result<Config> {
    let mut config = if Path::new(&cli.config).exists() {
        Config::from_file(&cli.config)
            .with_context(|| format!("Failed to load config from '{}'", cli.config))?
    } else {
        Config::default()
    };
    config.config_path = Some(PathBuf::from(&cli.config));

    if let Some(saves) = &cli.saves {
        config.saves_dir = saves.clone();
    }
    if let Some(run) = &cli.run {
        config.run = Some(run.clone());
    }
    if let Some(log_file) = &cli.log_file {
        config.log_file = Some(log_file.clone());
    }

    config.validate()?;
    Ok(config)
}

/// Numbered run directories under `saves_dir`, ascending
pub fn list_runs(saves_dir: &Path) -> anyhow::Result<Vec<String>> {
    let entries = std::fs::read_dir(saves_dir)
        .with_context(|| format!("Cannot read saves directory '{}'", saves_dir.display()))?;

    let mut runs: Vec<(u64, String)> = entries
        .filter_map(|e| e.ok())
        .filter(|e| e.path().join("log").is_dir())
        .filter_map(|e| {
            let name = e.file_name().to_str()?.to_string();
            Some((name.parse().ok()?, name))
        })
        .collect();
    runs.sort();
    Ok(runs.into_iter().map(|(_, name)| name).collect())
}

/// The run to open: the configured one, or the most recent
pub fn resolve_run(config: &Config) -> anyhow::Result<String> {
    if let Some(run) = &config.run {
        return Ok(run.clone());
    }
    list_runs(&config.saves_dir)?
        .pop()
        .ok_or_else(|| anyhow!("No runs with combat logs in '{}'", config.saves_dir.display()))
}

/// The log to open first, honouring --level/--turn where given
pub fn resolve_key(logs: &RunLogs, level: Option<u32>, turn: Option<u32>) -> Option<LogKey> {
    let level = level.or_else(|| logs.levels().last().copied())?;
    let turn = turn.or_else(|| logs.turns(level).last().copied())?;
    Some(LogKey::new(level, turn))
}

/// Print the filtered lines of one log to stdout
pub fn print_log(
    config: &Config,
    logs: RunLogs,
    key: LogKey,
    filter: &str,
    categories: &[Category],
) -> anyhow::Result<()> {
    let mut state = FilterState::new();
    for c in filter.chars() {
        if !state.push_char(c) {
            return Err(anyhow!(
                "Filter text may only contain letters and spaces, found '{}'",
                c
            ));
        }
    }
    for category in categories {
        if !state.categories().is_active(*category) {
            state.toggle_category(*category);
        }
    }

    let engine = config.search_session()?.engine;
    let mut store = LogStore::new(logs);
    for line in engine.visible_lines(store.lines(key), &state) {
        println!("{}", line);
    }
    Ok(())
}
