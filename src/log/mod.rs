use std::collections::HashMap;
use std::fmt;

use tracing::debug;

pub mod file;

pub use file::RunLogs;

/// Identifies one per-turn combat log of a dungeon level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LogKey {
    pub level: u32,
    pub turn: u32,
}

impl LogKey {
    pub fn new(level: u32, turn: u32) -> Self {
        Self { level, turn }
    }
}

impl fmt::Display for LogKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "level {} turn {}", self.level, self.turn)
    }
}

/// Reads the raw lines of combat logs
pub trait LogReader {
    /// Trimmed lines of the log for `key`, empty if there is no such log
    fn read_lines(&self, key: LogKey) -> Vec<String>;

    /// Levels that have at least one log, ascending
    fn levels(&self) -> Vec<u32>;

    /// Turns logged for `level`, ascending
    fn turns(&self, level: u32) -> Vec<u32>;
}

/// Caches raw log lines per key. Logs never change once written, so each
/// key is read at most once.
#[derive(Debug)]
pub struct LogStore<R> {
    reader: R,
    loaded: HashMap<LogKey, Vec<String>>,
}

impl<R: LogReader> LogStore<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            loaded: HashMap::new(),
        }
    }

    pub fn reader(&self) -> &R {
        &self.reader
    }

    /// Raw lines for `key`, reading them on first use
    pub fn lines(&mut self, key: LogKey) -> &[String] {
        let reader = &self.reader;
        self.loaded.entry(key).or_insert_with(|| {
            let lines = reader.read_lines(key);
            debug!(%key, lines = lines.len(), "loaded combat log");
            lines
        })
    }

    /// Lines already loaded for `key`; empty if it was never loaded
    pub fn cached(&self, key: LogKey) -> &[String] {
        self.loaded.get(&key).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn is_loaded(&self, key: LogKey) -> bool {
        self.loaded.contains_key(&key)
    }
}
