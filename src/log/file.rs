use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use super::{LogKey, LogReader};

/// Combat logs of one run, laid out by the game as
/// `<saves>/<run>/log/<level>/combat_log.<turn>.txt`
#[derive(Debug, Clone)]
pub struct RunLogs {
    /// `<saves>/<run>/log`
    root: PathBuf,
}

impl RunLogs {
    pub fn new(saves_dir: impl AsRef<Path>, run: &str) -> Self {
        Self {
            root: saves_dir.as_ref().join(run).join("log"),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn path_for(&self, key: LogKey) -> PathBuf {
        self.root
            .join(key.level.to_string())
            .join(format!("combat_log.{}.txt", key.turn))
    }
}

/// Parse the turn out of a `combat_log.<turn>.txt` file name
fn parse_turn(file_name: &str) -> Option<u32> {
    file_name
        .strip_prefix("combat_log.")?
        .strip_suffix(".txt")?
        .parse()
        .ok()
}

/// Numeric entries of a directory, sorted. Unreadable directories list nothing.
fn numbered_entries(dir: &Path, parse: impl Fn(&str) -> Option<u32>) -> Vec<u32> {
    let Ok(entries) = fs::read_dir(dir) else {
        return Vec::new();
    };

    let mut numbers: Vec<u32> = entries
        .filter_map(|entry| entry.ok())
        .filter_map(|entry| parse(entry.file_name().to_str()?))
        .collect();
    numbers.sort_unstable();
    numbers
}

impl LogReader for RunLogs {
    fn read_lines(&self, key: LogKey) -> Vec<String> {
        let path = self.path_for(key);
        match fs::read(&path) {
            // Invalid bytes decode to U+FFFD; the rest of the log survives
            Ok(bytes) => String::from_utf8_lossy(&bytes)
                .lines()
                .map(|l| l.trim().to_string())
                .collect(),
            Err(e) => {
                // A turn without a log is normal; show it as empty
                debug!(path = %path.display(), error = %e, "no combat log");
                Vec::new()
            }
        }
    }

    fn levels(&self) -> Vec<u32> {
        numbered_entries(&self.root, |name| name.parse().ok())
    }

    fn turns(&self, level: u32) -> Vec<u32> {
        numbered_entries(&self.root.join(level.to_string()), parse_turn)
    }
}
