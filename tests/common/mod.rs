#![allow(dead_code)]

use std::cell::Cell;
use std::collections::BTreeMap;

use message_search::{
    input::{Key, KeyBindings, KeyPress},
    log::{LogKey, LogReader},
    ui::CombatLogView,
    view::{LogDisplayUpdater, SearchExtension, SearchSession},
};
use ratatui::{backend::TestBackend, Terminal};

/// Combat logs held in memory, counting how often they are read
#[derive(Default)]
pub struct MemoryLogs {
    pub logs: BTreeMap<LogKey, Vec<String>>,
    pub reads: Cell<usize>,
}

impl MemoryLogs {
    pub fn with(mut self, level: u32, turn: u32, lines: &[&str]) -> Self {
        self.logs.insert(
            LogKey::new(level, turn),
            lines.iter().map(|l| l.to_string()).collect(),
        );
        self
    }
}

impl LogReader for MemoryLogs {
    fn read_lines(&self, key: LogKey) -> Vec<String> {
        self.reads.set(self.reads.get() + 1);
        self.logs.get(&key).cloned().unwrap_or_default()
    }

    fn levels(&self) -> Vec<u32> {
        let mut levels: Vec<u32> = self.logs.keys().map(|k| k.level).collect();
        levels.dedup();
        levels
    }

    fn turns(&self, level: u32) -> Vec<u32> {
        self.logs
            .keys()
            .filter(|k| k.level == level)
            .map(|k| k.turn)
            .collect()
    }
}

/// The combat log used throughout the tests
pub fn sample_lines() -> Vec<String> {
    [
        "Turn 3",
        "Wizard casts Fireball",
        "Goblin:enemy attacks",
        "Ally:ally heals",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

/// A run with two levels: level 1 has turns 1 and 3, level 2 has turn 1
pub fn sample_logs() -> MemoryLogs {
    MemoryLogs::default()
        .with(1, 1, &["Turn 1", "Wizard casts Magic Missile", "Goblin:enemy misses"])
        .with(
            1,
            3,
            &["Turn 3", "Wizard casts Fireball", "Goblin:enemy attacks", "Ally:ally heals"],
        )
        .with(2, 1, &["Turn 1", "Troll:enemy regenerates"])
}

pub type TestView = SearchExtension<CombatLogView<MemoryLogs>>;

/// A decorated view showing level 1 turn 3
pub fn create_test_view() -> TestView {
    let base = CombatLogView::new(sample_logs(), KeyBindings::default());
    let mut view = SearchExtension::new(base, SearchSession::default());
    view.set_log_display(LogKey::new(1, 3));
    view
}

pub fn presses(keys: &[Key]) -> Vec<KeyPress> {
    keys.iter().map(|k| KeyPress::new(*k)).collect()
}

/// Keys for typing `text`
pub fn typed(text: &str) -> Vec<Key> {
    text.chars().map(Key::Char).collect()
}

/// Render the view to a test terminal and return the buffer as a string
pub fn render_view_to_string(view: &mut TestView, width: u16, height: u16) -> String {
    let backend = TestBackend::new(width, height);
    let mut terminal = Terminal::new(backend).unwrap();

    terminal
        .draw(|f| {
            message_search::ui::draw(f, view);
        })
        .unwrap();

    let buffer = terminal.backend().buffer();
    let mut result = String::new();
    for y in 0..height {
        for x in 0..width {
            let cell = buffer.cell((x, y)).unwrap();
            result.push_str(cell.symbol());
        }
        result.push('\n');
    }
    result
}
