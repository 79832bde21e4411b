mod app;
mod draw;
mod widgets;

pub mod display_state;

pub use app::{CombatLogView, LogCanvas, CUE_FLASH_FRAMES};
pub use display_state::{CategoryGlyph, SearchDisplay};
pub use draw::draw;
