mod filter_panel;
mod log_viewer;
mod status_bar;

pub use filter_panel::{draw_filter_panel, FILTER_PANEL_WIDTH};
pub use log_viewer::draw_log_viewer;
pub use status_bar::draw_status_bar;
