// Library exports for message-search
// This allows the test suite to import modules

pub mod config;
pub mod filter;
pub mod input;
pub mod log;
pub mod logging;
pub mod ui;
pub mod view;
