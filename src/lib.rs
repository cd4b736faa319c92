pub mod background;
pub mod cli;
pub mod code_table;
pub mod config;
pub mod inputs;
pub mod main_app;
pub mod panic_handler;
pub mod theme;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use inputs::event_source;
