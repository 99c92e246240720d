//! Command handlers for luacloak CLI
//!
//! Each submodule handles one CLI command. Handlers load settings and
//! stores from the current directory and keep presentation separate from
//! the logic they test.

pub mod compile;
pub mod completions;
pub mod config;
pub mod history;
pub mod input;
pub mod loader;
pub mod progress;
pub mod stats;
pub mod tools;
pub mod verify;

// Re-export command functions for convenient access
pub use compile::{cmd_compile, CompileArgs};
pub use completions::cmd_completions;
pub use config::{cmd_config, ConfigAction};
pub use history::{cmd_history, HistoryAction};
pub use loader::cmd_loader;
pub use stats::cmd_stats;
pub use tools::{cmd_analyze, cmd_beautify, cmd_minify};
pub use verify::cmd_verify;
