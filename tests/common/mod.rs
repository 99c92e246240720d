//! Common test utilities and helpers
//!
//! This module provides shared functionality for integration tests:
//! - Project fixtures with sample Lua sources
//! - Lua interpreter detection for runtime round-trips
//!
//! # Usage
//!
//! ```rust,no_run
//! mod common;
//! use common::fixtures;
//!
//! let project = fixtures::lua_project().unwrap();
//! assert!(project.path().join("main.lua").exists());
//! ```

pub mod fixtures;

/// Check if running in CI environment
#[allow(dead_code)]
pub fn is_ci() -> bool {
    std::env::var("CI").is_ok() || std::env::var("GITHUB_ACTIONS").is_ok()
}

/// First Lua 5.1 compatible interpreter on PATH
#[allow(dead_code)]
pub fn lua_interpreter() -> Option<&'static str> {
    ["luajit", "lua5.1"]
        .into_iter()
        .find(|bin| which::which(bin).is_ok())
}

/// Macro to skip tests when no Lua interpreter is available
#[macro_export]
macro_rules! require_lua {
    () => {
        match $crate::common::lua_interpreter() {
            Some(bin) => bin,
            None => {
                eprintln!("⚠️  Skipping test: no luajit or lua5.1 in PATH");
                return;
            }
        }
    };
}
