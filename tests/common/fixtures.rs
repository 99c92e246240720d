//! Test fixture helpers for creating Lua projects

#![allow(dead_code)]

use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

/// Re-export anyhow for convenience
pub use anyhow;

/// A small script with comments, blank lines and nesting
pub const SAMPLE_SCRIPT: &str = r#"-- greeting module
local function greet(name)
    -- say hello
    return "Hello, " .. name
end

for i = 1, 3 do
    print(greet("player" .. i))
end
"#;

/// Creates a project directory holding `main.lua` and `util.lua`
pub fn lua_project() -> anyhow::Result<TempDir> {
    let temp_dir = TempDir::new()?;
    fs::write(temp_dir.path().join("main.lua"), SAMPLE_SCRIPT)?;
    fs::write(temp_dir.path().join("util.lua"), "print(\"util loaded\")\n")?;
    Ok(temp_dir)
}

/// Writes `.luacloak.toml` with the given body
pub fn write_config(project: &TempDir, body: &str) -> anyhow::Result<PathBuf> {
    let path = project.path().join(".luacloak.toml");
    fs::write(&path, body)?;
    Ok(path)
}

/// Settings that keep CLI tests fast (no simulated delay)
pub const FAST_CONFIG: &str = "compile_delay_ms = 0\nenable_animations = false\n";
