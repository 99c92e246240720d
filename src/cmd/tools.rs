//! Source tools: minify, beautify, analyze

use anyhow::Result;
use console::style;
use std::path::{Path, PathBuf};

use crate::cmd::input::{read_input, write_file};
use crate::error::LuaCloakError;
use crate::fmt::{format_bytes, MICROSCOPE};
use crate::transform::{analyze, beautify, minify, TransformError};

fn require_code(text: &str) -> Result<(), LuaCloakError> {
    if text.trim().is_empty() {
        return Err(TransformError::EmptyInput.into());
    }
    Ok(())
}

fn emit(text: &str, output: Option<&Path>) -> Result<()> {
    match output {
        Some(path) => write_file(path, text),
        None => {
            println!("{text}");
            Ok(())
        }
    }
}

/// Minify a source file (or stdin)
pub fn cmd_minify(file: Option<&Path>, output: Option<&PathBuf>) -> Result<()> {
    let text = read_input(file, "minify")?;
    require_code(&text)?;
    emit(&minify(&text), output.map(PathBuf::as_path))
}

/// Re-indent a source file (or stdin)
pub fn cmd_beautify(file: Option<&Path>, output: Option<&PathBuf>) -> Result<()> {
    let text = read_input(file, "beautify")?;
    require_code(&text)?;
    emit(&beautify(&text), output.map(PathBuf::as_path))
}

/// Print line, character and size counts
pub fn cmd_analyze(file: Option<&Path>, json: bool) -> Result<()> {
    let text = read_input(file, "analyze")?;
    require_code(&text)?;
    let stats = analyze(&text);

    if json {
        println!("{}", serde_json::to_string_pretty(&stats)?);
    } else {
        println!(
            "{} Lines: {} | Chars: {} | Size: {}",
            MICROSCOPE,
            style(stats.lines).bold(),
            style(stats.chars).bold(),
            style(format_bytes(stats.bytes)).bold()
        );
    }
    Ok(())
}
