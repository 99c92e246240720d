//! Verify command implementation
//!
//! Decodes an artifact without a Lua interpreter and, when given the
//! source, checks the two agree. `--run` additionally executes the
//! artifact with a real interpreter.

use anyhow::Result;
use console::style;
use std::path::Path;

use crate::cmd::input::read_file;
use crate::error::LuaCloakError;
use crate::fmt::{format_bytes, CHECKMARK, INFO};
use crate::runtime::{LuaRuntime, RuntimeError};
use crate::transform::{decode, minify, EncodingMethod, VerifyError};

/// How a decoded artifact relates to the expected source
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceMatch {
    /// Decodes to the source exactly (after trimming)
    Exact,
    /// Decodes to the minified source
    Minified,
}

/// Outcome of checking an artifact
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerifyReport {
    /// Detected encoder
    pub method: EncodingMethod,
    /// Recovered source text
    pub decoded: String,
    /// Comparison with the expected source, when one was given
    pub matched: Option<SourceMatch>,
}

/// Decode `artifact` and compare it with `source` when given
///
/// Compiles trim their input and may minify it, so a match against either
/// form of the source counts.
pub fn check_artifact(artifact: &str, source: Option<&str>) -> Result<VerifyReport, VerifyError> {
    let (method, decoded) = decode(artifact.trim())?;

    let matched = match source {
        None => None,
        Some(source) => {
            let source = source.trim();
            if decoded == source {
                Some(SourceMatch::Exact)
            } else if decoded == minify(source) {
                Some(SourceMatch::Minified)
            } else {
                return Err(VerifyError::Mismatch {
                    decoded_len: decoded.len(),
                    expected_len: source.len(),
                });
            }
        }
    };

    Ok(VerifyReport {
        method,
        decoded,
        matched,
    })
}

/// Check an artifact file
pub fn cmd_verify(file: &Path, source: Option<&Path>, run: bool) -> Result<()> {
    let artifact = read_file(file, "verify")?;
    let expected = source.map(|p| read_file(p, "verify")).transpose()?;

    let report =
        check_artifact(&artifact, expected.as_deref()).map_err(|source| LuaCloakError::VerifyFailed {
            path: file.to_path_buf(),
            source,
        })?;

    println!(
        "{} {} decodes as {} ({})",
        CHECKMARK,
        style(file.display()).bold(),
        style(report.method).cyan(),
        format_bytes(report.decoded.len() as u64)
    );
    match report.matched {
        Some(SourceMatch::Exact) => println!("   matches the source"),
        Some(SourceMatch::Minified) => println!("   matches the minified source"),
        None => {}
    }

    if run {
        let lua = LuaRuntime::detect().ok_or(LuaCloakError::from(RuntimeError::NotFound))?;
        println!("{} running with {}", INFO, style(&lua.binary).bold());
        let output = lua.run_file(file).map_err(LuaCloakError::from)?;
        print!("{output}");
    }

    Ok(())
}
