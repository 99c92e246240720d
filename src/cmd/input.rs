//! Reading source text for commands

use anyhow::Result;
use std::io::{self, Read};
use std::path::Path;

use crate::error::LuaCloakError;

/// Read `file`, or stdin when no file is given
///
/// A missing file is reported as [`LuaCloakError::FileNotFound`] so the
/// caller exits with `EX_NOINPUT`.
pub fn read_input(file: Option<&Path>, operation: &str) -> Result<String> {
    match file {
        Some(path) => read_file(path, operation),
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .map_err(|source| LuaCloakError::Io {
                    context: "reading stdin".to_string(),
                    source,
                })?;
            Ok(buf)
        }
    }
}

/// Read a file as UTF-8 text
pub fn read_file(path: &Path, operation: &str) -> Result<String> {
    match std::fs::read_to_string(path) {
        Ok(text) => Ok(text),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Err(LuaCloakError::FileNotFound {
            path: path.to_path_buf(),
            operation: operation.to_string(),
        }
        .into()),
        Err(source) => Err(LuaCloakError::Io {
            context: format!("reading {}", path.display()),
            source,
        }
        .into()),
    }
}

/// Write text to a file
pub fn write_file(path: &Path, contents: &str) -> Result<()> {
    std::fs::write(path, contents).map_err(|source| {
        LuaCloakError::Io {
            context: format!("writing {}", path.display()),
            source,
        }
        .into()
    })
}
