//! Lua interpreter detection and execution
//!
//! Artifacts target Lua 5.1 semantics (`loadstring`). When an interpreter
//! is on `PATH` the host can run an artifact and capture what it prints.

use std::path::Path;
use std::process::Output;

use crate::infra::{CommandExecutor, RealCommandExecutor};
use thiserror::Error;

/// Interpreter binaries tried in order
pub const CANDIDATES: &[&str] = &["luajit", "lua5.1", "lua"];

/// Errors that can occur while running an artifact
#[derive(Error, Debug)]
pub enum RuntimeError {
    /// I/O error spawning the interpreter
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// No interpreter found on PATH
    #[error("No Lua interpreter found (tried {})", CANDIDATES.join(", "))]
    NotFound,

    /// Interpreter exited with a failure status
    #[error("{binary} exited with status {code:?}: {stderr}")]
    Failed {
        /// Interpreter binary
        binary: String,
        /// Exit code, if any
        code: Option<i32>,
        /// Captured stderr
        stderr: String,
    },
}

/// A Lua interpreter located on `PATH`
#[derive(Debug, Clone)]
pub struct LuaRuntime<CE: CommandExecutor = RealCommandExecutor> {
    /// Binary name as found
    pub binary: String,
    cmd_executor: CE,
}

impl LuaRuntime<RealCommandExecutor> {
    /// Locate the first available interpreter from [`CANDIDATES`]
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use luacloak::runtime::LuaRuntime;
    ///
    /// match LuaRuntime::detect() {
    ///     Some(lua) => println!("using {}", lua.binary),
    ///     None => println!("no interpreter installed"),
    /// }
    /// ```
    pub fn detect() -> Option<Self> {
        Self::detect_from(CANDIDATES, RealCommandExecutor)
    }
}

impl<CE: CommandExecutor> LuaRuntime<CE> {
    /// Locate the first of `candidates` that is on `PATH`
    pub fn detect_from(candidates: &[&str], cmd_executor: CE) -> Option<Self> {
        let binary = candidates
            .iter()
            .find(|binary| which::which(binary).is_ok())?;
        if *binary == "lua" {
            log::warn!("using generic `lua`; artifacts need Lua 5.1 `loadstring`");
        }
        Some(Self::with_executor(binary, cmd_executor))
    }

    /// Use `binary` without checking `PATH`
    pub fn with_executor(binary: &str, cmd_executor: CE) -> Self {
        Self {
            binary: binary.to_string(),
            cmd_executor,
        }
    }

    /// Run a Lua file and return its stdout
    pub fn run_file(&self, path: &Path) -> Result<String, RuntimeError> {
        let output = self
            .cmd_executor
            .execute(|cmd| cmd.arg(path), &self.binary)?;
        self.stdout_of(output)
    }

    /// Run a Lua chunk given as text and return its stdout
    pub fn run_chunk(&self, chunk: &str) -> Result<String, RuntimeError> {
        let output = self
            .cmd_executor
            .execute(|cmd| cmd.arg("-e").arg(chunk), &self.binary)?;
        self.stdout_of(output)
    }

    fn stdout_of(&self, output: Output) -> Result<String, RuntimeError> {
        if !output.status.success() {
            return Err(RuntimeError::Failed {
                binary: self.binary.clone(),
                code: output.status.code(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}
