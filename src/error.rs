//! Host-level error types with contextual suggestions
//!
//! The transform core reports narrow, typed errors. Command handlers wrap
//! them in [`LuaCloakError`], which adds an actionable hint and a
//! sysexits-style exit code.
//!
//! # Examples
//!
//! ```
//! use luacloak::error::LuaCloakError;
//! use luacloak::transform::{run, PipelineOptions};
//!
//! let err: LuaCloakError = run("", &PipelineOptions::default()).unwrap_err().into();
//! assert_eq!(err.exit_code(), 65);
//! assert!(err.suggestion().is_some());
//! ```

use std::path::PathBuf;
use thiserror::Error;

use crate::runtime::RuntimeError;
use crate::transform::{TransformError, UrlError, VerifyError};

/// luacloak errors with contextual suggestions
#[derive(Error, Debug)]
pub enum LuaCloakError {
    /// Pipeline refused the input
    #[error("{0}")]
    Transform(#[from] TransformError),

    /// Loader URL rejected
    #[error("invalid loader URL: {0}")]
    InvalidUrl(#[from] UrlError),

    /// Artifact failed native verification
    #[error("verification failed for {path}")]
    VerifyFailed {
        /// Artifact path
        path: PathBuf,
        #[source]
        /// Decoder error
        source: VerifyError,
    },

    /// Input file not found
    #[error("File not found: {path}")]
    FileNotFound {
        /// Path to missing file
        path: PathBuf,
        /// Operation that required the file
        operation: String,
    },

    /// History entry not found
    #[error("No history entry with id {id}")]
    RecordNotFound {
        /// Requested identifier
        id: u64,
    },

    /// No Lua interpreter on PATH
    #[error("No Lua interpreter found")]
    InterpreterMissing,

    /// Running an artifact failed
    #[error("running artifact failed")]
    Runtime(#[source] RuntimeError),

    /// Generic I/O error with context
    #[error("I/O error: {context}")]
    Io {
        /// Context about where the error occurred
        context: String,
        #[source]
        /// IO error source
        source: std::io::Error,
    },
}

impl From<RuntimeError> for LuaCloakError {
    fn from(err: RuntimeError) -> Self {
        match err {
            RuntimeError::NotFound => Self::InterpreterMissing,
            other => Self::Runtime(other),
        }
    }
}

impl LuaCloakError {
    /// Get actionable suggestion for resolving this error.
    ///
    /// # Examples
    ///
    /// ```
    /// use luacloak::error::LuaCloakError;
    ///
    /// let error = LuaCloakError::RecordNotFound { id: 42 };
    /// assert!(error.suggestion().unwrap().contains("luacloak history list"));
    /// ```
    pub fn suggestion(&self) -> Option<String> {
        match self {
            Self::Transform(TransformError::EmptyInput) => {
                Some("Pass a file with Lua code or pipe source on stdin".to_string())
            }
            Self::InvalidUrl(UrlError::HttpsRequired(_)) => Some(
                "Use an https:// URL, or set https_only = false in .luacloak.toml".to_string(),
            ),
            Self::InvalidUrl(_) => {
                Some("URLs must start with http:// or https://".to_string())
            }
            Self::VerifyFailed { source, .. } => match source {
                VerifyError::UnknownFormat => Some(
                    "Only artifacts produced by 'luacloak compile' can be verified".to_string(),
                ),
                VerifyError::Mismatch { .. } => Some(
                    "Recompile the source; the artifact was built from different code".to_string(),
                ),
                VerifyError::MalformedPayload { .. } => {
                    Some("The artifact looks edited or truncated; recompile it".to_string())
                }
            },
            Self::FileNotFound { path, operation } => Some(format!(
                "Ensure {} exists before running {}",
                path.display(),
                operation
            )),
            Self::RecordNotFound { .. } => {
                Some("Run 'luacloak history list' to see recorded ids".to_string())
            }
            Self::InterpreterMissing => Some(
                "Install LuaJIT or Lua 5.1 (e.g. 'sudo apt install luajit') and retry".to_string(),
            ),
            Self::Runtime(_) => {
                Some("Check the interpreter output above; artifacts target Lua 5.1".to_string())
            }
            Self::Io { context, .. } => Some(format!(
                "Check file permissions and that {} is accessible",
                context
            )),
        }
    }

    /// Get appropriate exit code for this error.
    ///
    /// Returns Unix-style exit codes based on the error type, following sysexits.h conventions.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Transform(_) => 65,          // EX_DATAERR
            Self::InvalidUrl(_) => 64,         // EX_USAGE
            Self::VerifyFailed { .. } => 65,   // EX_DATAERR
            Self::FileNotFound { .. } => 66,   // EX_NOINPUT
            Self::RecordNotFound { .. } => 65, // EX_DATAERR
            Self::InterpreterMissing => 127,   // Command not found
            Self::Runtime(_) => 1,
            Self::Io { .. } => 74, // EX_IOERR
        }
    }
}

/// Error formatter with colors and structured output
pub struct ErrorFormatter;

impl ErrorFormatter {
    /// Format error with its cause chain and a suggestion
    pub fn format(error: &anyhow::Error) -> String {
        use console::style;

        let mut output = String::new();

        output.push_str(&format!("{} {}\n", style("error:").red().bold(), error));

        let mut source = error.source();
        let mut indent = 1;
        while let Some(err) = source {
            output.push_str(&format!(
                "{}{} {}\n",
                "  ".repeat(indent),
                style("caused by:").yellow(),
                err
            ));
            source = err.source();
            indent += 1;
        }

        if let Some(lc_error) = Self::find(error) {
            if let Some(suggestion) = lc_error.suggestion() {
                output.push_str(&format!(
                    "\n{} {}\n",
                    style("help:").cyan().bold(),
                    suggestion
                ));
            }
        }

        output
    }

    /// Get exit code from error
    pub fn exit_code(error: &anyhow::Error) -> i32 {
        Self::find(error).map_or(1, LuaCloakError::exit_code)
    }

    // Handlers may add `.context(...)` on top of a LuaCloakError
    fn find(error: &anyhow::Error) -> Option<&LuaCloakError> {
        error
            .chain()
            .find_map(|cause| cause.downcast_ref::<LuaCloakError>())
    }
}
