#![warn(missing_docs)]
#![warn(clippy::unwrap_used)]
#![cfg_attr(test, allow(clippy::unwrap_used))]

//! luacloak library
//!
//! Turns Lua source into self-decoding Lua artifacts, generates one-line
//! loaders for hosted scripts, and keeps a bounded compile history. It can
//! be used programmatically in addition to the CLI interface.
//!
//! # Basic Example
//!
//! Encoding a script and checking it decodes back:
//!
//! ```
//! use luacloak::transform::{run, verify, EncodingMethod, PipelineOptions};
//!
//! let options = PipelineOptions {
//!     method: EncodingMethod::HexPairs,
//!     ..Default::default()
//! };
//! let result = run("print('hello')", &options).unwrap();
//!
//! assert!(result.artifact.starts_with("(function()local h=\""));
//! assert_eq!(verify(&result.artifact, "print('hello')").unwrap(), EncodingMethod::HexPairs);
//! ```
//!
//! # Advanced Example: Loader and History
//!
//! ```
//! use luacloak::history::{CompileRecord, HistoryLedger};
//! use luacloak::transform::{generate_loader, validate_url, EncodingMethod, LoaderRequestStyle};
//!
//! let url = "https://example.com/script.lua";
//! validate_url(url, true).unwrap();
//! let loader = generate_loader(url, LoaderRequestStyle::AsyncFetch, true);
//! assert_eq!(loader, r#"loadstring(game:HttpGetAsync("https://example.com/script.lua"))()"#);
//!
//! let ledger = HistoryLedger::new();
//! let id = ledger.next_id(1_700_000_000_000);
//! let ledger = ledger.append(CompileRecord::new(id, "print(1)", &loader, EncodingMethod::PlainEscape), 50);
//! assert_eq!(ledger.len(), 1);
//! ```

/// Command handlers for CLI operations
pub mod cmd;
/// Settings file loading and validation
pub mod config;
/// Host-level error types with contextual suggestions
pub mod error;
/// Shared formatting utilities
pub mod fmt;
/// Compile history ledger, usage stats and their JSON stores
pub mod history;
/// Infrastructure traits for filesystem and command execution
pub mod infra;
/// Lua interpreter detection and execution
pub mod runtime;
/// Pure transform core: encoders, minifier, loader, scorer, pipeline
pub mod transform;
