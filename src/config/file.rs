//! Configuration file data structures

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::transform::{EncodingMethod, FeatureFlags, LoaderRequestStyle, PipelineOptions};

/// Configuration file name
pub const CONFIG_FILE_NAME: &str = ".luacloak.toml";

/// Upper bound for the simulated compile delay
pub const MAX_COMPILE_DELAY_MS: u64 = 10_000;

/// luacloak configuration file structure
///
/// Every field is optional in the file; missing fields take the defaults
/// below.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Encoder name (`base64`, `charcode`, `hex`, `advanced`)
    pub obfuscation_method: EncodingMethod,
    /// Scoring flag: anti-tamper
    pub anti_tamper: bool,
    /// Scoring flag: variable renaming
    pub var_rename: bool,
    /// Scoring flag: string encryption
    pub string_encrypt: bool,
    /// Loader request style name, or `auto`
    pub loader_format: String,
    /// Append `()` to generated loaders
    pub add_wrapper: bool,
    /// Reject plain `http://` loader URLs
    pub https_only: bool,
    /// Show the compile progress bar
    pub enable_animations: bool,
    /// Record compiles in the history ledger
    pub save_history: bool,
    /// Ledger bound
    pub max_history: usize,
    /// Length of the simulated compile progress (milliseconds)
    pub compile_delay_ms: u64,
    /// Minify before encoding
    pub minify: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            obfuscation_method: EncodingMethod::PlainEscape,
            anti_tamper: true,
            var_rename: true,
            string_encrypt: true,
            loader_format: "auto".to_string(),
            add_wrapper: true,
            https_only: true,
            enable_animations: true,
            save_history: true,
            max_history: 50,
            compile_delay_ms: 1500,
            minify: false,
        }
    }
}

impl Settings {
    /// Check value ranges
    pub fn validate(&self) -> Result<()> {
        if self.max_history == 0 {
            anyhow::bail!("max_history must be at least 1");
        }

        if self.compile_delay_ms > MAX_COMPILE_DELAY_MS {
            anyhow::bail!(
                "compile_delay_ms ({}) cannot exceed {} ms",
                self.compile_delay_ms,
                MAX_COMPILE_DELAY_MS
            );
        }

        Ok(())
    }

    /// Scoring flags
    pub fn flags(&self) -> FeatureFlags {
        FeatureFlags {
            anti_tamper: self.anti_tamper,
            var_rename: self.var_rename,
            string_encrypt: self.string_encrypt,
        }
    }

    /// Resolved loader request style
    pub fn loader_style(&self) -> LoaderRequestStyle {
        LoaderRequestStyle::from_name(&self.loader_format)
    }

    /// Pipeline options these settings describe
    pub fn to_pipeline_options(&self) -> PipelineOptions {
        PipelineOptions {
            minify: self.minify,
            method: self.obfuscation_method,
            flags: self.flags(),
        }
    }
}
