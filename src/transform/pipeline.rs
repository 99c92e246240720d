//! Transform pipeline entry point
//!
//! Sequences: minify (optional) → encode → size accounting → scoring.

use log::debug;
use serde::{Deserialize, Serialize};

use super::encoder::{encode, EncodingMethod};
use super::error::TransformError;
use super::metrics::SizeMetrics;
use super::minify::minify;
use super::score::{score, FeatureFlags, Rating};

/// Options for a single pipeline run
///
/// # Examples
///
/// ```
/// use luacloak::transform::{EncodingMethod, FeatureFlags, PipelineOptions};
///
/// let options = PipelineOptions {
///     minify: true,
///     method: EncodingMethod::HexPairs,
///     flags: FeatureFlags::default(),
/// };
/// assert!(options.minify);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PipelineOptions {
    /// Minify the source before encoding
    pub minify: bool,
    /// Encoder to apply
    pub method: EncodingMethod,
    /// Scoring-only feature switches
    pub flags: FeatureFlags,
}

/// Outcome of a pipeline run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PipelineResult {
    /// Self-decoding Lua artifact
    pub artifact: String,
    /// Size of the source as supplied (bytes)
    pub input_size: u64,
    /// Size of the artifact (bytes)
    pub output_size: u64,
    /// Clamped size-change percentage
    pub ratio: u8,
    /// Advisory security rating
    pub rating: Rating,
}

impl PipelineResult {
    /// Size figures as metrics
    pub fn metrics(&self) -> SizeMetrics {
        SizeMetrics {
            input_bytes: self.input_size,
            output_bytes: self.output_size,
        }
    }
}

/// Run the transform pipeline over `source`
///
/// Fails only when `source` is empty or whitespace-only.
///
/// # Examples
///
/// ```
/// use luacloak::transform::{run, PipelineOptions, TransformError};
///
/// let result = run("print('hello')", &PipelineOptions::default()).unwrap();
/// assert!(result.output_size > result.input_size);
/// assert_eq!(result.ratio, 0);
///
/// assert_eq!(run("  \n", &PipelineOptions::default()), Err(TransformError::EmptyInput));
/// ```
pub fn run(source: &str, options: &PipelineOptions) -> Result<PipelineResult, TransformError> {
    if source.trim().is_empty() {
        return Err(TransformError::EmptyInput);
    }

    let artifact = if options.minify {
        let minified = minify(source);
        debug!("minified {} -> {} bytes", source.len(), minified.len());
        encode(&minified, options.method)
    } else {
        encode(source, options.method)
    };

    let metrics = SizeMetrics::measure(source, &artifact);
    let rating = score(options.method, options.flags);
    debug!(
        "encoded with {}: {} -> {} bytes, rating {}",
        options.method, metrics.input_bytes, metrics.output_bytes, rating
    );

    Ok(PipelineResult {
        artifact,
        input_size: metrics.input_bytes,
        output_size: metrics.output_bytes,
        ratio: metrics.ratio_percent(),
        rating,
    })
}
