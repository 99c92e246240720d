//! Transform and loader-generation core
//!
//! Pure text functions with no I/O:
//! 1. minify the source (optional)
//! 2. encode it into a self-decoding Lua artifact
//! 3. measure sizes and rate the configuration
//!
//! Also hosts the loadstring generator and the helper tools (beautifier,
//! analyzer, artifact verifier).

pub mod analyze;
pub mod beautify;
pub mod encoder;
pub mod error;
pub mod loader;
pub mod metrics;
pub mod minify;
pub mod pipeline;
pub mod score;
pub mod verify;

pub use analyze::{analyze, CodeStats};
pub use beautify::beautify;
pub use encoder::{encode, EncodingMethod};
pub use error::{TransformError, UrlError, VerifyError};
pub use loader::{generate_loader, validate_url, LoaderRequestStyle};
pub use metrics::SizeMetrics;
pub use minify::minify;
pub use pipeline::{run, PipelineOptions, PipelineResult};
pub use score::{score, score_points, FeatureFlags, Rating};
pub use verify::{decode, verify};
