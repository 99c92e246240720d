//! Settings for luacloak
//!
//! Settings live in `.luacloak.toml` in the project root. A missing file
//! means defaults; a present file only needs the keys it changes.

pub mod file;
pub mod loader;

pub use file::{Settings, CONFIG_FILE_NAME, MAX_COMPILE_DELAY_MS};
pub use loader::ConfigLoader;
