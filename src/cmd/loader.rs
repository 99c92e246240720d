//! Loader command implementation

use anyhow::Result;
use console::style;
use std::env;

use crate::config::{ConfigLoader, Settings};
use crate::error::LuaCloakError;
use crate::fmt::{CHECKMARK, LINK};
use crate::transform::{generate_loader, validate_url, LoaderRequestStyle};

/// Build a loader snippet for `url` using settings, with optional overrides
pub fn build_loader(
    url: &str,
    settings: &Settings,
    style_override: Option<LoaderRequestStyle>,
    no_wrap: bool,
) -> Result<String, LuaCloakError> {
    let url = url.trim();
    validate_url(url, settings.https_only)?;

    let request_style = style_override.unwrap_or_else(|| settings.loader_style());
    let wrap = settings.add_wrapper && !no_wrap;
    Ok(generate_loader(url, request_style, wrap))
}

/// Print a loadstring snippet fetching `url`
///
/// The snippet goes to stdout on its own line.
pub fn cmd_loader(
    url: &str,
    style_override: Option<LoaderRequestStyle>,
    no_wrap: bool,
) -> Result<()> {
    let settings = ConfigLoader::load(&env::current_dir()?)?;
    let snippet = build_loader(url, &settings, style_override, no_wrap)?;

    eprintln!("{} {}", LINK, style(url.trim()).dim());
    println!("{snippet}");
    eprintln!("{} Loadstring generated!", CHECKMARK);
    Ok(())
}
