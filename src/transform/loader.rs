//! Loadstring snippet generation
//!
//! Renders one of four fixed templates around a script URL. The URL is
//! inserted verbatim; [`validate_url`] is available for callers that want
//! to reject obviously wrong input first.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

use super::error::UrlError;

static URL_RE: OnceLock<Regex> = OnceLock::new();

/// Network call used by a loader snippet
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum LoaderRequestStyle {
    /// `game:HttpGet`
    #[default]
    SyncFetch,
    /// `game:HttpGetAsync`
    AsyncFetch,
    /// `syn.request`
    AltClientSync,
    /// `request`
    AltClientGeneric,
}

impl LoaderRequestStyle {
    /// Every style, in menu order
    pub const ALL: [LoaderRequestStyle; 4] = [
        LoaderRequestStyle::SyncFetch,
        LoaderRequestStyle::AsyncFetch,
        LoaderRequestStyle::AltClientSync,
        LoaderRequestStyle::AltClientGeneric,
    ];

    /// Settings name of the style
    pub fn name(&self) -> &'static str {
        match self {
            Self::SyncFetch => "httpget",
            Self::AsyncFetch => "httpgetasync",
            Self::AltClientSync => "synrequest",
            Self::AltClientGeneric => "request",
        }
    }

    /// Resolve a settings name; `auto` and unknown names give `SyncFetch`
    pub fn from_name(name: &str) -> Self {
        name.parse().unwrap_or_default()
    }
}

impl FromStr for LoaderRequestStyle {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "httpget" | "auto" => Ok(Self::SyncFetch),
            "httpgetasync" => Ok(Self::AsyncFetch),
            "synrequest" => Ok(Self::AltClientSync),
            "request" => Ok(Self::AltClientGeneric),
            _ => Err(format!("Unknown loader format: {}", s)),
        }
    }
}

impl fmt::Display for LoaderRequestStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl From<String> for LoaderRequestStyle {
    fn from(name: String) -> Self {
        Self::from_name(&name)
    }
}

impl From<LoaderRequestStyle> for String {
    fn from(style: LoaderRequestStyle) -> Self {
        style.name().to_string()
    }
}

/// Render a loadstring snippet fetching `url`
///
/// `wrap` appends the `()` call suffix so the fetched chunk runs immediately.
///
/// # Examples
///
/// ```
/// use luacloak::transform::{generate_loader, LoaderRequestStyle};
///
/// let snippet = generate_loader("https://x.test/s.lua", LoaderRequestStyle::SyncFetch, true);
/// assert_eq!(snippet, r#"loadstring(game:HttpGet("https://x.test/s.lua"))()"#);
/// ```
pub fn generate_loader(url: &str, style: LoaderRequestStyle, wrap: bool) -> String {
    let suffix = if wrap { "()" } else { "" };
    match style {
        LoaderRequestStyle::SyncFetch => format!("loadstring(game:HttpGet(\"{url}\")){suffix}"),
        LoaderRequestStyle::AsyncFetch => {
            format!("loadstring(game:HttpGetAsync(\"{url}\")){suffix}")
        }
        LoaderRequestStyle::AltClientSync => {
            format!("loadstring(syn.request({{Url=\"{url}\",Method=\"GET\"}}).Body){suffix}")
        }
        LoaderRequestStyle::AltClientGeneric => {
            format!("loadstring(request({{Url=\"{url}\",Method=\"GET\"}}).Body){suffix}")
        }
    }
}

/// Check that `url` looks like an http(s) URL
///
/// With `https_only`, plain `http://` URLs are rejected too.
pub fn validate_url(url: &str, https_only: bool) -> Result<(), UrlError> {
    let url = url.trim();
    if url.is_empty() {
        return Err(UrlError::Empty);
    }

    let re = URL_RE.get_or_init(|| Regex::new(r"^https?://.+").expect("url regex is valid"));
    if !re.is_match(url) {
        return Err(UrlError::InvalidFormat(url.to_string()));
    }

    if https_only && !url.starts_with("https://") {
        return Err(UrlError::HttpsRequired(url.to_string()));
    }

    Ok(())
}
