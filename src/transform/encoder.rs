//! Self-decoding encoders
//!
//! Each encoder turns a Lua source buffer into a single Lua expression that
//! embeds the encoded payload together with the routine needed to rebuild
//! the text and run it through `loadstring`.
//!
//! | Method          | Payload                               |
//! |-----------------|---------------------------------------|
//! | `PlainEscape`   | base64 string literal                 |
//! | `CodepointList` | `string.char(..)` of UTF-16 code units |
//! | `HexPairs`      | two hex digits per UTF-8 byte         |
//! | `LayeredEscape` | base64, itself as a `string.char` list |

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Standard base64 alphabet, also embedded in the Lua decoder
pub(crate) const BASE64_ALPHABET: &str =
    "ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789+/";

/// Opening of the base64 decoding shell shared by `PlainEscape` and `LayeredEscape`.
///
/// Defines `b` (alphabet) and `d(data)` (decoder) inside an immediately
/// invoked function; callers append the body that feeds `d`.
pub(crate) const BASE64_SHELL_OPEN: &str = concat!(
    "(function()local b='ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789+/';",
    "local function d(data)data=string.gsub(data,'[^'..b..'=]','')",
    "return(data:gsub('.',function(x)if(x=='=')then return''end;",
    "local r,f='',(b:find(x)-1)for i=6,1,-1 do r=r..(f%2^i-f%2^(i-1)>0 and'1'or'0')end;",
    "return r end):gsub('%d%d%d?%d?%d?%d?%d?%d?',function(x)if(#x~=8)then return''end;",
    "local c=0;for i=1,8 do c=c+(x:sub(i,i)=='1'and 2^(8-i)or 0)end;",
    "return string.char(c)end))end;"
);

/// Tail of the base64 shell
pub(crate) const SHELL_CLOSE: &str = "end)()";

/// Obfuscation method applied by the pipeline
///
/// Parsing from a name is lenient: unknown names fall back to
/// [`EncodingMethod::PlainEscape`].
///
/// # Examples
///
/// ```
/// use luacloak::transform::EncodingMethod;
///
/// assert_eq!(EncodingMethod::from_name("hex"), EncodingMethod::HexPairs);
/// assert_eq!(EncodingMethod::from_name("rot13"), EncodingMethod::PlainEscape);
/// assert_eq!(EncodingMethod::LayeredEscape.name(), "advanced");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum EncodingMethod {
    /// Base64 payload with an inline decoder
    #[default]
    PlainEscape,
    /// `string.char` code list
    CodepointList,
    /// Hex pair string walked two characters at a time
    HexPairs,
    /// Base64 payload hidden behind a `string.char` code list
    LayeredEscape,
}

impl EncodingMethod {
    /// Every method, in menu order
    pub const ALL: [EncodingMethod; 4] = [
        EncodingMethod::PlainEscape,
        EncodingMethod::CodepointList,
        EncodingMethod::HexPairs,
        EncodingMethod::LayeredEscape,
    ];

    /// Settings name of the method
    pub fn name(&self) -> &'static str {
        match self {
            Self::PlainEscape => "base64",
            Self::CodepointList => "charcode",
            Self::HexPairs => "hex",
            Self::LayeredEscape => "advanced",
        }
    }

    /// One-line description for listings
    pub fn description(&self) -> &'static str {
        match self {
            Self::PlainEscape => "Base64 payload with inline decoder",
            Self::CodepointList => "string.char code list",
            Self::HexPairs => "Hex pair string",
            Self::LayeredEscape => "Base64 wrapped in a string.char code list",
        }
    }

    /// Resolve a settings name, falling back to `PlainEscape`
    pub fn from_name(name: &str) -> Self {
        name.parse().unwrap_or_default()
    }

    /// Encode `text` with this method
    pub fn encode(&self, text: &str) -> String {
        encode(text, *self)
    }
}

impl FromStr for EncodingMethod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "base64" => Ok(Self::PlainEscape),
            "charcode" => Ok(Self::CodepointList),
            "hex" => Ok(Self::HexPairs),
            "advanced" => Ok(Self::LayeredEscape),
            _ => Err(format!("Unknown obfuscation method: {}", s)),
        }
    }
}

impl fmt::Display for EncodingMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl From<String> for EncodingMethod {
    fn from(name: String) -> Self {
        Self::from_name(&name)
    }
}

impl From<EncodingMethod> for String {
    fn from(method: EncodingMethod) -> Self {
        method.name().to_string()
    }
}

/// Encode `text` into a self-decoding Lua artifact
///
/// # Examples
///
/// ```
/// use luacloak::transform::{encode, EncodingMethod};
///
/// let artifact = encode("print(1)", EncodingMethod::CodepointList);
/// assert_eq!(artifact, "loadstring(string.char(112,114,105,110,116,40,49,41))()");
/// ```
pub fn encode(text: &str, method: EncodingMethod) -> String {
    match method {
        EncodingMethod::PlainEscape => encode_plain(text),
        EncodingMethod::CodepointList => encode_codepoints(text),
        EncodingMethod::HexPairs => encode_hex(text),
        EncodingMethod::LayeredEscape => encode_layered(text),
    }
}

fn encode_plain(text: &str) -> String {
    let payload = STANDARD.encode(text.as_bytes());
    format!("{BASE64_SHELL_OPEN}return loadstring(d(\"{payload}\"))(){SHELL_CLOSE}")
}

fn encode_codepoints(text: &str) -> String {
    format!("loadstring(string.char({}))()", code_list(text))
}

fn encode_hex(text: &str) -> String {
    let hex: String = text.bytes().map(|b| format!("{:02x}", b)).collect();
    format!(
        "(function()local h=\"{hex}\";local s=\"\";for i=1,#h,2 do \
         s=s..string.char(tonumber(h:sub(i,i+1),16))end;return loadstring(s)(){SHELL_CLOSE}"
    )
}

fn encode_layered(text: &str) -> String {
    let payload = STANDARD.encode(text.as_bytes());
    format!(
        "{BASE64_SHELL_OPEN}local e=string.char({});return loadstring(d(e))(){SHELL_CLOSE}",
        code_list(&payload)
    )
}

/// Comma-separated UTF-16 code units of `text`
fn code_list(text: &str) -> String {
    text.encode_utf16()
        .map(|unit| unit.to_string())
        .collect::<Vec<_>>()
        .join(",")
}
