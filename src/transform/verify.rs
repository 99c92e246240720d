//! Native decoding of generated artifacts
//!
//! Mirrors the Lua decoding routine of every encoder so an artifact can be
//! checked against its source without a Lua runtime. Code lists are held to
//! the Lua 5.1 `string.char` range (0-255), so a `charcode` artifact of
//! non-Latin-1 source is reported as malformed rather than passing here and
//! failing under Lua.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;

use super::encoder::{EncodingMethod, BASE64_SHELL_OPEN, SHELL_CLOSE};
use super::error::VerifyError;

const CODE_LIST_OPEN: &str = "loadstring(string.char(";
const CODE_LIST_CLOSE: &str = "))()";
const HEX_OPEN: &str = "(function()local h=\"";
const PLAIN_BODY_OPEN: &str = "return loadstring(d(\"";
const PLAIN_BODY_CLOSE: &str = "\"))()";
const LAYERED_BODY_OPEN: &str = "local e=string.char(";
const LAYERED_BODY_CLOSE: &str = ");return loadstring(d(e))()";

/// Recover the source text embedded in `artifact`
///
/// Returns the detected method together with the decoded text.
///
/// # Examples
///
/// ```
/// use luacloak::transform::{decode, encode, EncodingMethod};
///
/// let artifact = encode("print('hi')", EncodingMethod::HexPairs);
/// let (method, text) = decode(&artifact).unwrap();
/// assert_eq!(method, EncodingMethod::HexPairs);
/// assert_eq!(text, "print('hi')");
/// ```
pub fn decode(artifact: &str) -> Result<(EncodingMethod, String), VerifyError> {
    let artifact = artifact.trim();

    if let Some(rest) = artifact.strip_prefix(BASE64_SHELL_OPEN) {
        let body = rest
            .strip_suffix(SHELL_CLOSE)
            .ok_or(VerifyError::UnknownFormat)?;
        return decode_base64_body(body);
    }

    if let Some(rest) = artifact.strip_prefix(HEX_OPEN) {
        let (hex, _) = rest
            .split_once('"')
            .ok_or_else(|| malformed(EncodingMethod::HexPairs, "unterminated hex literal"))?;
        let bytes = hex_to_bytes(hex)?;
        let text = String::from_utf8(bytes)
            .map_err(|e| malformed(EncodingMethod::HexPairs, e.to_string()))?;
        return Ok((EncodingMethod::HexPairs, text));
    }

    if let Some(list) = artifact
        .strip_prefix(CODE_LIST_OPEN)
        .and_then(|rest| rest.strip_suffix(CODE_LIST_CLOSE))
    {
        let text = code_list_to_string(list, EncodingMethod::CodepointList)?;
        return Ok((EncodingMethod::CodepointList, text));
    }

    Err(VerifyError::UnknownFormat)
}

/// Decode `artifact` and check it reproduces `expected` exactly
pub fn verify(artifact: &str, expected: &str) -> Result<EncodingMethod, VerifyError> {
    let (method, decoded) = decode(artifact)?;
    if decoded != expected {
        return Err(VerifyError::Mismatch {
            decoded_len: decoded.len(),
            expected_len: expected.len(),
        });
    }
    Ok(method)
}

fn decode_base64_body(body: &str) -> Result<(EncodingMethod, String), VerifyError> {
    if let Some(payload) = body
        .strip_prefix(PLAIN_BODY_OPEN)
        .and_then(|rest| rest.strip_suffix(PLAIN_BODY_CLOSE))
    {
        let text = base64_to_string(payload, EncodingMethod::PlainEscape)?;
        return Ok((EncodingMethod::PlainEscape, text));
    }

    if let Some(list) = body
        .strip_prefix(LAYERED_BODY_OPEN)
        .and_then(|rest| rest.strip_suffix(LAYERED_BODY_CLOSE))
    {
        let payload = code_list_to_string(list, EncodingMethod::LayeredEscape)?;
        let text = base64_to_string(&payload, EncodingMethod::LayeredEscape)?;
        return Ok((EncodingMethod::LayeredEscape, text));
    }

    Err(VerifyError::UnknownFormat)
}

fn base64_to_string(payload: &str, method: EncodingMethod) -> Result<String, VerifyError> {
    let bytes = STANDARD
        .decode(payload)
        .map_err(|e| malformed(method, e.to_string()))?;
    String::from_utf8(bytes).map_err(|e| malformed(method, e.to_string()))
}

fn code_list_to_string(list: &str, method: EncodingMethod) -> Result<String, VerifyError> {
    if list.trim().is_empty() {
        return Ok(String::new());
    }
    list.split(',')
        .map(|code| {
            let unit = code
                .trim()
                .parse::<u32>()
                .map_err(|e| malformed(method, e.to_string()))?;
            u8::try_from(unit).map(char::from).map_err(|_| {
                malformed(method, format!("code unit {unit} exceeds string.char range"))
            })
        })
        .collect()
}

fn hex_to_bytes(hex: &str) -> Result<Vec<u8>, VerifyError> {
    if hex.len() % 2 != 0 {
        return Err(malformed(EncodingMethod::HexPairs, "odd number of hex digits"));
    }
    (0..hex.len())
        .step_by(2)
        .map(|i| {
            hex.get(i..i + 2)
                .and_then(|pair| u8::from_str_radix(pair, 16).ok())
                .ok_or_else(|| malformed(EncodingMethod::HexPairs, format!("bad pair at {i}")))
        })
        .collect()
}

fn malformed(method: EncodingMethod, reason: impl Into<String>) -> VerifyError {
    VerifyError::MalformedPayload {
        method: method.name(),
        reason: reason.into(),
    }
}
