//! `data:` URL conversion.

use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use thiserror::Error;

/// Errors from [`decode`].
#[derive(Debug, Error)]
pub enum DataUrlError {
    #[error("Not a data URL")]
    MissingScheme,

    #[error("Data URL has no ',' separator")]
    MissingSeparator,

    #[error("Invalid base64 payload: {0}")]
    InvalidBase64(#[from] base64::DecodeError),

    #[error("Invalid percent-encoding at byte {0}")]
    InvalidPercentEncoding(usize),
}

/// Build a base64 `data:` URL for the given bytes.
pub fn encode(mime: &str, bytes: &[u8]) -> String {
    format!("data:{};base64,{}", mime, BASE64.encode(bytes))
}

/// Split a `data:` URL into its MIME type and payload bytes.
///
/// Handles both base64 and percent-encoded payloads. An empty media type is
/// returned as an empty string.
pub fn decode(url: &str) -> Result<(String, Vec<u8>), DataUrlError> {
    let rest = url
        .strip_prefix("data:")
        .ok_or(DataUrlError::MissingScheme)?;
    let (header, payload) = rest
        .split_once(',')
        .ok_or(DataUrlError::MissingSeparator)?;

    let mut params = header.split(';');
    let mime = params.next().unwrap_or_default().trim().to_string();
    let is_base64 = params.any(|p| p.trim().eq_ignore_ascii_case("base64"));

    let bytes = if is_base64 {
        BASE64.decode(payload.trim())?
    } else {
        percent_decode(payload)?
    };

    Ok((mime, bytes))
}

fn percent_decode(input: &str) -> Result<Vec<u8>, DataUrlError> {
    let bytes = input.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'%' {
            let hex = bytes
                .get(i + 1..i + 3)
                .filter(|h| h.iter().all(u8::is_ascii_hexdigit))
                .and_then(|h| std::str::from_utf8(h).ok())
                .and_then(|h| u8::from_str_radix(h, 16).ok())
                .ok_or(DataUrlError::InvalidPercentEncoding(i))?;
            out.push(hex);
            i += 3;
        } else {
            out.push(bytes[i]);
            i += 1;
        }
    }
    Ok(out)
}
