#![forbid(unsafe_code)]

//! Reversible text-to-token codec for URL path fields.
//!
//! A token is the UTF-8 bytes of a string in the URL-safe base64 alphabet
//! with `=` padding, so every output character is a legal path-segment
//! character (`A-Z a-z 0-9 - _ =`).
//!
//! Decoding is lenient about the form of the token: the standard alphabet
//! (`+` `/`) is accepted alongside the URL-safe one, and padding may be
//! present or absent. Links produced by a standard base64 encoder therefore
//! keep loading.
//!
//! # Invariants
//!
//! 1. `decode(&encode(s)) == Ok(s)` for every `s`, including the empty string.
//! 2. `encode` never emits a character that needs escaping in a path segment.
//! 3. `decode` never panics; malformed input yields [`DecodeError`].

use std::borrow::Cow;

use base64::Engine as _;
use base64::alphabet;
use base64::engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig};

const TOKEN_ENGINE: GeneralPurpose = GeneralPurpose::new(
    &alphabet::URL_SAFE,
    GeneralPurposeConfig::new()
        .with_encode_padding(true)
        .with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

/// Error returned when a token cannot be turned back into text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    /// The token is not valid base64.
    Base64(base64::DecodeError),
    /// The decoded bytes are not valid UTF-8.
    Utf8(std::string::FromUtf8Error),
}

impl core::fmt::Display for DecodeError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Base64(e) => write!(f, "invalid token: {e}"),
            Self::Utf8(e) => write!(f, "token is not UTF-8 text: {e}"),
        }
    }
}

impl std::error::Error for DecodeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Base64(e) => Some(e),
            Self::Utf8(e) => Some(e),
        }
    }
}

impl From<base64::DecodeError> for DecodeError {
    fn from(e: base64::DecodeError) -> Self {
        Self::Base64(e)
    }
}

impl From<std::string::FromUtf8Error> for DecodeError {
    fn from(e: std::string::FromUtf8Error) -> Self {
        Self::Utf8(e)
    }
}

/// Encode `text` into a URL-path-safe token.
#[must_use]
pub fn encode(text: &str) -> String {
    TOKEN_ENGINE.encode(text.as_bytes())
}

/// Decode a token produced by [`encode`] (or by a standard base64 encoder).
pub fn decode(token: &str) -> Result<String, DecodeError> {
    let normalized: Cow<'_, str> = if token.contains(['+', '/']) {
        Cow::Owned(
            token
                .chars()
                .map(|c| match c {
                    '+' => '-',
                    '/' => '_',
                    other => other,
                })
                .collect(),
        )
    } else {
        Cow::Borrowed(token)
    };
    let bytes = TOKEN_ENGINE.decode(normalized.as_bytes())?;
    Ok(String::from_utf8(bytes)?)
}

/// Undo percent-escaping applied by a browser to a path segment.
///
/// Segments that are not valid percent-encoded UTF-8 are returned unchanged;
/// the token decoder then decides whether they are usable.
#[must_use]
pub fn unescape_segment(segment: &str) -> Cow<'_, str> {
    if !segment.contains('%') {
        return Cow::Borrowed(segment);
    }
    urlencoding::decode(segment).unwrap_or(Cow::Borrowed(segment))
}
