//! Encoding transcoder between raw identifier bytes and textual forms
//!
//! Exactly one alphabet and casing is canonical per format, so the
//! round-trip law `decode(encode(x, f), f) == x` holds with no aliasing:
//!
//! - `Hex`: lowercase digits only; uppercase input is rejected.
//! - `Base32`: RFC 4648 standard uppercase alphabet with `=` padding.
//! - `Base64`: standard alphabet with mandatory `=` padding.
//! - `Binary`: the identity transform on raw bytes.

use std::fmt;

use base64::engine::general_purpose::STANDARD as BASE64_STANDARD;
use base64::Engine;
use data_encoding::BASE32;

use crate::error::KeyspaceError;

/// Supported identifier representations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EncodingType {
    /// Raw bytes, pass-through
    Binary,
    /// Lowercase hexadecimal
    Hex,
    /// RFC 4648 base-32, uppercase alphabet, `=` padding
    Base32,
    /// Standard base-64 alphabet, `=` padding
    Base64,
}

impl fmt::Display for EncodingType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Binary => write!(f, "binary"),
            Self::Hex => write!(f, "hex"),
            Self::Base32 => write!(f, "base32"),
            Self::Base64 => write!(f, "base64"),
        }
    }
}

/// Encode `raw` in the given format. Total: never fails for any input.
///
/// The textual formats produce ASCII bytes; `Binary` copies the input.
pub fn encode(raw: &[u8], encoding: EncodingType) -> Vec<u8> {
    match encoding {
        EncodingType::Binary => raw.to_vec(),
        EncodingType::Hex => hex::encode(raw).into_bytes(),
        EncodingType::Base32 => BASE32.encode(raw).into_bytes(),
        EncodingType::Base64 => BASE64_STANDARD.encode(raw).into_bytes(),
    }
}

/// Decode `encoded` from the given format.
///
/// Fails with [`KeyspaceError::Decoding`] on characters outside the
/// format's canonical alphabet or malformed padding. Length validation
/// against the identifier width is the caller's concern; the transcoder
/// itself is width-agnostic.
pub fn decode(encoded: &[u8], encoding: EncodingType) -> Result<Vec<u8>, KeyspaceError> {
    match encoding {
        EncodingType::Binary => Ok(encoded.to_vec()),
        EncodingType::Hex => {
            // hex::decode accepts both casings; only lowercase is canonical.
            if encoded.iter().any(|b| b.is_ascii_uppercase()) {
                return Err(KeyspaceError::decoding(
                    encoding,
                    "uppercase hex digits are not canonical",
                ));
            }
            hex::decode(encoded).map_err(|e| KeyspaceError::decoding(encoding, e.to_string()))
        }
        EncodingType::Base32 => BASE32
            .decode(encoded)
            .map_err(|e| KeyspaceError::decoding(encoding, e.to_string())),
        EncodingType::Base64 => BASE64_STANDARD
            .decode(encoded)
            .map_err(|e| KeyspaceError::decoding(encoding, e.to_string())),
    }
}
