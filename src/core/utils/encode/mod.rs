// Copyright (c) 2023 Nick Piaddo
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Encoding utils.

// From dependency library

// From standard library

// From this library
use crate::core::errors::EncodeError;

/// Decodes a big-endian UTF-16 byte string (Joliet volume labels, UDF identifiers),
/// trimming trailing NUL and space padding.
pub fn decode_utf16_be(bytes: &[u8]) -> Result<String, EncodeError> {
    if bytes.len() % 2 != 0 {
        return Err(EncodeError::InvalidUtf16(format!(
            "odd byte length {}",
            bytes.len()
        )));
    }

    let units: Vec<u16> = bytes
        .chunks_exact(2)
        .map(|pair| u16::from_be_bytes([pair[0], pair[1]]))
        .collect();

    let decoded = String::from_utf16(&units)
        .map_err(|e| EncodeError::InvalidUtf16(format!("{e}")))?;

    Ok(decoded
        .trim_end_matches(['\0', ' '])
        .to_string())
}

/// Decodes a little-endian UTF-16 byte string (F2FS volume names).
pub fn decode_utf16_le(bytes: &[u8]) -> Result<String, EncodeError> {
    if bytes.len() % 2 != 0 {
        return Err(EncodeError::InvalidUtf16(format!(
            "odd byte length {}",
            bytes.len()
        )));
    }

    let units: Vec<u16> = bytes
        .chunks_exact(2)
        .map(|pair| u16::from_le_bytes([pair[0], pair[1]]))
        .collect();

    let decoded = String::from_utf16(&units)
        .map_err(|e| EncodeError::InvalidUtf16(format!("{e}")))?;

    Ok(decoded.trim_end_matches('\0').to_string())
}

/// Trims trailing NUL/space padding from a fixed-width ASCII field and validates it is
/// ASCII, the convention used by ISO 9660 `a`/`d`-character fields.
pub fn decode_ascii_field(bytes: &[u8]) -> Result<String, EncodeError> {
    if !bytes.is_ascii() {
        return Err(EncodeError::InvalidAscii(format!(
            "non-ASCII byte in field: {bytes:?}"
        )));
    }
    let s = std::str::from_utf8(bytes).expect("validated ASCII is valid UTF-8");
    Ok(s.trim_end_matches([' ', '\0']).to_string())
}
