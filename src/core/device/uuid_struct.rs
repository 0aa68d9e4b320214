// Copyright (c) 2023 Nick Piaddo
// SPDX-License-Identifier: Apache-2.0 OR MIT

// From dependency library

// From standard library
use std::fmt;

// From this library
use crate::core::errors::ConversionError;

/// A device's UUID, stored and displayed in canonical 36-character form.
#[derive(Clone, Debug, Eq, PartialEq, Ord, PartialOrd)]
pub struct Uuid(String);

impl Uuid {
    /// View this `Uuid` as a UTF-8 `str`.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Renders 16 raw bytes as a canonical `xxxxxxxx-xxxx-xxxx-xxxx-xxxxxxxxxxxx` UUID.
    pub fn from_bytes_16(bytes: &[u8; 16]) -> Self {
        let hex = |b: &[u8]| b.iter().map(|x| format!("{x:02x}")).collect::<String>();
        let s = format!(
            "{}-{}-{}-{}-{}",
            hex(&bytes[0..4]),
            hex(&bytes[4..6]),
            hex(&bytes[6..8]),
            hex(&bytes[8..10]),
            hex(&bytes[10..16]),
        );
        Self(s)
    }

    /// Renders raw bytes of arbitrary length as a plain lower-case hex string, used by formats
    /// (e.g. exFAT) whose "UUID" is really just a volume serial number.
    pub fn from_bytes_hex(bytes: &[u8]) -> Self {
        Self(bytes.iter().map(|b| format!("{b:02x}")).collect())
    }

    /// Wraps an already-formatted UUID string, e.g. one produced by a format-specific
    /// derivation such as UDF's Volume Set Identifier rule.
    pub fn from_string(s: String) -> Self {
        Self(s)
    }
}

impl AsRef<Uuid> for Uuid {
    #[inline]
    fn as_ref(&self) -> &Uuid {
        self
    }
}

impl AsRef<str> for Uuid {
    #[inline]
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Uuid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", &self.0)
    }
}

impl TryFrom<&[u8]> for Uuid {
    type Error = ConversionError;

    #[inline]
    fn try_from(bytes: &[u8]) -> Result<Self, Self::Error> {
        Self::try_from(bytes.to_vec())
    }
}

impl TryFrom<Vec<u8>> for Uuid {
    type Error = ConversionError;

    fn try_from(bytes: Vec<u8>) -> Result<Self, Self::Error> {
        String::from_utf8(bytes).map(Uuid).map_err(|e| {
            ConversionError::Uuid(format!("bytes to UTF-8 string conversion error. {:?}", e))
        })
    }
}
