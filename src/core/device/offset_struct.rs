// Copyright (c) 2023 Nick Piaddo
// SPDX-License-Identifier: Apache-2.0 OR MIT

// From dependency library

// From standard library
use std::fmt;
use std::str::FromStr;

// From this library
use crate::core::errors::ParserError;

/// Distance from the beginning of a device, in bytes.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd)]
pub struct Offset(u64);

impl Offset {
    /// Returns the `Offset` value.
    pub fn value(&self) -> u64 {
        self.0
    }
}

impl From<u64> for Offset {
    #[inline]
    fn from(value: u64) -> Offset {
        Self(value)
    }
}

impl fmt::Display for Offset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Offset {
    type Err = ParserError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<u64>()
            .map(Self)
            .map_err(|e| ParserError::Offset(format!("invalid offset {s:?}: {e}")))
    }
}
