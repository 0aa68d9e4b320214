// Copyright (c) 2023 Nick Piaddo
// SPDX-License-Identifier: Apache-2.0 OR MIT

// From dependency library

// From standard library
use std::fmt;
use std::str::FromStr;

// From this library
use crate::core::errors::ParserError;

/// Device usage, as reported by an identifier's [`Idinfo`](crate::chain::Idinfo).
#[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd)]
#[non_exhaustive]
pub enum Usage {
    FileSystem,
    Raid,
    Crypto,
    Other,
    Unknown,
}

impl Usage {
    /// View this `Usage` as a UTF-8 `str`.
    pub fn as_str(&self) -> &str {
        match self {
            Self::FileSystem => "filesystem",
            Self::Raid => "raid",
            Self::Crypto => "crypto",
            Self::Other => "other",
            Self::Unknown => "unknown",
        }
    }
}

impl AsRef<str> for Usage {
    #[inline]
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for Usage {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Usage {
    type Err = ParserError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "filesystem" => Ok(Self::FileSystem),
            "raid" => Ok(Self::Raid),
            "crypto" => Ok(Self::Crypto),
            "other" => Ok(Self::Other),
            "unknown" => Ok(Self::Unknown),
            _unsupported => Err(ParserError::Usage(format!(
                "unsupported device usage: {:?}",
                s
            ))),
        }
    }
}

#[cfg(test)]
#[allow(unused_imports)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn usage_can_not_parse_an_invalid_device_usage() {
        assert!("DUMMY".parse::<Usage>().is_err());
    }

    #[test]
    fn usage_can_parse_a_valid_device_usage() -> crate::Result<()> {
        assert_eq!("filesystem".parse::<Usage>()?, Usage::FileSystem);
        assert_eq!("raid".parse::<Usage>()?, Usage::Raid);
        assert_eq!("crypto".parse::<Usage>()?, Usage::Crypto);
        Ok(())
    }
}
