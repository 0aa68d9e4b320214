// Copyright (c) 2023 Nick Piaddo
// SPDX-License-Identifier: Apache-2.0 OR MIT

// From dependency library
use enum_iterator::Sequence;

// From standard library
use std::fmt;
use std::str::FromStr;

// From this library
use crate::core::errors::ParserError;

/// Supported partition tables.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd, Hash, Sequence)]
#[non_exhaustive]
pub enum PartitionTableType {
    /// Name: `"bsd"`
    BSD,
    /// Name: `"dos"`
    DOS,
    /// Name: `"gpt"`
    GPT,
    /// Name: `"PMBR"`
    ProtectiveMBR,
}

impl PartitionTableType {
    /// View this `PartitionTableType` as the `PTTYPE=` value a probe emits.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::BSD => "bsd",
            Self::DOS => "dos",
            Self::GPT => "gpt",
            Self::ProtectiveMBR => "PMBR",
        }
    }
}

impl AsRef<str> for PartitionTableType {
    #[inline]
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for PartitionTableType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for PartitionTableType {
    type Err = ParserError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "bsd" => Ok(Self::BSD),
            "dos" => Ok(Self::DOS),
            "gpt" => Ok(Self::GPT),
            "PMBR" => Ok(Self::ProtectiveMBR),
            unsupported => Err(ParserError::PartitionTableType(format!(
                "unsupported partition table type: {unsupported:?}"
            ))),
        }
    }
}
