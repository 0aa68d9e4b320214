// Copyright (c) 2023 Nick Piaddo
// SPDX-License-Identifier: Apache-2.0 OR MIT

// From dependency library
use enum_iterator::Sequence;

// From standard library
use std::fmt;
use std::str::FromStr;

// From this library
use crate::core::errors::ParserError;

/// File systems, RAID members, and crypto containers this catalog can identify.
///
/// This is a representative subset of an extensible catalog: adding a format means
/// declaring a new [`Idinfo`](crate::chain::Idinfo), not modifying this enum's variants'
/// meaning.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd, Hash, Sequence)]
#[non_exhaustive]
pub enum FileSystem {
    /// Name: `"ext2"`
    Ext2,
    /// Name: `"ext3"`
    Ext3,
    /// Name: `"ext4"`
    Ext4,
    /// Name: `"vfat"`
    VFAT,
    /// Name: `"exfat"`
    ExFAT,
    /// Name: `"f2fs"`
    F2FS,
    /// Name: `"iso9660"`
    ISO9660,
    /// Name: `"udf"`
    UDF,
    /// Name: `"swap"`
    Swap,
    /// Name: `"LVM2_member"`
    LVM2Member,
    /// Name: `"linux_raid_member"`
    LinuxRaidMember,
    /// Name: `"crypto_LUKS"`
    CryptoLUKS,
    /// Name: `"BitLocker"`
    BitLocker,
}

impl FileSystem {
    /// View this `FileSystem` as the `TYPE=` value a probe emits.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Ext2 => "ext2",
            Self::Ext3 => "ext3",
            Self::Ext4 => "ext4",
            Self::VFAT => "vfat",
            Self::ExFAT => "exfat",
            Self::F2FS => "f2fs",
            Self::ISO9660 => "iso9660",
            Self::UDF => "udf",
            Self::Swap => "swap",
            Self::LVM2Member => "LVM2_member",
            Self::LinuxRaidMember => "linux_raid_member",
            Self::CryptoLUKS => "crypto_LUKS",
            Self::BitLocker => "BitLocker",
        }
    }
}

impl AsRef<str> for FileSystem {
    #[inline]
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for FileSystem {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for FileSystem {
    type Err = ParserError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "ext2" => Ok(Self::Ext2),
            "ext3" => Ok(Self::Ext3),
            "ext4" => Ok(Self::Ext4),
            "vfat" => Ok(Self::VFAT),
            "exfat" => Ok(Self::ExFAT),
            "f2fs" => Ok(Self::F2FS),
            "iso9660" => Ok(Self::ISO9660),
            "udf" => Ok(Self::UDF),
            "swap" => Ok(Self::Swap),
            "LVM2_member" => Ok(Self::LVM2Member),
            "linux_raid_member" => Ok(Self::LinuxRaidMember),
            "crypto_LUKS" => Ok(Self::CryptoLUKS),
            "BitLocker" => Ok(Self::BitLocker),
            unsupported => Err(ParserError::FileSystem(format!(
                "unsupported file system: {unsupported:?}"
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
    fn file_system_round_trips_through_display_and_from_str() {
        for fs in enum_iterator::all::<FileSystem>() {
            let s = fs.to_string();
            let parsed: FileSystem = s.parse().unwrap();
            assert_eq!(fs, parsed);
        }
    }
}
