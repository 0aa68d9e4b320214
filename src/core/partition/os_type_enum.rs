// Copyright (c) 2023 Nick Piaddo
// SPDX-License-Identifier: Apache-2.0 OR MIT

// From dependency library
use num_enum::{IntoPrimitive, TryFromPrimitive};

// From standard library

// From this library

/// MBR partition type byte, as found at offset 4 of a DOS partition table entry.
///
/// Not exhaustive — the one-byte MBR partition type space has several hundred registered
/// values. [`OSType::Unknown`] carries the raw byte forward for any code this table does
/// not list by name, matching the contract that an unrecognized type is never a probe
/// failure.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd, IntoPrimitive, TryFromPrimitive)]
#[repr(u8)]
#[non_exhaustive]
pub enum OSType {
    EmptyPartition = 0x00,
    FAT12 = 0x01,
    FAT16 = 0x04,
    ExtendedPartitionChs = 0x05,
    FAT16B = 0x06,
    HpfsNtfsExfat = 0x07,
    W95FAT32 = 0x0b,
    W95FAT32LBA = 0x0c,
    W95FAT16LBA = 0x0e,
    ExtendedPartitionLba = 0x0f,
    LinuxSwap = 0x82,
    Linux = 0x83,
    LinuxExtended = 0x85,
    LinuxLVM = 0x8e,
    LinuxRAIDAutodetect = 0xfd,
    GPTProtective = 0xee,
}

impl OSType {
    /// Returns `true` when this type marks a nested extended-partition table entry.
    pub fn is_extended(self) -> bool {
        matches!(self, Self::ExtendedPartitionChs | Self::ExtendedPartitionLba | Self::LinuxExtended)
    }
}
