// Copyright (c) 2023 Nick Piaddo
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Ordered list of typed `NAME=value` results, each tagged with its owning chain.

// From dependency library

// From standard library

// From this library
pub use value_store_struct::ValueStore;
pub use value_struct::Value;

mod value_store_struct;
mod value_struct;

/// Stable vocabulary of `NAME`s a probe may emit.
pub mod name {
    pub const TYPE: &str = "TYPE";
    pub const SEC_TYPE: &str = "SEC_TYPE";
    pub const USAGE: &str = "USAGE";
    pub const LABEL: &str = "LABEL";
    pub const LABEL_RAW: &str = "LABEL_RAW";
    pub const UUID: &str = "UUID";
    pub const UUID_RAW: &str = "UUID_RAW";
    pub const UUID_SUB: &str = "UUID_SUB";
    pub const PTTYPE: &str = "PTTYPE";
    pub const PTUUID: &str = "PTUUID";
    pub const PART_ENTRY_NAME: &str = "PART_ENTRY_NAME";
    pub const PART_ENTRY_UUID: &str = "PART_ENTRY_UUID";
    pub const PART_ENTRY_TYPE: &str = "PART_ENTRY_TYPE";
    pub const PART_ENTRY_SCHEME: &str = "PART_ENTRY_SCHEME";
    pub const PART_ENTRY_NUMBER: &str = "PART_ENTRY_NUMBER";
    pub const PART_ENTRY_OFFSET: &str = "PART_ENTRY_OFFSET";
    pub const PART_ENTRY_SIZE: &str = "PART_ENTRY_SIZE";
    pub const PART_ENTRY_FLAGS: &str = "PART_ENTRY_FLAGS";
    pub const PART_ENTRY_DISK: &str = "PART_ENTRY_DISK";
    pub const VERSION: &str = "VERSION";
    pub const BLOCK_SIZE: &str = "BLOCK_SIZE";
    pub const FSBLOCKSIZE: &str = "FSBLOCKSIZE";
    pub const FSSIZE: &str = "FSSIZE";
    pub const SBMAGIC: &str = "SBMAGIC";
    pub const SBMAGIC_OFFSET: &str = "SBMAGIC_OFFSET";
    pub const PTMAGIC: &str = "PTMAGIC";
    pub const PTMAGIC_OFFSET: &str = "PTMAGIC_OFFSET";
    pub const SBBADCSUM: &str = "SBBADCSUM";
    pub const SYSTEM_ID: &str = "SYSTEM_ID";
    pub const PUBLISHER_ID: &str = "PUBLISHER_ID";
    pub const APPLICATION_ID: &str = "APPLICATION_ID";
    pub const DATA_PREPARER_ID: &str = "DATA_PREPARER_ID";
    pub const VOLUME_SET_ID: &str = "VOLUME_SET_ID";
    pub const LOGICAL_VOLUME_ID: &str = "LOGICAL_VOLUME_ID";
    pub const BOOT_SYSTEM_ID: &str = "BOOT_SYSTEM_ID";
    pub const MOUNT: &str = "MOUNT";
}
