// Copyright (c) 2023 Nick Piaddo
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Module for handling disk partitions and the file systems found inside them.

// From dependency library

// From standard library

// From this library
pub use file_system_enum::FileSystem;
pub use os_type_enum::OSType;
pub use partition_table_type_enum::PartitionTableType;
pub use volume_timestamp_struct::VolumeTimestamp;

mod file_system_enum;
mod os_type_enum;
mod partition_table_type_enum;
mod volume_timestamp_struct;
