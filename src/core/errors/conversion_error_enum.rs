// Copyright (c) 2023 Nick Piaddo
// SPDX-License-Identifier: Apache-2.0 OR MIT

// From dependency library
use thiserror::Error;

// From standard library

// From this library

/// Type conversion runtime errors.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConversionError {
    /// Error while converting bytes into a [`DeviceNumber`](crate::core::device::DeviceNumber).
    #[error("{0}")]
    DeviceNumber(String),

    /// Error while converting bytes into a [`FileSystem`](crate::core::partition::FileSystem).
    #[error("{0}")]
    FileSystem(String),

    /// Error while converting bytes into a [`Label`](crate::core::device::Label).
    #[error("{0}")]
    Label(String),

    /// Error while converting bytes into a [`OSType`](crate::core::partition::OSType).
    #[error("{0}")]
    OSType(String),

    /// Error while converting bytes into a [`PartitionTableType`](crate::core::partition::PartitionTableType).
    #[error("{0}")]
    PartitionTableType(String),

    /// Error while converting bytes into a [`Usage`](crate::core::device::Usage).
    #[error("{0}")]
    Usage(String),

    /// Error while converting bytes into a [`Uuid`](crate::core::device::Uuid).
    #[error("{0}")]
    Uuid(String),

    /// Error while decoding a UTF-16BE string (e.g. a Joliet volume label).
    #[error("{0}")]
    Utf16(String),
}
