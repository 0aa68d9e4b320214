// Copyright (c) 2023 Nick Piaddo
// SPDX-License-Identifier: Apache-2.0 OR MIT

// From dependency library

// From standard library
use std::fmt;

// From this library

/// Classification of the file descriptor a [`Probe`](crate::probe::Probe) is bound to.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum DeviceMode {
    /// A block device (`S_ISBLK`).
    Block,
    /// A UBI character device, treated like a block device for probing purposes.
    CharUbi,
    /// A regular file, e.g. a disk image.
    RegularFile,
}

impl fmt::Display for DeviceMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Block => "block",
            Self::CharUbi => "char-ubi",
            Self::RegularFile => "regular-file",
        };
        write!(f, "{s}")
    }
}
