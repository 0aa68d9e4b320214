// Copyright (c) 2023 Nick Piaddo
// SPDX-License-Identifier: Apache-2.0 OR MIT

// From dependency library

// From standard library
use std::fmt;

// From this library

/// The three well-known kinds of probing a [`Chain`](crate::chain::Chain) performs.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub enum ChainKind {
    /// Filesystems and RAID members.
    Sublks,
    /// Disk topology.
    Toplgy,
    /// Partition tables.
    Parts,
}

impl ChainKind {
    /// All chain kinds, in the fixed declaration order probing iterates them in.
    pub const ALL: [ChainKind; 3] = [ChainKind::Sublks, ChainKind::Toplgy, ChainKind::Parts];

    fn as_str(&self) -> &'static str {
        match self {
            Self::Sublks => "superblocks",
            Self::Toplgy => "topology",
            Self::Parts => "partitions",
        }
    }
}

impl fmt::Display for ChainKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
