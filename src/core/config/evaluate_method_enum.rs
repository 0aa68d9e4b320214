// Copyright (c) 2023 Nick Piaddo
// SPDX-License-Identifier: Apache-2.0 OR MIT

// From dependency library

// From standard library
use std::fmt;

// From this library

/// One entry of the `EVALUATE` configuration key: how the tag-resolution collaborator
/// should look up a device by tag.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum EvaluateMethod {
    /// Resolve via `/dev/disk/by-*` symlinks.
    Udev,
    /// Resolve by scanning devices directly.
    Scan,
}

impl fmt::Display for EvaluateMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Udev => "udev",
            Self::Scan => "scan",
        };
        write!(f, "{s}")
    }
}
