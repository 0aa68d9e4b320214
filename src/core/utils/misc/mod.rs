// Copyright (c) 2023 Nick Piaddo
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Miscellaneous utils.

// From dependency library

// From standard library

// From this library

/// Formats a `major.minor` version pair the way superblock probes emit `VERSION=`.
pub fn format_version(major: u16, minor: u16) -> String {
    format!("{major}.{minor}")
}
