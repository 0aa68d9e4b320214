// Copyright (c) 2023 Nick Piaddo
// SPDX-License-Identifier: Apache-2.0 OR MIT

// From dependency library

// From standard library

// From this library

/// Where a [`MagicDescriptor`] looks for its signature.
#[derive(Clone, Copy, Debug)]
pub enum MagicLocation {
    /// `kboff`: kilobyte offset from the start of the probing window.
    Fixed { kboff: u64 },
    /// `(zonenum * zone_size >> 10) + kboff_in_zone`: kilobyte offset within a zoned
    /// device's `zonenum`-th zone. Skipped on non-zoned devices.
    Zoned { zonenum: u64, kboff_in_zone: u64 },
}

/// A `(bytes, offset, optional zone, optional hint)` tuple locating a signature within a
/// device.
#[derive(Clone, Copy, Debug)]
pub struct MagicDescriptor {
    /// Signature bytes to compare, length must be > 0.
    pub bytes: &'static [u8],
    /// Base location, before the byte offset within the kilobyte window is applied.
    pub location: MagicLocation,
    /// Byte offset within the 1 KiB window addressed by `location` (`sboff & 0x3FF`
    /// applies this).
    pub sboff: u16,
    /// Name of a hint added to the computed byte offset, if any.
    pub hint: Option<&'static str>,
}

impl MagicDescriptor {
    /// A plain, non-zoned, non-hinted magic at `kboff` kilobytes + `sboff` bytes.
    pub const fn fixed(bytes: &'static [u8], kboff: u64, sboff: u16) -> Self {
        Self {
            bytes,
            location: MagicLocation::Fixed { kboff },
            sboff,
            hint: None,
        }
    }

    /// A zero-length magic is never valid.
    pub fn is_valid(&self) -> bool {
        !self.bytes.is_empty()
    }
}
