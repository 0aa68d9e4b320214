// Copyright (c) 2023 Nick Piaddo
// SPDX-License-Identifier: Apache-2.0 OR MIT

// From dependency library
use bitflags::bitflags;

// From standard library

// From this library

bitflags! {
    /// Device-scope flags set by [`Probe::bind_device`](crate::probe::Probe::bind_device).
    #[derive(Clone, Copy, Debug, Eq, PartialEq)]
    pub struct DeviceFlags: u32 {
        /// Window is at or below the 1440 KiB floppy heuristic.
        const TINY = 1 << 0;
        const CDROM = 1 << 1;
        /// Scanning disabled, e.g. a private device-mapper target.
        const NOSCAN = 1 << 2;
        const OPAL_LOCKED = 1 << 3;
        /// The buffer cache has been mutated by `hide_range` since the last reset.
        const MODIF_BUFF = 1 << 4;
        /// The bound descriptor is privately owned and closed on drop.
        const PRIVATE_FD = 1 << 5;
    }
}
