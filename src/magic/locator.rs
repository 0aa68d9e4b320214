// Copyright (c) 2023 Nick Piaddo
// SPDX-License-Identifier: Apache-2.0 OR MIT

// From dependency library

// From standard library
use std::fs::File;

// From this library
use crate::buffer::{BufferCache, ReadOutcome};
use crate::core::device::Window;
use crate::hint::HintRegistry;
use crate::magic::{LocateOutcome, MagicDescriptor, MagicLocation, MagicMatch};

/// Walks `magics` in declaration order, returning the first match.
///
/// `window` bounds every candidate offset to the probing window before it ever reaches
/// the buffer cache — a magic descriptor that would resolve outside `window` is treated
/// exactly like a byte mismatch, never an I/O error.
pub fn locate(
    magics: &'static [MagicDescriptor],
    file: &File,
    buffers: &mut BufferCache,
    hints: &HintRegistry,
    zone_size: Option<u64>,
    window: Window,
) -> LocateOutcome {
    for descriptor in magics {
        if !descriptor.is_valid() {
            continue;
        }

        let base_kb = match descriptor.location {
            MagicLocation::Fixed { kboff } => kboff,
            MagicLocation::Zoned {
                zonenum,
                kboff_in_zone,
            } => match zone_size {
                Some(zone_size) if zone_size > 0 => (zonenum * zone_size >> 10) + kboff_in_zone,
                _ => continue,
            },
        };

        let hint_bias = descriptor.hint.map(|h| hints.get_or_zero(h)).unwrap_or(0);
        let relative_offset = (base_kb << 10) + hint_bias + u64::from(descriptor.sboff & 0x3FF);

        if !window.contains(relative_offset, descriptor.bytes.len() as u64) {
            continue;
        }

        let absolute_offset = window.absolute(relative_offset);
        match buffers.read(file, absolute_offset, descriptor.bytes.len()) {
            ReadOutcome::Bytes(bytes) => {
                if bytes == descriptor.bytes {
                    return LocateOutcome::Found(MagicMatch {
                        offset: relative_offset,
                        descriptor,
                    });
                }
            }
            ReadOutcome::EndOfArea => {}
            ReadOutcome::IoError(e) => return LocateOutcome::IoError(e),
        }
    }

    LocateOutcome::NotFound
}
