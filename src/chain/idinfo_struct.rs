// Copyright (c) 2023 Nick Piaddo
// SPDX-License-Identifier: Apache-2.0 OR MIT

// From dependency library
use bitflags::bitflags;

// From standard library

// From this library
use crate::chain::{ChainFlags, ProbeOutcome};
use crate::core::device::Usage;
use crate::magic::{MagicDescriptor, MagicMatch};
use crate::probe::ProbeContext;

bitflags! {
    /// Per-identifier flags.
    #[derive(Clone, Copy, Debug, Eq, PartialEq)]
    pub struct IdinfoFlags: u32 {
        /// May coexist with other `TOLERANT` identifiers without causing ambivalence.
        const TOLERANT = 1 << 0;
        /// Emit the matched magic bytes and offset as values on success.
        const MAGIC = 1 << 1;
        /// A checksum mismatch is a soft-accept (`SBBADCSUM=1`) rather than a no-match.
        const BADCSUM = 1 << 2;
    }
}

/// Signature of an identifier's probe callback.
pub type ProbeFn = fn(&mut ProbeContext<'_>, &MagicMatch) -> ProbeOutcome;

/// Immutable description of one filesystem/RAID/partition-table/crypto format. Adding a
/// format means declaring a new `Idinfo` and appending it to a chain driver's table — no
/// other code changes.
#[derive(Clone, Copy)]
pub struct Idinfo {
    pub name: &'static str,
    pub usage: Usage,
    pub flags: IdinfoFlags,
    pub min_size: u64,
    pub probe: ProbeFn,
    pub magics: &'static [MagicDescriptor],
}

impl Idinfo {
    pub fn is_tolerant(&self) -> bool {
        self.flags.contains(IdinfoFlags::TOLERANT)
    }

    /// Whether a checksum mismatch should be soft-accepted: the format must declare it
    /// can compute one (`IdinfoFlags::BADCSUM`) AND the running chain must have opted in
    /// (`ChainFlags::BADCSUM`, default off).
    pub fn accepts_bad_checksum(&self, chain_flags: ChainFlags) -> bool {
        self.flags.contains(IdinfoFlags::BADCSUM) && chain_flags.contains(ChainFlags::BADCSUM)
    }

    pub fn emits_magic_values(&self) -> bool {
        self.flags.contains(IdinfoFlags::MAGIC)
    }

    /// Identifiers whose `min_size` exceeds a `TINY` window are skipped.
    pub fn fits_window(&self, window_size: u64) -> bool {
        window_size >= self.min_size
    }
}
