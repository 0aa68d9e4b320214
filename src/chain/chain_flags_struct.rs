// Copyright (c) 2023 Nick Piaddo
// SPDX-License-Identifier: Apache-2.0 OR MIT

// From dependency library
use bitflags::bitflags;

// From standard library

// From this library

bitflags! {
    /// Runtime, per-chain flags set by a caller through
    /// [`Chain::set_flag`](crate::chain::Chain::set_flag) and read back by identifier
    /// probes through [`ProbeContext::chain_flags`](crate::probe::ProbeContext::chain_flags).
    ///
    /// Distinct from [`IdinfoFlags`](crate::chain::IdinfoFlags), which is a static
    /// per-format capability declared once on an `Idinfo`: `IdinfoFlags::BADCSUM` says a
    /// format *has* a checksum that could be soft-accepted, `ChainFlags::BADCSUM` says the
    /// caller has actually opted into that soft-accept for this session.
    #[derive(Clone, Copy, Debug, Eq, PartialEq)]
    pub struct ChainFlags: u32 {
        /// Soft-accept a checksum mismatch (`SBBADCSUM=1`) instead of reporting no-match.
        const BADCSUM = 1 << 0;
        /// Emit `PART_ENTRY_*` values alongside the `NAME=value` stream for each
        /// partition table entry.
        const PART_ENTRY_DETAILS = 1 << 1;
    }
}
