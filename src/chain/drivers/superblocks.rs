// Copyright (c) 2023 Nick Piaddo
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Filesystem and RAID-member identification.

// From dependency library

// From standard library

// From this library
use crate::chain::dispatch::{safe_probe, step_probe};
use crate::chain::{Chain, ChainDriver, ChainKind, Idinfo, SafeOutcome, StepOutcome};
use crate::error::Result;
use crate::identify::SUBLKS_IDINFOS;
use crate::probe::ProbeContext;

/// Wraps [`SUBLKS_IDINFOS`].
pub struct SuperblocksDriver;

impl ChainDriver for SuperblocksDriver {
    fn kind(&self) -> ChainKind {
        ChainKind::Sublks
    }

    fn idinfos(&self) -> &'static [Idinfo] {
        SUBLKS_IDINFOS
    }

    fn probe(&self, ctx: &mut ProbeContext<'_>, chain: &mut Chain) -> Result<StepOutcome> {
        Ok(step_probe(self.idinfos(), ctx, chain))
    }

    fn safe_probe(&self, ctx: &mut ProbeContext<'_>, chain: &mut Chain) -> Result<SafeOutcome> {
        Ok(safe_probe(self.idinfos(), ctx, chain))
    }
}
