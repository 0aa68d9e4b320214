// Copyright (c) 2023 Nick Piaddo
// SPDX-License-Identifier: Apache-2.0 OR MIT

// From dependency library

// From standard library

// From this library
use crate::chain::{Chain, ChainKind, Idinfo, SafeOutcome, StepOutcome};
use crate::error::Result;
use crate::probe::ProbeContext;

/// One of the three well-known probing domains, plus the two orchestration operations
/// (`probe`/`safe_probe`) defined for it.
///
/// Each chain kind is a value implementing this trait rather than a struct of function
/// pointers.
pub trait ChainDriver: Send + Sync {
    fn kind(&self) -> ChainKind;

    /// Identifiers in declaration order; order encodes probing priority.
    fn idinfos(&self) -> &'static [Idinfo];

    /// Tries identifiers `chain.index() + 1 ..= idinfos().len()`, advancing the index to
    /// the last one tried. Returns [`StepOutcome::Ok`] on the first hit.
    fn probe(&self, ctx: &mut ProbeContext<'_>, chain: &mut Chain) -> Result<StepOutcome>;

    /// Iterates every identifier from a clean state, collecting hits. Returns
    /// [`SafeOutcome::Ambivalent`] if more than one non-`TOLERANT` identifier matched.
    fn safe_probe(&self, ctx: &mut ProbeContext<'_>, chain: &mut Chain) -> Result<SafeOutcome>;
}
