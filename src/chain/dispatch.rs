// Copyright (c) 2023 Nick Piaddo
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Shared single-step and safe-probe iteration used by every [`ChainDriver`]
//! implementation in `drivers/`. Factored out once three near-identical drivers made the duplication obvious.

// From dependency library

// From standard library

// From this library
use crate::chain::{Chain, ChainKind, Idinfo, ProbeOutcome, SafeOutcome, StepOutcome};
use crate::magic::{LocateOutcome, MagicDescriptor, MagicLocation, MagicMatch};
use crate::probe::ProbeContext;
use crate::value::name;

/// Sentinel used to invoke an identifier with an empty magic table (e.g. topology, which
/// has no device-specific signature).
static NO_MAGIC: MagicDescriptor = MagicDescriptor {
    bytes: b"",
    location: MagicLocation::Fixed { kboff: 0 },
    sboff: 0,
    hint: None,
};

fn try_identifier(info: &Idinfo, ctx: &mut ProbeContext<'_>) -> ProbeOutcome {
    if info.magics.is_empty() {
        let sentinel = MagicMatch {
            offset: 0,
            descriptor: &NO_MAGIC,
        };
        return (info.probe)(ctx, &sentinel);
    }

    match ctx.locate(info.magics) {
        LocateOutcome::Found(m) => {
            if ctx.wiper_covers(m.offset) {
                return ProbeOutcome::None;
            }
            let outcome = (info.probe)(ctx, &m);
            if matches!(outcome, ProbeOutcome::Ok) && info.emits_magic_values() {
                emit_magic_values(ctx, &m);
            }
            outcome
        }
        LocateOutcome::NotFound => ProbeOutcome::None,
        LocateOutcome::IoError(e) => ProbeOutcome::Error(e.to_string()),
    }
}

/// Appends the matched magic bytes and byte offset as values, for identifiers that
/// declare `IdinfoFlags::MAGIC`. `DoWipe` reads these back to find what
/// to erase.
fn emit_magic_values(ctx: &mut ProbeContext<'_>, m: &MagicMatch) {
    let (magic_name, offset_name) = match ctx.chain_kind() {
        ChainKind::Parts => (name::PTMAGIC, name::PTMAGIC_OFFSET),
        _ => (name::SBMAGIC, name::SBMAGIC_OFFSET),
    };
    ctx.emit(magic_name, m.descriptor.bytes.to_vec());
    ctx.emit_display(offset_name, m.offset);
}

/// Tries identifiers `chain.index()+1 ..` in order, stopping at the first hit and leaving
/// the index parked there.
pub(crate) fn step_probe(idinfos: &'static [Idinfo], ctx: &mut ProbeContext<'_>, chain: &mut Chain) -> StepOutcome {
    let start = (chain.index().max(-1) + 1) as usize;
    for i in start..idinfos.len() {
        chain.set_index(i as i32);
        let info = &idinfos[i];
        if !chain.is_identifier_enabled(i) || !info.fits_window(ctx.window().size) {
            continue;
        }
        match try_identifier(info, ctx) {
            ProbeOutcome::Ok => return StepOutcome::Ok,
            ProbeOutcome::None => {}
            ProbeOutcome::Error(e) => return StepOutcome::Error(e),
        }
    }
    StepOutcome::Done
}

/// Iterates every identifier from a clean state; more than one non-`TOLERANT` hit is
/// ambivalent and discards the whole pass's values.
pub(crate) fn safe_probe(idinfos: &'static [Idinfo], ctx: &mut ProbeContext<'_>, chain: &mut Chain) -> SafeOutcome {
    chain.reset_index();
    ctx.reset_chain_values();

    let mut non_tolerant_hits = 0usize;
    let mut any_hit = false;

    for (i, info) in idinfos.iter().enumerate() {
        if !chain.is_identifier_enabled(i) || !info.fits_window(ctx.window().size) {
            continue;
        }
        match try_identifier(info, ctx) {
            ProbeOutcome::Ok => {
                any_hit = true;
                if !info.is_tolerant() {
                    non_tolerant_hits += 1;
                }
            }
            ProbeOutcome::None => {}
            ProbeOutcome::Error(e) => return SafeOutcome::Error(e),
        }
    }

    if non_tolerant_hits > 1 {
        ctx.reset_chain_values();
        return SafeOutcome::Ambivalent;
    }

    if any_hit {
        SafeOutcome::Ok
    } else {
        SafeOutcome::Nothing
    }
}

/// Like `safe_probe` but never discards hits: every identifier's results from one clean
/// pass are kept regardless of how many non-`TOLERANT` identifiers matched.
pub(crate) fn full_probe(idinfos: &'static [Idinfo], ctx: &mut ProbeContext<'_>, chain: &mut Chain) -> SafeOutcome {
    chain.reset_index();
    ctx.reset_chain_values();

    let mut any_hit = false;
    for (i, info) in idinfos.iter().enumerate() {
        if !chain.is_identifier_enabled(i) || !info.fits_window(ctx.window().size) {
            continue;
        }
        match try_identifier(info, ctx) {
            ProbeOutcome::Ok => any_hit = true,
            ProbeOutcome::None => {}
            ProbeOutcome::Error(e) => return SafeOutcome::Error(e),
        }
    }

    if any_hit {
        SafeOutcome::Ok
    } else {
        SafeOutcome::Nothing
    }
}
