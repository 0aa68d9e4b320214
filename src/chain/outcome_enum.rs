// Copyright (c) 2023 Nick Piaddo
// SPDX-License-Identifier: Apache-2.0 OR MIT

// From dependency library

// From standard library

// From this library

/// Result of a single identifier's `probe` callback.
#[derive(Debug)]
pub enum ProbeOutcome {
    /// The identifier matched and emitted values.
    Ok,
    /// Magic not found, or found but structural invariants failed. Never fatal.
    None,
    /// I/O failure surfaced by the buffer cache.
    Error(String),
}

/// Result of [`ChainDriver::probe`](crate::chain::ChainDriver::probe).
#[derive(Debug)]
pub enum StepOutcome {
    /// An identifier produced a hit.
    Ok,
    /// Every identifier in the chain has been tried; nothing left to do.
    Done,
    Error(String),
}

/// Result of [`ChainDriver::safe_probe`](crate::chain::ChainDriver::safe_probe).
#[derive(Debug)]
pub enum SafeOutcome {
    Ok,
    Nothing,
    /// Two or more non-`TOLERANT` identifiers matched; all hits from the pass were
    /// discarded.
    Ambivalent,
    Error(String),
}
