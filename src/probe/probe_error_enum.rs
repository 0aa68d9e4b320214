// Copyright (c) 2023 Nick Piaddo
// SPDX-License-Identifier: Apache-2.0 OR MIT

// From dependency library
use thiserror::Error;

// From standard library

// From this library

/// Controller-level failures: bind failure, I/O failure, or an
/// invalid window. Per-identifier no-match/corruption is never surfaced as an error — see
/// [`ProbeOutcome`](crate::chain::ProbeOutcome).
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ProbeError {
    #[error("failed to bind device: {0}")]
    BindDevice(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("probing window exceeds device size: requested {requested} bytes, device is {device} bytes")]
    WindowExceedsDevice { requested: u64, device: u64 },

    #[error("medium absent: {0}")]
    MediumAbsent(String),

    #[error("no value list entry to wipe")]
    NothingToWipe,

    #[error("scanning disabled for this device (NOSCAN)")]
    ScanDisabled,
}
