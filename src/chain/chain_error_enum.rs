// Copyright (c) 2023 Nick Piaddo
// SPDX-License-Identifier: Apache-2.0 OR MIT

// From dependency library
use thiserror::Error;

// From standard library

// From this library

/// Errors raised by the chain dispatch engine itself, as opposed to an individual
/// identifier probe.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ChainError {
    /// Two or more non-`TOLERANT` identifiers matched in the same safe-probe pass.
    #[error("ambivalent chain: {0}")]
    Ambivalent(String),

    /// A filter referenced an identifier name that does not exist in the chain, or was
    /// applied to a chain whose identifier count does not match the filter's length.
    #[error("misconfigured filter: {0}")]
    Filter(String),
}
