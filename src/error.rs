// Copyright (c) 2023 Nick Piaddo
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Crate-wide error type and `Result` alias.

// From dependency library
use thiserror::Error;

// From standard library

// From this library
use crate::chain::ChainError;
use crate::core::errors::{ConversionError, EncodeError, MiscError, ParserError};
use crate::probe::{ProbeBuilderError, ProbeError};

/// Aggregates every leaf error a caller of this crate may observe.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum BlkidCoreError {
    #[error(transparent)]
    Chain(#[from] ChainError),

    #[error(transparent)]
    Conversion(#[from] ConversionError),

    #[error(transparent)]
    Encode(#[from] EncodeError),

    #[error(transparent)]
    Misc(#[from] MiscError),

    #[error(transparent)]
    Parser(#[from] ParserError),

    #[error(transparent)]
    Probe(#[from] ProbeError),

    #[error(transparent)]
    ProbeBuilder(#[from] ProbeBuilderError),
}

/// Crate-wide `Result` alias.
pub type Result<T> = std::result::Result<T, BlkidCoreError>;
