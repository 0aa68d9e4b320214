// Copyright (c) 2023 Nick Piaddo
// SPDX-License-Identifier: Apache-2.0 OR MIT

// From dependency library
use thiserror::Error;

// From standard library

// From this library

/// Catch-all runtime errors that do not belong to a more specific category.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum MiscError {
    #[error("{0}")]
    InvalidArgument(String),
}
