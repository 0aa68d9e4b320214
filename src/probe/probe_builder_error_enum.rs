// Copyright (c) 2023 Nick Piaddo
// SPDX-License-Identifier: Apache-2.0 OR MIT

// From dependency library
use thiserror::Error;

// From standard library

// From this library

/// Errors raised while assembling a [`Probe`](crate::probe::Probe) through
/// [`ProbeBuilder`](crate::probe::ProbeBuilder).
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ProbeBuilderError {
    #[error("failed to open device at {path:?}: {source}")]
    Open {
        path: std::path::PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to bind device: {0}")]
    Bind(#[from] super::ProbeError),
}
