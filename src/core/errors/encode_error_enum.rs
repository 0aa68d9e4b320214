// Copyright (c) 2023 Nick Piaddo
// SPDX-License-Identifier: Apache-2.0 OR MIT

// From dependency library
use thiserror::Error;

// From standard library

// From this library

/// Byte-string encoding/decoding runtime errors.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum EncodeError {
    /// A UTF-16BE sequence (Joliet, F2FS volume names) contained an unpaired surrogate or
    /// otherwise did not decode to valid UTF-8.
    #[error("invalid UTF-16 sequence: {0}")]
    InvalidUtf16(String),

    /// A fixed-width on-disk string field was not valid ASCII where ASCII was required.
    #[error("invalid ASCII in fixed-width field: {0}")]
    InvalidAscii(String),
}
