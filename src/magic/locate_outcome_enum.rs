// Copyright (c) 2023 Nick Piaddo
// SPDX-License-Identifier: Apache-2.0 OR MIT

// From dependency library

// From standard library

// From this library
use crate::magic::MagicMatch;

/// Result of walking an identifier's magic table.
#[derive(Debug)]
pub enum LocateOutcome {
    Found(MagicMatch),
    NotFound,
    IoError(std::io::Error),
}
