// Copyright (c) 2023 Nick Piaddo
// SPDX-License-Identifier: Apache-2.0 OR MIT

// From dependency library

// From standard library

// From this library
use crate::magic::MagicDescriptor;

/// A successfully located magic signature, handed to an identifier's probe callback.
#[derive(Clone, Copy, Debug)]
pub struct MagicMatch {
    /// Absolute byte offset within the probing window where the magic was found.
    pub offset: u64,
    /// The descriptor that matched.
    pub descriptor: &'static MagicDescriptor,
}
