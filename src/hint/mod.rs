// Copyright (c) 2023 Nick Piaddo
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Named 64-bit integer hints consumed by [`MagicDescriptor`](crate::magic::MagicDescriptor)
//! lookups.

// From dependency library

// From standard library

// From this library
pub use hint_registry_struct::HintRegistry;

mod hint_registry_struct;

/// Well-known hint set by [`Probe::bind_device`](crate::probe::Probe::bind_device) from a
/// CD-ROM's multi-session information.
pub const SESSION_OFFSET: &str = "session_offset";
