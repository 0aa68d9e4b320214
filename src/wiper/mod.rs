// Copyright (c) 2023 Nick Piaddo
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Remembers the byte range a previously detected signature is known to have zeroed, so a
//! later, conflicting hit at a different location can be suppressed.

// From dependency library

// From standard library

// From this library
pub use wiper_record_struct::WiperRecord;
pub use wiper_struct::Wiper;

mod wiper_record_struct;
mod wiper_struct;
