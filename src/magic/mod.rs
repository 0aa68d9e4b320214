// Copyright (c) 2023 Nick Piaddo
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Locates an identifier's magic signature in a device's probing window.

// From dependency library

// From standard library

// From this library
pub use locate_outcome_enum::LocateOutcome;
pub use locator::locate;
pub use magic_descriptor_struct::MagicDescriptor;
pub use magic_descriptor_struct::MagicLocation;
pub use magic_match_struct::MagicMatch;

mod locate_outcome_enum;
mod locator;
mod magic_descriptor_struct;
mod magic_match_struct;
