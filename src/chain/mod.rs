// Copyright (c) 2023 Nick Piaddo
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-chain collection of identification descriptors, filter bitmaps, and the
//! orderings that turn raw magic hits into final `NAME=value` results.

// From dependency library

// From standard library

// From this library
pub use chain_driver_trait::ChainDriver;
pub use chain_error_enum::ChainError;
pub use chain_flags_struct::ChainFlags;
pub use chain_kind_enum::ChainKind;
pub use chain_struct::Chain;
pub use filter_struct::{Filter, FilterDirection};
pub use idinfo_struct::{Idinfo, IdinfoFlags, ProbeFn};
pub use outcome_enum::{ProbeOutcome, SafeOutcome, StepOutcome};

pub mod drivers;

mod chain_driver_trait;
mod chain_error_enum;
mod chain_flags_struct;
mod chain_kind_enum;
mod chain_struct;
pub(crate) mod dispatch;
mod filter_struct;
mod idinfo_struct;
mod outcome_enum;
