// Copyright (c) 2023 Nick Piaddo
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Typed home for the configuration keys an external collaborator resolves.
//!
//! Parsing the configuration file, and applying `BLKID_CONF`/`BLKID_FILE` overrides, is
//! out of scope for this crate: the core only needs a place to receive
//! the handful of keys a caller may have already parsed elsewhere. Nothing in this module
//! reads a file or an environment variable other than [`EvaluateMethod`]'s `Display`.

// From dependency library

// From standard library
use std::path::PathBuf;

// From this library
pub use evaluate_method_enum::EvaluateMethod;

mod evaluate_method_enum;

/// Passive carrier for the configuration keys an external collaborator may supply.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Config {
    /// `SEND_UEVENT`
    pub send_uevent: bool,
    /// `CACHE_FILE`
    pub cache_file: Option<PathBuf>,
    /// `EVALUATE`
    pub evaluate: Vec<EvaluateMethod>,
}
