// Copyright (c) 2023 Nick Piaddo
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Activate debug message output.
//!
//! This crate logs through the [log](https://crates.io/crates/log) facade rather than
//! printing directly, so you need a logger implementation compatible with the facade —
//! [`env_logger`](https://docs.rs/env_logger), [`fern`](https://docs.rs/fern), or any of
//! the others listed in `log`'s own documentation.
//!
//! ```ignore
//! static INIT: std::sync::Once = std::sync::Once::new();
//!
//! fn main() {
//!     INIT.call_once(|| {
//!         env_logger::init();
//!         blkid_core::debug::init_default_debug();
//!     });
//! }
//! ```
//!
//! Set `LIBBLKID_DEBUG` to control this crate's own verbosity, independently of whatever
//! level your logger's `RUST_LOG` (or equivalent) filter already applies:
//!
//! ```text
//! LIBBLKID_DEBUG="lowprobe,buffer" ./main
//! ```
//!
//! A value of `all` or `0xffff` is equivalent to calling [`init_full_debug`]. Any other
//! non-empty value enables `Debug`-level output; an unset or empty variable leaves the
//! default `Info` ceiling in place. Whichever of [`init_default_debug`] or
//! [`init_full_debug`] runs first wins — the level can't be changed afterwards, matching
//! the one-shot semantics of the interface this mirrors.

// From dependency library
use log::LevelFilter;

// From standard library
use std::sync::Once;

// From this library

static INIT: Once = Once::new();

/// Reads `LIBBLKID_DEBUG` and sets this crate's log level ceiling accordingly. A no-op on
/// every call after the first.
///
/// Recognized values (comma-separated, matching the subsystem names this crate's modules
/// are named after): `lowprobe`, `buffer`, `dev`, `chain`, `wiper`, `hint`, `partition`,
/// `value`, or `all` for everything. Any recognized, non-empty value raises the ceiling to
/// `Debug`; `all` raises it to `Trace`.
pub fn init_default_debug() {
    INIT.call_once(|| {
        let level = match std::env::var("LIBBLKID_DEBUG") {
            Ok(spec) if spec.split(',').any(|s| s.trim() == "all") => LevelFilter::Trace,
            Ok(spec) if !spec.trim().is_empty() => LevelFilter::Debug,
            _ => LevelFilter::Info,
        };
        log::set_max_level(level);
    });
}

/// Unconditionally raises this crate's log level ceiling to `Trace`. A no-op after the
/// first call to either this function or [`init_default_debug`].
pub fn init_full_debug() {
    INIT.call_once(|| {
        log::set_max_level(LevelFilter::Trace);
    });
}

#[cfg(test)]
#[allow(unused_imports)]
mod tests {
    use super::*;

    #[test]
    fn recognizes_the_all_keyword_among_comma_separated_values() {
        std::env::set_var("LIBBLKID_DEBUG", "dev,all,buffer");
        let spec = std::env::var("LIBBLKID_DEBUG").unwrap();
        assert!(spec.split(',').any(|s| s.trim() == "all"));
        std::env::remove_var("LIBBLKID_DEBUG");
    }
}
