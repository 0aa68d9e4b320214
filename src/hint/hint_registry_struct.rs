// Copyright (c) 2023 Nick Piaddo
// SPDX-License-Identifier: Apache-2.0 OR MIT

// From dependency library

// From standard library
use std::collections::HashMap;

// From this library
use crate::core::errors::{MiscError, ParserError};
use crate::Result;

/// Registry of named `uint64` hints.
///
/// A [`HashMap`] is sufficient since the only access pattern is get/set by name.
#[derive(Debug, Default)]
pub struct HintRegistry {
    hints: HashMap<String, u64>,
}

impl HintRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets, or updates, a named hint.
    pub fn set(&mut self, name: &str, value: u64) {
        self.hints.insert(name.to_string(), value);
    }

    /// Parses and sets a hint from a `NAME=value` string.
    ///
    /// `name` must be one of the well-known hint names in [`crate::hint`] (currently just
    /// [`SESSION_OFFSET`](super::SESSION_OFFSET)); anything else is rejected the same way
    /// an unrecognized hint name is rejected at the source this crate reimplements.
    pub fn set_from_str(&mut self, spec: &str) -> Result<()> {
        let (name, value) = spec
            .split_once('=')
            .ok_or_else(|| ParserError::Hint(format!("missing '=' in hint spec: {spec:?}")))?;
        let name = name.trim();
        if name != super::SESSION_OFFSET {
            return Err(MiscError::InvalidArgument(format!("unrecognized hint name: {name:?}")).into());
        }
        let value: u64 = value
            .trim()
            .parse()
            .map_err(|e| ParserError::Hint(format!("invalid hint value in {spec:?}: {e}")))?;
        self.set(name, value);
        Ok(())
    }

    /// Returns the value of a hint, or `0` when unset — the contribution a magic
    /// descriptor adds when its named hint has never been set.
    pub fn get_or_zero(&self, name: &str) -> u64 {
        self.hints.get(name).copied().unwrap_or(0)
    }

    /// Returns the value of a hint, distinguishing "not set" from a literal zero.
    pub fn get(&self, name: &str) -> Option<u64> {
        self.hints.get(name).copied()
    }

    /// Clears the registry, e.g. on [`Probe::bind_device`](crate::probe::Probe::bind_device).
    pub fn clear(&mut self) {
        self.hints.clear();
    }
}
