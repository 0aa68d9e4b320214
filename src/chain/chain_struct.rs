// Copyright (c) 2023 Nick Piaddo
// SPDX-License-Identifier: Apache-2.0 OR MIT

// From dependency library

// From standard library

// From this library
use crate::chain::{ChainDriver, ChainFlags, ChainKind, Filter};

/// One of the three well-known kinds of probing a [`Probe`](crate::probe::Probe) performs.
pub struct Chain {
    kind: ChainKind,
    driver: &'static dyn ChainDriver,
    enabled: bool,
    binary: bool,
    /// −1 when at the start; `>= nidinfos` signals the chain is exhausted.
    index: i32,
    filter: Option<Filter>,
    flags: ChainFlags,
}

impl Chain {
    pub fn new(driver: &'static dyn ChainDriver) -> Self {
        Self {
            kind: driver.kind(),
            driver,
            enabled: true,
            binary: false,
            index: -1,
            filter: None,
            flags: ChainFlags::empty(),
        }
    }

    pub fn kind(&self) -> ChainKind {
        self.kind
    }

    pub fn driver(&self) -> &'static dyn ChainDriver {
        self.driver
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    /// Whether this chain reports native-format output instead of `NAME=value` pairs.
    pub fn is_binary(&self) -> bool {
        self.binary
    }

    pub fn set_binary(&mut self, binary: bool) {
        self.binary = binary;
    }

    pub fn index(&self) -> i32 {
        self.index
    }

    pub fn set_index(&mut self, index: i32) {
        self.index = index;
    }

    /// Resets to "at the start"; any filter mutation must do this so probing restarts from
    /// a clean position.
    pub fn reset_index(&mut self) {
        self.index = -1;
    }

    pub fn is_exhausted(&self) -> bool {
        self.index >= self.driver.idinfos().len() as i32
    }

    pub fn filter(&self) -> Option<&Filter> {
        self.filter.as_ref()
    }

    pub fn set_filter(&mut self, filter: Option<Filter>) {
        self.filter = filter;
        self.reset_index();
    }

    pub fn is_identifier_enabled(&self, index: usize) -> bool {
        !self.filter.as_ref().map(|f| f.is_disabled(index)).unwrap_or(false)
    }

    pub fn flags(&self) -> ChainFlags {
        self.flags
    }

    pub fn set_flag(&mut self, flag: ChainFlags, value: bool) {
        self.flags.set(flag, value);
    }
}
