// Copyright (c) 2023 Nick Piaddo
// SPDX-License-Identifier: Apache-2.0 OR MIT

// From dependency library

// From standard library

// From this library
use crate::chain::ChainKind;

/// A byte range a successful identifier declared as zeroed by its on-disk format.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct WiperRecord {
    pub off: u64,
    pub size: u64,
    pub chain: ChainKind,
    pub idinfo: &'static str,
}

impl WiperRecord {
    /// Whether window-relative `offset` falls inside the recorded range.
    pub fn contains(&self, offset: u64) -> bool {
        offset >= self.off && offset < self.off + self.size
    }
}
