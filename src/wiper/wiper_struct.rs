// Copyright (c) 2023 Nick Piaddo
// SPDX-License-Identifier: Apache-2.0 OR MIT

// From dependency library

// From standard library

// From this library
use crate::chain::ChainKind;
use crate::wiper::WiperRecord;

/// At most one recorded wiped range at a time — a later success narrows or replaces it.
#[derive(Clone, Copy, Debug, Default)]
pub struct Wiper(Option<WiperRecord>);

impl Wiper {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records that `idinfo` on `chain` zeroed `[off, off+size)`.
    pub fn record(&mut self, off: u64, size: u64, chain: ChainKind, idinfo: &'static str) {
        self.0 = Some(WiperRecord { off, size, chain, idinfo });
    }

    /// The current record, if any.
    pub fn current(&self) -> Option<&WiperRecord> {
        self.0.as_ref()
    }

    /// Whether window-relative `offset` lies within the recorded wiped range.
    pub fn covers(&self, offset: u64) -> bool {
        self.0.map(|r| r.contains(offset)).unwrap_or(false)
    }

    /// Clears the record, e.g. at the start/end of a probing operation.
    pub fn reset(&mut self) {
        self.0 = None;
    }
}

#[cfg(test)]
#[allow(unused_imports)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn recorded_range_covers_offsets_within_it() {
        let mut wiper = Wiper::new();
        wiper.record(0, 8192, ChainKind::Parts, "LVM2_member");
        assert!(wiper.covers(0x1FE));
        assert!(!wiper.covers(8192));
    }

    #[test]
    fn reset_clears_the_record() {
        let mut wiper = Wiper::new();
        wiper.record(0, 8192, ChainKind::Parts, "LVM2_member");
        wiper.reset();
        assert!(wiper.current().is_none());
        assert!(!wiper.covers(0));
    }
}
