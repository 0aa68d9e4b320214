// Copyright (c) 2023 Nick Piaddo
// SPDX-License-Identifier: Apache-2.0 OR MIT

// From dependency library

// From standard library
use std::fs::File;

// From this library
use crate::buffer::{BufferCache, ReadOutcome};
use crate::chain::{ChainFlags, ChainKind};
use crate::core::device::{DeviceNumber, Window};
use crate::hint::HintRegistry;
use crate::magic::{LocateOutcome, MagicDescriptor};
use crate::partition::PartitionTable;
use crate::probe::DeviceFlags;
use crate::value::{Value, ValueStore};
use crate::wiper::Wiper;

/// The view a [`ChainDriver`](crate::chain::ChainDriver) and its identifier probes get of
/// a [`Probe`](crate::probe::Probe): disjoint mutable borrows of the controller's buffers,
/// values, hints, wiper and partition tree, scoped to the chain currently running.
///
/// Built by splitting `&mut self` field-by-field inside [`Probe`](crate::probe::Probe)'s
/// own methods, so the controller can hand out several simultaneous mutable borrows of
/// its own disjoint fields without a `RefCell` or an always-pass-everything context
/// struct.
pub struct ProbeContext<'p> {
    file: &'p File,
    window: Window,
    sector_size: u32,
    zone_size: Option<u64>,
    flags: DeviceFlags,
    buffers: &'p mut BufferCache,
    values: &'p mut ValueStore,
    hints: &'p mut HintRegistry,
    wiper: &'p mut Wiper,
    partitions: &'p mut PartitionTable,
    chain: ChainKind,
    chain_flags: ChainFlags,
    devno: Option<DeviceNumber>,
}

impl<'p> ProbeContext<'p> {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        file: &'p File,
        window: Window,
        sector_size: u32,
        zone_size: Option<u64>,
        flags: DeviceFlags,
        buffers: &'p mut BufferCache,
        values: &'p mut ValueStore,
        hints: &'p mut HintRegistry,
        wiper: &'p mut Wiper,
        partitions: &'p mut PartitionTable,
        chain: ChainKind,
        chain_flags: ChainFlags,
        devno: Option<DeviceNumber>,
    ) -> Self {
        Self {
            file,
            window,
            sector_size,
            zone_size,
            flags,
            buffers,
            values,
            hints,
            wiper,
            partitions,
            chain,
            chain_flags,
            devno,
        }
    }

    pub fn window(&self) -> Window {
        self.window
    }

    pub fn sector_size(&self) -> u32 {
        self.sector_size
    }

    pub fn zone_size(&self) -> Option<u64> {
        self.zone_size
    }

    pub fn flags(&self) -> DeviceFlags {
        self.flags
    }

    pub fn chain_kind(&self) -> ChainKind {
        self.chain
    }

    /// The running chain's runtime flags (e.g. `ChainFlags::BADCSUM`), as set by the
    /// caller through [`Chain::set_flag`](crate::chain::Chain::set_flag).
    pub fn chain_flags(&self) -> ChainFlags {
        self.chain_flags
    }

    /// The whole-disk device number, when known, for `PART_ENTRY_DISK`.
    pub fn devno(&self) -> Option<DeviceNumber> {
        self.devno
    }

    /// Reads `len` bytes at `offset` relative to the probing window. Out-of-window
    /// requests are `EndOfArea`, never an I/O error.
    pub fn read(&mut self, offset: u64, len: usize) -> ReadOutcome<'_> {
        if !self.window.contains(offset, len as u64) {
            return ReadOutcome::EndOfArea;
        }
        let absolute = self.window.absolute(offset);
        self.buffers.read(self.file, absolute, len)
    }

    /// Convenience for a single 512-byte sector, relative to the window.
    pub fn read_sector(&mut self, n: u64) -> ReadOutcome<'_> {
        self.read(n * 512, 512)
    }

    pub fn hide_range(&mut self, offset: u64, len: usize) -> bool {
        let absolute = self.window.absolute(offset);
        self.buffers.hide_range(absolute, len)
    }

    /// Walks `magics` against this context's window, hints and zone size.
    pub(crate) fn locate(&mut self, magics: &'static [MagicDescriptor]) -> LocateOutcome {
        crate::magic::locate(magics, self.file, self.buffers, self.hints, self.zone_size, self.window)
    }

    pub fn emit(&mut self, name: &'static str, data: impl Into<Vec<u8>>) {
        self.values.push(Value::new(name, data, self.chain));
    }

    pub fn emit_display(&mut self, name: &'static str, value: impl std::fmt::Display) {
        self.values.push(Value::from_display(name, value, self.chain));
    }

    pub fn hint(&self, name: &str) -> u64 {
        self.hints.get_or_zero(name)
    }

    pub fn set_hint(&mut self, name: &str, value: u64) {
        self.hints.set(name, value);
    }

    /// Whether window-relative `offset` lies within a previously recorded wipe.
    pub fn wiper_covers(&self, offset: u64) -> bool {
        self.wiper.covers(offset)
    }

    pub fn record_wipe(&mut self, off: u64, size: u64, idinfo: &'static str) {
        self.wiper.record(off, size, self.chain, idinfo);
    }

    pub fn partitions_mut(&mut self) -> &mut PartitionTable {
        self.partitions
    }

    pub fn partitions(&self) -> &PartitionTable {
        self.partitions
    }

    pub(crate) fn reset_chain_values(&mut self) {
        self.values.reset_chain(self.chain);
    }
}
