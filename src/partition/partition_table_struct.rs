// Copyright (c) 2023 Nick Piaddo
// SPDX-License-Identifier: Apache-2.0 OR MIT

// From dependency library

// From standard library

// From this library
use crate::core::device::Uuid;
use crate::core::partition::PartitionTableType;
use crate::partition::{Partition, PartitionIter};

/// An `n`-ary tree of [`Partition`] entries. A partitions identifier appends entries
/// depth-first as it discovers nested tables (MBR extended chains, for instance), so
/// insertion order is already pre-order — [`PartitionTable::iter`] needs no sorting pass.
#[derive(Clone, Debug, Default)]
pub struct PartitionTable {
    pub table_type: Option<PartitionTableType>,
    pub table_uuid: Option<Uuid>,
    entries: Vec<Partition>,
}

impl PartitionTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a root-level entry, returning its index for use as a later `parent`.
    pub fn push_root(&mut self, entry: Partition) -> usize {
        self.entries.push(entry);
        self.entries.len() - 1
    }

    /// Appends an entry nested under `parent`'s index.
    pub fn push_child(&mut self, parent: usize, entry: Partition) -> usize {
        self.entries.push(entry.with_parent(parent));
        self.entries.len() - 1
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn get(&self, index: usize) -> Option<&Partition> {
        self.entries.get(index)
    }

    /// Flat pre-order iteration over every entry, root tables and nested tables alike.
    pub fn iter(&self) -> PartitionIter<'_> {
        PartitionIter::new(self.entries.iter())
    }

    pub fn reset(&mut self) {
        self.table_type = None;
        self.table_uuid = None;
        self.entries.clear();
    }
}

#[cfg(test)]
#[allow(unused_imports)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn nested_entries_flatten_in_pre_order() {
        let mut table = PartitionTable::new();
        let extended = table.push_root(Partition::new(1, 0, 100, "0x05"));
        table.push_child(extended, Partition::new(5, 10, 20, "0x83"));
        table.push_root(Partition::new(2, 200, 50, "0x83"));

        let numbers: Vec<u32> = table.iter().map(|p| p.number).collect();
        assert_eq!(numbers, vec![1, 5, 2]);
    }
}
