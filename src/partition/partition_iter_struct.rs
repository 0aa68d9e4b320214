// Copyright (c) 2023 Nick Piaddo
// SPDX-License-Identifier: Apache-2.0 OR MIT

// From dependency library

// From standard library

// From this library
use crate::partition::Partition;

/// Pre-order iterator over a [`PartitionTable`](crate::partition::PartitionTable)'s
/// entries.
pub struct PartitionIter<'a> {
    inner: std::slice::Iter<'a, Partition>,
}

impl<'a> PartitionIter<'a> {
    pub(crate) fn new(inner: std::slice::Iter<'a, Partition>) -> Self {
        Self { inner }
    }
}

impl<'a> Iterator for PartitionIter<'a> {
    type Item = &'a Partition;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }
}
