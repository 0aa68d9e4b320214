// Copyright (c) 2023 Nick Piaddo
// SPDX-License-Identifier: Apache-2.0 OR MIT

// From dependency library

// From standard library

// From this library
use crate::core::device::{Label, Uuid};

/// One entry in a [`PartitionTable`](crate::partition::PartitionTable), for nested
/// tables tied to its parent by index rather than an intrusive pointer.
#[derive(Clone, Debug, Default)]
pub struct Partition {
    pub parent: Option<usize>,
    pub number: u32,
    pub start: u64,
    pub size: u64,
    /// Raw type code; interpretation (MBR byte, GPT GUID string, BSD fstype) depends on
    /// the owning table's [`PartitionTableType`](crate::core::partition::PartitionTableType).
    pub partition_type: String,
    pub uuid: Option<Uuid>,
    pub name: Option<Label>,
    pub flags: u64,
}

impl Partition {
    pub fn new(number: u32, start: u64, size: u64, partition_type: impl Into<String>) -> Self {
        Self {
            parent: None,
            number,
            start,
            size,
            partition_type: partition_type.into(),
            uuid: None,
            name: None,
            flags: 0,
        }
    }

    pub fn with_parent(mut self, parent: usize) -> Self {
        self.parent = Some(parent);
        self
    }

    pub fn with_uuid(mut self, uuid: Uuid) -> Self {
        self.uuid = Some(uuid);
        self
    }

    pub fn with_name(mut self, name: Label) -> Self {
        self.name = Some(name);
        self
    }

    pub fn with_flags(mut self, flags: u64) -> Self {
        self.flags = flags;
        self
    }
}
