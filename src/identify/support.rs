// Copyright (c) 2023 Nick Piaddo
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Little helpers shared by the identifier probes in this module: fixed-width integer
//! readers over a byte slice, with bounds checks instead of panics — a probe callback
//! must never panic on attacker-controlled bytes.

// From dependency library

// From standard library

// From this library
use crate::partition::Partition;
use crate::probe::ProbeContext;
use crate::value::name;

pub fn u16le(bytes: &[u8], offset: usize) -> Option<u16> {
    bytes.get(offset..offset + 2).map(|b| u16::from_le_bytes([b[0], b[1]]))
}

pub fn u32le(bytes: &[u8], offset: usize) -> Option<u32> {
    bytes
        .get(offset..offset + 4)
        .map(|b| u32::from_le_bytes([b[0], b[1], b[2], b[3]]))
}

pub fn u64le(bytes: &[u8], offset: usize) -> Option<u64> {
    bytes.get(offset..offset + 8).map(|b| {
        let mut a = [0u8; 8];
        a.copy_from_slice(b);
        u64::from_le_bytes(a)
    })
}

pub fn u16be(bytes: &[u8], offset: usize) -> Option<u16> {
    bytes.get(offset..offset + 2).map(|b| u16::from_be_bytes([b[0], b[1]]))
}

pub fn u32be(bytes: &[u8], offset: usize) -> Option<u32> {
    bytes
        .get(offset..offset + 4)
        .map(|b| u32::from_be_bytes([b[0], b[1], b[2], b[3]]))
}

/// Emits the `PART_ENTRY_*` values for one partition table entry, gated by the chain's
/// `ChainFlags::PART_ENTRY_DETAILS` flag (see `spec.md` §4.7). `scheme` is the owning
/// table's `PTTYPE` string (`"dos"`, `"gpt"`, `"bsd"`).
pub fn emit_partition_entry_details(ctx: &mut ProbeContext<'_>, partition: &Partition, scheme: &'static str) {
    if !ctx.chain_flags().contains(crate::chain::ChainFlags::PART_ENTRY_DETAILS) {
        return;
    }

    ctx.emit_display(name::PART_ENTRY_NUMBER, partition.number);
    ctx.emit_display(name::PART_ENTRY_OFFSET, partition.start);
    ctx.emit_display(name::PART_ENTRY_SIZE, partition.size);
    ctx.emit(name::PART_ENTRY_TYPE, partition.partition_type.as_bytes());
    ctx.emit(name::PART_ENTRY_SCHEME, scheme.as_bytes());
    ctx.emit_display(name::PART_ENTRY_FLAGS, format!("{:#x}", partition.flags));
    if let Some(uuid) = &partition.uuid {
        ctx.emit_display(name::PART_ENTRY_UUID, uuid);
    }
    if let Some(label) = &partition.name {
        ctx.emit(name::PART_ENTRY_NAME, label.as_str().as_bytes());
    }
    if let Some(devno) = ctx.devno() {
        ctx.emit_display(name::PART_ENTRY_DISK, devno);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn readers_return_none_past_end_of_slice() {
        let bytes = [1u8, 2, 3];
        assert_eq!(u32le(&bytes, 0), None);
        assert_eq!(u16le(&bytes, 2), None);
        assert_eq!(u16le(&bytes, 1), Some(u16::from_le_bytes([2, 3])));
    }
}
