// Copyright (c) 2023 Nick Piaddo
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! GPT: the `EFI PART` signature header at LBA 1, followed by an array of 128-byte
//! partition entries whose type and unique GUIDs are stored mixed-endian.

// From dependency library

// From standard library

// From this library
use crate::chain::{IdinfoFlags, Idinfo, ProbeOutcome};
use crate::core::device::{Usage, Uuid};
use crate::core::partition::PartitionTableType;
use crate::identify::support::{emit_partition_entry_details, u32le, u64le};
use crate::magic::{MagicDescriptor, MagicMatch};
use crate::partition::Partition;
use crate::probe::ProbeContext;
use crate::value::name;

const SECTOR_SIZE: u64 = 512;
const ENTRY_SIZE_OFFSET: usize = 84;
const ENTRY_COUNT_OFFSET: usize = 80;
const ENTRY_ARRAY_LBA_OFFSET: usize = 72;
const DISK_GUID_OFFSET: usize = 56;
/// Bounds the partition entry scan against a corrupt, implausibly large entry count.
const MAX_ENTRIES: u32 = 1024;

pub static MAGICS: &[MagicDescriptor] = &[MagicDescriptor::fixed(b"EFI PART", 0, 512)];

pub static IDINFO: Idinfo = Idinfo {
    name: "gpt",
    usage: Usage::Other,
    flags: IdinfoFlags::MAGIC,
    min_size: 3 * SECTOR_SIZE,
    probe,
    magics: MAGICS,
};

/// Converts an on-disk mixed-endian GUID (first three fields little-endian, last two
/// big-endian) into canonical display order.
fn mixed_endian_guid(bytes: &[u8]) -> Option<Uuid> {
    if bytes.len() != 16 {
        return None;
    }
    let mut canonical = [0u8; 16];
    canonical[0] = bytes[3];
    canonical[1] = bytes[2];
    canonical[2] = bytes[1];
    canonical[3] = bytes[0];
    canonical[4] = bytes[5];
    canonical[5] = bytes[4];
    canonical[6] = bytes[7];
    canonical[7] = bytes[6];
    canonical[8..16].copy_from_slice(&bytes[8..16]);
    Some(Uuid::from_bytes_16(&canonical))
}

fn probe(ctx: &mut ProbeContext<'_>, magic: &MagicMatch) -> ProbeOutcome {
    let header_offset = magic.offset;
    let header = match ctx.read(header_offset, SECTOR_SIZE as usize).bytes() {
        Some(b) => b.to_vec(),
        None => return ProbeOutcome::None,
    };

    let (Some(entry_array_lba), Some(entry_count), Some(entry_size)) = (
        u64le(&header, ENTRY_ARRAY_LBA_OFFSET),
        u32le(&header, ENTRY_COUNT_OFFSET),
        u32le(&header, ENTRY_SIZE_OFFSET),
    ) else {
        return ProbeOutcome::None;
    };

    if entry_size < 128 || entry_count == 0 || entry_count > MAX_ENTRIES {
        return ProbeOutcome::None;
    }

    ctx.emit_display(name::PTTYPE, PartitionTableType::GPT);
    if let Some(guid) = header.get(DISK_GUID_OFFSET..DISK_GUID_OFFSET + 16).and_then(mixed_endian_guid) {
        ctx.emit_display(name::PTUUID, guid);
    }

    let entries_offset = entry_array_lba * SECTOR_SIZE;
    let entries_len = entry_count as usize * entry_size as usize;
    let Some(entries) = ctx.read(entries_offset, entries_len).bytes().map(|b| b.to_vec()) else {
        return ProbeOutcome::Ok;
    };

    for i in 0..entry_count as usize {
        let base = i * entry_size as usize;
        let Some(entry) = entries.get(base..base + entry_size as usize) else {
            break;
        };
        let Some(type_guid) = entry.get(0..16) else { break };
        if type_guid.iter().all(|&b| b == 0) {
            continue;
        }
        let Some(unique_guid) = entry.get(16..32).and_then(mixed_endian_guid) else {
            continue;
        };
        let (Some(first_lba), Some(last_lba)) = (u64le(entry, 32), u64le(entry, 40)) else {
            continue;
        };
        if last_lba < first_lba {
            continue;
        }

        let partition_type = mixed_endian_guid(type_guid).map(|g| g.as_str().to_string()).unwrap_or_default();
        let start = first_lba * SECTOR_SIZE;
        let size = (last_lba - first_lba + 1) * SECTOR_SIZE;
        let partition = Partition::new(i as u32 + 1, start, size, partition_type).with_uuid(unique_guid);
        emit_partition_entry_details(ctx, &partition, "gpt");
        ctx.partitions_mut().push_root(partition);
    }

    ProbeOutcome::Ok
}
