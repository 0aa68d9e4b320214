// Copyright (c) 2023 Nick Piaddo
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! DOS/MBR partition table: a 64-byte partition entry array ending in the `0x55 0xAA`
//! boot signature, with extended partitions (`0x05`/`0x0F`/`0x85`) chaining further
//! one-entry tables.
//!
//! A GPT protective MBR (a single `0xEE` entry spanning the whole disk) is reported as
//! `PTTYPE=PMBR` rather than `dos`, deferring to the GPT identifier for the real table.

// From dependency library

// From standard library

// From this library
use crate::chain::{IdinfoFlags, Idinfo, ProbeOutcome};
use crate::core::device::Usage;
use crate::core::partition::{OSType, PartitionTableType};
use crate::identify::support::{emit_partition_entry_details, u32le};
use crate::magic::{MagicDescriptor, MagicMatch};
use crate::partition::Partition;
use crate::probe::ProbeContext;
use crate::value::name;

const SECTOR_SIZE: u64 = 512;
const PARTITION_TABLE_OFFSET: usize = 446;
const PARTITION_ENTRY_SIZE: usize = 16;
const MAX_PARTITIONS: u32 = 4;
/// Bounds the extended-partition chain walk against a self-referential loop.
const MAX_EXTENDED_CHAIN: usize = 128;

pub static MAGICS: &[MagicDescriptor] = &[MagicDescriptor::fixed(&[0x55, 0xAA], 0, 510)];

pub static IDINFO: Idinfo = Idinfo {
    name: "dos",
    usage: Usage::Other,
    flags: IdinfoFlags::MAGIC,
    min_size: SECTOR_SIZE,
    probe,
    magics: MAGICS,
};

struct RawEntry {
    flags: u8,
    os_type: u8,
    start_lba: u32,
    sectors: u32,
}

fn read_entries(sector: &[u8]) -> Option<Vec<RawEntry>> {
    (0..MAX_PARTITIONS as usize)
        .map(|i| {
            let base = PARTITION_TABLE_OFFSET + i * PARTITION_ENTRY_SIZE;
            let entry = sector.get(base..base + PARTITION_ENTRY_SIZE)?;
            Some(RawEntry {
                flags: entry[0],
                os_type: entry[4],
                start_lba: u32le(entry, 8)?,
                sectors: u32le(entry, 12)?,
            })
        })
        .collect()
}

fn walk_extended(ctx: &mut ProbeContext<'_>, extended_base: u64, first_table_lba: u32, parent: usize) {
    let mut table_lba = first_table_lba;
    for _ in 0..MAX_EXTENDED_CHAIN {
        let offset = (extended_base + u64::from(table_lba)) * SECTOR_SIZE;
        let Some(sector) = ctx.read(offset, SECTOR_SIZE as usize).bytes() else {
            return;
        };
        if sector.get(510..512) != Some([0x55, 0xAA].as_slice()) {
            return;
        }
        let Some(entries) = read_entries(sector) else { return };

        let entry = &entries[0];
        if entry.os_type == 0 || entry.sectors == 0 {
            return;
        }
        let start = extended_base + u64::from(table_lba) + u64::from(entry.start_lba);
        let partition = Partition::new(0, start * SECTOR_SIZE, u64::from(entry.sectors) * SECTOR_SIZE, format!("{:#04x}", entry.os_type))
            .with_flags(u64::from(entry.flags));
        emit_partition_entry_details(ctx, &partition, "dos");
        ctx.partitions_mut().push_child(parent, partition);

        let link = &entries[1];
        if link.os_type == 0 || link.sectors == 0 {
            return;
        }
        if !OSType::try_from(link.os_type).map(OSType::is_extended).unwrap_or(false) {
            return;
        }
        table_lba = link.start_lba;
    }
}

fn probe(ctx: &mut ProbeContext<'_>, _magic: &MagicMatch) -> ProbeOutcome {
    let sector = match ctx.read(0, SECTOR_SIZE as usize).bytes() {
        Some(b) => b.to_vec(),
        None => return ProbeOutcome::None,
    };
    let Some(entries) = read_entries(&sector) else {
        return ProbeOutcome::None;
    };

    let used: Vec<&RawEntry> = entries.iter().filter(|e| e.os_type != 0).collect();
    if used.is_empty() {
        return ProbeOutcome::None;
    }

    if used.len() == 1 && used[0].os_type == u8::from(OSType::GPTProtective) && used[0].start_lba == 1 {
        ctx.emit_display(name::PTTYPE, PartitionTableType::ProtectiveMBR);
        return ProbeOutcome::Ok;
    }

    ctx.emit_display(name::PTTYPE, PartitionTableType::DOS);

    for (i, entry) in entries.iter().enumerate() {
        if entry.os_type == 0 || entry.sectors == 0 {
            continue;
        }
        let number = i as u32 + 1;
        let start = u64::from(entry.start_lba) * SECTOR_SIZE;
        let size = u64::from(entry.sectors) * SECTOR_SIZE;
        let partition_type = format!("{:#04x}", entry.os_type);
        let partition = Partition::new(number, start, size, partition_type).with_flags(u64::from(entry.flags));
        emit_partition_entry_details(ctx, &partition, "dos");
        let index = ctx.partitions_mut().push_root(partition);

        if OSType::try_from(entry.os_type).map(OSType::is_extended).unwrap_or(false) {
            walk_extended(ctx, u64::from(entry.start_lba), 0, index);
        }
    }

    ProbeOutcome::Ok
}

#[cfg(test)]
#[allow(unused_imports)]
mod tests {
    use super::*;
    use crate::buffer::BufferCache;
    use crate::chain::{ChainFlags, ChainKind};
    use crate::core::device::Window;
    use crate::hint::HintRegistry;
    use crate::partition::PartitionTable;
    use crate::value::ValueStore;
    use crate::wiper::Wiper;
    use pretty_assertions::assert_eq;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_entry(sector: &mut [u8], index: usize, flags: u8, os_type: u8, start_lba: u32, sectors: u32) {
        let base = PARTITION_TABLE_OFFSET + index * PARTITION_ENTRY_SIZE;
        sector[base] = flags;
        sector[base + 4] = os_type;
        sector[base + 8..base + 12].copy_from_slice(&start_lba.to_le_bytes());
        sector[base + 12..base + 16].copy_from_slice(&sectors.to_le_bytes());
    }

    fn mbr_image() -> Vec<u8> {
        let mut image = vec![0u8; 4 * 1024 * 1024];
        write_entry(&mut image[..512], 0, 0x80, 0x83, 2048, 204800);
        write_entry(&mut image[..512], 1, 0x00, 0x05, 206848, 409600);
        image[510] = 0x55;
        image[511] = 0xAA;

        let ext_table_offset = 206848 * SECTOR_SIZE as usize;
        write_entry(&mut image[ext_table_offset..ext_table_offset + 512], 0, 0x00, 0x83, 2048, 102400);
        image[ext_table_offset + 510] = 0x55;
        image[ext_table_offset + 511] = 0xAA;

        image
    }

    #[test]
    fn identifies_dos_table_and_walks_extended_chain() {
        let image = mbr_image();
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(&image).unwrap();
        let file = file.reopen().unwrap();

        let mut buffers = BufferCache::new();
        let mut values = ValueStore::new();
        let mut hints = HintRegistry::new();
        let mut wiper = Wiper::new();
        let mut partitions = PartitionTable::new();
        let window = Window::new(0, image.len() as u64);
        let mut ctx = ProbeContext::new(
            &file,
            window,
            512,
            None,
            crate::probe::DeviceFlags::empty(),
            &mut buffers,
            &mut values,
            &mut hints,
            &mut wiper,
            &mut partitions,
            ChainKind::Parts,
            ChainFlags::empty(),
            None,
        );

        let matched = MagicMatch {
            offset: 510,
            descriptor: &MAGICS[0],
        };
        assert!(matches!(probe(&mut ctx, &matched), ProbeOutcome::Ok));
        drop(ctx);
        assert_eq!(values.find(name::PTTYPE).unwrap().as_str(), "dos");
        assert_eq!(partitions.len(), 3);
    }

    #[test]
    fn single_protective_entry_is_reported_as_pmbr() {
        let mut image = vec![0u8; 4 * 1024 * 1024];
        let total_sectors = (image.len() / 512 - 1) as u32;
        write_entry(&mut image[..512], 0, 0x00, 0xEE, 1, total_sectors);
        image[510] = 0x55;
        image[511] = 0xAA;

        let mut file = NamedTempFile::new().unwrap();
        file.write_all(&image).unwrap();
        let file = file.reopen().unwrap();

        let mut buffers = BufferCache::new();
        let mut values = ValueStore::new();
        let mut hints = HintRegistry::new();
        let mut wiper = Wiper::new();
        let mut partitions = PartitionTable::new();
        let window = Window::new(0, image.len() as u64);
        let mut ctx = ProbeContext::new(
            &file,
            window,
            512,
            None,
            crate::probe::DeviceFlags::empty(),
            &mut buffers,
            &mut values,
            &mut hints,
            &mut wiper,
            &mut partitions,
            ChainKind::Parts,
            ChainFlags::empty(),
            None,
        );

        let matched = MagicMatch {
            offset: 510,
            descriptor: &MAGICS[0],
        };
        assert!(matches!(probe(&mut ctx, &matched), ProbeOutcome::Ok));
        assert_eq!(values.find(name::PTTYPE).unwrap().as_str(), "PMBR");
    }

    #[test]
    fn part_entry_details_are_withheld_without_the_chain_flag() {
        let image = mbr_image();
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(&image).unwrap();
        let file = file.reopen().unwrap();

        let mut buffers = BufferCache::new();
        let mut values = ValueStore::new();
        let mut hints = HintRegistry::new();
        let mut wiper = Wiper::new();
        let mut partitions = PartitionTable::new();
        let window = Window::new(0, image.len() as u64);
        let mut ctx = ProbeContext::new(
            &file,
            window,
            512,
            None,
            crate::probe::DeviceFlags::empty(),
            &mut buffers,
            &mut values,
            &mut hints,
            &mut wiper,
            &mut partitions,
            ChainKind::Parts,
            ChainFlags::empty(),
            None,
        );

        let matched = MagicMatch {
            offset: 510,
            descriptor: &MAGICS[0],
        };
        assert!(matches!(probe(&mut ctx, &matched), ProbeOutcome::Ok));
        assert!(values.find(name::PART_ENTRY_NUMBER).is_none());
    }

    #[test]
    fn part_entry_details_are_emitted_when_chain_flag_is_set() {
        let image = mbr_image();
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(&image).unwrap();
        let file = file.reopen().unwrap();

        let mut buffers = BufferCache::new();
        let mut values = ValueStore::new();
        let mut hints = HintRegistry::new();
        let mut wiper = Wiper::new();
        let mut partitions = PartitionTable::new();
        let window = Window::new(0, image.len() as u64);
        let mut ctx = ProbeContext::new(
            &file,
            window,
            512,
            None,
            crate::probe::DeviceFlags::empty(),
            &mut buffers,
            &mut values,
            &mut hints,
            &mut wiper,
            &mut partitions,
            ChainKind::Parts,
            ChainFlags::PART_ENTRY_DETAILS,
            None,
        );

        let matched = MagicMatch {
            offset: 510,
            descriptor: &MAGICS[0],
        };
        assert!(matches!(probe(&mut ctx, &matched), ProbeOutcome::Ok));
        assert_eq!(values.find(name::PART_ENTRY_NUMBER).unwrap().as_str(), "1");
        assert_eq!(values.find(name::PART_ENTRY_SCHEME).unwrap().as_str(), "dos");
        assert_eq!(values.find(name::PART_ENTRY_TYPE).unwrap().as_str(), "0x83");
    }
}
