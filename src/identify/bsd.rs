// Copyright (c) 2023 Nick Piaddo
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! BSD disklabel: a magic word 512 bytes into the slice it describes (past the boot
//! block), followed by a fixed-size partition array. Historically found
//! nested inside a DOS/MBR slice of type `0xa5`/`0xa6`, but identified here the same way
//! any other partition-table identifier is: by its own magic, independent of what sits
//! around it.

// From dependency library

// From standard library

// From this library
use crate::chain::{IdinfoFlags, Idinfo, ProbeOutcome};
use crate::core::device::Usage;
use crate::core::partition::PartitionTableType;
use crate::identify::support::{emit_partition_entry_details, u16le, u32le};
use crate::magic::{MagicDescriptor, MagicMatch};
use crate::partition::Partition;
use crate::probe::ProbeContext;
use crate::value::name;

const LABEL_OFFSET_IN_SLICE: u16 = 512;
const PARTITION_COUNT_OFFSET: usize = 138;
const PARTITION_ARRAY_OFFSET: usize = 148;
const PARTITION_ENTRY_SIZE: usize = 16;
const UNUSED_FSTYPE: u8 = 0;
/// Bounds the partition array walk against a corrupt, implausibly large count.
const MAX_PARTITIONS: u16 = 16;

pub static MAGICS: &[MagicDescriptor] = &[MagicDescriptor::fixed(&0x8256_4557u32.to_le_bytes(), 0, LABEL_OFFSET_IN_SLICE)];

pub static IDINFO: Idinfo = Idinfo {
    name: "bsd",
    usage: Usage::Other,
    flags: IdinfoFlags::MAGIC,
    min_size: LABEL_OFFSET_IN_SLICE as u64 + PARTITION_ARRAY_OFFSET as u64,
    probe,
    magics: MAGICS,
};

fn probe(ctx: &mut ProbeContext<'_>, magic: &MagicMatch) -> ProbeOutcome {
    let label_start = magic.offset;
    let label = match ctx.read(label_start, 512).bytes() {
        Some(b) => b.to_vec(),
        None => return ProbeOutcome::None,
    };

    let Some(partition_count) = u16le(&label, PARTITION_COUNT_OFFSET) else {
        return ProbeOutcome::None;
    };
    if partition_count == 0 || partition_count > MAX_PARTITIONS {
        return ProbeOutcome::None;
    }

    ctx.emit_display(name::PTTYPE, PartitionTableType::BSD);

    for i in 0..partition_count as usize {
        let base = PARTITION_ARRAY_OFFSET + i * PARTITION_ENTRY_SIZE;
        let Some(entry) = label.get(base..base + PARTITION_ENTRY_SIZE) else {
            break;
        };
        let (Some(size), Some(offset)) = (u32le(entry, 0), u32le(entry, 4)) else {
            continue;
        };
        let fstype = entry[8];
        if size == 0 || fstype == UNUSED_FSTYPE {
            continue;
        }
        let partition = Partition::new(i as u32, u64::from(offset) * 512, u64::from(size) * 512, fstype.to_string());
        emit_partition_entry_details(ctx, &partition, "bsd");
        ctx.partitions_mut().push_root(partition);
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

    fn bsd_image() -> Vec<u8> {
        let mut image = vec![0u8; 1024 * 1024];
        let label = &mut image[LABEL_OFFSET_IN_SLICE as usize..LABEL_OFFSET_IN_SLICE as usize + 512];
        label[0..4].copy_from_slice(&0x8256_4557u32.to_le_bytes());
        label[PARTITION_COUNT_OFFSET..PARTITION_COUNT_OFFSET + 2].copy_from_slice(&1u16.to_le_bytes());
        let entry_base = PARTITION_ARRAY_OFFSET;
        label[entry_base..entry_base + 4].copy_from_slice(&2048u32.to_le_bytes());
        label[entry_base + 4..entry_base + 8].copy_from_slice(&0u32.to_le_bytes());
        label[entry_base + 8] = 7; // UFS-like fstype
        image
    }

    #[test]
    fn identifies_bsd_disklabel_and_reads_one_partition() {
        let image = bsd_image();
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
            offset: u64::from(LABEL_OFFSET_IN_SLICE),
            descriptor: &MAGICS[0],
        };
        assert!(matches!(probe(&mut ctx, &matched), ProbeOutcome::Ok));
        drop(ctx);
        assert_eq!(values.find(name::PTTYPE).unwrap().as_str(), "bsd");
        assert!(values.find(name::PART_ENTRY_NUMBER).is_none());
        assert_eq!(partitions.len(), 1);
    }

    #[test]
    fn part_entry_details_are_emitted_when_chain_flag_is_set() {
        let image = bsd_image();
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
            offset: u64::from(LABEL_OFFSET_IN_SLICE),
            descriptor: &MAGICS[0],
        };
        assert!(matches!(probe(&mut ctx, &matched), ProbeOutcome::Ok));
        assert_eq!(values.find(name::PART_ENTRY_SCHEME).unwrap().as_str(), "bsd");
        assert_eq!(values.find(name::PART_ENTRY_TYPE).unwrap().as_str(), "7");
    }
}
