// Copyright (c) 2023 Nick Piaddo
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! exFAT: little-endian throughout, an 11-sector boot checksum repeated verbatim across
//! sector 11, and a volume label stored as a directory entry in the root directory rather
//! than in the boot sector itself.

// From dependency library

// From standard library

// From this library
use crate::chain::{IdinfoFlags, Idinfo, ProbeOutcome};
use crate::core::device::Usage;
use crate::core::utils::encode::decode_utf16_le;
use crate::identify::support::{u32le, u64le};
use crate::magic::{MagicDescriptor, MagicMatch};
use crate::probe::ProbeContext;
use crate::value::name;

const BOOT_SECTOR_SIZE: usize = 512;
const CHECKSUM_SECTORS: u64 = 11;
const EXFAT_ENTRY_SIZE: usize = 32;
/// Bounds the root-directory scan for a label entry so a corrupt `ClusterHeapOffset` or
/// `SectorsPerClusterShift` cannot turn this probe into an unbounded read.
const EXFAT_MAX_DIR_ENTRIES: usize = 512;

pub static MAGICS: &[MagicDescriptor] = &[MagicDescriptor::fixed(b"EXFAT   ", 0, 3)];

pub static IDINFO: Idinfo = Idinfo {
    name: "exfat",
    usage: Usage::FileSystem,
    flags: IdinfoFlags::BADCSUM.union(IdinfoFlags::MAGIC),
    min_size: (CHECKSUM_SECTORS + 1) * BOOT_SECTOR_SIZE as u64,
    probe,
    magics: MAGICS,
};

fn boot_checksum(bytes: &[u8]) -> u32 {
    let mut checksum: u32 = 0;
    for (index, &byte) in bytes.iter().enumerate() {
        if index == 106 || index == 107 || index == 112 {
            continue;
        }
        checksum = checksum.rotate_right(1).wrapping_add(u32::from(byte));
    }
    checksum
}

fn find_label(ctx: &mut ProbeContext<'_>, root_dir_offset: u64, cluster_size: u64) -> Option<String> {
    let scan_len = cluster_size.min((EXFAT_MAX_DIR_ENTRIES * EXFAT_ENTRY_SIZE) as u64) as usize;
    let entries = ctx.read(root_dir_offset, scan_len).bytes()?;

    for chunk in entries.chunks(EXFAT_ENTRY_SIZE) {
        if chunk.len() < EXFAT_ENTRY_SIZE || chunk[0] == 0x00 {
            break;
        }
        if chunk[0] == 0x83 {
            let char_count = usize::from(chunk[1]);
            if char_count == 0 || char_count > 15 {
                return None;
            }
            return decode_utf16_le(&chunk[2..2 + char_count * 2]).ok();
        }
    }
    None
}

fn probe(ctx: &mut ProbeContext<'_>, _magic: &MagicMatch) -> ProbeOutcome {
    let region_len = ((CHECKSUM_SECTORS + 1) * BOOT_SECTOR_SIZE as u64) as usize;
    let region = match ctx.read(0, region_len).bytes() {
        Some(b) => b.to_vec(),
        None => return ProbeOutcome::None,
    };
    let (boot_sectors, checksum_sector) = region.split_at(region_len - BOOT_SECTOR_SIZE);

    let computed = boot_checksum(boot_sectors);
    let stored = u32le(checksum_sector, 0).unwrap_or(0);

    if stored != computed {
        if !IDINFO.accepts_bad_checksum(ctx.chain_flags()) {
            return ProbeOutcome::None;
        }
        ctx.emit_display(name::SBBADCSUM, 1u32);
    }

    let sb = boot_sectors;
    let (Some(volume_length), Some(cluster_heap_offset), Some(first_cluster), Some(serial), Some(revision)) = (
        u64le(sb, 72),
        u32le(sb, 88),
        u32le(sb, 96),
        u32le(sb, 100),
        sb.get(104..106),
    ) else {
        return ProbeOutcome::None;
    };
    let Some(sector_shift) = sb.get(108).copied() else {
        return ProbeOutcome::None;
    };
    let Some(cluster_shift) = sb.get(109).copied() else {
        return ProbeOutcome::None;
    };
    if sector_shift == 0 || sector_shift > 12 || cluster_shift > 25 {
        return ProbeOutcome::None;
    }

    let sector_size = 1u64 << sector_shift;
    let cluster_size = sector_size << cluster_shift;

    ctx.emit(name::TYPE, b"exfat".as_slice());
    ctx.emit_display(name::UUID, format!("{:04X}-{:04X}", serial >> 16, serial & 0xFFFF));
    ctx.emit_display(name::VERSION, format!("{}.{:02}", revision[1], revision[0]));
    ctx.emit_display(name::BLOCK_SIZE, sector_size);
    ctx.emit_display(name::FSBLOCKSIZE, sector_size);
    ctx.emit_display(name::FSSIZE, volume_length * sector_size);

    if first_cluster >= 2 {
        let root_dir_offset = cluster_heap_offset as u64 * sector_size + u64::from(first_cluster - 2) * cluster_size;
        if let Some(label) = find_label(ctx, root_dir_offset, cluster_size) {
            if !label.is_empty() {
                ctx.emit(name::LABEL, label.as_bytes());
            }
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

    fn exfat_image() -> Vec<u8> {
        let mut image = vec![0u8; 16 * 1024 * 1024];
        image[0..3].copy_from_slice(&[0xEB, 0x76, 0x90]);
        image[3..11].copy_from_slice(b"EXFAT   ");
        image[72..80].copy_from_slice(&(32768u64).to_le_bytes()); // VolumeLength (sectors)
        image[88..92].copy_from_slice(&64u32.to_le_bytes()); // ClusterHeapOffset (sectors)
        image[96..100].copy_from_slice(&2u32.to_le_bytes()); // FirstClusterOfRootDirectory
        image[100..104].copy_from_slice(&0x1234_5678u32.to_le_bytes()); // VolumeSerialNumber
        image[104] = 0x00; // minor
        image[105] = 0x01; // major
        image[108] = 9; // 512-byte sectors
        image[109] = 3; // 8 sectors per cluster -> 4096-byte clusters

        let checksum = boot_checksum(&image[0..11 * 512]);
        for chunk in image[11 * 512..12 * 512].chunks_mut(4) {
            chunk.copy_from_slice(&checksum.to_le_bytes());
        }

        let root_dir_offset = 64 * 512;
        image[root_dir_offset] = 0x83;
        image[root_dir_offset + 1] = 5;
        let label_utf16: Vec<u8> = "MYVOL".encode_utf16().flat_map(|c| c.to_le_bytes()).collect();
        image[root_dir_offset + 2..root_dir_offset + 2 + label_utf16.len()].copy_from_slice(&label_utf16);

        image
    }

    #[test]
    fn identifies_exfat_and_reads_root_directory_label() {
        let image = exfat_image();
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
            ChainKind::Sublks,
            ChainFlags::empty(),
            None,
        );

        let matched = MagicMatch {
            offset: 3,
            descriptor: &MAGICS[0],
        };
        assert!(matches!(probe(&mut ctx, &matched), ProbeOutcome::Ok));
        assert_eq!(values.find(name::TYPE).unwrap().as_str(), "exfat");
        assert_eq!(values.find(name::LABEL).unwrap().as_str(), "MYVOL");
        assert_eq!(values.find(name::UUID).unwrap().as_str(), "1234-5678");
        assert_eq!(values.find(name::VERSION).unwrap().as_str(), "1.00");
        assert_eq!(values.find(name::FSSIZE).unwrap().as_str(), "16777216");
    }
}
