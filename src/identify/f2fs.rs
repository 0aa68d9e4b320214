// Copyright (c) 2023 Nick Piaddo
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! F2FS: little-endian, checksum-protected superblock. The checksum covers
//! `checksum_offset` bytes starting from the superblock's first byte, using a
//! CRC32-Castagnoli variant seeded with the superblock magic itself.
//!
//! A checksum mismatch is a no-match by default; with the chain's `BADCSUM` flag set it
//! becomes a soft-accept that also emits `SBBADCSUM=1`.

// From dependency library
use crc::{Algorithm, Crc};

// From standard library

// From this library
use crate::chain::{IdinfoFlags, Idinfo, ProbeOutcome};
use crate::core::device::{Usage, Uuid};
use crate::core::utils::encode::decode_utf16_le;
use crate::core::utils::misc::format_version;
use crate::identify::support::{u16le, u32le, u64le};
use crate::magic::{MagicDescriptor, MagicMatch};
use crate::probe::ProbeContext;
use crate::value::name;

const SUPERBLOCK_REGION: usize = 4096;
const F2FS_SUPER_MAGIC: u32 = 0xF2F5_2010;

const F2FS_CRC32C: Algorithm<u32> = Algorithm {
    width: 32,
    poly: 0x1edc_6f41,
    init: F2FS_SUPER_MAGIC,
    refin: true,
    refout: true,
    xorout: 0,
    check: 0,
    residue: 0,
};

pub static MAGICS: &[MagicDescriptor] = &[MagicDescriptor::fixed(&F2FS_SUPER_MAGIC.to_le_bytes(), 1, 0)];

pub static IDINFO: Idinfo = Idinfo {
    name: "f2fs",
    usage: Usage::FileSystem,
    flags: IdinfoFlags::BADCSUM.union(IdinfoFlags::MAGIC),
    min_size: SUPERBLOCK_REGION as u64 * 2,
    probe,
    magics: MAGICS,
};

fn probe(ctx: &mut ProbeContext<'_>, magic: &MagicMatch) -> ProbeOutcome {
    let sb_offset = magic.offset;
    let sb = match ctx.read(sb_offset, SUPERBLOCK_REGION).bytes() {
        Some(b) => b.to_vec(),
        None => return ProbeOutcome::None,
    };

    let Some(major_ver) = u16le(&sb, 4) else {
        return ProbeOutcome::None;
    };
    let Some(minor_ver) = u16le(&sb, 6) else {
        return ProbeOutcome::None;
    };
    let Some(log_sectorsize) = u32le(&sb, 8) else {
        return ProbeOutcome::None;
    };
    let Some(log_blocksize) = u32le(&sb, 16) else {
        return ProbeOutcome::None;
    };
    let Some(checksum_offset) = u32le(&sb, 32) else {
        return ProbeOutcome::None;
    };
    let Some(block_count) = u64le(&sb, 36) else {
        return ProbeOutcome::None;
    };

    if log_sectorsize > 12 || log_blocksize > 12 {
        return ProbeOutcome::None;
    }

    let checksum_offset = checksum_offset as usize;
    if checksum_offset == 0 || checksum_offset + 4 > SUPERBLOCK_REGION {
        return ProbeOutcome::None;
    }

    let crc = Crc::<u32>::new(&F2FS_CRC32C);
    let computed = crc.checksum(&sb[..checksum_offset]);
    let stored = u32le(&sb, checksum_offset).unwrap_or(0);

    if stored != computed {
        if !IDINFO.accepts_bad_checksum(ctx.chain_flags()) {
            return ProbeOutcome::None;
        }
        ctx.emit_display(name::SBBADCSUM, 1u32);
    }

    ctx.emit(name::TYPE, b"f2fs".as_slice());
    ctx.emit_display(name::VERSION, format_version(major_ver, minor_ver));

    if let Some(uuid_bytes) = sb.get(108..124) {
        let mut raw = [0u8; 16];
        raw.copy_from_slice(uuid_bytes);
        ctx.emit_display(name::UUID, Uuid::from_bytes_16(&raw));
    }

    if let Some(volume_name) = sb.get(124..124 + 1024) {
        if let Ok(label) = decode_utf16_le(volume_name) {
            if !label.is_empty() {
                ctx.emit(name::LABEL, label.as_bytes());
            }
        }
    }

    let sector_size = 1u64 << log_sectorsize;
    let block_size = 1u64 << log_blocksize;
    ctx.emit_display(name::BLOCK_SIZE, sector_size);
    ctx.emit_display(name::FSBLOCKSIZE, block_size);
    ctx.emit_display(name::FSSIZE, block_count * block_size);

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

    fn f2fs_image(checksum_offset: u32, corrupt_checksum: bool) -> Vec<u8> {
        let mut image = vec![0u8; 4 * 1024 * 1024];
        let sb_start = 1024;
        image[sb_start..sb_start + 4].copy_from_slice(&F2FS_SUPER_MAGIC.to_le_bytes());
        image[sb_start + 4..sb_start + 6].copy_from_slice(&1u16.to_le_bytes());
        image[sb_start + 6..sb_start + 8].copy_from_slice(&0u16.to_le_bytes());
        image[sb_start + 8..sb_start + 12].copy_from_slice(&9u32.to_le_bytes());
        image[sb_start + 16..sb_start + 20].copy_from_slice(&12u32.to_le_bytes());
        image[sb_start + 32..sb_start + 36].copy_from_slice(&checksum_offset.to_le_bytes());
        image[sb_start + 36..sb_start + 44].copy_from_slice(&1000u64.to_le_bytes());

        let crc = Crc::<u32>::new(&F2FS_CRC32C);
        let computed = crc.checksum(&image[sb_start..sb_start + checksum_offset as usize]);
        let stored = if corrupt_checksum { computed.wrapping_add(1) } else { computed };
        let off = sb_start + checksum_offset as usize;
        image[off..off + 4].copy_from_slice(&stored.to_le_bytes());

        image
    }

    #[test]
    fn identifies_f2fs_with_valid_checksum() {
        let image = f2fs_image(0x7C, false);
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
            offset: 1024,
            descriptor: &MAGICS[0],
        };
        assert!(matches!(probe(&mut ctx, &matched), ProbeOutcome::Ok));
        assert_eq!(values.find(name::TYPE).unwrap().as_str(), "f2fs");
        assert!(values.find(name::SBBADCSUM).is_none());
    }

    #[test]
    fn corrupt_checksum_is_no_match_by_default() {
        let image = f2fs_image(0x7C, true);
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
            offset: 1024,
            descriptor: &MAGICS[0],
        };
        assert!(matches!(probe(&mut ctx, &matched), ProbeOutcome::None));
    }

    #[test]
    fn corrupt_checksum_is_soft_accepted_with_sbbadcsum_when_chain_opts_in() {
        let image = f2fs_image(0x7C, true);
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
            ChainFlags::BADCSUM,
            None,
        );

        let matched = MagicMatch {
            offset: 1024,
            descriptor: &MAGICS[0],
        };
        assert!(matches!(probe(&mut ctx, &matched), ProbeOutcome::Ok));
        assert_eq!(values.find(name::SBBADCSUM).unwrap().as_str(), "1");
    }
}
