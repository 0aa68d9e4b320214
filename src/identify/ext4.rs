// Copyright (c) 2023 Nick Piaddo
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The ext2/ext3/ext4 family: one superblock layout, one probe, three `TYPE` outcomes
//! depending on the feature bitmaps.

// From dependency library

// From standard library

// From this library
use crate::chain::{IdinfoFlags, Idinfo, ProbeOutcome};
use crate::core::device::{Usage, Uuid};
use crate::identify::support::{u16le, u32le};
use crate::magic::{MagicDescriptor, MagicMatch};
use crate::probe::ProbeContext;
use crate::value::name;

const SUPERBLOCK_SIZE: usize = 1024;
const MAGIC_OFFSET: u16 = 0x38;
const FEATURE_COMPAT_HAS_JOURNAL: u32 = 0x0004;
const FEATURE_INCOMPAT_EXTENTS: u32 = 0x0040;
const FEATURE_INCOMPAT_64BIT: u32 = 0x0080;

pub static MAGICS: &[MagicDescriptor] = &[MagicDescriptor::fixed(&[0x53, 0xEF], 1, MAGIC_OFFSET)];

pub static IDINFO: Idinfo = Idinfo {
    name: "ext4",
    usage: Usage::FileSystem,
    flags: IdinfoFlags::MAGIC,
    min_size: SUPERBLOCK_SIZE as u64 * 2,
    probe,
    magics: MAGICS,
};

fn probe(ctx: &mut ProbeContext<'_>, magic: &MagicMatch) -> ProbeOutcome {
    let sb_offset = magic.offset - u64::from(MAGIC_OFFSET);
    let sb = match ctx.read(sb_offset, SUPERBLOCK_SIZE).bytes() {
        Some(b) => b.to_vec(),
        None => return ProbeOutcome::None,
    };

    let Some(log_block_size) = u32le(&sb, 24) else {
        return ProbeOutcome::None;
    };
    let Some(blocks_count) = u32le(&sb, 4) else {
        return ProbeOutcome::None;
    };
    let Some(feature_compat) = u32le(&sb, 92) else {
        return ProbeOutcome::None;
    };
    let Some(feature_incompat) = u32le(&sb, 96) else {
        return ProbeOutcome::None;
    };

    if log_block_size > 6 {
        // 1024 << 6 == 64 KiB, already implausibly large for a real filesystem block.
        return ProbeOutcome::None;
    }
    let block_size = 1024u64 << log_block_size;

    let is_ext4 = feature_incompat & (FEATURE_INCOMPAT_EXTENTS | FEATURE_INCOMPAT_64BIT) != 0;
    let is_ext3 = !is_ext4 && feature_compat & FEATURE_COMPAT_HAS_JOURNAL != 0;

    let type_name = if is_ext4 {
        "ext4"
    } else if is_ext3 {
        "ext3"
    } else {
        "ext2"
    };

    ctx.emit(name::TYPE, type_name.as_bytes());
    if is_ext3 {
        ctx.emit(name::SEC_TYPE, b"ext2".as_slice());
    }

    if let Some(uuid_bytes) = sb.get(104..120) {
        let mut raw = [0u8; 16];
        raw.copy_from_slice(uuid_bytes);
        ctx.emit_display(name::UUID, Uuid::from_bytes_16(&raw));
    }

    if let Some(label) = sb.get(120..136) {
        let end = label.iter().position(|&b| b == 0).unwrap_or(label.len());
        if end > 0 {
            if let Ok(text) = std::str::from_utf8(&label[..end]) {
                ctx.emit(name::LABEL, text.as_bytes());
            }
        }
    }

    ctx.emit_display(name::BLOCK_SIZE, ctx.sector_size());
    ctx.emit_display(name::FSBLOCKSIZE, block_size);
    ctx.emit_display(name::FSSIZE, u64::from(blocks_count) * block_size);

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

    fn ext4_image() -> Vec<u8> {
        let mut image = vec![0u8; 1024 * 1024];
        let sb = &mut image[1024..2048];
        sb[24..28].copy_from_slice(&2u32.to_le_bytes()); // 4 KiB blocks
        sb[4..8].copy_from_slice(&1000u32.to_le_bytes());
        sb[96..100].copy_from_slice(&FEATURE_INCOMPAT_EXTENTS.to_le_bytes());
        sb[56..58].copy_from_slice(&[0x53, 0xEF]);
        sb[104..120].copy_from_slice(&[0xAA; 16]);
        sb[120..125].copy_from_slice(b"MYFS\0");
        image
    }

    #[test]
    fn identifies_ext4_from_incompat_extents_feature() {
        let image = ext4_image();
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
            offset: 1024 + u64::from(MAGIC_OFFSET),
            descriptor: &MAGICS[0],
        };
        assert!(matches!(probe(&mut ctx, &matched), ProbeOutcome::Ok));
        assert_eq!(values.find(name::TYPE).unwrap().as_str(), "ext4");
        assert_eq!(values.find(name::LABEL).unwrap().as_str(), "MYFS");
    }
}
