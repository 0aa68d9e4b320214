// Copyright (c) 2023 Nick Piaddo
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Linux software RAID (mdadm metadata 1.0): the superblock sits near the end of the
//! component device rather than at a fixed head offset, so this identifier carries no
//! magic table and locates its own trailer instead.
//!
//! Tagged `TOLERANT`: a RAID member also carries whatever filesystem signature its
//! contents happen to have, and that coexistence must not read as ambivalence.

// From dependency library

// From standard library

// From this library
use crate::chain::{IdinfoFlags, Idinfo, ProbeOutcome};
use crate::core::device::{Usage, Uuid};
use crate::identify::support::u32le;
use crate::magic::MagicMatch;
use crate::probe::ProbeContext;
use crate::value::name;

const SUPERBLOCK_MAGIC: u32 = 0xa92b_4efc;
const TRAILER_RESERVE: u64 = 8 * 1024;
const TRAILER_ALIGN: u64 = 4 * 1024;
const SUPERBLOCK_SCAN_SIZE: usize = 256;

pub static IDINFO: Idinfo = Idinfo {
    name: "linux_raid_member",
    usage: Usage::Raid,
    flags: IdinfoFlags::TOLERANT,
    min_size: TRAILER_RESERVE + TRAILER_ALIGN,
    probe,
    magics: &[],
};

fn probe(ctx: &mut ProbeContext<'_>, _magic: &MagicMatch) -> ProbeOutcome {
    let size = ctx.window().size;
    if size < TRAILER_RESERVE {
        return ProbeOutcome::None;
    }
    let candidate = (size - TRAILER_RESERVE) & !(TRAILER_ALIGN - 1);

    let Some(sb) = ctx.read(candidate, SUPERBLOCK_SCAN_SIZE).bytes().map(|b| b.to_vec()) else {
        return ProbeOutcome::None;
    };
    if u32le(&sb, 0) != Some(SUPERBLOCK_MAGIC) {
        return ProbeOutcome::None;
    }
    let Some(major_version) = u32le(&sb, 4) else {
        return ProbeOutcome::None;
    };
    let Some(level) = u32le(&sb, 72).map(|v| v as i32) else {
        return ProbeOutcome::None;
    };

    ctx.emit(name::TYPE, b"linux_raid_member".as_slice());
    ctx.emit_display(name::VERSION, format!("{major_version}.0"));

    if let Some(set_uuid) = sb.get(16..32) {
        let mut raw = [0u8; 16];
        raw.copy_from_slice(set_uuid);
        ctx.emit_display(name::UUID, Uuid::from_bytes_16(&raw));
    }
    if let Some(set_name) = sb.get(32..64) {
        let end = set_name.iter().position(|&b| b == 0).unwrap_or(set_name.len());
        if end > 0 {
            if let Ok(text) = std::str::from_utf8(&set_name[..end]) {
                ctx.emit(name::LABEL, text.as_bytes());
            }
        }
    }

    let _ = level;
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

    fn raid_image() -> Vec<u8> {
        let size = 1024 * 1024;
        let mut image = vec![0u8; size];
        let candidate = ((size as u64 - TRAILER_RESERVE) & !(TRAILER_ALIGN - 1)) as usize;
        image[candidate..candidate + 4].copy_from_slice(&SUPERBLOCK_MAGIC.to_le_bytes());
        image[candidate + 4..candidate + 8].copy_from_slice(&1u32.to_le_bytes());
        image[candidate + 16..candidate + 32].copy_from_slice(&[0xBB; 16]);
        image[candidate + 32..candidate + 37].copy_from_slice(b"myset");
        image[candidate + 72..candidate + 76].copy_from_slice(&1i32.to_le_bytes());
        image
    }

    #[test]
    fn identifies_raid_member_from_trailer_superblock() {
        let image = raid_image();
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

        static SENTINEL: crate::magic::MagicDescriptor = crate::magic::MagicDescriptor::fixed(b"x", 0, 0);
        let sentinel = MagicMatch {
            offset: 0,
            descriptor: &SENTINEL,
        };
        assert!(matches!(probe(&mut ctx, &sentinel), ProbeOutcome::Ok));
        assert_eq!(values.find(name::TYPE).unwrap().as_str(), "linux_raid_member");
        assert_eq!(values.find(name::LABEL).unwrap().as_str(), "myset");
        assert!(IDINFO.is_tolerant());
    }
}
