// Copyright (c) 2023 Nick Piaddo
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! UDF: a Volume Recognition Sequence identifies the format, then an Anchor Volume
//! Descriptor Pointer at logical block 256 locates the Main Volume Descriptor Sequence,
//! which holds the Primary Volume Descriptor's `dstring` fields.
//!
//! `UUID` is derived from the trailing 16 hex characters `mkudffs` writes into the
//! Volume Set Identifier — UDF carries no separate binary UUID field, so this mirrors the
//! convention real UDF tooling already uses to make volumes distinguishable.

// From dependency library

// From standard library

// From this library
use crate::chain::{IdinfoFlags, Idinfo, ProbeOutcome};
use crate::core::device::Usage;
use crate::core::utils::encode::decode_utf16_be;
use crate::identify::support::{u16le, u32le};
use crate::magic::{MagicDescriptor, MagicMatch};
use crate::probe::ProbeContext;
use crate::value::name;

const VRS_SECTOR: u64 = 17;
const ANCHOR_BLOCK: u64 = 256;
const TAG_PRIMARY_VOLUME_DESCRIPTOR: u16 = 1;
const TAG_TERMINATING_DESCRIPTOR: u16 = 8;
/// Bounds the Main Volume Descriptor Sequence walk.
const MAX_VOLUME_DESCRIPTORS: u32 = 16;

pub static MAGICS: &[MagicDescriptor] = &[
    MagicDescriptor::fixed(b"NSR02", VRS_SECTOR * 2048 / 1024, 1),
    MagicDescriptor::fixed(b"NSR03", VRS_SECTOR * 2048 / 1024, 1),
];

pub static IDINFO: Idinfo = Idinfo {
    name: "udf",
    usage: Usage::FileSystem,
    flags: IdinfoFlags::MAGIC,
    min_size: (ANCHOR_BLOCK + 1) * 2048,
    probe,
    magics: MAGICS,
};

fn decode_dstring(field: &[u8]) -> Option<String> {
    let (&compression_id, content) = field.split_first()?;
    let text = match compression_id {
        8 => {
            let end = content.iter().position(|&b| b == 0).unwrap_or(content.len());
            std::str::from_utf8(&content[..end]).ok()?.to_string()
        }
        16 => {
            let even_len = content.len() - (content.len() % 2);
            decode_utf16_be(&content[..even_len]).ok()?
        }
        _ => return None,
    };
    let trimmed = text.trim_end_matches(['\0', ' ']).to_string();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed)
    }
}

fn derive_uuid(volume_set_id: &str) -> Option<String> {
    let tail = volume_set_id.get(volume_set_id.len().checked_sub(16)?..)?;
    if tail.len() == 16 && tail.bytes().all(|b| b.is_ascii_hexdigit()) {
        Some(tail.to_ascii_lowercase())
    } else {
        None
    }
}

fn probe(ctx: &mut ProbeContext<'_>, _magic: &MagicMatch) -> ProbeOutcome {
    let block_size = 2048u64;
    let anchor_offset = ANCHOR_BLOCK * block_size;
    let Some(anchor) = ctx.read(anchor_offset, 32).bytes() else {
        return ProbeOutcome::None;
    };
    if u16le(anchor, 0) != Some(2) {
        // Not an Anchor Volume Descriptor Pointer tag: no usable UDF structure.
        return ProbeOutcome::None;
    }
    let Some(sequence_location) = u32le(anchor, 20) else {
        return ProbeOutcome::None;
    };

    let mut volume_identifier = None;
    let mut volume_set_identifier = None;

    for i in 0..MAX_VOLUME_DESCRIPTORS {
        let offset = (u64::from(sequence_location) + u64::from(i)) * block_size;
        let Some(descriptor) = ctx.read(offset, block_size as usize).bytes() else {
            break;
        };
        let Some(tag) = u16le(descriptor, 0) else { break };
        if tag == TAG_TERMINATING_DESCRIPTOR || tag == 0 {
            break;
        }
        if tag == TAG_PRIMARY_VOLUME_DESCRIPTOR {
            if let Some(field) = descriptor.get(24..24 + 32) {
                volume_identifier = decode_dstring(field);
            }
            if let Some(field) = descriptor.get(72..72 + 128) {
                volume_set_identifier = decode_dstring(field);
            }
            break;
        }
    }

    ctx.emit(name::TYPE, b"udf".as_slice());
    if let Some(label) = volume_identifier {
        ctx.emit(name::LABEL, label.as_bytes());
    }
    if let Some(volume_set_id) = &volume_set_identifier {
        if let Some(uuid) = derive_uuid(volume_set_id) {
            ctx.emit(name::UUID, uuid.as_bytes());
        }
    }
    ctx.emit_display(name::BLOCK_SIZE, ctx.sector_size());
    ctx.emit_display(name::FSBLOCKSIZE, block_size);

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

    fn udf_image() -> Vec<u8> {
        let mut image = vec![0u8; 260 * 2048];

        let vrs = &mut image[VRS_SECTOR as usize * 2048..VRS_SECTOR as usize * 2048 + 2048];
        vrs[0] = 0;
        vrs[1..6].copy_from_slice(b"NSR02");
        vrs[6] = 1;

        let avdp_offset = ANCHOR_BLOCK as usize * 2048;
        image[avdp_offset..avdp_offset + 2].copy_from_slice(&2u16.to_le_bytes());
        image[avdp_offset + 20..avdp_offset + 24].copy_from_slice(&100u32.to_le_bytes());

        let pvd_offset = 100 * 2048;
        image[pvd_offset..pvd_offset + 2].copy_from_slice(&TAG_PRIMARY_VOLUME_DESCRIPTOR.to_le_bytes());
        image[pvd_offset + 24] = 8; // Latin-1 compression
        image[pvd_offset + 25..pvd_offset + 25 + 6].copy_from_slice(b"MYDISK");
        image[pvd_offset + 72] = 8;
        image[pvd_offset + 73..pvd_offset + 73 + 16].copy_from_slice(b"deadbeefcafef00d");

        image
    }

    #[test]
    fn identifies_udf_and_derives_uuid_from_volume_set_identifier() {
        let image = udf_image();
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
            2048,
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
            offset: VRS_SECTOR * 2048 + 1,
            descriptor: &MAGICS[0],
        };
        assert!(matches!(probe(&mut ctx, &matched), ProbeOutcome::Ok));
        assert_eq!(values.find(name::TYPE).unwrap().as_str(), "udf");
        assert_eq!(values.find(name::LABEL).unwrap().as_str(), "MYDISK");
        assert_eq!(values.find(name::UUID).unwrap().as_str(), "deadbeefcafef00d");
    }
}
