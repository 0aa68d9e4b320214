// Copyright (c) 2023 Nick Piaddo
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! LUKS: a big-endian header, `LUKS\xba\xbe` followed by a version field that
//! distinguishes LUKS1 (fixed on-disk layout) from LUKS2 (JSON metadata area, UUID still
//! at the same fixed offset).

// From dependency library

// From standard library

// From this library
use crate::chain::{IdinfoFlags, Idinfo, ProbeOutcome};
use crate::core::device::Usage;
use crate::identify::support::u16be;
use crate::magic::{MagicDescriptor, MagicMatch};
use crate::probe::ProbeContext;
use crate::value::name;

const UUID_OFFSET: usize = 168;
const UUID_FIELD_LEN: usize = 40;

pub static MAGICS: &[MagicDescriptor] = &[MagicDescriptor::fixed(b"LUKS\xba\xbe", 0, 0)];

pub static IDINFO: Idinfo = Idinfo {
    name: "crypto_LUKS",
    usage: Usage::Crypto,
    flags: IdinfoFlags::MAGIC,
    min_size: 1024,
    probe,
    magics: MAGICS,
};

fn probe(ctx: &mut ProbeContext<'_>, magic: &MagicMatch) -> ProbeOutcome {
    let header = match ctx.read(magic.offset, 512).bytes() {
        Some(b) => b.to_vec(),
        None => return ProbeOutcome::None,
    };

    let Some(version) = u16be(&header, 6) else {
        return ProbeOutcome::None;
    };
    if version != 1 && version != 2 {
        return ProbeOutcome::None;
    }

    let Some(uuid_field) = header.get(UUID_OFFSET..UUID_OFFSET + UUID_FIELD_LEN) else {
        return ProbeOutcome::None;
    };
    let end = uuid_field.iter().position(|&b| b == 0).unwrap_or(uuid_field.len());
    let Ok(uuid) = std::str::from_utf8(&uuid_field[..end]) else {
        return ProbeOutcome::None;
    };
    let uuid = uuid.to_string();

    ctx.emit(name::TYPE, b"crypto_LUKS".as_slice());
    ctx.emit_display(name::VERSION, version);
    if !uuid.is_empty() {
        ctx.emit(name::UUID, uuid.as_bytes());
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

    fn luks2_image() -> Vec<u8> {
        let mut image = vec![0u8; 16 * 1024];
        image[0..6].copy_from_slice(b"LUKS\xba\xbe");
        image[6..8].copy_from_slice(&2u16.to_be_bytes());
        let uuid = b"12345678-1234-1234-1234-123456789abc";
        image[UUID_OFFSET..UUID_OFFSET + uuid.len()].copy_from_slice(uuid);
        image
    }

    #[test]
    fn identifies_luks2_header_and_uuid() {
        let image = luks2_image();
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
            offset: 0,
            descriptor: &MAGICS[0],
        };
        assert!(matches!(probe(&mut ctx, &matched), ProbeOutcome::Ok));
        assert_eq!(values.find(name::TYPE).unwrap().as_str(), "crypto_LUKS");
        assert_eq!(values.find(name::VERSION).unwrap().as_str(), "2");
        assert_eq!(values.find(name::UUID).unwrap().as_str(), "12345678-1234-1234-1234-123456789abc");
    }
}
