// Copyright (c) 2023 Nick Piaddo
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Linux swap: one of two signatures (`SWAPSPACE2`, or the legacy `SWAP-SPACE`) in the
//! last 10 bytes of the swap header page. The page size varies by architecture, so the
//! magic table carries one entry per known page size.

// From dependency library

// From standard library

// From this library
use crate::chain::{IdinfoFlags, Idinfo, ProbeOutcome};
use crate::core::device::{Usage, Uuid};
use crate::magic::{LocateOutcome, MagicDescriptor, MagicLocation, MagicMatch};
use crate::probe::ProbeContext;
use crate::value::name;

const SIGNATURE_LEN: u64 = 10;
const MAX_PAGE_SIZE: u64 = 64 * 1024;
const UUID_OFFSET: usize = 1036;
const LABEL_OFFSET: usize = 1052;
const LABEL_LEN: usize = 16;

/// `kboff = page_kb - 1`, `sboff = 1024 - SIGNATURE_LEN`: the magic always lands 10 bytes
/// before the end of the page, which for every supported page size falls in the last
/// kilobyte of that page.
fn magic_table() -> &'static [MagicDescriptor] {
    static MAGICS: &[MagicDescriptor] = &[
        MagicDescriptor::fixed(b"SWAPSPACE2", 3, 1014),
        MagicDescriptor::fixed(b"SWAPSPACE2", 7, 1014),
        MagicDescriptor::fixed(b"SWAPSPACE2", 15, 1014),
        MagicDescriptor::fixed(b"SWAPSPACE2", 63, 1014),
        MagicDescriptor::fixed(b"SWAP-SPACE", 3, 1014),
    ];
    MAGICS
}

pub static IDINFO: Idinfo = Idinfo {
    name: "swap",
    usage: Usage::Other,
    flags: IdinfoFlags::empty(),
    min_size: MAX_PAGE_SIZE,
    probe,
    magics: &[],
};

fn page_size(descriptor: &MagicDescriptor) -> u64 {
    match descriptor.location {
        MagicLocation::Fixed { kboff } => (kboff + 1) * 1024,
        MagicLocation::Zoned { .. } => 4096,
    }
}

fn probe(ctx: &mut ProbeContext<'_>, _magic: &MagicMatch) -> ProbeOutcome {
    let matched = match ctx.locate(magic_table()) {
        LocateOutcome::Found(m) => m,
        _ => return ProbeOutcome::None,
    };

    let page_size = page_size(matched.descriptor);
    let page_start = matched.offset - (page_size - SIGNATURE_LEN);
    let is_legacy = matched.descriptor.bytes == b"SWAP-SPACE";

    ctx.emit(name::TYPE, b"swap".as_slice());

    if !is_legacy {
        if let Some(header) = ctx.read(page_start, page_size as usize).bytes().map(|b| b.to_vec()) {
            if let Some(uuid_bytes) = header.get(UUID_OFFSET..UUID_OFFSET + 16) {
                let mut raw = [0u8; 16];
                raw.copy_from_slice(uuid_bytes);
                if raw != [0u8; 16] {
                    ctx.emit_display(name::UUID, Uuid::from_bytes_16(&raw));
                }
            }
            if let Some(label_bytes) = header.get(LABEL_OFFSET..LABEL_OFFSET + LABEL_LEN) {
                let end = label_bytes.iter().position(|&b| b == 0).unwrap_or(label_bytes.len());
                if end > 0 {
                    if let Ok(text) = std::str::from_utf8(&label_bytes[..end]) {
                        ctx.emit(name::LABEL, text.as_bytes());
                    }
                }
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

    fn swap_image() -> Vec<u8> {
        let mut image = vec![0u8; 2 * 1024 * 1024];
        let sig_offset = 4096 - SIGNATURE_LEN as usize;
        image[sig_offset..sig_offset + 10].copy_from_slice(b"SWAPSPACE2");
        image[UUID_OFFSET..UUID_OFFSET + 16].copy_from_slice(&[0x11; 16]);
        image[LABEL_OFFSET..LABEL_OFFSET + 7].copy_from_slice(b"myswap\0");
        image
    }

    #[test]
    fn identifies_swap_and_reads_uuid_label() {
        let image = swap_image();
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

        let sentinel = MagicMatch {
            offset: 0,
            descriptor: &magic_table()[0],
        };
        assert!(matches!(probe(&mut ctx, &sentinel), ProbeOutcome::Ok));
        assert_eq!(values.find(name::TYPE).unwrap().as_str(), "swap");
        assert_eq!(values.find(name::LABEL).unwrap().as_str(), "myswap");
    }
}
