// Copyright (c) 2023 Nick Piaddo
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! ISO 9660: a sequence of 2048-byte volume descriptors starting at sector 16, terminated
//! by a type-255 descriptor. A Joliet Supplementary Volume Descriptor, when present,
//! carries a UTF-16BE label that takes priority over the Level 1 Primary Volume
//! Descriptor's ASCII one.

// From dependency library

// From standard library

// From this library
use crate::chain::{IdinfoFlags, Idinfo, ProbeOutcome};
use crate::core::device::Usage;
use crate::core::utils::encode::{decode_ascii_field, decode_utf16_be};
use crate::identify::support::{u16le, u32le};
use crate::magic::{MagicDescriptor, MagicMatch};
use crate::probe::ProbeContext;
use crate::value::name;

const SECTOR_SIZE: u64 = 2048;
const FIRST_DESCRIPTOR_SECTOR: u64 = 16;
/// Bounds the descriptor walk so a missing type-255 terminator cannot turn this probe
/// into an unbounded scan.
const MAX_VOLUME_DESCRIPTORS: u64 = 32;

const VOLUME_DESCRIPTOR_TERMINATOR: u8 = 255;
const PRIMARY_VOLUME_DESCRIPTOR: u8 = 1;
const SUPPLEMENTARY_VOLUME_DESCRIPTOR: u8 = 2;

const JOLIET_ESCAPE_SEQUENCES: [[u8; 3]; 3] = [[0x25, 0x2F, 0x40], [0x25, 0x2F, 0x43], [0x25, 0x2F, 0x45]];

pub static MAGICS: &[MagicDescriptor] = &[MagicDescriptor::fixed(b"CD001", FIRST_DESCRIPTOR_SECTOR * SECTOR_SIZE / 1024, 1)];

pub static IDINFO: Idinfo = Idinfo {
    name: "iso9660",
    usage: Usage::FileSystem,
    flags: IdinfoFlags::MAGIC,
    min_size: (FIRST_DESCRIPTOR_SECTOR + 1) * SECTOR_SIZE,
    probe,
    magics: MAGICS,
};

fn probe(ctx: &mut ProbeContext<'_>, _magic: &MagicMatch) -> ProbeOutcome {
    let mut primary_label = None;
    let mut joliet_label = None;
    let mut block_size = None;
    let mut volume_space_size = None;
    let mut found_pvd = false;

    for i in 0..MAX_VOLUME_DESCRIPTORS {
        let offset = (FIRST_DESCRIPTOR_SECTOR + i) * SECTOR_SIZE;
        let Some(sector) = ctx.read(offset, SECTOR_SIZE as usize).bytes() else {
            break;
        };
        if sector.get(1..6) != Some(b"CD001".as_slice()) {
            break;
        }
        let descriptor_type = sector[0];
        if descriptor_type == VOLUME_DESCRIPTOR_TERMINATOR {
            break;
        }

        if descriptor_type == PRIMARY_VOLUME_DESCRIPTOR && !found_pvd {
            found_pvd = true;
            if let Some(field) = sector.get(40..72) {
                if let Ok(text) = decode_ascii_field(field) {
                    if !text.is_empty() {
                        primary_label = Some(text);
                    }
                }
            }
            volume_space_size = u32le(sector, 80);
            block_size = u16le(sector, 128).map(u64::from);
        } else if descriptor_type == SUPPLEMENTARY_VOLUME_DESCRIPTOR {
            let is_joliet = sector
                .get(88..91)
                .map(|seq| JOLIET_ESCAPE_SEQUENCES.iter().any(|candidate| candidate == seq))
                .unwrap_or(false);
            if is_joliet {
                if let Some(field) = sector.get(40..72) {
                    if let Ok(text) = decode_utf16_be(field) {
                        if !text.is_empty() {
                            joliet_label = Some(text);
                        }
                    }
                }
            }
        }
    }

    if !found_pvd {
        return ProbeOutcome::None;
    }

    ctx.emit(name::TYPE, b"iso9660".as_slice());
    if joliet_label.is_some() {
        ctx.emit(name::VERSION, b"Joliet Extension".as_slice());
    }
    if let Some(label) = joliet_label.or(primary_label) {
        ctx.emit(name::LABEL, label.as_bytes());
    }

    let fsblocksize = block_size.unwrap_or(SECTOR_SIZE);
    ctx.emit_display(name::BLOCK_SIZE, ctx.sector_size());
    ctx.emit_display(name::FSBLOCKSIZE, fsblocksize);
    if let Some(volume_space_size) = volume_space_size {
        ctx.emit_display(name::FSSIZE, u64::from(volume_space_size) * fsblocksize);
    }

    ProbeOutcome::Ok
}
