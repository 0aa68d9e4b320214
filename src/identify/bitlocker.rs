// Copyright (c) 2023 Nick Piaddo
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! BitLocker: three historical signature variants sharing a single probe, since the
//! fields that matter for identification (GUID, sector size) sit at the same offsets in
//! each.

// From dependency library

// From standard library

// From this library
use crate::chain::{IdinfoFlags, Idinfo, ProbeOutcome};
use crate::core::device::{Usage, Uuid};
use crate::identify::support::u16le;
use crate::magic::{MagicDescriptor, MagicMatch};
use crate::probe::ProbeContext;
use crate::value::name;

const GUID_OFFSET: usize = 160;

pub static MAGICS: &[MagicDescriptor] = &[
    MagicDescriptor::fixed(b"-FVE-FS-", 0, 3),
    MagicDescriptor::fixed(b"MSWIN4.1", 0, 3),
    MagicDescriptor::fixed(b"NTFS    ", 0, 3),
];

pub static IDINFO: Idinfo = Idinfo {
    name: "BitLocker",
    usage: Usage::Crypto,
    flags: IdinfoFlags::MAGIC,
    min_size: 512,
    probe,
    magics: MAGICS,
};

fn probe(ctx: &mut ProbeContext<'_>, magic: &MagicMatch) -> ProbeOutcome {
    let sb_offset = magic.offset - 3;
    let sb = match ctx.read(sb_offset, 512).bytes() {
        Some(b) => b,
        None => return ProbeOutcome::None,
    };

    let Some(bytes_per_sector) = u16le(sb, 11) else {
        return ProbeOutcome::None;
    };
    // BitLocker overwrites the FAT/NTFS boot sector's signature fields with its own GUID
    // and a recovery-info offset; a plausible sector size confirms we are reading a real
    // boot sector rather than an unrelated match.
    if bytes_per_sector == 0 || bytes_per_sector % 512 != 0 {
        return ProbeOutcome::None;
    }

    let Some(guid_bytes) = sb.get(GUID_OFFSET..GUID_OFFSET + 16) else {
        return ProbeOutcome::None;
    };
    let all_zero = guid_bytes.iter().all(|&b| b == 0);
    if all_zero {
        return ProbeOutcome::None;
    }

    let mut raw = [0u8; 16];
    raw.copy_from_slice(guid_bytes);

    ctx.emit(name::TYPE, b"BitLocker".as_slice());
    ctx.emit_display(name::UUID, Uuid::from_bytes_16(&raw));
    ctx.emit_display(name::BLOCK_SIZE, bytes_per_sector);

    ProbeOutcome::Ok
}
