// Copyright (c) 2023 Nick Piaddo
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! LVM2 physical volume label: one of the first four sectors carries `LABELONE` followed
//! by an embedded `LVM2 001` type identifier. A successful match also records that LVM2
//! owns the first 8 KiB of the device, so a stale partition-table signature left behind in
//! that range by a previous format is not reported alongside it.

// From dependency library

// From standard library

// From this library
use crate::chain::{IdinfoFlags, Idinfo, ProbeOutcome};
use crate::core::device::Usage;
use crate::magic::{MagicDescriptor, MagicMatch};
use crate::probe::ProbeContext;
use crate::value::name;

const SECTOR_SIZE: u64 = 512;
const LABEL_SCAN_SECTORS: u64 = 4;
const WIPE_SIZE: u64 = 8192;
const TYPE_OFFSET: usize = 24;
const PV_UUID_OFFSET: usize = 40;

pub static MAGICS: &[MagicDescriptor] = &[MagicDescriptor::fixed(b"LABELONE", 0, 0)];

pub static IDINFO: Idinfo = Idinfo {
    name: "LVM2_member",
    usage: Usage::Other,
    flags: IdinfoFlags::MAGIC,
    min_size: WIPE_SIZE,
    probe,
    magics: MAGICS,
};

fn probe(ctx: &mut ProbeContext<'_>, magic: &MagicMatch) -> ProbeOutcome {
    if magic.offset % SECTOR_SIZE != 0 || magic.offset / SECTOR_SIZE >= LABEL_SCAN_SECTORS {
        return ProbeOutcome::None;
    }

    let header = match ctx.read(magic.offset, SECTOR_SIZE as usize).bytes() {
        Some(b) => b.to_vec(),
        None => return ProbeOutcome::None,
    };

    let Some(type_field) = header.get(TYPE_OFFSET..TYPE_OFFSET + 8) else {
        return ProbeOutcome::None;
    };
    if type_field != b"LVM2 001" {
        return ProbeOutcome::None;
    }

    ctx.emit(name::TYPE, b"LVM2_member".as_slice());

    if let Some(pv_uuid) = header.get(PV_UUID_OFFSET..PV_UUID_OFFSET + 32) {
        if let Ok(text) = std::str::from_utf8(pv_uuid) {
            ctx.emit(name::UUID_SUB, text.as_bytes());
        }
    }

    ctx.record_wipe(0, WIPE_SIZE, IDINFO.name);

    ProbeOutcome::Ok
}
