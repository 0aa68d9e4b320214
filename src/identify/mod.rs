// Copyright (c) 2023 Nick Piaddo
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The identifier catalog: one module per format, each exporting a `static IDINFO:
//! Idinfo` (and a `static MAGICS` table, for identifiers that locate a signature). The
//! [`chain::drivers`](crate::chain::drivers) module groups these into the three chain
//! tables.

// From dependency library

// From standard library

// From this library

mod bitlocker;
mod bsd;
mod crypto_luks;
mod dos;
mod exfat;
mod ext4;
mod f2fs;
mod gpt;
mod iso9660;
mod linux_raid_member;
mod lvm2_member;
mod support;
mod swap;
mod topology;
mod udf;
mod vfat;

/// Filesystem and RAID-member identifiers, in probe order.
pub(crate) static SUBLKS_IDINFOS: &[crate::chain::Idinfo] = &[
    ext4::IDINFO,
    vfat::IDINFO,
    exfat::IDINFO,
    f2fs::IDINFO,
    iso9660::IDINFO,
    udf::IDINFO,
    linux_raid_member::IDINFO,
    crypto_luks::IDINFO,
    bitlocker::IDINFO,
    swap::IDINFO,
    lvm2_member::IDINFO,
];

/// Partition-table identifiers, in probe order.
pub(crate) static PARTS_IDINFOS: &[crate::chain::Idinfo] = &[dos::IDINFO, gpt::IDINFO, bsd::IDINFO];

/// The topology chain's single always-enabled identifier.
pub(crate) static TOPLGY_IDINFOS: &[crate::chain::Idinfo] = &[topology::IDINFO];
