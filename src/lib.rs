// Copyright (c) 2023 Nick Piaddo
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! # Table of Contents
//! 1. [Description](#description)
//! 2. [API structure](#api-structure)
//! 3. [Supported identifiers](#supported-identifiers)
//!
//! ## Description
//!
//! `blkid-core` is a pure-Rust block device identification engine: given a raw device or
//! disk image, it identifies the filesystem, RAID member, crypto container, or partition
//! table it holds, and extracts properties such as `LABEL`, `UUID`, and `TYPE`.
//!
//! It is a from-scratch reimplementation of `libblkid`'s probing engine — the low-level
//! half of the library, not the high-level tag cache. A [`Probe`](crate::probe::Probe) is
//! bound directly to a device or file; there is no on-disk cache of previously seen
//! devices to keep in sync.
//!
//! ## API structure
//!
//! - [`probe`] — [`Probe`](crate::probe::Probe)/[`ProbeBuilder`](crate::probe::ProbeBuilder),
//!   the controller that binds a device, holds its scanning window, and drives the three
//!   chains below.
//! - [`chain`] — the superblocks/topology/partitions dispatch engine: [`Chain`](crate::chain::Chain),
//!   [`ChainDriver`](crate::chain::ChainDriver), [`Idinfo`](crate::chain::Idinfo), and the
//!   step/safe/full-probe algorithms in [`chain::dispatch`].
//! - [`identify`] — the identifier catalog itself, one module per format.
//! - [`magic`] — locates an identifier's byte signature within a probing window.
//! - [`buffer`], [`value`], [`hint`], [`wiper`], [`partition`] — the state a `Probe`
//!   threads through a pass: cached reads, `NAME=value` results, named hints, wiped-range
//!   tracking, and the partition tree.
//! - [`core`] — device/partition value types ([`Uuid`](crate::core::device::Uuid),
//!   [`Window`](crate::core::device::Window), [`FileSystem`](crate::core::partition::FileSystem), ...),
//!   parsing/encoding errors, and [`Config`](crate::core::config::Config).
//! - [`debug`] — `LIBBLKID_DEBUG`-compatible log level control.
//!
//! ## Supported identifiers
//!
//! Filesystems and RAID/crypto members: ext2/ext3/ext4, vfat, exfat, f2fs, iso9660, udf,
//! swap, LVM2_member, linux_raid_member, crypto_LUKS, BitLocker. Partition tables: dos
//! (MBR, including extended partitions), gpt (with protective-MBR detection), bsd
//! (disklabel). Topology: sector size.
//!
//! ```no_run
//! use blkid_core::probe::Probe;
//!
//! fn main() -> blkid_core::Result<()> {
//!     let probe = Probe::builder()
//!         .scan_file(std::fs::File::open("/dev/null")?)
//!         .build()?;
//!     let _ = probe;
//!     Ok(())
//! }
//! ```

// From dependency library

// From standard library

// From this library
pub use error::{BlkidCoreError, Result};

pub mod buffer;
pub mod chain;
pub mod core;
pub mod debug;
mod error;
pub mod hint;
pub mod identify;
pub mod magic;
pub mod partition;
pub mod probe;
pub mod value;
pub mod wiper;
