// Copyright (c) 2023 Nick Piaddo
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! OS queries `Probe::bind_device` needs and that have no portable `std` equivalent:
//! device classification, block device size/sector size, and CD-ROM/multisession
//! detection.

// From dependency library

// From standard library
use std::fs::File;
use std::io;
#[cfg(unix)]
use std::os::unix::fs::FileTypeExt;
#[cfg(unix)]
use std::os::unix::io::AsRawFd;

// From this library
use crate::core::device::DeviceMode;

#[cfg(target_os = "linux")]
const BLKSSZGET: libc::c_ulong = 0x1268;
#[cfg(target_os = "linux")]
const BLKGETSIZE64: libc::c_ulong = 0x80081272;
#[cfg(target_os = "linux")]
const CDROM_GET_CAPABILITY: libc::c_ulong = 0x5331;
#[cfg(target_os = "linux")]
const CDROMMULTISESSION: libc::c_ulong = 0x5310;
#[cfg(target_os = "linux")]
const CDROM_LBA: libc::c_uchar = 0x01;

#[cfg(target_os = "linux")]
#[repr(C)]
struct CdromMultisession {
    addr: i32,
    xa_flag: libc::c_uchar,
    addr_format: libc::c_uchar,
}

/// Classifies a bound descriptor by `stat`ing it.
pub(crate) fn classify(file: &File) -> io::Result<DeviceMode> {
    let file_type = file.metadata()?.file_type();
    #[cfg(unix)]
    {
        if file_type.is_block_device() {
            return Ok(DeviceMode::Block);
        }
        if file_type.is_char_device() {
            return Ok(DeviceMode::CharUbi);
        }
    }
    Ok(DeviceMode::RegularFile)
}

/// Device size in bytes: `BLKGETSIZE64` for block devices, file length otherwise.
pub(crate) fn device_size(file: &File, mode: DeviceMode) -> io::Result<u64> {
    match mode {
        DeviceMode::Block => block_device_size(file),
        _ => Ok(file.metadata()?.len()),
    }
}

/// Logical sector size: `BLKSSZGET` for block devices, 512 otherwise.
pub(crate) fn sector_size(file: &File, mode: DeviceMode) -> io::Result<u32> {
    match mode {
        DeviceMode::Block => block_sector_size(file),
        _ => Ok(512),
    }
}

#[cfg(target_os = "linux")]
fn block_device_size(file: &File) -> io::Result<u64> {
    let mut size: u64 = 0;
    let rc = unsafe { libc::ioctl(file.as_raw_fd(), BLKGETSIZE64, &mut size as *mut u64) };
    if rc < 0 {
        Err(io::Error::last_os_error())
    } else {
        Ok(size)
    }
}

#[cfg(not(target_os = "linux"))]
fn block_device_size(file: &File) -> io::Result<u64> {
    file.metadata().map(|m| m.len())
}

#[cfg(target_os = "linux")]
fn block_sector_size(file: &File) -> io::Result<u32> {
    let mut size: libc::c_int = 0;
    let rc = unsafe { libc::ioctl(file.as_raw_fd(), BLKSSZGET, &mut size as *mut libc::c_int) };
    if rc < 0 {
        Err(io::Error::last_os_error())
    } else {
        Ok(size as u32)
    }
}

#[cfg(not(target_os = "linux"))]
fn block_sector_size(_file: &File) -> io::Result<u32> {
    Ok(512)
}

/// Whether the descriptor supports CD-ROM ioctls. Never a hard error: any failure
/// (`ENOTTY` on a non-optical device, permission, platform) means "not a CD-ROM".
#[cfg(target_os = "linux")]
pub(crate) fn is_cdrom(file: &File) -> bool {
    let rc = unsafe { libc::ioctl(file.as_raw_fd(), CDROM_GET_CAPABILITY) };
    rc >= 0
}

#[cfg(not(target_os = "linux"))]
pub(crate) fn is_cdrom(_file: &File) -> bool {
    false
}

/// Multi-session start address in bytes, if the drive reports one via `CDROMMULTISESSION`.
#[cfg(target_os = "linux")]
pub(crate) fn cdrom_session_offset(file: &File, sector_size: u32) -> Option<u64> {
    let mut session = CdromMultisession {
        addr: 0,
        xa_flag: 0,
        addr_format: CDROM_LBA,
    };
    let rc = unsafe { libc::ioctl(file.as_raw_fd(), CDROMMULTISESSION, &mut session as *mut CdromMultisession) };
    if rc < 0 || session.xa_flag == 0 || session.addr <= 0 {
        None
    } else {
        Some(session.addr as u64 * u64::from(sector_size))
    }
}

#[cfg(not(target_os = "linux"))]
pub(crate) fn cdrom_session_offset(_file: &File, _sector_size: u32) -> Option<u64> {
    None
}
