// Copyright (c) 2023 Nick Piaddo
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! FAT12/FAT16/FAT32, distinguished by the BIOS Parameter Block's cluster count.

// From dependency library

// From standard library

// From this library
use crate::chain::{IdinfoFlags, Idinfo, ProbeOutcome};
use crate::core::device::Usage;
use crate::identify::support::{u16le, u32le};
use crate::magic::{MagicDescriptor, MagicMatch};
use crate::probe::ProbeContext;
use crate::value::name;

const BOOT_SECTOR_SIZE: usize = 512;
const BOOT_SIG_OFFSET: u16 = 510;

pub static MAGICS: &[MagicDescriptor] = &[MagicDescriptor::fixed(&[0x55, 0xAA], 0, BOOT_SIG_OFFSET)];

pub static IDINFO: Idinfo = Idinfo {
    name: "vfat",
    usage: Usage::FileSystem,
    flags: IdinfoFlags::MAGIC,
    min_size: BOOT_SECTOR_SIZE as u64,
    probe,
    magics: MAGICS,
};

fn probe(ctx: &mut ProbeContext<'_>, _magic: &MagicMatch) -> ProbeOutcome {
    let sb = match ctx.read(0, BOOT_SECTOR_SIZE).bytes() {
        Some(b) => b.to_vec(),
        None => return ProbeOutcome::None,
    };

    let (
        Some(bytes_per_sector),
        Some(sectors_per_cluster),
        Some(reserved_sectors),
        Some(num_fats),
        Some(root_entries),
        Some(total_sectors16),
        Some(fat_size16),
        Some(total_sectors32),
    ) = (
        u16le(&sb, 11),
        sb.get(13).copied(),
        u16le(&sb, 14),
        sb.get(16).copied(),
        u16le(&sb, 17),
        u16le(&sb, 19),
        u16le(&sb, 22),
        u32le(&sb, 32),
    )
    else {
        return ProbeOutcome::None;
    };

    if bytes_per_sector == 0 || sectors_per_cluster == 0 || num_fats == 0 {
        return ProbeOutcome::None;
    }

    let is_fat32 = fat_size16 == 0;
    let fat_size = if is_fat32 {
        match u32le(&sb, 36) {
            Some(v) if v > 0 => v,
            _ => return ProbeOutcome::None,
        }
    } else {
        u32::from(fat_size16)
    };

    let total_sectors = if total_sectors16 != 0 {
        u32::from(total_sectors16)
    } else {
        total_sectors32
    };
    if total_sectors == 0 {
        return ProbeOutcome::None;
    }

    let root_dir_sectors = (u32::from(root_entries) * 32 + u32::from(bytes_per_sector) - 1) / u32::from(bytes_per_sector);
    let first_data_sector = u32::from(reserved_sectors) + u32::from(num_fats) * fat_size + root_dir_sectors;
    if total_sectors <= first_data_sector {
        return ProbeOutcome::None;
    }
    let cluster_count = (total_sectors - first_data_sector) / u32::from(sectors_per_cluster);

    let (is_fat32_confirmed, volume_id_offset, label_offset, expect_boot_sig_offset) = if is_fat32 {
        (true, 67usize, 71usize, 66usize)
    } else {
        (false, 39usize, 43usize, 38usize)
    };

    if cluster_count < 4085 && is_fat32_confirmed {
        // Cluster count says FAT12/16 but the BPB shape says FAT32 — inconsistent, reject.
        return ProbeOutcome::None;
    }

    if sb.get(expect_boot_sig_offset).copied() != Some(0x29) {
        // No extended BPB signature: still plausibly FAT, but we can't read label/serial.
        ctx.emit(name::TYPE, b"vfat".as_slice());
        return ProbeOutcome::Ok;
    }

    ctx.emit(name::TYPE, b"vfat".as_slice());
    if !is_fat32 {
        ctx.emit(name::SEC_TYPE, b"msdos".as_slice());
    }

    if let Some(serial) = u32le(&sb, volume_id_offset) {
        ctx.emit_display(name::UUID, format!("{:04X}-{:04X}", serial >> 16, serial & 0xFFFF));
    }

    if let Some(raw_label) = sb.get(label_offset..label_offset + 11) {
        let trimmed = std::str::from_utf8(raw_label).ok().map(|s| s.trim_end());
        if let Some(label) = trimmed {
            if !label.is_empty() && label != "NO NAME" {
                ctx.emit(name::LABEL, label.as_bytes());
            }
        }
    }

    ctx.emit_display(name::BLOCK_SIZE, bytes_per_sector);
    ctx.emit_display(name::FSBLOCKSIZE, u32::from(bytes_per_sector) * u32::from(sectors_per_cluster));
    ctx.emit_display(name::FSSIZE, u64::from(total_sectors) * u64::from(bytes_per_sector));

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

    fn fat16_image() -> Vec<u8> {
        let mut image = vec![0u8; 2 * 1024 * 1024];
        image[11..13].copy_from_slice(&512u16.to_le_bytes());
        image[13] = 4; // sectors per cluster
        image[14..16].copy_from_slice(&1u16.to_le_bytes()); // reserved
        image[16] = 2; // num fats
        image[17..19].copy_from_slice(&512u16.to_le_bytes()); // root entries
        image[19..21].copy_from_slice(&4096u16.to_le_bytes()); // total sectors16
        image[22..24].copy_from_slice(&32u16.to_le_bytes()); // fat size16
        image[38] = 0x29;
        image[39..43].copy_from_slice(&0x1234_5678u32.to_le_bytes());
        image[43..54].copy_from_slice(b"MYDISK     ");
        image[510] = 0x55;
        image[511] = 0xAA;
        image
    }

    #[test]
    fn identifies_fat16_and_reads_label_and_serial() {
        let image = fat16_image();
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
            offset: 510,
            descriptor: &MAGICS[0],
        };
        assert!(matches!(probe(&mut ctx, &matched), ProbeOutcome::Ok));
        assert_eq!(values.find(name::TYPE).unwrap().as_str(), "vfat");
        assert_eq!(values.find(name::SEC_TYPE).unwrap().as_str(), "msdos");
        assert_eq!(values.find(name::LABEL).unwrap().as_str(), "MYDISK");
        assert_eq!(values.find(name::UUID).unwrap().as_str(), "1234-5678");
    }
}
