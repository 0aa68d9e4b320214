// Copyright (c) 2023 Nick Piaddo
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Topology: a single always-enabled identifier with no magic table. It reports sector
//! size and device extent already captured at `BindDevice` time rather than locating
//! anything in the probing window.

// From dependency library

// From standard library

// From this library
use crate::chain::{IdinfoFlags, Idinfo, ProbeOutcome};
use crate::core::device::Usage;
use crate::magic::MagicMatch;
use crate::probe::ProbeContext;
use crate::value::name;

pub static IDINFO: Idinfo = Idinfo {
    name: "topology",
    usage: Usage::Other,
    flags: IdinfoFlags::empty(),
    min_size: 0,
    probe,
    magics: &[],
};

fn probe(ctx: &mut ProbeContext<'_>, _magic: &MagicMatch) -> ProbeOutcome {
    let sector_size = u64::from(ctx.sector_size());
    ctx.emit_display(name::BLOCK_SIZE, sector_size);
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
    use crate::magic::MagicDescriptor;
    use crate::partition::PartitionTable;
    use crate::value::ValueStore;
    use crate::wiper::Wiper;
    use pretty_assertions::assert_eq;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn reports_the_bound_sector_size() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(&[0u8; 4096]).unwrap();
        let file = file.reopen().unwrap();

        let mut buffers = BufferCache::new();
        let mut values = ValueStore::new();
        let mut hints = HintRegistry::new();
        let mut wiper = Wiper::new();
        let mut partitions = PartitionTable::new();
        let window = Window::new(0, 4096);
        let mut ctx = ProbeContext::new(
            &file,
            window,
            4096,
            None,
            crate::probe::DeviceFlags::empty(),
            &mut buffers,
            &mut values,
            &mut hints,
            &mut wiper,
            &mut partitions,
            ChainKind::Toplgy,
            ChainFlags::empty(),
            None,
        );

        static SENTINEL: MagicDescriptor = MagicDescriptor::fixed(b"x", 0, 0);
        let sentinel = MagicMatch {
            offset: 0,
            descriptor: &SENTINEL,
        };
        assert!(matches!(probe(&mut ctx, &sentinel), ProbeOutcome::Ok));
        assert_eq!(values.find(name::BLOCK_SIZE).unwrap().as_str(), "4096");
    }
}
