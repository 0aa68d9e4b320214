// Copyright (c) 2023 Nick Piaddo
// SPDX-License-Identifier: Apache-2.0 OR MIT

// From dependency library
use typed_builder::TypedBuilder;

// From standard library
use std::fs::{File, OpenOptions};
use std::path::PathBuf;

// From this library
use crate::probe::{Probe, ProbeBuilderError, ProbeError};

/// Builds and validates a [`Probe`] from either a filesystem path or an already-open
/// [`File`], with its scanning window and which chains are enabled configured up front.
#[derive(Debug, TypedBuilder)]
#[builder(
    builder_type(
        name = ProbeBuilder,
        vis = "pub",
        doc = "Configures and creates a new [`Probe`] instance.\n\nSee [`ProbeBuilder::build`]."
    ),
    build_method(vis = "", name = __build)
)]
pub(crate) struct ProbeParams {
    #[builder(default, setter(into, strip_option, doc = "Path to the device or image to bind."))]
    scan_device: Option<PathBuf>,

    #[builder(default, setter(strip_option, doc = "An already-open file to bind instead of a path."))]
    scan_file: Option<File>,

    #[builder(setter(strip_bool, doc = "Opens the device read/write instead of the default read-only."))]
    allow_writes: bool,

    #[builder(default, setter(strip_option, doc = "Offset in bytes of the region to scan."))]
    offset: Option<u64>,

    #[builder(default, setter(strip_option, doc = "Size in bytes of the region to scan."))]
    size: Option<u64>,

    #[builder(default, setter(strip_option, doc = "Overrides the device's reported sector size."))]
    sector_size: Option<u32>,

    #[builder(default = true, setter(doc = "Enables the superblocks chain. On by default."))]
    enable_superblocks: bool,

    #[builder(default = true, setter(doc = "Enables the topology chain. On by default."))]
    enable_topology: bool,

    #[builder(default = false, setter(doc = "Enables the partitions chain. Off by default."))]
    enable_partitions: bool,
}

fn into_builder_error(e: crate::error::BlkidCoreError) -> ProbeBuilderError {
    match e {
        crate::error::BlkidCoreError::Probe(pe) => ProbeBuilderError::Bind(pe),
        other => ProbeBuilderError::Bind(ProbeError::BindDevice(other.to_string())),
    }
}

#[allow(non_camel_case_types)]
impl<
        __scan_device: ::typed_builder::Optional<Option<PathBuf>>,
        __scan_file: ::typed_builder::Optional<Option<File>>,
        __allow_writes: ::typed_builder::Optional<bool>,
        __offset: ::typed_builder::Optional<Option<u64>>,
        __size: ::typed_builder::Optional<Option<u64>>,
        __sector_size: ::typed_builder::Optional<Option<u32>>,
        __enable_superblocks: ::typed_builder::Optional<bool>,
        __enable_topology: ::typed_builder::Optional<bool>,
        __enable_partitions: ::typed_builder::Optional<bool>,
    >
    ProbeBuilder<(
        __scan_device,
        __scan_file,
        __allow_writes,
        __offset,
        __size,
        __sector_size,
        __enable_superblocks,
        __enable_topology,
        __enable_partitions,
    )>
{
    /// Finishes configuring and binds a new [`Probe`].
    ///
    /// # Examples
    ///
    /// ```ignore
    /// use blkid_core::probe::Probe;
    ///
    /// let probe = Probe::builder()
    ///     .scan_device("/dev/sda1")
    ///     .enable_partitions(true)
    ///     .build()?;
    /// ```
    pub fn build(self) -> Result<Probe, ProbeBuilderError> {
        let params = self.__build();

        let mut probe = match (params.scan_device, params.scan_file) {
            (Some(_), Some(_)) => {
                return Err(ProbeBuilderError::Bind(ProbeError::BindDevice(
                    "can not set `scan_device` and `scan_file` simultaneously".to_string(),
                )))
            }
            (None, None) => {
                return Err(ProbeBuilderError::Bind(ProbeError::BindDevice(
                    "one of `scan_device` or `scan_file` must be set".to_string(),
                )))
            }
            (Some(path), None) => {
                let file = if params.allow_writes {
                    OpenOptions::new().read(true).write(true).open(&path)
                } else {
                    File::open(&path)
                }
                .map_err(|source| ProbeBuilderError::Open { path, source })?;
                Probe::from_file(file).map_err(into_builder_error)?
            }
            (None, Some(file)) => Probe::from_file(file).map_err(into_builder_error)?,
        };

        if params.offset.is_some() || params.size.is_some() {
            probe
                .set_dimension(params.offset.unwrap_or(0), params.size)
                .map_err(into_builder_error)?;
        }

        if let Some(sector_size) = params.sector_size {
            probe.set_sector_size(sector_size);
        }

        probe.chain_mut(crate::chain::ChainKind::Sublks).set_enabled(params.enable_superblocks);
        probe.chain_mut(crate::chain::ChainKind::Toplgy).set_enabled(params.enable_topology);
        probe.chain_mut(crate::chain::ChainKind::Parts).set_enabled(params.enable_partitions);

        Ok(probe)
    }
}

impl Probe {
    /// Starts building a [`Probe`] via [`ProbeBuilder`].
    pub fn builder() -> ProbeBuilder {
        ProbeParams::builder()
    }
}
