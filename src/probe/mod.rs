// Copyright (c) 2023 Nick Piaddo
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The probe controller: device binding, the sliding probing window, and orchestration
//! across the superblocks/topology/partitions chains.

// From dependency library

// From standard library

// From this library
pub use device_flags_struct::DeviceFlags;
pub use probe_builder_error_enum::ProbeBuilderError;
pub use probe_builder_struct::ProbeBuilder;
pub use probe_context_struct::ProbeContext;
pub use probe_error_enum::ProbeError;
pub use probe_struct::Probe;

mod device_flags_struct;
pub(crate) mod device_geometry;
mod probe_builder_error_enum;
mod probe_builder_struct;
mod probe_context_struct;
mod probe_error_enum;
mod probe_struct;
