// Copyright (c) 2023 Nick Piaddo
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Device objects and helper functions.

// From dependency library

// From standard library

// From this library
pub use device_mode_enum::DeviceMode;
pub use device_number_struct::DeviceNumber;
pub use label_struct::Label;
pub use offset_struct::Offset;
pub use size_struct::Size;
pub use usage_enum::Usage;
pub use uuid_struct::Uuid;
pub use window_struct::Window;

mod device_mode_enum;
mod device_number_struct;
mod label_struct;
mod offset_struct;
mod size_struct;
mod usage_enum;
mod uuid_struct;
mod window_struct;
