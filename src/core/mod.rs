// Copyright (c) 2023 Nick Piaddo
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Shared objects and helper functions.

// From dependency library

// From standard library

// From this library
pub mod config;
pub mod device;
pub mod errors;
pub mod partition;
pub mod utils;
