// Copyright (c) 2023 Nick Piaddo
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Common utils.

// From dependency library

// From standard library

// From this library
pub mod encode;
pub mod misc;
