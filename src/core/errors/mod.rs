// Copyright (c) 2023 Nick Piaddo
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Runtime errors.

// From dependency library

// From standard library

// From this library
pub use conversion_error_enum::ConversionError;
pub use encode_error_enum::EncodeError;
pub use misc_error_enum::MiscError;
pub use parser_error_enum::ParserError;

mod conversion_error_enum;
mod encode_error_enum;
mod misc_error_enum;
mod parser_error_enum;
