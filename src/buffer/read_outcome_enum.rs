// Copyright (c) 2023 Nick Piaddo
// SPDX-License-Identifier: Apache-2.0 OR MIT

// From dependency library

// From standard library

// From this library

/// Result of a [`BufferCache::read`](crate::buffer::BufferCache::read) call.
///
/// An explicit three-valued result: callers pattern-match instead of inspecting an errno
/// side-channel.
#[derive(Debug)]
pub enum ReadOutcome<'a> {
    /// `len` bytes at the requested offset, borrowed from the cache.
    Bytes(&'a [u8]),
    /// The request fell outside the probing window, or asked for zero bytes. Benign.
    EndOfArea,
    /// A real I/O error occurred while servicing the request.
    IoError(std::io::Error),
}

impl<'a> ReadOutcome<'a> {
    /// Returns the byte slice, or `None` for any non-`Bytes` variant.
    pub fn bytes(self) -> Option<&'a [u8]> {
        match self {
            Self::Bytes(b) => Some(b),
            _ => None,
        }
    }

    /// Returns `true` for [`ReadOutcome::IoError`].
    pub fn is_io_error(&self) -> bool {
        matches!(self, Self::IoError(_))
    }
}
