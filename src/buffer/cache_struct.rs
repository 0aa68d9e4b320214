// Copyright (c) 2023 Nick Piaddo
// SPDX-License-Identifier: Apache-2.0 OR MIT

// From dependency library

// From standard library
use std::fs::File;
#[cfg(unix)]
use std::os::unix::fs::FileExt;

// From this library
use crate::buffer::ReadOutcome;

struct CachedBuffer {
    /// Absolute device offset (NOT relative to the probing window).
    offset: u64,
    data: Vec<u8>,
}

impl CachedBuffer {
    fn covers(&self, offset: u64, len: usize) -> bool {
        offset >= self.offset && offset + len as u64 <= self.offset + self.data.len() as u64
    }

    fn slice(&self, offset: u64, len: usize) -> &[u8] {
        let start = (offset - self.offset) as usize;
        &self.data[start..start + len]
    }
}

/// Cache of byte ranges read from a device, keyed by absolute device offset.
///
/// See the module-level documentation for the reuse-or-read policy.
#[derive(Default)]
pub struct BufferCache {
    entries: Vec<CachedBuffer>,
    modified: bool,
}

impl BufferCache {
    /// Creates an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether [`BufferCache::hide_range`] has mutated any cached buffer since the last
    /// [`BufferCache::reset`].
    pub fn is_modified(&self) -> bool {
        self.modified
    }

    /// Reads `len` bytes at absolute device `offset`, reusing a cached buffer when one
    /// fully covers the request, otherwise performing exactly one positional read and
    /// caching the result.
    ///
    /// `len == 0` is always [`ReadOutcome::EndOfArea`].
    pub fn read(&mut self, file: &File, offset: u64, len: usize) -> ReadOutcome<'_> {
        if len == 0 {
            return ReadOutcome::EndOfArea;
        }

        if let Some(idx) = self.entries.iter().position(|e| e.covers(offset, len)) {
            return ReadOutcome::Bytes(self.entries[idx].slice(offset, len));
        }

        let mut data = vec![0u8; len];
        match Self::pread_exact(file, offset, &mut data) {
            Ok(true) => {
                self.entries.push(CachedBuffer { offset, data });
                let last = self.entries.len() - 1;
                ReadOutcome::Bytes(self.entries[last].slice(offset, len))
            }
            Ok(false) => ReadOutcome::EndOfArea,
            Err(e) => ReadOutcome::IoError(e),
        }
    }

    /// Zeroes `len` bytes at absolute device `offset` within cached buffers only. Fails
    /// (returns `false`) if no single cached buffer covers the range — a reimplementation
    /// must not silently split the hide across multiple buffers.
    pub fn hide_range(&mut self, offset: u64, len: usize) -> bool {
        if let Some(buf) = self.entries.iter_mut().find(|e| e.covers(offset, len)) {
            let start = (offset - buf.offset) as usize;
            buf.data[start..start + len].fill(0);
            self.modified = true;
            true
        } else {
            false
        }
    }

    /// Drops all cached buffers and clears the modified flag.
    pub fn reset(&mut self) {
        self.entries.clear();
        self.modified = false;
    }

    #[cfg(unix)]
    fn pread_exact(file: &File, offset: u64, buf: &mut [u8]) -> std::io::Result<bool> {
        match file.read_exact_at(buf, offset) {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == std::io::ErrorKind::UnexpectedEof => Ok(false),
            Err(e) => Err(e),
        }
    }

    #[cfg(not(unix))]
    fn pread_exact(file: &File, offset: u64, buf: &mut [u8]) -> std::io::Result<bool> {
        use std::io::{Read, Seek, SeekFrom};
        let mut f = file.try_clone()?;
        f.seek(SeekFrom::Start(offset))?;
        match f.read_exact(buf) {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == std::io::ErrorKind::UnexpectedEof => Ok(false),
            Err(e) => Err(e),
        }
    }
}
