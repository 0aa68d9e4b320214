// Copyright (c) 2023 Nick Piaddo
// SPDX-License-Identifier: Apache-2.0 OR MIT

// From dependency library

// From standard library

// From this library
use crate::chain::ChainKind;

/// A single `NAME=value` result (historically called a "prval"), tagged with the chain
/// that produced it.
#[derive(Clone, Debug)]
pub struct Value {
    name: &'static str,
    data: Vec<u8>,
    chain: ChainKind,
}

impl Value {
    /// Creates a new value. `data` is copied; a trailing `\0` is appended internally so
    /// every stored payload is valid up to `len` plus one extra defensive byte.
    pub fn new(name: &'static str, data: impl Into<Vec<u8>>, chain: ChainKind) -> Self {
        let mut data = data.into();
        data.push(0);
        Self { name, data, chain }
    }

    /// Creates a value from a `Display`-able payload, formatted as UTF-8 bytes.
    pub fn from_display(name: &'static str, value: impl std::fmt::Display, chain: ChainKind) -> Self {
        Self::new(name, value.to_string().into_bytes(), chain)
    }

    /// The `NAME`.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// The payload, without the defensive trailing `\0`.
    pub fn data(&self) -> &[u8] {
        &self.data[..self.data.len() - 1]
    }

    /// The payload interpreted as a UTF-8 string, lossily.
    pub fn as_str(&self) -> std::borrow::Cow<'_, str> {
        String::from_utf8_lossy(self.data())
    }

    /// The chain that produced this value.
    pub fn chain(&self) -> ChainKind {
        self.chain
    }
}

#[cfg(test)]
#[allow(unused_imports)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn value_data_excludes_defensive_nul_terminator() {
        let value = Value::new("LABEL", b"MYVOL".to_vec(), ChainKind::Sublks);
        assert_eq!(value.data(), b"MYVOL");
        assert_eq!(value.as_str(), "MYVOL");
    }
}
