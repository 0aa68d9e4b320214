// Copyright (c) 2023 Nick Piaddo
// SPDX-License-Identifier: Apache-2.0 OR MIT

// From dependency library

// From standard library

// From this library
use crate::chain::Idinfo;

/// Direction of a [`Filter::set_by_names`] mutation.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum FilterDirection {
    /// Disable every identifier *except* the named ones.
    In,
    /// Disable *only* the named identifiers.
    Out,
}

/// Per-chain bitmap of length `nidinfos`; a set bit disables that identifier.
#[derive(Clone, Debug)]
pub struct Filter {
    disabled: Vec<bool>,
}

impl Filter {
    /// A filter that disables nothing, sized for a chain with `nidinfos` identifiers.
    pub fn new(nidinfos: usize) -> Self {
        Self {
            disabled: vec![false; nidinfos],
        }
    }

    pub fn is_disabled(&self, index: usize) -> bool {
        self.disabled.get(index).copied().unwrap_or(false)
    }

    pub fn disable(&mut self, index: usize) {
        if let Some(bit) = self.disabled.get_mut(index) {
            *bit = true;
        }
    }

    pub fn enable(&mut self, index: usize) {
        if let Some(bit) = self.disabled.get_mut(index) {
            *bit = false;
        }
    }

    /// Flips every bit.
    pub fn invert(&mut self) {
        for bit in &mut self.disabled {
            *bit = !*bit;
        }
    }

    /// Sets the filter from a list of identifier names, resolved against `idinfos` in the
    /// same order the owning chain iterates them.
    pub fn set_by_names(&mut self, idinfos: &'static [Idinfo], names: &[&str], direction: FilterDirection) {
        for (index, info) in idinfos.iter().enumerate() {
            let named = names.contains(&info.name);
            let disable = match direction {
                FilterDirection::In => !named,
                FilterDirection::Out => named,
            };
            if let Some(bit) = self.disabled.get_mut(index) {
                *bit = disable;
            }
        }
    }
}
