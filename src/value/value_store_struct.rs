// Copyright (c) 2023 Nick Piaddo
// SPDX-License-Identifier: Apache-2.0 OR MIT

// From dependency library

// From standard library

// From this library
use crate::chain::ChainKind;
use crate::value::Value;

/// Ordered list of [`Value`]s produced across one or more probing passes.
#[derive(Debug, Default)]
pub struct ValueStore {
    values: Vec<Value>,
}

impl ValueStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a value, preserving insertion order.
    pub fn push(&mut self, value: Value) {
        self.values.push(value);
    }

    /// Looks up the first value with the given name.
    pub fn find(&self, name: &str) -> Option<&Value> {
        self.values.iter().find(|v| v.name() == name)
    }

    /// Returns `true` if any value with the given name is present.
    pub fn contains(&self, name: &str) -> bool {
        self.find(name).is_some()
    }

    /// Iterates over all values in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Value> {
        self.values.iter()
    }

    /// Deletes every value owned by `chain`.
    pub fn reset_chain(&mut self, chain: ChainKind) {
        self.values.retain(|v| v.chain() != chain);
    }

    /// Detaches every value owned by `chain` into a freestanding list, removing them from
    /// this store. Used by safe-probe bookkeeping.
    pub fn save_chain(&mut self, chain: ChainKind) -> Vec<Value> {
        let (taken, kept): (Vec<_>, Vec<_>) =
            self.values.drain(..).partition(|v| v.chain() == chain);
        self.values = kept;
        taken
    }

    /// Re-attaches a previously detached list.
    pub fn append(&mut self, mut values: Vec<Value>) {
        self.values.append(&mut values);
    }

    /// Number of values currently stored.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the store is empty.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}
