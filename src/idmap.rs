//! Symbol id mapping
//!
//! An explicit, owned mapping from symbol identifier strings to the numeric
//! row ids the relational store assigns them. The loader injects one of
//! these per run; resetting between runs is an explicit operation rather
//! than hidden process-wide state.
//!
//! Lookup misses are counted so that references dropped because their
//! symbol was not loaded this run are observable instead of silent.

use std::collections::HashMap;

#[derive(Debug, Default)]
pub struct SymbolIdMap {
    ids: HashMap<String, i64>,
    misses: u64,
}

impl SymbolIdMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the row id assigned to a symbol identifier this run.
    pub fn insert(&mut self, symbol: &str, id: i64) {
        self.ids.insert(symbol.to_string(), id);
    }

    /// Look up a symbol's row id, counting the miss when it is absent.
    pub fn resolve(&mut self, symbol: &str) -> Option<i64> {
        match self.ids.get(symbol) {
            Some(&id) => Some(id),
            None => {
                self.misses += 1;
                None
            }
        }
    }

    /// Number of failed lookups since the last reset.
    pub fn misses(&self) -> u64 {
        self.misses
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Clear all mappings and the miss count, for the start of a fresh run.
    pub fn reset(&mut self) {
        self.ids.clear();
        self.misses = 0;
    }
}
