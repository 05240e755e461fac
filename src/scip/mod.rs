//! SCIP index reading
//!
//! Deserializes a binary SCIP index file into the in-memory graph of
//! documents, symbols, and occurrences. The decode is structural: no
//! filtering or normalization happens here.

pub mod proto;

use std::fs;
use std::path::Path;

use anyhow::{bail, Context, Result};
use prost::Message;

pub use proto::{Document, Index, Metadata, Occurrence, SymbolInformation, ToolInfo};

use crate::types::ROLE_DEFINITION;

/// Read and decode a SCIP index file.
///
/// Fails fast with an actionable message when the file does not exist; the
/// caller is expected to have run an external indexer first.
pub fn read_index<P: AsRef<Path>>(path: P) -> Result<Index> {
    let path = path.as_ref();
    if !path.exists() {
        bail!(
            "SCIP index not found at {}. Run a SCIP indexer first (e.g. `scip-typescript index`), then retry.",
            path.display()
        );
    }

    let bytes = fs::read(path)
        .with_context(|| format!("Failed to read index file {}", path.display()))?;
    let index = Index::decode(bytes.as_slice())
        .with_context(|| format!("Failed to decode SCIP index {}", path.display()))?;
    Ok(index)
}

impl Document {
    /// First occurrence of `symbol` in this document whose role bitmask
    /// includes the Definition bit. First match wins; documents are not
    /// expected to define the same identifier twice.
    pub fn find_definition(&self, symbol: &str) -> Option<&Occurrence> {
        self.occurrences
            .iter()
            .find(|occ| occ.symbol == symbol && occ.symbol_roles & ROLE_DEFINITION != 0)
    }
}
