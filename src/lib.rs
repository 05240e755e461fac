//! scipdex: load SCIP code indexes into a searchable SQLite store
//!
//! A SCIP index (produced by an external indexer such as `scip-typescript`)
//! is decoded into an in-memory graph, every defined symbol is resolved to a
//! display name, coarse kind, and normalized range, and the result is
//! bulk-loaded into SQLite — documents, symbols, references, plus an FTS5
//! index over raw file contents — inside a single transaction.
//!
//! ## Pipeline
//!
//! index file -> [`scip::read_index`] -> in-memory graph -> [`symbols`]
//! resolution -> [`load_index`] (one transaction) -> SQLite store
//!
//! Queries run against the in-memory graph through [`query::IndexQuery`];
//! keyword search over stored file contents goes through the store itself.

pub mod cli;
pub mod db;
pub mod idmap;
pub mod query;
pub mod scip;
pub mod symbols;
pub mod types;

use std::collections::HashMap;
use std::fs;
use std::path::Path;
use std::time::{Instant, SystemTime};

use anyhow::Result;
use serde::Serialize;
use tracing::{debug, info, warn};

use db::Database;
use idmap::SymbolIdMap;
use scip::Index;
use symbols::{display_name, infer_kind, resolve_range};
use types::{DocumentRecord, ReferenceRecord, Role, SymbolRecord};

/// Configuration for a load run
#[derive(Debug, Clone)]
pub struct LoadOptions {
    /// Project root; document paths in the index are relative to it
    pub root: String,
    /// Leave existing rows in place and upsert by natural key instead of
    /// wiping the store first
    pub incremental: bool,
    /// Dependency directories whose documents are skipped entirely
    pub exclude_dirs: Vec<String>,
    /// File extensions accepted as source files
    pub source_extensions: Vec<String>,
    /// Declaration-only suffixes, skipped entirely
    pub declaration_suffixes: Vec<String>,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            root: ".".to_string(),
            incremental: false,
            exclude_dirs: vec![
                "node_modules".to_string(),
                "dist".to_string(),
                "build".to_string(),
                ".git".to_string(),
                "vendor".to_string(),
                "coverage".to_string(),
            ],
            source_extensions: vec![
                "ts".to_string(),
                "tsx".to_string(),
                "js".to_string(),
                "jsx".to_string(),
                "mjs".to_string(),
                "cjs".to_string(),
            ],
            declaration_suffixes: vec![".d.ts".to_string()],
        }
    }
}

impl LoadOptions {
    /// Whether a document path is excluded from the load: under a dependency
    /// directory, declaration-only, or not a supported source extension.
    pub fn should_skip(&self, path: &str) -> bool {
        if self
            .declaration_suffixes
            .iter()
            .any(|suffix| path.ends_with(suffix.as_str()))
        {
            return true;
        }

        let ext = Path::new(path)
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("");
        if !self.source_extensions.iter().any(|e| e == ext) {
            return true;
        }

        self.exclude_dirs.iter().any(|dir| {
            path.starts_with(&format!("{}/", dir)) || path.contains(&format!("/{}/", dir))
        })
    }
}

/// Counts and timing reported by a load run
#[derive(Debug, Clone, Default, Serialize)]
pub struct LoadStats {
    pub documents: u64,
    pub symbols: u64,
    pub references: u64,
    pub skipped_documents: u64,
    /// Occurrences dropped because their symbol had no row this run
    pub dropped_references: u64,
    pub elapsed_ms: u64,
}

/// Load an in-memory index graph into the store in one transaction.
///
/// All-or-nothing: any error rolls the store back to its pre-run state. The
/// symbol id map is reset at the start of the run; after a successful load
/// it holds every symbol row id assigned this run, and its miss count is the
/// number of dropped references.
pub fn load_index(
    db: &mut Database,
    index: &Index,
    options: &LoadOptions,
    ids: &mut SymbolIdMap,
) -> Result<LoadStats> {
    ids.reset();
    db.begin_transaction()?;
    match load_into(db, index, options, ids) {
        Ok(stats) => {
            db.commit()?;
            info!(
                "Loaded {} documents, {} symbols, {} references in {}ms ({} skipped)",
                stats.documents,
                stats.symbols,
                stats.references,
                stats.elapsed_ms,
                stats.skipped_documents
            );
            Ok(stats)
        }
        Err(err) => {
            // Leave the store exactly as it was before the run.
            let _ = db.rollback();
            Err(err)
        }
    }
}

fn load_into(
    db: &mut Database,
    index: &Index,
    options: &LoadOptions,
    ids: &mut SymbolIdMap,
) -> Result<LoadStats> {
    let started = Instant::now();
    let mut stats = LoadStats::default();

    if !options.incremental {
        db.clear_all()?;
    }

    let mut kept = Vec::new();
    for doc in &index.documents {
        if options.should_skip(&doc.relative_path) {
            debug!("Skipping {}", doc.relative_path);
            stats.skipped_documents += 1;
        } else {
            kept.push(doc);
        }
    }

    // Pass 1: documents, symbols, and file contents. All symbol rows must
    // exist before any reference attaches, so references to symbols defined
    // in a later document still resolve.
    let mut doc_ids: HashMap<&str, i64> = HashMap::new();
    for doc in &kept {
        let path = doc.relative_path.as_str();
        let doc_id = db.upsert_document(&DocumentRecord {
            path: path.to_string(),
            language: doc.language.clone(),
            content_hash: content_hash(&options.root, path),
        })?;
        doc_ids.insert(path, doc_id);
        stats.documents += 1;

        for info in &doc.symbols {
            // A symbol row requires a Definition-role occurrence in the same
            // document; symbols without one are dropped entirely.
            let Some(definition) = doc.find_definition(&info.symbol) else {
                debug!("No definition occurrence for {}, skipping", info.symbol);
                continue;
            };
            let Some(range) = resolve_range(&definition.range) else {
                debug!("Unresolvable range for {}, skipping", info.symbol);
                continue;
            };

            let documentation = if info.documentation.is_empty() {
                None
            } else {
                Some(info.documentation.join("\n"))
            };
            let symbol_id = db.upsert_symbol(&SymbolRecord {
                document_id: doc_id,
                symbol: info.symbol.clone(),
                name: display_name(&info.symbol),
                kind: infer_kind(&info.symbol),
                range,
                documentation,
            })?;
            ids.insert(&info.symbol, symbol_id);
            stats.symbols += 1;
        }

        // Full-text content is best-effort; a source file missing on disk
        // skips only its search entry, never the run.
        match fs::read_to_string(Path::new(&options.root).join(path)) {
            Ok(content) => db.upsert_file_content(path, &content)?,
            Err(err) => debug!("No content for {} ({}), skipping full-text entry", path, err),
        }
    }

    // Pass 2: references. Occurrences whose symbol got no row this run are
    // dropped; the id map counts them.
    for doc in &kept {
        let doc_id = doc_ids[doc.relative_path.as_str()];
        for occurrence in &doc.occurrences {
            let Some(range) = resolve_range(&occurrence.range) else {
                continue;
            };
            if let Some(symbol_id) = ids.resolve(&occurrence.symbol) {
                let written = db.insert_reference(&ReferenceRecord {
                    symbol_id,
                    document_id: doc_id,
                    role: Role::from_bitmask(occurrence.symbol_roles),
                    range,
                })?;
                if written {
                    stats.references += 1;
                }
            }
        }
    }

    stats.dropped_references = ids.misses();
    if stats.dropped_references > 0 {
        warn!(
            "Dropped {} references to symbols not loaded this run",
            stats.dropped_references
        );
    }

    // Bulk inserts bypass FTS maintenance; bring the index back in sync.
    db.rebuild_search_index()?;

    stats.elapsed_ms = started.elapsed().as_millis() as u64;
    Ok(stats)
}

/// Change-detection hash for a document: size and mtime of the file on disk,
/// `0:0` when the file is absent. Not a cryptographic hash.
fn content_hash(root: &str, relative_path: &str) -> String {
    let metadata = match fs::metadata(Path::new(root).join(relative_path)) {
        Ok(m) => m,
        Err(_) => return "0:0".to_string(),
    };
    let mtime = metadata
        .modified()
        .ok()
        .and_then(|t| t.duration_since(SystemTime::UNIX_EPOCH).ok())
        .map(|d| d.as_secs())
        .unwrap_or(0);
    format!("{}:{}", metadata.len(), mtime)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_should_skip_dependency_directory() {
        let options = LoadOptions::default();
        assert!(options.should_skip("node_modules/react/index.js"));
        assert!(options.should_skip("packages/app/node_modules/lib/main.ts"));
        assert!(!options.should_skip("src/app.ts"));
    }

    #[test]
    fn test_should_skip_declaration_files() {
        let options = LoadOptions::default();
        assert!(options.should_skip("src/types.d.ts"));
        assert!(!options.should_skip("src/types.ts"));
    }

    #[test]
    fn test_should_skip_unsupported_extension() {
        let options = LoadOptions::default();
        assert!(options.should_skip("README.md"));
        assert!(options.should_skip("assets/logo.svg"));
        assert!(options.should_skip("Makefile"));
        assert!(!options.should_skip("src/deal.tsx"));
    }

    #[test]
    fn test_content_hash_missing_file() {
        assert_eq!(content_hash("/nonexistent", "src/a.ts"), "0:0");
    }

    #[test]
    fn test_content_hash_present_file() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("a.ts"), "const x = 1;").unwrap();
        let hash = content_hash(dir.path().to_str().unwrap(), "a.ts");
        assert!(hash.starts_with("12:"), "unexpected hash {}", hash);
        assert_ne!(hash, "0:0");
    }
}
