//! Query façade over the in-memory index graph
//!
//! Pure reads against a decoded [`Index`]: pattern search, reference and
//! definition lookup, and aggregate statistics. The graph is treated as
//! immutable after decode, so these can run repeatedly and concurrently
//! without interference.

use regex::Regex;
use serde::Serialize;

use crate::scip::Index;
use crate::symbols::{display_name, infer_kind, resolve_range};
use crate::types::{GraphStats, Range, Role, SymbolKind, ROLE_DEFINITION};

/// Placeholder document path reported for symbols contributed by external
/// dependency packages, which have no file location in the indexed set.
pub const EXTERNAL_DOCUMENT: &str = "<external>";

/// A symbol whose identifier matched a search pattern.
#[derive(Debug, Clone, Serialize)]
pub struct SymbolMatch {
    pub symbol: String,
    pub name: String,
    pub kind: SymbolKind,
    pub path: String,
    pub external: bool,
}

/// One occurrence of a symbol, annotated with its document and resolved range.
#[derive(Debug, Clone, Serialize)]
pub struct OccurrenceHit {
    pub path: String,
    pub role: Role,
    pub range: Range,
}

/// Read-only queries over a loaded index graph.
pub struct IndexQuery<'a> {
    index: &'a Index,
}

impl<'a> IndexQuery<'a> {
    pub fn new(index: &'a Index) -> Self {
        Self { index }
    }

    /// Every symbol whose identifier matches the pattern, including symbols
    /// contributed by external packages (reported under a placeholder path).
    pub fn search(&self, pattern: &Regex) -> Vec<SymbolMatch> {
        let mut matches = Vec::new();

        for doc in &self.index.documents {
            for info in &doc.symbols {
                if pattern.is_match(&info.symbol) {
                    matches.push(SymbolMatch {
                        symbol: info.symbol.clone(),
                        name: display_name(&info.symbol),
                        kind: infer_kind(&info.symbol),
                        path: doc.relative_path.clone(),
                        external: false,
                    });
                }
            }
        }

        for info in &self.index.external_symbols {
            if pattern.is_match(&info.symbol) {
                matches.push(SymbolMatch {
                    symbol: info.symbol.clone(),
                    name: display_name(&info.symbol),
                    kind: infer_kind(&info.symbol),
                    path: EXTERNAL_DOCUMENT.to_string(),
                    external: true,
                });
            }
        }

        matches
    }

    /// Every occurrence of an exact symbol identifier across all documents.
    /// No role filtering; callers distinguish by role themselves.
    pub fn references(&self, symbol: &str) -> Vec<OccurrenceHit> {
        let mut hits = Vec::new();
        for doc in &self.index.documents {
            for occurrence in &doc.occurrences {
                if occurrence.symbol != symbol {
                    continue;
                }
                let Some(range) = resolve_range(&occurrence.range) else {
                    continue;
                };
                hits.push(OccurrenceHit {
                    path: doc.relative_path.clone(),
                    role: Role::from_bitmask(occurrence.symbol_roles),
                    range,
                });
            }
        }
        hits
    }

    /// First occurrence across all documents whose role bitmask includes the
    /// Definition bit. `None` when the symbol has no definition in the
    /// indexed set; that is a result, not an error.
    pub fn definition(&self, symbol: &str) -> Option<OccurrenceHit> {
        for doc in &self.index.documents {
            for occurrence in &doc.occurrences {
                if occurrence.symbol == symbol && occurrence.symbol_roles & ROLE_DEFINITION != 0 {
                    if let Some(range) = resolve_range(&occurrence.range) {
                        return Some(OccurrenceHit {
                            path: doc.relative_path.clone(),
                            role: Role::Definition,
                            range,
                        });
                    }
                }
            }
        }
        None
    }

    /// Aggregate counts plus index metadata, for diagnostics.
    pub fn stats(&self) -> GraphStats {
        let metadata = self.index.metadata.as_ref();
        let tool = metadata.and_then(|m| m.tool_info.as_ref());
        GraphStats {
            documents: self.index.documents.len(),
            symbols: self
                .index
                .documents
                .iter()
                .map(|d| d.symbols.len())
                .sum(),
            occurrences: self
                .index
                .documents
                .iter()
                .map(|d| d.occurrences.len())
                .sum(),
            external_symbols: self.index.external_symbols.len(),
            tool_name: tool.map(|t| t.name.clone()).unwrap_or_default(),
            tool_version: tool.map(|t| t.version.clone()).unwrap_or_default(),
            project_root: metadata.map(|m| m.project_root.clone()).unwrap_or_default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scip::{Document, Metadata, Occurrence, SymbolInformation, ToolInfo};
    use crate::types::{ROLE_READ_ACCESS, ROLE_WRITE_ACCESS};

    fn sample_index() -> Index {
        Index {
            metadata: Some(Metadata {
                version: 1,
                tool_info: Some(ToolInfo {
                    name: "scip-typescript".to_string(),
                    version: "0.3.0".to_string(),
                    arguments: vec![],
                }),
                project_root: "file:///work/crm".to_string(),
            }),
            documents: vec![
                Document {
                    relative_path: "src/deals.ts".to_string(),
                    language: "typescript".to_string(),
                    symbols: vec![SymbolInformation {
                        symbol: "t n crm 1 src/deals.ts/closeDeal().".to_string(),
                        documentation: vec![],
                        display_name: String::new(),
                    }],
                    occurrences: vec![
                        Occurrence {
                            range: vec![2, 9, 18],
                            symbol: "t n crm 1 src/deals.ts/closeDeal().".to_string(),
                            symbol_roles: ROLE_DEFINITION,
                        },
                        Occurrence {
                            range: vec![10, 4, 13],
                            symbol: "t n crm 1 src/deals.ts/closeDeal().".to_string(),
                            symbol_roles: ROLE_WRITE_ACCESS,
                        },
                    ],
                },
                Document {
                    relative_path: "src/board.tsx".to_string(),
                    language: "typescript".to_string(),
                    symbols: vec![],
                    occurrences: vec![Occurrence {
                        range: vec![5, 2, 11],
                        symbol: "t n crm 1 src/deals.ts/closeDeal().".to_string(),
                        symbol_roles: ROLE_READ_ACCESS,
                    }],
                },
            ],
            external_symbols: vec![SymbolInformation {
                symbol: "t npm react 18.0.0 src/`React.ts`/useState().".to_string(),
                documentation: vec![],
                display_name: String::new(),
            }],
        }
    }

    #[test]
    fn test_search_includes_external_with_placeholder_path() {
        let index = sample_index();
        let query = IndexQuery::new(&index);
        let matches = query.search(&Regex::new("useState").unwrap());

        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].path, EXTERNAL_DOCUMENT);
        assert!(matches[0].external);
        assert_eq!(matches[0].name, "useState");
    }

    #[test]
    fn test_search_local_symbols() {
        let index = sample_index();
        let query = IndexQuery::new(&index);
        let matches = query.search(&Regex::new("closeDeal").unwrap());

        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].path, "src/deals.ts");
        assert!(!matches[0].external);
        assert_eq!(matches[0].kind, SymbolKind::Function);
    }

    #[test]
    fn test_references_span_documents_without_role_filter() {
        let index = sample_index();
        let query = IndexQuery::new(&index);
        let hits = query.references("t n crm 1 src/deals.ts/closeDeal().");

        assert_eq!(hits.len(), 3);
        let roles: Vec<Role> = hits.iter().map(|h| h.role).collect();
        assert!(roles.contains(&Role::Definition));
        assert!(roles.contains(&Role::Write));
        assert!(roles.contains(&Role::Read));
        assert!(hits.iter().any(|h| h.path == "src/board.tsx"));
    }

    #[test]
    fn test_definition_found() {
        let index = sample_index();
        let query = IndexQuery::new(&index);
        let def = query
            .definition("t n crm 1 src/deals.ts/closeDeal().")
            .unwrap();

        assert_eq!(def.path, "src/deals.ts");
        assert_eq!(def.role, Role::Definition);
        assert_eq!(def.range.start_line, 2);
        assert_eq!(def.range.end_column, 18);
    }

    #[test]
    fn test_definition_miss_is_none_not_error() {
        let index = sample_index();
        let query = IndexQuery::new(&index);
        assert!(query.definition("t n crm 1 src/gone.ts/missing().").is_none());
    }

    #[test]
    fn test_stats() {
        let index = sample_index();
        let stats = IndexQuery::new(&index).stats();

        assert_eq!(stats.documents, 2);
        assert_eq!(stats.symbols, 1);
        assert_eq!(stats.occurrences, 3);
        assert_eq!(stats.external_symbols, 1);
        assert_eq!(stats.tool_name, "scip-typescript");
        assert_eq!(stats.project_root, "file:///work/crm");
    }
}
