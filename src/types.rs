//! Core type definitions for scipdex
//!
//! Defines the shared vocabulary of the pipeline:
//! - Roles: how an occurrence uses a symbol (definition, import, write, read)
//! - SymbolKind: coarse, heuristic classification of symbols
//! - Range: normalized source location
//! - Record types for the relational store

use serde::{Deserialize, Serialize};

/// SCIP symbol role bitmask values (subset consumed here)
pub const ROLE_DEFINITION: i32 = 0x1;
pub const ROLE_IMPORT: i32 = 0x2;
pub const ROLE_WRITE_ACCESS: i32 = 0x4;
pub const ROLE_READ_ACCESS: i32 = 0x8;

/// How an occurrence uses its symbol. Mutually exclusive; derived from the
/// occurrence's role bitmask by precedence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Definition,
    Import,
    Write,
    Read,
}

impl Role {
    /// Collapse a role bitmask to a single role.
    ///
    /// Precedence: Definition, then Import, then WriteAccess, else ReadAccess.
    pub fn from_bitmask(roles: i32) -> Self {
        if roles & ROLE_DEFINITION != 0 {
            Role::Definition
        } else if roles & ROLE_IMPORT != 0 {
            Role::Import
        } else if roles & ROLE_WRITE_ACCESS != 0 {
            Role::Write
        } else {
            Role::Read
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Definition => "definition",
            Role::Import => "import",
            Role::Write => "write",
            Role::Read => "read",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "definition" => Some(Role::Definition),
            "import" => Some(Role::Import),
            "write" => Some(Role::Write),
            "read" => Some(Role::Read),
            _ => None,
        }
    }
}

/// Coarse symbol classification, inferred from identifier markers.
///
/// This is intentionally approximate: it comes from string heuristics over
/// the symbol identifier, not from semantic analysis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SymbolKind {
    Function,
    Class,
    Type,
    Module,
    Variable,
    Unknown,
}

impl SymbolKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            SymbolKind::Function => "function",
            SymbolKind::Class => "class",
            SymbolKind::Type => "type",
            SymbolKind::Module => "module",
            SymbolKind::Variable => "variable",
            SymbolKind::Unknown => "unknown",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "function" => Some(SymbolKind::Function),
            "class" => Some(SymbolKind::Class),
            "type" => Some(SymbolKind::Type),
            "module" => Some(SymbolKind::Module),
            "variable" => Some(SymbolKind::Variable),
            "unknown" => Some(SymbolKind::Unknown),
            _ => None,
        }
    }
}

/// A normalized source range. All four fields are always present; consumers
/// rely on that.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Range {
    pub start_line: i32,
    pub start_column: i32,
    pub end_line: i32,
    pub end_column: i32,
}

/// A document row: one per indexed source file that survives filtering.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentRecord {
    pub path: String,
    pub language: String,
    /// Size + mtime of the file on disk, for change detection. Not a
    /// cryptographic hash.
    pub content_hash: String,
}

/// A symbol row: one per defined entity with a resolvable definition
/// occurrence in its document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SymbolRecord {
    pub document_id: i64,
    /// Opaque fully-qualified identifier from the index format.
    pub symbol: String,
    pub name: String,
    pub kind: SymbolKind,
    pub range: Range,
    pub documentation: Option<String>,
}

/// A reference row: one per occurrence whose symbol resolved to a loaded
/// symbol row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReferenceRecord {
    pub symbol_id: i64,
    pub document_id: i64,
    pub role: Role,
    pub range: Range,
}

/// Row counts and size of the relational store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreStats {
    pub documents: u64,
    pub symbols: u64,
    pub references: u64,
    pub indexed_files: u64,
    /// References whose symbol row no longer exists. Integrity rests on the
    /// loader's skip-if-unresolved policy, not a database constraint, so
    /// this is surfaced as a health diagnostic.
    pub orphaned_references: u64,
    pub db_size_bytes: u64,
}

/// Aggregate statistics over the in-memory graph, for diagnostics.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GraphStats {
    pub documents: usize,
    pub symbols: usize,
    pub occurrences: usize,
    pub external_symbols: usize,
    pub tool_name: String,
    pub tool_version: String,
    pub project_root: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_precedence_definition_wins() {
        // Definition beats every other bit, in precedence order.
        assert_eq!(
            Role::from_bitmask(ROLE_DEFINITION | ROLE_WRITE_ACCESS),
            Role::Definition
        );
        assert_eq!(
            Role::from_bitmask(ROLE_DEFINITION | ROLE_IMPORT | ROLE_READ_ACCESS),
            Role::Definition
        );
    }

    #[test]
    fn test_role_precedence_order() {
        assert_eq!(
            Role::from_bitmask(ROLE_IMPORT | ROLE_WRITE_ACCESS | ROLE_READ_ACCESS),
            Role::Import
        );
        assert_eq!(
            Role::from_bitmask(ROLE_WRITE_ACCESS | ROLE_READ_ACCESS),
            Role::Write
        );
        assert_eq!(Role::from_bitmask(ROLE_READ_ACCESS), Role::Read);
        // No bits set still degrades to a read.
        assert_eq!(Role::from_bitmask(0), Role::Read);
    }

    #[test]
    fn test_role_roundtrip() {
        for role in [Role::Definition, Role::Import, Role::Write, Role::Read] {
            assert_eq!(Role::from_str(role.as_str()), Some(role));
        }
        assert_eq!(Role::from_str("invalid"), None);
    }

    #[test]
    fn test_symbol_kind_roundtrip() {
        let kinds = [
            SymbolKind::Function,
            SymbolKind::Class,
            SymbolKind::Type,
            SymbolKind::Module,
            SymbolKind::Variable,
            SymbolKind::Unknown,
        ];
        for kind in kinds {
            assert_eq!(SymbolKind::from_str(kind.as_str()), Some(kind));
        }
        assert_eq!(SymbolKind::from_str(""), None);
    }

    #[test]
    fn test_role_serialization() {
        let json = serde_json::to_string(&Role::Definition).unwrap();
        assert_eq!(json, "\"definition\"");
        let parsed: Role = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, Role::Definition);
    }
}
