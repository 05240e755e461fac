//! Database module for scipdex
//!
//! Handles SQLite storage for the loaded index:
//! - Schema creation (idempotent batch)
//! - Document / symbol / reference upserts
//! - Full-text index over file contents, rebuilt explicitly after bulk load
//! - Store statistics

mod schema;

use std::path::Path;

use anyhow::Result;
use rusqlite::{params, Connection, OptionalExtension};

use crate::types::{
    DocumentRecord, Range, ReferenceRecord, Role, StoreStats, SymbolKind, SymbolRecord,
};

/// A keyword match from the full-text index.
#[derive(Debug, Clone)]
pub struct TextMatch {
    pub path: String,
    pub snippet: String,
}

/// Handle over the relational store
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Open or create a database at the given path
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let conn = Connection::open(path)?;
        let db = Self { conn };
        db.initialize()?;
        Ok(db)
    }

    /// Create an in-memory database (for testing)
    pub fn in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        let db = Self { conn };
        db.initialize()?;
        Ok(db)
    }

    fn initialize(&self) -> Result<()> {
        self.conn.execute_batch(schema::SCHEMA)?;
        Ok(())
    }

    // =========================================================================
    // Lifecycle
    // =========================================================================

    /// Wipe all loaded data, in dependency order: references, symbols,
    /// documents, full-text.
    pub fn clear_all(&self) -> Result<()> {
        self.conn.execute("DELETE FROM symbol_references", [])?;
        self.conn.execute("DELETE FROM symbols", [])?;
        self.conn.execute("DELETE FROM documents", [])?;
        self.conn.execute("DELETE FROM file_contents", [])?;
        self.rebuild_search_index()?;
        Ok(())
    }

    /// Begin a transaction
    pub fn begin_transaction(&mut self) -> Result<()> {
        self.conn.execute("BEGIN TRANSACTION", [])?;
        Ok(())
    }

    /// Commit a transaction
    pub fn commit(&mut self) -> Result<()> {
        self.conn.execute("COMMIT", [])?;
        Ok(())
    }

    /// Rollback a transaction
    pub fn rollback(&mut self) -> Result<()> {
        self.conn.execute("ROLLBACK", [])?;
        Ok(())
    }

    // =========================================================================
    // Document Operations
    // =========================================================================

    /// Insert a document, replacing any prior row for the same path, and
    /// return its row id.
    pub fn upsert_document(&self, doc: &DocumentRecord) -> Result<i64> {
        self.conn.execute(
            "INSERT OR REPLACE INTO documents (path, language, content_hash) VALUES (?1, ?2, ?3)",
            params![doc.path, doc.language, doc.content_hash],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    /// Get a document record by path
    pub fn get_document(&self, path: &str) -> Result<Option<DocumentRecord>> {
        let result = self
            .conn
            .query_row(
                "SELECT path, language, content_hash FROM documents WHERE path = ?1",
                params![path],
                |row| {
                    Ok(DocumentRecord {
                        path: row.get(0)?,
                        language: row.get(1)?,
                        content_hash: row.get(2)?,
                    })
                },
            )
            .optional()?;
        Ok(result)
    }

    // =========================================================================
    // Symbol Operations
    // =========================================================================

    /// Insert a symbol, replacing any prior row for the same identifier, and
    /// return its row id.
    pub fn upsert_symbol(&self, sym: &SymbolRecord) -> Result<i64> {
        self.conn.execute(
            r#"
            INSERT OR REPLACE INTO symbols (
                document_id, symbol, name, kind,
                start_line, start_column, end_line, end_column, documentation
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)
            "#,
            params![
                sym.document_id,
                sym.symbol,
                sym.name,
                sym.kind.as_str(),
                sym.range.start_line,
                sym.range.start_column,
                sym.range.end_line,
                sym.range.end_column,
                sym.documentation,
            ],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    /// Get a symbol record by its full identifier
    pub fn get_symbol(&self, symbol: &str) -> Result<Option<SymbolRecord>> {
        let result = self
            .conn
            .query_row(
                r#"
                SELECT document_id, symbol, name, kind,
                       start_line, start_column, end_line, end_column, documentation
                FROM symbols WHERE symbol = ?1
                "#,
                params![symbol],
                |row| Self::row_to_symbol(row),
            )
            .optional()?;
        Ok(result)
    }

    /// Search symbols by display name (case-insensitive prefix match)
    pub fn search_symbols(&self, query: &str, limit: u32) -> Result<Vec<SymbolRecord>> {
        let pattern = format!("{}%", query.to_lowercase());
        let mut stmt = self.conn.prepare(
            r#"
            SELECT document_id, symbol, name, kind,
                   start_line, start_column, end_line, end_column, documentation
            FROM symbols
            WHERE LOWER(name) LIKE ?1
            ORDER BY LENGTH(name), name
            LIMIT ?2
            "#,
        )?;
        let rows = stmt.query_map(params![pattern, limit as i64], |row| {
            Self::row_to_symbol(row)
        })?;

        let mut symbols = Vec::new();
        for row in rows {
            symbols.push(row?);
        }
        Ok(symbols)
    }

    fn row_to_symbol(row: &rusqlite::Row) -> rusqlite::Result<SymbolRecord> {
        Ok(SymbolRecord {
            document_id: row.get(0)?,
            symbol: row.get(1)?,
            name: row.get(2)?,
            kind: SymbolKind::from_str(&row.get::<_, String>(3)?).unwrap_or(SymbolKind::Unknown),
            range: Range {
                start_line: row.get(4)?,
                start_column: row.get(5)?,
                end_line: row.get(6)?,
                end_column: row.get(7)?,
            },
            documentation: row.get(8)?,
        })
    }

    // =========================================================================
    // Reference Operations
    // =========================================================================

    /// Insert a reference. Duplicate rows (same symbol, document, role, and
    /// start position) are ignored so incremental reruns stay idempotent.
    /// Returns whether a row was written.
    pub fn insert_reference(&self, reference: &ReferenceRecord) -> Result<bool> {
        let changed = self.conn.execute(
            r#"
            INSERT OR IGNORE INTO symbol_references (
                symbol_id, document_id, role,
                start_line, start_column, end_line, end_column
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
            "#,
            params![
                reference.symbol_id,
                reference.document_id,
                reference.role.as_str(),
                reference.range.start_line,
                reference.range.start_column,
                reference.range.end_line,
                reference.range.end_column,
            ],
        )?;
        Ok(changed > 0)
    }

    /// All stored references for a symbol identifier
    pub fn references_for(&self, symbol: &str) -> Result<Vec<ReferenceRecord>> {
        let mut stmt = self.conn.prepare(
            r#"
            SELECT r.symbol_id, r.document_id, r.role,
                   r.start_line, r.start_column, r.end_line, r.end_column
            FROM symbol_references r
            INNER JOIN symbols s ON s.id = r.symbol_id
            WHERE s.symbol = ?1
            ORDER BY r.document_id, r.start_line
            "#,
        )?;
        let rows = stmt.query_map(params![symbol], |row| {
            Ok(ReferenceRecord {
                symbol_id: row.get(0)?,
                document_id: row.get(1)?,
                role: Role::from_str(&row.get::<_, String>(2)?).unwrap_or(Role::Read),
                range: Range {
                    start_line: row.get(3)?,
                    start_column: row.get(4)?,
                    end_line: row.get(5)?,
                    end_column: row.get(6)?,
                },
            })
        })?;

        let mut refs = Vec::new();
        for row in rows {
            refs.push(row?);
        }
        Ok(refs)
    }

    // =========================================================================
    // Full-text search
    // =========================================================================

    /// Store a file's raw content, replacing any prior row for the path.
    /// The FTS index is not touched here; call `rebuild_search_index` after
    /// the bulk load.
    pub fn upsert_file_content(&self, path: &str, content: &str) -> Result<()> {
        self.conn.execute(
            "INSERT OR REPLACE INTO file_contents (path, content) VALUES (?1, ?2)",
            params![path, content],
        )?;
        Ok(())
    }

    /// Rebuild and optimize the full-text index from the content table.
    /// Required after bulk inserts, which bypass incremental maintenance.
    pub fn rebuild_search_index(&self) -> Result<()> {
        self.conn
            .execute("INSERT INTO file_search(file_search) VALUES('rebuild')", [])?;
        self.conn
            .execute("INSERT INTO file_search(file_search) VALUES('optimize')", [])?;
        Ok(())
    }

    /// Keyword search over stored file contents
    pub fn search_text(&self, query: &str, limit: u32) -> Result<Vec<TextMatch>> {
        if query.trim().is_empty() {
            return Ok(Vec::new());
        }
        let escaped = escape_fts_query(query);

        let mut stmt = self.conn.prepare(
            r#"
            SELECT path, snippet(file_search, 1, '>>', '<<', '...', 8)
            FROM file_search
            WHERE file_search MATCH ?1
            ORDER BY rank
            LIMIT ?2
            "#,
        )?;
        let rows = stmt.query_map(params![escaped, limit as i64], |row| {
            Ok(TextMatch {
                path: row.get(0)?,
                snippet: row.get(1)?,
            })
        })?;

        let mut matches = Vec::new();
        for row in rows {
            matches.push(row?);
        }
        Ok(matches)
    }

    // =========================================================================
    // Statistics
    // =========================================================================

    /// Get store statistics
    pub fn get_stats(&self) -> Result<StoreStats> {
        let documents: u64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM documents", [], |row| row.get(0))?;
        let symbols: u64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM symbols", [], |row| row.get(0))?;
        let references: u64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM symbol_references", [], |row| {
                row.get(0)
            })?;
        let indexed_files: u64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM file_contents", [], |row| row.get(0))?;
        let orphaned_references: u64 = self.conn.query_row(
            r#"
            SELECT COUNT(*) FROM symbol_references r
            LEFT JOIN symbols s ON s.id = r.symbol_id
            WHERE s.id IS NULL
            "#,
            [],
            |row| row.get(0),
        )?;

        let db_size_bytes: u64 = self
            .conn
            .query_row(
                "SELECT page_count * page_size FROM pragma_page_count(), pragma_page_size()",
                [],
                |row| row.get(0),
            )
            .unwrap_or(0);

        Ok(StoreStats {
            documents,
            symbols,
            references,
            indexed_files,
            orphaned_references,
            db_size_bytes,
        })
    }
}

/// Escape an FTS5 query: quote the term as a literal phrase, keeping a
/// trailing `*` outside the quotes so prefix search still works.
fn escape_fts_query(query: &str) -> String {
    let (term, suffix) = if let Some(stripped) = query.strip_suffix('*') {
        (stripped, "*")
    } else {
        (query, "")
    };
    let escaped = term.replace('"', "\"\"");
    format!("\"{}\"{}", escaped, suffix)
}
