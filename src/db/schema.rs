//! Database schema definition

pub const SCHEMA: &str = r#"
-- Documents table: one row per indexed source file
CREATE TABLE IF NOT EXISTS documents (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    path TEXT NOT NULL UNIQUE,
    language TEXT NOT NULL,
    content_hash TEXT NOT NULL
);

-- Symbols table: defined entities with a resolvable definition occurrence
CREATE TABLE IF NOT EXISTS symbols (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    document_id INTEGER NOT NULL,
    symbol TEXT NOT NULL UNIQUE,
    name TEXT NOT NULL,
    kind TEXT NOT NULL,
    start_line INTEGER NOT NULL,
    start_column INTEGER NOT NULL,
    end_line INTEGER NOT NULL,
    end_column INTEGER NOT NULL,
    documentation TEXT,
    FOREIGN KEY (document_id) REFERENCES documents(id)
);

-- References table: every occurrence of a loaded symbol.
-- REFERENCES is an SQL keyword, hence the longer table name.
CREATE TABLE IF NOT EXISTS symbol_references (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    symbol_id INTEGER NOT NULL,
    document_id INTEGER NOT NULL,
    role TEXT NOT NULL,
    start_line INTEGER NOT NULL,
    start_column INTEGER NOT NULL,
    end_line INTEGER NOT NULL,
    end_column INTEGER NOT NULL,
    UNIQUE(symbol_id, document_id, role, start_line, start_column),
    FOREIGN KEY (symbol_id) REFERENCES symbols(id),
    FOREIGN KEY (document_id) REFERENCES documents(id)
);

-- Raw file contents backing the full-text index
CREATE TABLE IF NOT EXISTS file_contents (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    path TEXT NOT NULL UNIQUE,
    content TEXT NOT NULL
);

-- External-content FTS index over file contents. Bulk loads bypass its
-- maintenance, so the loader issues an explicit rebuild afterwards.
CREATE VIRTUAL TABLE IF NOT EXISTS file_search USING fts5(
    path,
    content,
    content=file_contents,
    content_rowid=id
);

-- Indexes for efficient queries
CREATE INDEX IF NOT EXISTS idx_symbols_document ON symbols(document_id);
CREATE INDEX IF NOT EXISTS idx_symbols_name ON symbols(name);
CREATE INDEX IF NOT EXISTS idx_refs_symbol ON symbol_references(symbol_id);
CREATE INDEX IF NOT EXISTS idx_refs_document ON symbol_references(document_id);
"#;
