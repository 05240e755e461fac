//! Command implementations for CLI operations

use anyhow::{Context, Result};
use regex::Regex;

use crate::db::Database;
use crate::idmap::SymbolIdMap;
use crate::query::IndexQuery;
use crate::scip::read_index;
use crate::{load_index, LoadOptions};

use super::db_utils::{canonicalize_path, database_path, index_path, open_project_database};

/// Load the project's SCIP index into its SQLite store
pub fn populate_command(path: &str, incremental: bool) -> Result<()> {
    let project_root = canonicalize_path(path)?;
    let index = read_index(index_path(&project_root))?;
    let mut db = open_project_database(&project_root)?;

    let options = LoadOptions {
        root: project_root.clone(),
        incremental,
        ..Default::default()
    };

    let mut ids = SymbolIdMap::new();
    let stats = load_index(&mut db, &index, &options, &mut ids)?;

    println!("\nPopulate complete!");
    println!("  Documents:  {}", stats.documents);
    println!("  Symbols:    {}", stats.symbols);
    println!("  References: {}", stats.references);
    println!("  Skipped:    {}", stats.skipped_documents);
    println!("  Elapsed:    {}ms", stats.elapsed_ms);
    if stats.dropped_references > 0 {
        println!("  Dropped references: {}", stats.dropped_references);
    }

    Ok(())
}

/// Search the in-memory graph for symbols matching a pattern
pub fn search_command(path: &str, pattern: &str, json: bool) -> Result<()> {
    let project_root = canonicalize_path(path)?;
    let index = read_index(index_path(&project_root))?;
    let regex = Regex::new(pattern).context("Invalid search pattern")?;

    let matches = IndexQuery::new(&index).search(&regex);

    if json {
        println!("{}", serde_json::to_string_pretty(&matches)?);
        return Ok(());
    }

    if matches.is_empty() {
        println!("No symbols matching '{}'", pattern);
        return Ok(());
    }

    println!("Found {} symbols matching '{}':\n", matches.len(), pattern);
    for m in matches {
        let marker = if m.external { " (external)" } else { "" };
        println!("  {} {} - {}{}", m.kind.as_str(), m.name, m.path, marker);
    }

    Ok(())
}

/// List every occurrence of an exact symbol identifier
pub fn refs_command(path: &str, symbol: &str, json: bool) -> Result<()> {
    let project_root = canonicalize_path(path)?;
    let index = read_index(index_path(&project_root))?;

    let hits = IndexQuery::new(&index).references(symbol);

    if json {
        println!("{}", serde_json::to_string_pretty(&hits)?);
        return Ok(());
    }

    if hits.is_empty() {
        println!("No occurrences of '{}'", symbol);
        return Ok(());
    }

    println!("{} occurrences of '{}':\n", hits.len(), symbol);
    for hit in hits {
        println!(
            "  {} {}:{}:{}",
            hit.role.as_str(),
            hit.path,
            hit.range.start_line,
            hit.range.start_column
        );
    }

    Ok(())
}

/// Look up the definition of an exact symbol identifier
pub fn def_command(path: &str, symbol: &str, json: bool) -> Result<()> {
    let project_root = canonicalize_path(path)?;
    let index = read_index(index_path(&project_root))?;

    match IndexQuery::new(&index).definition(symbol) {
        Some(hit) => {
            if json {
                println!("{}", serde_json::to_string_pretty(&hit)?);
            } else {
                println!(
                    "{}:{}:{}",
                    hit.path, hit.range.start_line, hit.range.start_column
                );
            }
        }
        // A miss is a result, not an error.
        None => println!("No definition found for '{}'", symbol),
    }

    Ok(())
}

/// Show statistics for the in-memory graph
pub fn stats_command(path: &str) -> Result<()> {
    let project_root = canonicalize_path(path)?;
    let index = read_index(index_path(&project_root))?;
    let stats = IndexQuery::new(&index).stats();

    println!("SCIP Index Statistics");
    println!("=====================");
    println!("Tool: {} {}", stats.tool_name, stats.tool_version);
    println!("Project root: {}", stats.project_root);
    println!("Documents: {}", stats.documents);
    println!("Symbols: {}", stats.symbols);
    println!("Occurrences: {}", stats.occurrences);
    println!("External symbols: {}", stats.external_symbols);

    Ok(())
}

/// Show statistics for the relational store
pub fn status_command(path: &str) -> Result<()> {
    let project_root = canonicalize_path(path)?;
    let db_path = database_path(&project_root);

    if !db_path.exists() {
        println!("No store found at {}", db_path.display());
        println!("Run 'scipdex populate {}' first.", path);
        return Ok(());
    }

    let db = Database::open(&db_path)?;
    let stats = db.get_stats()?;

    println!("scipdex Store Status");
    println!("====================");
    println!("Database: {}", db_path.display());
    println!("Documents: {}", stats.documents);
    println!("Symbols: {}", stats.symbols);
    println!("References: {}", stats.references);
    println!("Indexed files: {}", stats.indexed_files);
    println!("Size: {:.2} KB", stats.db_size_bytes as f64 / 1024.0);
    if stats.orphaned_references > 0 {
        println!("Orphaned references: {}", stats.orphaned_references);
    }

    Ok(())
}

/// Keyword search over stored file contents
pub fn grep_command(path: &str, query: &str) -> Result<()> {
    let project_root = canonicalize_path(path)?;
    let db_path = database_path(&project_root);

    if !db_path.exists() {
        println!("No store found. Run 'scipdex populate' first.");
        return Ok(());
    }

    let db = Database::open(&db_path)?;
    let matches = db.search_text(query, 20)?;

    if matches.is_empty() {
        println!("No files matching '{}'", query);
        return Ok(());
    }

    println!("Found {} files matching '{}':\n", matches.len(), query);
    for m in matches {
        println!("  {}", m.path);
        println!("    {}", m.snippet);
    }

    Ok(())
}
