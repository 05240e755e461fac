//! CLI command implementations
//!
//! Handles all command-line interface operations:
//! - populate: Load a SCIP index into the store
//! - search / refs / def / stats: Query the in-memory graph
//! - status / grep: Query the relational store

mod commands;
mod db_utils;

pub use commands::*;
pub use db_utils::*;
