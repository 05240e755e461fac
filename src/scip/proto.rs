//! SCIP wire types
//!
//! Hand-declared prost messages covering the subset of the SCIP protobuf
//! schema this tool consumes. Field tags match `scip.proto`, so fields we do
//! not model (relationships, diagnostics, position encodings, ...) are
//! skipped by the decoder rather than rejected.

/// A complete SCIP index: metadata plus one document per indexed file, plus
/// symbols contributed by external packages.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Index {
    #[prost(message, optional, tag = "1")]
    pub metadata: Option<Metadata>,
    #[prost(message, repeated, tag = "2")]
    pub documents: Vec<Document>,
    #[prost(message, repeated, tag = "3")]
    pub external_symbols: Vec<SymbolInformation>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Metadata {
    #[prost(int32, tag = "1")]
    pub version: i32,
    #[prost(message, optional, tag = "2")]
    pub tool_info: Option<ToolInfo>,
    #[prost(string, tag = "3")]
    pub project_root: String,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ToolInfo {
    #[prost(string, tag = "1")]
    pub name: String,
    #[prost(string, tag = "2")]
    pub version: String,
    #[prost(string, repeated, tag = "3")]
    pub arguments: Vec<String>,
}

/// One indexed source file: its symbol definitions and every occurrence of
/// any symbol within it.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Document {
    #[prost(string, tag = "1")]
    pub relative_path: String,
    #[prost(message, repeated, tag = "2")]
    pub occurrences: Vec<Occurrence>,
    #[prost(message, repeated, tag = "3")]
    pub symbols: Vec<SymbolInformation>,
    #[prost(string, tag = "4")]
    pub language: String,
}

/// Information about a symbol defined in a document (or, for
/// `external_symbols`, in a dependency package).
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct SymbolInformation {
    /// Fully-qualified symbol identifier, format:
    /// `<tool> <manager> <package> <version> <path>/<Name>(<signature>)`
    #[prost(string, tag = "1")]
    pub symbol: String,
    #[prost(string, repeated, tag = "3")]
    pub documentation: Vec<String>,
    #[prost(string, tag = "6")]
    pub display_name: String,
}

/// A single use of a symbol at a source range.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Occurrence {
    /// Variable-length range encoding: `[line, start_col, end_col]` for
    /// single-line ranges, `[start_line, start_col, end_line, end_col]` for
    /// multi-line ranges.
    #[prost(int32, repeated, tag = "1")]
    pub range: Vec<i32>,
    #[prost(string, tag = "2")]
    pub symbol: String,
    /// Bitmask of role flags; see the `ROLE_*` constants in `crate::types`.
    #[prost(int32, tag = "3")]
    pub symbol_roles: i32,
}
