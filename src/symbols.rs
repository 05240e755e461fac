//! Symbol resolution
//!
//! Pure functions that turn raw SCIP symbol identifiers and range arrays
//! into display names, coarse kinds, and normalized ranges.
//!
//! Identifier format: `<tool> <manager> <package> <version> <path>/<Name>(<signature>)`
//!
//! Everything here is best-effort string work over naming conventions, not
//! semantic analysis. Malformed input degrades to partial extraction; this
//! module never fails.

use crate::types::{Range, SymbolKind};

/// Extract a human-readable display name from a symbol identifier: the
/// trailing path segment of the descriptor, stripped of signature and
/// descriptor markers.
///
/// Malformed identifiers fall back to the nearest extractable piece; worst
/// case, the whole input string.
pub fn display_name(symbol: &str) -> String {
    let descriptor = trailing_descriptor(symbol);
    let segment = descriptor.rsplit('/').next().unwrap_or(descriptor);

    // Drop a trailing signature: `getUser().` -> `getUser`
    let segment = match segment.find('(') {
        Some(0) | None => segment,
        Some(idx) => &segment[..idx],
    };

    let name = segment.trim_end_matches(['#', '.']).trim_matches('`');
    if name.is_empty() {
        symbol.to_string()
    } else {
        name.to_string()
    }
}

/// A single named classification heuristic. Rules are checked in order and
/// the first match wins, so false positives and negatives are visible per
/// rule instead of buried in one regex.
pub struct KindRule {
    pub name: &'static str,
    pub kind: SymbolKind,
    matches: fn(descriptor: &str) -> bool,
}

impl KindRule {
    pub fn applies(&self, descriptor: &str) -> bool {
        (self.matches)(descriptor)
    }
}

/// Classification rules, in precedence order.
pub const KIND_RULES: &[KindRule] = &[
    KindRule {
        name: "method-descriptor",
        kind: SymbolKind::Function,
        matches: |d| d.ends_with("().") || d.ends_with(")."),
    },
    KindRule {
        name: "type-descriptor",
        kind: SymbolKind::Class,
        matches: |d| d.ends_with('#'),
    },
    KindRule {
        name: "namespace-descriptor",
        kind: SymbolKind::Module,
        matches: |d| d.ends_with('/'),
    },
    KindRule {
        name: "term-descriptor",
        kind: SymbolKind::Variable,
        matches: |d| d.ends_with('.'),
    },
    KindRule {
        name: "capitalized-name",
        kind: SymbolKind::Type,
        matches: |d| {
            let name = d.rsplit('/').next().unwrap_or(d).trim_matches('`');
            name.chars().next().is_some_and(|c| c.is_uppercase())
        },
    },
];

/// Run the classification rules over an identifier and report which rule
/// fired. `None` means no rule matched.
pub fn classify(symbol: &str) -> Option<(&'static str, SymbolKind)> {
    let descriptor = trailing_descriptor(symbol);
    KIND_RULES
        .iter()
        .find(|rule| rule.applies(descriptor))
        .map(|rule| (rule.name, rule.kind))
}

/// Coarse kind for a symbol identifier. Unknown when no heuristic applies.
pub fn infer_kind(symbol: &str) -> SymbolKind {
    classify(symbol).map_or(SymbolKind::Unknown, |(_, kind)| kind)
}

/// Normalize SCIP's variable-length range encoding.
///
/// A 3-element array `[L, C1, C2]` is a single-line range; a 4-element array
/// `[L1, C1, L2, C2]` is multi-line. Any other arity is unresolvable.
pub fn resolve_range(range: &[i32]) -> Option<Range> {
    match *range {
        [line, start_column, end_column] => Some(Range {
            start_line: line,
            start_column,
            end_line: line,
            end_column,
        }),
        [start_line, start_column, end_line, end_column] => Some(Range {
            start_line,
            start_column,
            end_line,
            end_column,
        }),
        _ => None,
    }
}

/// Last space-separated token of the identifier; the whole string when the
/// identifier has no package header at all.
fn trailing_descriptor(symbol: &str) -> &str {
    symbol.rsplit(' ').next().unwrap_or(symbol)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_name_method() {
        let sym = "scip-typescript npm atomic-crm 1.0.0 src/providers/`dataProvider.ts`/getUser().";
        assert_eq!(display_name(sym), "getUser");
    }

    #[test]
    fn test_display_name_type() {
        let sym = "scip-typescript npm atomic-crm 1.0.0 src/types.ts/Contact#";
        assert_eq!(display_name(sym), "Contact");
    }

    #[test]
    fn test_display_name_term() {
        let sym = "scip-typescript npm atomic-crm 1.0.0 src/config.ts/defaultStages.";
        assert_eq!(display_name(sym), "defaultStages");
    }

    #[test]
    fn test_display_name_malformed_falls_back() {
        // No spaces, no slashes: best effort is the input itself.
        assert_eq!(display_name("justaname"), "justaname");
        // Nothing extractable: the whole string comes back.
        assert_eq!(display_name("a b c /"), "a b c /");
    }

    #[test]
    fn test_display_name_local_symbol() {
        assert_eq!(display_name("local 42"), "42");
    }

    #[test]
    fn test_classify_named_rules() {
        assert_eq!(
            classify("t n p 1 src/a.ts/save()."),
            Some(("method-descriptor", SymbolKind::Function))
        );
        assert_eq!(
            classify("t n p 1 src/a.ts/User#"),
            Some(("type-descriptor", SymbolKind::Class))
        );
        assert_eq!(
            classify("t n p 1 src/utils/"),
            Some(("namespace-descriptor", SymbolKind::Module))
        );
        assert_eq!(
            classify("t n p 1 src/a.ts/count."),
            Some(("term-descriptor", SymbolKind::Variable))
        );
        assert_eq!(
            classify("t n p 1 src/a.ts/Widget"),
            Some(("capitalized-name", SymbolKind::Type))
        );
        assert_eq!(classify("t n p 1 src/a.ts/lowercase"), None);
    }

    #[test]
    fn test_infer_kind_unknown_without_markers() {
        assert_eq!(infer_kind("t n p 1 src/a.ts/lowercase"), SymbolKind::Unknown);
    }

    #[test]
    fn test_resolve_range_single_line() {
        assert_eq!(
            resolve_range(&[7, 2, 14]),
            Some(Range {
                start_line: 7,
                start_column: 2,
                end_line: 7,
                end_column: 14,
            })
        );
    }

    #[test]
    fn test_resolve_range_multi_line() {
        assert_eq!(
            resolve_range(&[3, 0, 9, 1]),
            Some(Range {
                start_line: 3,
                start_column: 0,
                end_line: 9,
                end_column: 1,
            })
        );
    }

    #[test]
    fn test_resolve_range_invalid_arity() {
        assert_eq!(resolve_range(&[]), None);
        assert_eq!(resolve_range(&[1, 2]), None);
        assert_eq!(resolve_range(&[1, 2, 3, 4, 5]), None);
    }
}
