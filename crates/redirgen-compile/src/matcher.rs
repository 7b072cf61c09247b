#![deny(unsafe_code)]

//! URL matcher compilation.
//!
//! A request path from the input CSV becomes a boolean expression over
//! `HTTP.REQ.URL.PATH`. Three forms exist:
//!
//! - a trailing `*` produces a case-insensitive prefix match (fallback
//!   rule, evaluated after every specific rule),
//! - the bare root `/` produces an exact equality match,
//! - everything else produces a case-insensitive anchored regex that
//!   tolerates one trailing slash.
//!
//! The query string is never part of the match: `PATH` excludes it, and
//! any `?...` remnant in the input is cut before the expression is built.

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};

use redirgen_model::RuleKind;

/// Percent-encoding set for request paths: everything outside RFC 3986
/// unreserved characters is escaped, except `*` which must stay literal
/// so a trailing wildcard survives encoding.
const PATH_ENCODE_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~')
    .remove(b'*');

/// A compiled path matcher expression and its classification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathMatch {
    pub expr: String,
    pub kind: RuleKind,
}

/// True when a raw request path is a fallback (prefix) rule.
///
/// Only a trailing `*` counts; a wildcard anywhere else is treated as a
/// literal character of a specific rule.
pub fn is_fallback_path(raw: &str) -> bool {
    raw.ends_with('*')
}

/// Percent-encode a raw path, then restore `/` and `?` as literals.
///
/// The decode set is exactly `{%2F -> /, %3F -> ?}`: path separators and
/// the query delimiter keep their structural meaning while every other
/// reserved character stays escaped inside the generated expression.
fn encode_path(raw: &str) -> String {
    utf8_percent_encode(raw, PATH_ENCODE_SET)
        .to_string()
        .replace("%2F", "/")
        .replace("%2f", "/")
        .replace("%3F", "?")
        .replace("%3f", "?")
}

/// Compile a raw request path into a matcher expression.
pub fn compile_path_matcher(raw: &str) -> PathMatch {
    let encoded = encode_path(raw);

    if is_fallback_path(raw) {
        let stripped = encoded.trim_start_matches('/');
        let stripped = stripped.strip_suffix('*').unwrap_or(stripped);
        let prefix = format!("/{}", stripped.to_lowercase());
        return PathMatch {
            expr: format!(
                "HTTP.REQ.URL.PATH.SET_TEXT_MODE(IGNORECASE).STARTSWITH(\"{prefix}\")"
            ),
            kind: RuleKind::Fallback,
        };
    }

    let mut path = format!("/{}", encoded.trim_matches('/').to_lowercase());
    if let Some(pos) = path.find('?') {
        path.truncate(pos);
    }
    if path == "/" {
        return PathMatch {
            expr: "HTTP.REQ.URL.PATH.EQ(\"/\")".to_string(),
            kind: RuleKind::Specific,
        };
    }
    PathMatch {
        expr: format!(
            "HTTP.REQ.URL.PATH.SET_TEXT_MODE(IGNORECASE).REGEX_MATCH(re#^{path}/?$#)"
        ),
        kind: RuleKind::Specific,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_path_compiles_to_anchored_regex() {
        let m = compile_path_matcher("/another-old-path");
        assert_eq!(m.kind, RuleKind::Specific);
        assert_eq!(
            m.expr,
            "HTTP.REQ.URL.PATH.SET_TEXT_MODE(IGNORECASE).REGEX_MATCH(re#^/another-old-path/?$#)"
        );
    }

    #[test]
    fn trailing_wildcard_compiles_to_prefix_match() {
        let m = compile_path_matcher("/some-old-path/*");
        assert_eq!(m.kind, RuleKind::Fallback);
        assert_eq!(
            m.expr,
            "HTTP.REQ.URL.PATH.SET_TEXT_MODE(IGNORECASE).STARTSWITH(\"/some-old-path/\")"
        );
    }

    #[test]
    fn root_path_is_exact_match_never_regex() {
        for raw in ["/", "", "//", "/?utm=x"] {
            let m = compile_path_matcher(raw);
            assert_eq!(m.kind, RuleKind::Specific, "input {raw:?}");
            assert_eq!(m.expr, "HTTP.REQ.URL.PATH.EQ(\"/\")", "input {raw:?}");
        }
    }

    #[test]
    fn query_string_is_ignored_for_specific_rules() {
        let with_query = compile_path_matcher("/path?x=1&y=2");
        let without = compile_path_matcher("/path");
        assert_eq!(with_query, without);
    }

    #[test]
    fn path_is_lowercased() {
        let m = compile_path_matcher("/Some/OLD/Path");
        assert!(m.expr.contains("^/some/old/path/?$"), "expr: {}", m.expr);
    }

    #[test]
    fn wildcard_mid_string_stays_specific() {
        let m = compile_path_matcher("/a*b");
        assert_eq!(m.kind, RuleKind::Specific);
        assert!(m.expr.contains("^/a*b/?$"), "expr: {}", m.expr);
    }

    #[test]
    fn reserved_characters_stay_encoded() {
        let m = compile_path_matcher("/a b(c)");
        assert!(m.expr.contains("/a%20b%28c%29"), "expr: {}", m.expr);
    }

    #[test]
    fn slashes_survive_encoding() {
        let m = compile_path_matcher("/a/b/c");
        assert!(m.expr.contains("^/a/b/c/?$"), "expr: {}", m.expr);
    }

    #[test]
    fn fallback_without_leading_slash_gets_one() {
        let m = compile_path_matcher("docs/*");
        assert!(m.expr.contains("STARTSWITH(\"/docs/\")"), "expr: {}", m.expr);
    }

    #[test]
    fn bare_wildcard_matches_everything_under_root() {
        let m = compile_path_matcher("*");
        assert_eq!(m.kind, RuleKind::Fallback);
        assert!(m.expr.contains("STARTSWITH(\"/\")"), "expr: {}", m.expr);
    }
}
