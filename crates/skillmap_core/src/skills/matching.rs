//! Case-insensitive technology name matching.
//!
//! Skill records reference technologies by name rather than id, so every
//! join between skills, the catalog and selected filter tags compares
//! names through [`match_key`].

use once_cell::sync::Lazy;
use regex::Regex;

static WHITESPACE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("valid ws regex"));

/// Derives the comparison key for a technology or tag name.
///
/// Trims, collapses inner whitespace runs to one space and lower-cases.
pub fn match_key(name: &str) -> String {
    WHITESPACE_RE.replace_all(name.trim(), " ").to_lowercase()
}

/// Returns whether two names refer to the same technology.
pub fn names_match(left: &str, right: &str) -> bool {
    match_key(left) == match_key(right)
}

#[cfg(test)]
mod tests {
    use super::{match_key, names_match};

    #[test]
    fn matching_is_case_insensitive_and_symmetric() {
        assert!(names_match("REACT", "react"));
        assert!(names_match("react", "REACT"));
        assert!(!names_match("react", "preact"));
    }

    #[test]
    fn match_key_normalizes_whitespace() {
        assert_eq!(match_key("  Node.js "), "node.js");
        assert_eq!(match_key("Google \t Cloud"), "google cloud");
        assert_eq!(match_key("   "), "");
    }
}
