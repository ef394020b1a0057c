// src/results/filter.rs
// =============================================================================
// Live filtering of already-fetched results.
//
// As the user types, the text is compiled as a case-insensitive pattern and
// tested against each repository's name, owner login and description. A
// repository stays if any of the three fields matches. Nothing here touches
// the network, and the input list is never modified.
//
// The text is passed straight through as a regular expression, so input
// like "(" is invalid. That comes back as FilterPatternError and the caller
// keeps showing whatever it showed before.
// =============================================================================

use crate::error::{Result, SearchError};
use crate::github::Repository;
use regex::{Regex, RegexBuilder};

// Filters `full` by `query_text`, preserving order
//
// Empty text returns the full list unchanged.
pub fn apply(full: &[Repository], query_text: &str) -> Result<Vec<Repository>> {
    if query_text.is_empty() {
        return Ok(full.to_vec());
    }

    let pattern = compile(query_text)?;

    Ok(full
        .iter()
        .filter(|repo| match_count(&pattern, repo) > 0)
        .cloned()
        .collect())
}

fn compile(query_text: &str) -> Result<Regex> {
    RegexBuilder::new(query_text)
        .case_insensitive(true)
        .build()
        .map_err(|e| SearchError::FilterPatternError(e.to_string()))
}

// Matches across name, owner and description; a missing description counts as ""
fn match_count(pattern: &Regex, repo: &Repository) -> usize {
    [
        Some(repo.name.as_str()),
        Some(repo.owner_login.as_str()),
        repo.description.as_deref(),
    ]
    .into_iter()
    .flatten()
    .map(|field| pattern.find_iter(field).count())
    .sum()
}

// -----------------------------------------------------------------------------
// NOTES:
//
// 1. Why .cloned() instead of returning references?
//    - The filtered list outlives the borrow of `full`: the store keeps it
//      as its displayed list while the canonical list keeps growing
//    - Repository is small (a handful of Strings), so copies are cheap
//
// 2. Why flatten() on an array of Options?
//    - Option implements IntoIterator (Some = one item, None = zero items)
//    - flatten() drops the None entries, so a missing description simply
//      contributes no matches
// -----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Vec<Repository> {
        vec![
            Repository::new("alpha-cli", "ann"),
            Repository::new("beta", "bob").with_description("Nothing to see"),
            Repository::new("gamma-cli", "cat"),
        ]
    }

    fn names(repos: &[Repository]) -> Vec<&str> {
        repos.iter().map(|r| r.name.as_str()).collect()
    }

    #[test]
    fn test_substring_match_preserves_order() {
        let filtered = apply(&sample(), "cli").unwrap();
        assert_eq!(names(&filtered), vec!["alpha-cli", "gamma-cli"]);
    }

    #[test]
    fn test_empty_text_is_identity() {
        let list = sample();
        assert_eq!(apply(&list, "").unwrap(), list);
        assert!(apply(&[], "").unwrap().is_empty());
    }

    #[test]
    fn test_case_insensitive_on_owner_and_description() {
        let list = sample();
        assert_eq!(names(&apply(&list, "BOB").unwrap()), vec!["beta"]);
        assert_eq!(names(&apply(&list, "see").unwrap()), vec!["beta"]);
    }

    #[test]
    fn test_missing_description_never_matches() {
        let list = vec![Repository::new("x", "y")];
        assert!(apply(&list, "anything").unwrap().is_empty());
    }

    #[test]
    fn test_idempotent() {
        let list = sample();
        for text in ["cli", "a", "zzz", "^b"] {
            let once = apply(&list, text).unwrap();
            let twice = apply(&once, text).unwrap();
            assert_eq!(once, twice, "filtering twice with {:?} changed the result", text);
        }
    }

    #[test]
    fn test_invalid_pattern_is_an_error() {
        let err = apply(&sample(), "(unclosed").unwrap_err();
        assert!(matches!(err, SearchError::FilterPatternError(_)));
    }

    #[test]
    fn test_input_not_mutated() {
        let list = sample();
        let before = list.clone();
        let _ = apply(&list, "gamma");
        assert_eq!(list, before);
    }
}
