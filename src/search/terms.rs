// src/search/terms.rs
// =============================================================================
// Splits raw search-bar text into keyword terms and user-scoped terms.
//
// Input like "swift user:techtierra" becomes:
//   keywords: ["swift"]
//   users:    ["techtierra"]
//
// Tokens are whitespace separated. A token is a user term when it matches
// `^user:(\S+)$` (case-insensitive). A bare "user:" has nothing to capture
// and is dropped instead of being searched for literally.
// =============================================================================

use regex::Regex;
use std::sync::OnceLock;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchTerms {
    pub keywords: Vec<String>,
    pub users: Vec<String>,
}

impl SearchTerms {
    pub fn is_empty(&self) -> bool {
        self.keywords.is_empty() && self.users.is_empty()
    }

    pub fn clear(&mut self) {
        self.keywords.clear();
        self.users.clear();
    }
}

fn user_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    // The pattern is a constant, so compiling it can't fail at runtime
    PATTERN.get_or_init(|| Regex::new(r"(?i)^user:(\S+)$").expect("valid user pattern"))
}

fn is_empty_user_token(token: &str) -> bool {
    token.eq_ignore_ascii_case("user:")
}

// Parses the raw search-bar text
pub fn parse_terms(raw: &str) -> SearchTerms {
    let mut terms = SearchTerms::default();

    for token in raw.split_whitespace() {
        if let Some(captures) = user_pattern().captures(token) {
            terms.users.push(captures[1].to_string());
        } else if is_empty_user_token(token) {
            tracing::debug!("dropping empty user: token");
        } else {
            terms.keywords.push(token.to_string());
        }
    }

    terms
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keyword_and_user() {
        let terms = parse_terms("swift user:techtierra");
        assert_eq!(terms.keywords, vec!["swift"]);
        assert_eq!(terms.users, vec!["techtierra"]);
    }

    #[test]
    fn test_empty_input() {
        let terms = parse_terms("");
        assert!(terms.is_empty());

        let terms = parse_terms("   \t ");
        assert!(terms.is_empty());
    }

    #[test]
    fn test_user_prefix_is_case_insensitive() {
        let terms = parse_terms("USER:Octocat User:rust-lang");
        assert_eq!(terms.users, vec!["Octocat", "rust-lang"]);
        assert!(terms.keywords.is_empty());
    }

    #[test]
    fn test_empty_user_token_is_dropped() {
        let terms = parse_terms("http user: USER:");
        assert_eq!(terms.keywords, vec!["http"]);
        assert!(terms.users.is_empty());
    }

    #[test]
    fn test_user_inside_word_is_keyword() {
        let terms = parse_terms("superuser:bob");
        assert_eq!(terms.keywords, vec!["superuser:bob"]);
        assert!(terms.users.is_empty());
    }

    #[test]
    fn test_tokens_partition_without_loss() {
        let raw = "async  user:tokio-rs runtime\tuser:a:b  user: web";
        let terms = parse_terms(raw);

        let kept: Vec<&str> = raw
            .split_whitespace()
            .filter(|t| !t.eq_ignore_ascii_case("user:"))
            .collect();

        assert_eq!(terms.keywords.len() + terms.users.len(), kept.len());
        for keyword in &terms.keywords {
            assert!(!terms.users.contains(keyword));
        }
        assert_eq!(terms.keywords, vec!["async", "runtime", "web"]);
        assert_eq!(terms.users, vec!["tokio-rs", "a:b"]);
    }

    #[test]
    fn test_order_is_preserved() {
        let terms = parse_terms("c b a user:z user:y");
        assert_eq!(terms.keywords, vec!["c", "b", "a"]);
        assert_eq!(terms.users, vec!["z", "y"]);
    }
}
