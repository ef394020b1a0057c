// src/search/query.rs
// =============================================================================
// Builds the repository search query and the request URL for one page.
//
// A query is made of:
// - keyword terms, matched by GitHub against names/descriptions
// - user terms, which restrict results to one owner each
// - qualifiers: key:value constraints (stars, language, user)
//
// Qualifiers come from the stored FilterPreferences and from the user terms.
// The final `q` parameter looks like:
//
//   http stars:>=50 language:Go language:Rust user:octocat
//
// Rust concepts:
// - url::Url: proper query-string encoding instead of string concatenation
// - FromStr: lets clap (or anyone) parse a SortField from text
// =============================================================================

use crate::error::{Result, SearchError};
use crate::prefs::FilterPreferences;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use url::Url;

pub const STARS: &str = "stars";
pub const LANGUAGE: &str = "language";
pub const USER: &str = "user";

// One key:value constraint
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Qualifier {
    pub key: String,
    pub value: String,
}

impl Qualifier {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

// Renders the qualifier the way the search syntax expects it.
// The star threshold is a lower bound, hence `>=`.
impl fmt::Display for Qualifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.key == STARS {
            write!(f, "{}:>={}", self.key, self.value)
        } else {
            write!(f, "{}:{}", self.key, self.value)
        }
    }
}

/// Result ordering supported by the search endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SortField {
    Stars,
    Forks,
    HelpWantedIssues,
    Updated,
}

impl SortField {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortField::Stars => "stars",
            SortField::Forks => "forks",
            SortField::HelpWantedIssues => "help-wanted-issues",
            SortField::Updated => "updated",
        }
    }
}

impl FromStr for SortField {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "stars" => Ok(SortField::Stars),
            "forks" => Ok(SortField::Forks),
            "help-wanted-issues" => Ok(SortField::HelpWantedIssues),
            "updated" => Ok(SortField::Updated),
            other => Err(format!(
                "unknown sort field '{}' (expected stars, forks, help-wanted-issues or updated)",
                other
            )),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchQuery {
    keywords: Vec<String>,
    users: Vec<String>,
    qualifiers: Vec<Qualifier>,
}

impl SearchQuery {
    pub fn keywords(&self) -> &[String] {
        &self.keywords
    }

    pub fn users(&self) -> &[String] {
        &self.users
    }

    pub fn qualifiers(&self) -> &[Qualifier] {
        &self.qualifiers
    }

    /// Adds a qualifier unless the same key:value pair is already present.
    /// Returns true when it was added.
    pub fn add_qualifier(&mut self, qualifier: Qualifier) -> bool {
        if self.qualifiers.contains(&qualifier) {
            return false;
        }
        self.qualifiers.push(qualifier);
        true
    }

    pub fn is_unfiltered(&self) -> bool {
        self.keywords.is_empty() && self.qualifiers.is_empty()
    }

    // The value of the `q` parameter: keywords first, then qualifiers
    pub fn to_query_string(&self) -> String {
        self.keywords
            .iter()
            .cloned()
            .chain(self.qualifiers.iter().map(Qualifier::to_string))
            .collect::<Vec<_>>()
            .join(" ")
    }

    // Builds `<base>?q=...&page=N[&sort=...]`
    //
    // Any query string already on `base` is replaced.
    pub fn request_url(&self, base: &str, page: u32, sort: Option<SortField>) -> Result<Url> {
        if page == 0 {
            return Err(SearchError::MalformedQuery(
                "page numbers start at 1".to_string(),
            ));
        }

        let mut url = Url::parse(base)?;

        if !matches!(url.scheme(), "http" | "https") || url.cannot_be_a_base() {
            return Err(SearchError::MalformedQuery(format!(
                "search endpoint must be an http(s) URL: {}",
                base
            )));
        }

        {
            let mut pairs = url.query_pairs_mut();
            pairs.clear();
            pairs.append_pair("q", &self.to_query_string());
            pairs.append_pair("page", &page.to_string());
            if let Some(sort) = sort {
                pairs.append_pair("sort", sort.as_str());
            }
        }

        Ok(url)
    }
}

// Combines terms and preferences into a query
//
// - min_stars > 0            -> stars qualifier
// - language filter enabled  -> one language qualifier per selected language
//                               (none selected means no language constraint)
// - every user term          -> user qualifier
pub fn build_query(
    keywords: &[String],
    users: &[String],
    preferences: &FilterPreferences,
) -> SearchQuery {
    let mut query = SearchQuery {
        keywords: keywords.to_vec(),
        users: users.to_vec(),
        qualifiers: Vec::new(),
    };

    if preferences.min_stars > 0 {
        query.add_qualifier(Qualifier::new(STARS, preferences.min_stars.to_string()));
    }

    for language in preferences.active_languages() {
        query.add_qualifier(Qualifier::new(LANGUAGE, language));
    }

    for user in users {
        query.add_qualifier(Qualifier::new(USER, user.as_str()));
    }

    tracing::debug!(
        keywords = ?query.keywords,
        qualifiers = %query
            .qualifiers
            .iter()
            .map(Qualifier::to_string)
            .collect::<Vec<_>>()
            .join(", "),
        "built search query"
    );

    query
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DEFAULT_API_BASE;

    fn strings(values: &[&str]) -> Vec<String> {
        values.iter().map(|s| s.to_string()).collect()
    }

    fn prefs(min_stars: u32, enabled: bool, languages: &[&str]) -> FilterPreferences {
        FilterPreferences {
            min_stars,
            language_filter_enabled: enabled,
            selected_languages: languages.iter().map(|s| s.to_string()).collect(),
        }
    }

    #[test]
    fn test_stars_and_languages() {
        let query = build_query(&strings(&["http"]), &[], &prefs(50, true, &["Go", "Rust"]));

        assert_eq!(query.keywords(), &["http".to_string()]);
        assert!(query.qualifiers().contains(&Qualifier::new("stars", "50")));
        assert!(query.qualifiers().contains(&Qualifier::new("language", "Go")));
        assert!(query.qualifiers().contains(&Qualifier::new("language", "Rust")));
        assert_eq!(query.qualifiers().len(), 3);
        assert_eq!(
            query.to_query_string(),
            "http stars:>=50 language:Go language:Rust"
        );
    }

    #[test]
    fn test_language_filter_disabled_emits_nothing() {
        let query = build_query(&[], &[], &prefs(0, false, &["Go"]));
        assert!(query.qualifiers().is_empty());
    }

    #[test]
    fn test_language_filter_enabled_but_empty() {
        let query = build_query(&strings(&["web"]), &[], &prefs(0, true, &[]));
        assert!(query.qualifiers().is_empty());
        assert_eq!(query.to_query_string(), "web");
    }

    #[test]
    fn test_user_terms_become_qualifiers_once() {
        let query = build_query(
            &[],
            &strings(&["octocat", "octocat", "rust-lang"]),
            &FilterPreferences::default(),
        );

        assert_eq!(query.users().len(), 3);
        assert_eq!(
            query.qualifiers(),
            &[
                Qualifier::new(USER, "octocat"),
                Qualifier::new(USER, "rust-lang")
            ]
        );
    }

    #[test]
    fn test_all_empty_is_valid_request() {
        let query = build_query(&[], &[], &FilterPreferences::default());
        assert!(query.is_unfiltered());

        let url = query.request_url(DEFAULT_API_BASE, 1, None).unwrap();
        assert_eq!(
            url.as_str(),
            "https://api.github.com/search/repositories?q=&page=1"
        );
    }

    #[test]
    fn test_request_url_encodes_query_and_sort() {
        let query = build_query(
            &strings(&["c++"]),
            &strings(&["bob"]),
            &prefs(10, true, &["C++"]),
        );
        let url = query
            .request_url("http://localhost:8080/search", 3, Some(SortField::Stars))
            .unwrap();

        let pairs: Vec<(String, String)> = url.query_pairs().into_owned().collect();
        assert_eq!(
            pairs,
            vec![
                (
                    "q".to_string(),
                    "c++ stars:>=10 language:C++ user:bob".to_string()
                ),
                ("page".to_string(), "3".to_string()),
                ("sort".to_string(), "stars".to_string()),
            ]
        );
    }

    #[test]
    fn test_sort_omitted_by_default() {
        let url = SearchQuery::default()
            .request_url(DEFAULT_API_BASE, 2, None)
            .unwrap();
        assert!(url.query_pairs().all(|(key, _)| key != "sort"));
    }

    #[test]
    fn test_malformed_base_is_rejected() {
        let query = SearchQuery::default();
        assert!(matches!(
            query.request_url("not a url", 1, None),
            Err(SearchError::MalformedQuery(_))
        ));
        assert!(matches!(
            query.request_url("mailto:someone@example.com", 1, None),
            Err(SearchError::MalformedQuery(_))
        ));
        assert!(matches!(
            query.request_url(DEFAULT_API_BASE, 0, None),
            Err(SearchError::MalformedQuery(_))
        ));
    }

    #[test]
    fn test_sort_field_from_str() {
        assert_eq!("Stars".parse::<SortField>(), Ok(SortField::Stars));
        assert_eq!(
            "help-wanted-issues".parse::<SortField>(),
            Ok(SortField::HelpWantedIssues)
        );
        assert!("popularity".parse::<SortField>().is_err());
    }
}
