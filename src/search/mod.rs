// src/search/mod.rs
// =============================================================================
// Turning what the user typed into a remote search request.
//
// Submodules:
// - terms: splits search-bar text into keyword and `user:` terms
// - query: combines terms with filter preferences into a request URL
// =============================================================================

mod query;
mod terms;

pub use query::{build_query, Qualifier, SearchQuery, SortField, LANGUAGE, STARS, USER};
pub use terms::{parse_terms, SearchTerms};
