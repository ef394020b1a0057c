// src/lib.rs
// =============================================================================
// repo-finder: search GitHub repositories by keyword and owner, filter by
// stars and language, and page through results.
//
// Pipeline:
//   raw text ─▶ search::parse_terms ─▶ search::build_query (+ prefs)
//            ─▶ paging::PaginatedFetcher ─▶ results::ResultStore
//            ─▶ live filter ─▶ events::SearchEvents (whoever renders)
//
// session::SearchSession wires all of it together behind a handful of
// user-action methods. The CLI in main.rs is one consumer of this library.
// =============================================================================

pub mod config;
pub mod error;
pub mod events;
pub mod github;
pub mod paging;
pub mod prefs;
pub mod results;
pub mod search;
pub mod session;

pub use config::Config;
pub use error::{Result, SearchError};
pub use events::{NoopEvents, SearchEvents};
pub use github::{GithubClient, RepoSearchClient, Repository, SearchPage};
pub use paging::{FetchPhase, PageOutcome, PageRequest};
pub use prefs::{FilterPreferences, JsonFilePreferenceStore, MemoryPreferenceStore, PreferenceStore};
pub use results::ResultStore;
pub use search::{SearchQuery, SortField};
pub use session::SearchSession;
