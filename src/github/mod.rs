// src/github/mod.rs
// =============================================================================
// This module handles everything that touches the GitHub API.
//
// Currently implements:
// - The Repository record and its decoding from search payloads
// - A RepoSearchClient trait plus the reqwest-backed GithubClient
//
// The request URL itself is built in search::query, so this module never
// needs to know about terms or preferences.
// =============================================================================

mod fetch;
mod repository;

pub use fetch::{decode_search_response, GithubClient, RepoSearchClient, SearchPage};
pub use repository::Repository;
