// src/github/fetch.rs
// =============================================================================
// This module talks to the GitHub repository search endpoint.
//
// Strategy:
// - The caller hands us a fully built request URL (see search::query)
// - We issue a single GET and check the HTTP status
// - The body is decoded item by item so one odd entry can't sink a page
//
// The network sits behind the RepoSearchClient trait so the pagination
// logic can be driven by a scripted fake in tests.
//
// Rust concepts:
// - Traits: an interface the rest of the crate depends on
// - BoxFuture: a heap-allocated future, lets a trait method be async
// - serde_json::Value: untyped JSON for the top-level shape check
// =============================================================================

use crate::config::Config;
use crate::error::{Result, SearchError};
use crate::github::repository::{Repository, RepositoryItem};
use futures::future::{BoxFuture, FutureExt};
use reqwest::{header, Client};
use serde_json::Value;
use std::time::Duration;
use url::Url;

// One decoded page of search results
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchPage {
    /// Items that decoded successfully, in response order
    pub repositories: Vec<Repository>,
    /// How many items the server actually sent (decoded or not)
    pub received: usize,
    /// `total_count` from the payload, when present
    pub total_count: Option<u64>,
}

impl SearchPage {
    pub fn from_repositories(repositories: Vec<Repository>) -> Self {
        Self {
            received: repositories.len(),
            repositories,
            total_count: None,
        }
    }

    /// The server had nothing more to give
    pub fn is_empty(&self) -> bool {
        self.received == 0
    }
}

// Anything that can run a repository search request
pub trait RepoSearchClient: Send + Sync {
    fn search<'a>(&'a self, url: &'a Url) -> BoxFuture<'a, Result<SearchPage>>;
}

// The real client, backed by reqwest
#[derive(Debug, Clone)]
pub struct GithubClient {
    http: Client,
}

impl GithubClient {
    pub fn new(config: &Config) -> Result<Self> {
        let mut headers = header::HeaderMap::new();
        headers.insert(
            header::ACCEPT,
            header::HeaderValue::from_static("application/vnd.github+json"),
        );

        let http = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(config.user_agent.clone())
            .default_headers(headers)
            .build()?;

        Ok(Self { http })
    }

    async fn fetch_page(&self, url: &Url) -> Result<SearchPage> {
        tracing::debug!(%url, "requesting search page");

        let response = self.http.get(url.clone()).send().await?;
        let status = response.status();

        if !status.is_success() {
            // GitHub explains 403/422 in the body; keep a short excerpt
            let body = response.text().await.unwrap_or_default();
            let excerpt: String = body.chars().take(200).collect();
            return Err(SearchError::NetworkFailure(format!(
                "HTTP {} from {}: {}",
                status.as_u16(),
                url.host_str().unwrap_or("search endpoint"),
                excerpt.trim()
            )));
        }

        let body = response.text().await?;
        decode_search_response(&body)
    }
}

impl RepoSearchClient for GithubClient {
    fn search<'a>(&'a self, url: &'a Url) -> BoxFuture<'a, Result<SearchPage>> {
        self.fetch_page(url).boxed()
    }
}

// Decodes a search response body
//
// The top level must be an object with an `items` array, otherwise the page
// is a DecodeFailure. Individual items that fail to decode are skipped with a
// warning but still count towards `received`.
pub fn decode_search_response(body: &str) -> Result<SearchPage> {
    let mut payload: Value =
        serde_json::from_str(body).map_err(|e| SearchError::DecodeFailure(e.to_string()))?;

    let total_count = payload.get("total_count").and_then(Value::as_u64);

    let items = match payload.get_mut("items").map(Value::take) {
        Some(Value::Array(items)) => items,
        Some(_) => {
            return Err(SearchError::DecodeFailure(
                "`items` is not an array".to_string(),
            ))
        }
        None => {
            return Err(SearchError::DecodeFailure(
                "response has no `items` array".to_string(),
            ))
        }
    };

    let received = items.len();
    let mut repositories = Vec::with_capacity(received);

    for (index, item) in items.into_iter().enumerate() {
        match serde_json::from_value::<RepositoryItem>(item) {
            Ok(item) => repositories.push(Repository::from(item)),
            Err(e) => tracing::warn!(index, error = %e, "skipping undecodable repository item"),
        }
    }

    Ok(SearchPage {
        repositories,
        received,
        total_count,
    })
}
