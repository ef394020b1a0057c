// src/paging/fetcher.rs
// =============================================================================
// Issues one page request at a time and feeds results into the ResultStore.
//
// A fetch is split in two halves so an event loop can interleave other work
// (typing, a new search) while the request is in flight:
//
//   begin()    checks the guards, builds the URL, hands back a PendingFetch
//   complete() applies the response for that PendingFetch
//
// fetch() simply runs begin -> network -> complete in one go.
//
// If the search was reset between begin() and complete(), the response is
// stale: it is logged and dropped without touching the store.
// =============================================================================

use crate::error::Result;
use crate::github::{RepoSearchClient, SearchPage};
use crate::paging::state::{FetchTicket, PageRequest, PaginationState};
use crate::results::ResultStore;
use url::Url;

// A request that has been started but not yet applied
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingFetch {
    ticket: FetchTicket,
    url: Url,
}

impl PendingFetch {
    pub fn ticket(&self) -> FetchTicket {
        self.ticket
    }

    pub fn page(&self) -> u32 {
        self.ticket.page()
    }

    pub fn url(&self) -> &Url {
        &self.url
    }
}

/// What applying a response did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageOutcome {
    /// Items were appended to the store
    Appended { page: u32, count: usize },
    /// The page was empty; no more pages will be requested
    Exhausted { page: u32 },
    /// The response belonged to a superseded search and was ignored
    Discarded { page: u32 },
}

pub struct PaginatedFetcher<C> {
    client: C,
    state: PaginationState,
}

impl<C: RepoSearchClient> PaginatedFetcher<C> {
    pub fn new(client: C) -> Self {
        Self {
            client,
            state: PaginationState::new(),
        }
    }

    pub fn state(&self) -> &PaginationState {
        &self.state
    }

    pub fn client(&self) -> &C {
        &self.client
    }

    pub fn reset(&mut self) {
        tracing::debug!(generation = self.state.generation(), "resetting pagination");
        self.state.reset();
    }

    // Starts a fetch if the state allows one
    //
    // Ok(None): dropped because a fetch is running or results are exhausted.
    // Err: the URL couldn't be built; the state is left untouched.
    pub fn begin(
        &mut self,
        request: PageRequest,
        build_url: impl FnOnce(u32) -> Result<Url>,
    ) -> Result<Option<PendingFetch>> {
        let Some(page) = self.state.plan(request) else {
            tracing::debug!(
                ?request,
                phase = ?self.state.phase(),
                "ignoring fetch request"
            );
            return Ok(None);
        };

        let url = build_url(page)?;
        let ticket = self.state.begin(page);

        tracing::info!(page, %url, "fetching repositories");
        Ok(Some(PendingFetch { ticket, url }))
    }

    // Runs the network half of a pending fetch
    pub async fn execute(&self, pending: &PendingFetch) -> Result<SearchPage> {
        self.client.search(&pending.url).await
    }

    // Applies a response
    //
    // Errors are returned for the caller to report, after moving the state
    // back to idle. Stale responses, successful or not, become Discarded.
    pub fn complete(
        &mut self,
        pending: PendingFetch,
        response: Result<SearchPage>,
        store: &mut ResultStore,
    ) -> Result<PageOutcome> {
        let ticket = pending.ticket;

        // Step 1: Drop anything that belongs to a superseded search
        if !self.state.is_current(&ticket) {
            tracing::warn!(
                page = ticket.page(),
                generation = ticket.generation(),
                current_generation = self.state.generation(),
                "discarding stale search response"
            );
            return Ok(PageOutcome::Discarded { page: ticket.page() });
        }

        // Step 2: Move the state machine, then the store
        match response {
            Ok(page) => {
                self.state.finish_success(&ticket, page.received);
                store.set_total_count(page.total_count);

                // An empty page means there is nothing after it either
                if page.is_empty() {
                    tracing::info!(page = ticket.page(), "no more results");
                    return Ok(PageOutcome::Exhausted { page: ticket.page() });
                }

                let count = page.repositories.len();
                store.append_page(page.repositories);
                tracing::info!(
                    page = ticket.page(),
                    count,
                    total = store.all().len(),
                    "appended search results"
                );
                Ok(PageOutcome::Appended {
                    page: ticket.page(),
                    count,
                })
            }
            // The page isn't marked loaded, so the next request retries it
            Err(e) => {
                self.state.finish_failure(&ticket);
                tracing::warn!(page = ticket.page(), error = %e, "search request failed");
                Err(e)
            }
        }
    }

    // begin + execute + complete
    pub async fn fetch(
        &mut self,
        request: PageRequest,
        build_url: impl FnOnce(u32) -> Result<Url>,
        store: &mut ResultStore,
    ) -> Result<Option<PageOutcome>> {
        let Some(pending) = self.begin(request, build_url)? else {
            return Ok(None);
        };

        let response = self.execute(&pending).await;
        self.complete(pending, response, store).map(Some)
    }
}

// BEGINNER NOTES:
//
// 1. `impl FnOnce(u32) -> Result<Url>` lets the caller decide how a page
//    number becomes a URL. The fetcher only knows about pages, not queries.
//
// 2. `execute()` takes `&self` while `begin()` and `complete()` take
//    `&mut self`. Only the two short bookkeeping steps need exclusive
//    access; the slow network call does not.
//
// 3. PendingFetch is moved into complete(), so the same response can't be
//    applied twice.
