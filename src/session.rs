// src/session.rs
// =============================================================================
// A search session: the glue between user actions and the search pipeline.
//
// User actions map onto methods like this:
//
//   screen appears / pull to refresh   -> refresh()
//   search button                      -> submit_search(text)
//   cancel button                      -> cancel_search()
//   typing in the search bar           -> text_changed(text)
//   scrolled near the end of the list  -> request_next_page()
//
// Every query is rebuilt from the current terms plus the filter preferences
// read fresh from the PreferenceStore, so saved settings apply to the next
// fetch without any extra wiring.
//
// Rust concepts:
// - Generics with trait bounds: the session works with any client/store
// - Arc<dyn Trait>: a shared, type-erased event sink
// =============================================================================

use crate::error::Result;
use crate::events::{NoopEvents, SearchEvents};
use crate::github::{RepoSearchClient, SearchPage};
use crate::paging::{PageOutcome, PageRequest, PaginatedFetcher, PaginationState, PendingFetch};
use crate::prefs::{FilterPreferences, PreferenceStore};
use crate::results::ResultStore;
use crate::search::{build_query, parse_terms, SearchQuery, SearchTerms, SortField};
use std::sync::Arc;

pub struct SearchSession<C, P> {
    fetcher: PaginatedFetcher<C>,
    preferences: P,
    store: ResultStore,
    terms: SearchTerms,
    api_base: String,
    sort: Option<SortField>,
    events: Arc<dyn SearchEvents>,
}

impl<C: RepoSearchClient, P: PreferenceStore> SearchSession<C, P> {
    pub fn new(client: C, preferences: P, api_base: impl Into<String>) -> Self {
        Self {
            fetcher: PaginatedFetcher::new(client),
            preferences,
            store: ResultStore::new(),
            terms: SearchTerms::default(),
            api_base: api_base.into(),
            sort: None,
            events: Arc::new(NoopEvents),
        }
    }

    pub fn with_events(mut self, events: Arc<dyn SearchEvents>) -> Self {
        self.events = events;
        self
    }

    pub fn set_sort(&mut self, sort: Option<SortField>) {
        self.sort = sort;
    }

    pub fn results(&self) -> &ResultStore {
        &self.store
    }

    pub fn pagination(&self) -> &PaginationState {
        self.fetcher.state()
    }

    pub fn terms(&self) -> &SearchTerms {
        &self.terms
    }

    pub fn preference_store(&self) -> &P {
        &self.preferences
    }

    pub fn preferences(&self) -> FilterPreferences {
        FilterPreferences::load(&self.preferences)
    }

    // Takes effect on the next fetch; call refresh() to re-run the search now
    pub fn save_preferences(&mut self, preferences: &FilterPreferences) -> Result<()> {
        preferences.save(&mut self.preferences)
    }

    pub fn current_query(&self) -> SearchQuery {
        build_query(&self.terms.keywords, &self.terms.users, &self.preferences())
    }

    // First half of a fetch, for callers running their own event loop
    pub fn begin_fetch(&mut self, request: PageRequest) -> Result<Option<PendingFetch>> {
        // Step 1: Rebuild the query so freshly saved preferences apply
        let query = self.current_query();
        let base = self.api_base.as_str();
        let sort = self.sort;

        // Step 2: Let the fetcher decide whether this request goes out at all
        match self
            .fetcher
            .begin(request, |page| query.request_url(base, page, sort))
        {
            Ok(Some(pending)) => {
                self.events.on_fetch_state_changed(true);
                Ok(Some(pending))
            }
            // Dropped by the fetching/exhausted guard: nothing to report
            Ok(None) => Ok(None),
            // The URL couldn't be built, so no request was ever in flight
            Err(e) => {
                self.events.on_fetch_error(&e.to_string());
                Err(e)
            }
        }
    }

    pub async fn execute_fetch(&self, pending: &PendingFetch) -> Result<SearchPage> {
        self.fetcher.execute(pending).await
    }

    // Second half of a fetch
    pub fn complete_fetch(
        &mut self,
        pending: PendingFetch,
        response: Result<SearchPage>,
    ) -> Result<PageOutcome> {
        let outcome = self.fetcher.complete(pending, response, &mut self.store);

        match &outcome {
            // A superseded search: the live one owns the spinner and the list
            Ok(PageOutcome::Discarded { .. }) => {}
            Ok(_) => {
                self.events.on_fetch_state_changed(false);
                self.events.on_results_changed(self.store.displayed());
            }
            Err(e) => {
                self.events.on_fetch_state_changed(false);
                self.events.on_fetch_error(&format!("Could not fetch repositories: {}", e));
            }
        }

        outcome
    }

    pub async fn fetch(&mut self, request: PageRequest) -> Result<Option<PageOutcome>> {
        let Some(pending) = self.begin_fetch(request)? else {
            return Ok(None);
        };

        let response = self.execute_fetch(&pending).await;
        self.complete_fetch(pending, response).map(Some)
    }

    // Clears results, starts over from page 1 and fetches it
    pub async fn refresh(&mut self) -> Result<Option<PageOutcome>> {
        let was_fetching = self.fetcher.state().is_fetching();

        // Step 1: Forget the old results and make any in-flight page stale
        self.store.clear();
        self.fetcher.reset();

        // Step 2: Tell the view the list is empty (and not loading anymore)
        if was_fetching {
            self.events.on_fetch_state_changed(false);
        }
        self.events.on_results_changed(self.store.displayed());

        // Step 3: Page 1 of the current query
        self.fetch(PageRequest::Current).await
    }

    // Runs a new keyword/user search
    //
    // Blank input (or input that is only empty `user:` tokens) falls back to
    // the preference-only search.
    pub async fn submit_search(&mut self, raw: &str) -> Result<Option<PageOutcome>> {
        let terms = parse_terms(raw);

        if terms.is_empty() {
            return self.refresh_after_search().await;
        }

        tracing::info!(
            keywords = ?terms.keywords,
            users = ?terms.users,
            "submitting search"
        );
        self.terms = terms;

        // The typed text became the query; it must not also filter the results
        self.store.reset_filter();
        self.refresh().await
    }

    // If a keyword/user search is active, drop it and search with
    // preferences only. Otherwise there is nothing to undo.
    pub async fn refresh_after_search(&mut self) -> Result<Option<PageOutcome>> {
        if self.terms.is_empty() {
            return Ok(None);
        }

        self.terms.clear();
        self.store.reset_filter();
        self.refresh().await
    }

    // The search bar was cancelled: its text is gone, so is the live filter
    pub async fn cancel_search(&mut self) -> Result<Option<PageOutcome>> {
        self.store.reset_filter();

        if self.terms.is_empty() {
            self.events.on_results_changed(self.store.displayed());
            return Ok(None);
        }

        self.refresh_after_search().await
    }

    // Live filter over what has been fetched so far
    pub fn text_changed(&mut self, text: &str) -> Result<()> {
        match self.store.set_filter(text) {
            Ok(()) => {
                self.events.on_results_changed(self.store.displayed());
                Ok(())
            }
            Err(e) => {
                tracing::warn!(text, error = %e, "keeping previous results");
                self.events.on_fetch_error(&e.to_string());
                Err(e)
            }
        }
    }

    // Called by the view when the last rows come into sight
    pub async fn request_next_page(&mut self) -> Result<Option<PageOutcome>> {
        self.fetch(PageRequest::Next).await
    }
}

// BEGINNER NOTES:
//
// 1. `impl<C: RepoSearchClient, P: PreferenceStore>` means the session works
//    with ANY client and ANY store. Tests plug in a scripted client and an
//    in-memory store; the CLI plugs in reqwest and a JSON file.
//
// 2. `Arc<dyn SearchEvents>` is a shared pointer to "something that
//    implements SearchEvents". The session doesn't know (or care) whether
//    it's a terminal printer or a test recorder.
//
// 3. `let Some(pending) = ... else { return ... };` is a let-else: it binds
//    the value if the pattern matches and returns early otherwise.
//
// 4. The search bar text plays two roles. While typing it filters what was
//    already fetched (text_changed). Once submitted it becomes the query,
//    so the live filter is dropped before the new search runs.
