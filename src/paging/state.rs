// src/paging/state.rs
// =============================================================================
// Pagination state machine.
//
//            begin()                success, >= 1 item
//   Idle ─────────────▶ Fetching ─────────────────────▶ Idle
//    ▲                    │  │
//    │     failure        │  │ success, 0 items
//    └────────────────────┘  └────────────────────────▶ Exhausted
//
//   reset(): any phase ──▶ Idle, page 1, new generation
//
// A request made while Fetching or Exhausted is dropped, so at most one page
// is ever in flight. Each begin() hands out a FetchTicket recording the
// generation and page it was issued for; a completion whose ticket no longer
// matches (because the search was reset, or moved to another page) is stale
// and must be ignored.
//
// Page numbering: the next page is always "last successfully loaded + 1".
// The page counter moves forward as soon as that request is issued, but a
// failed page is not counted as loaded, so asking for the next page again
// retries it instead of skipping it.
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchPhase {
    Idle,
    Fetching,
    Exhausted,
}

/// Which page a fetch request is for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageRequest {
    /// The current page, as long as it hasn't loaded yet (page 1 right
    /// after a reset, or a page whose fetch failed)
    Current,
    /// The page after the last one that loaded successfully
    Next,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchTicket {
    generation: u64,
    page: u32,
}

impl FetchTicket {
    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaginationState {
    page: u32,
    fetching: bool,
    exhausted: bool,
    generation: u64,
    last_loaded: Option<u32>,
}

impl Default for PaginationState {
    fn default() -> Self {
        Self {
            page: 1,
            fetching: false,
            exhausted: false,
            generation: 0,
            last_loaded: None,
        }
    }
}

impl PaginationState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn is_fetching(&self) -> bool {
        self.fetching
    }

    pub fn is_exhausted(&self) -> bool {
        self.exhausted
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn last_loaded(&self) -> Option<u32> {
        self.last_loaded
    }

    pub fn phase(&self) -> FetchPhase {
        if self.fetching {
            FetchPhase::Fetching
        } else if self.exhausted {
            FetchPhase::Exhausted
        } else {
            FetchPhase::Idle
        }
    }

    pub fn can_fetch(&self) -> bool {
        !self.fetching && !self.exhausted
    }

    // The page a request would fetch, or None if it has to be dropped
    pub fn plan(&self, request: PageRequest) -> Option<u32> {
        // One request at a time, and nothing after an empty page
        if !self.can_fetch() {
            return None;
        }

        match request {
            // A page that already loaded is never appended twice
            PageRequest::Current if self.last_loaded == Some(self.page) => None,
            PageRequest::Current => Some(self.page),
            PageRequest::Next => Some(self.last_loaded.map_or(1, |page| page.saturating_add(1))),
        }
    }

    // Idle -> Fetching for `page`
    //
    // Callers go through plan() first; begin() itself doesn't re-check.
    pub fn begin(&mut self, page: u32) -> FetchTicket {
        self.page = page;
        self.fetching = true;

        FetchTicket {
            generation: self.generation,
            page,
        }
    }

    /// Whether a completion for this ticket still belongs to the live search
    pub fn is_current(&self, ticket: &FetchTicket) -> bool {
        self.fetching && ticket.generation == self.generation && ticket.page == self.page
    }

    // Fetching -> Idle or Exhausted. Returns false (and changes nothing) for a
    // stale ticket.
    pub fn finish_success(&mut self, ticket: &FetchTicket, received: usize) -> bool {
        if !self.is_current(ticket) {
            return false;
        }

        self.fetching = false;
        if received == 0 {
            self.exhausted = true;
        } else {
            self.last_loaded = Some(ticket.page);
        }
        true
    }

    // Fetching -> Idle without marking the page as loaded. Returns false for a
    // stale ticket.
    pub fn finish_failure(&mut self, ticket: &FetchTicket) -> bool {
        if !self.is_current(ticket) {
            return false;
        }

        self.fetching = false;
        true
    }

    // Back to page 1; anything still in flight becomes stale
    pub fn reset(&mut self) {
        self.page = 1;
        self.fetching = false;
        self.exhausted = false;
        self.last_loaded = None;
        self.generation = self.generation.wrapping_add(1);
    }
}
