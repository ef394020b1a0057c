// src/paging/mod.rs
// =============================================================================
// Infinite-scroll pagination.
//
// Submodules:
// - state: the Idle/Fetching/Exhausted state machine and fetch tickets
// - fetcher: drives the state machine against a RepoSearchClient
// =============================================================================

mod fetcher;
mod state;

pub use fetcher::{PageOutcome, PaginatedFetcher, PendingFetch};
pub use state::{FetchPhase, FetchTicket, PageRequest, PaginationState};
