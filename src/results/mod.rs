// src/results/mod.rs
// =============================================================================
// Fetched results and the live filter over them.
//
// Submodules:
// - store: ResultStore, the canonical list plus the displayed subset
// - filter: pattern matching used to derive the displayed subset
// =============================================================================

pub mod filter;
mod store;

pub use store::ResultStore;
