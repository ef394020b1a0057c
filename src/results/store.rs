// src/results/store.rs
// =============================================================================
// The in-memory result set.
//
// Two lists live here:
// - `all`: every repository fetched for the current search, in fetch order
// - `displayed`: the subset that passes the active filter text
//
// It also remembers how many matches GitHub says the search has in total,
// which is usually far more than what has been fetched.
//
// Only clear() and append_page() touch `all`. Every change to `all` or to the
// filter text recomputes `displayed`, so with no filter it always mirrors
// `all`, including future appends.
// =============================================================================

use crate::error::Result;
use crate::github::Repository;
use crate::results::filter;

#[derive(Debug, Clone, Default)]
pub struct ResultStore {
    all: Vec<Repository>,
    displayed: Vec<Repository>,
    filter_text: String,
    total_count: Option<u64>,
}

impl ResultStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn all(&self) -> &[Repository] {
        &self.all
    }

    pub fn displayed(&self) -> &[Repository] {
        &self.displayed
    }

    pub fn filter_text(&self) -> &str {
        &self.filter_text
    }

    // Total matches reported by the last page, if the server sent one
    pub fn total_count(&self) -> Option<u64> {
        self.total_count
    }

    pub fn set_total_count(&mut self, total: Option<u64>) {
        if total.is_some() {
            self.total_count = total;
        }
    }

    pub fn is_empty(&self) -> bool {
        self.all.is_empty()
    }

    // Empties both lists; the filter text stays active for the next search
    pub fn clear(&mut self) {
        self.all.clear();
        self.displayed.clear();
        self.total_count = None;
    }

    // Appends a page of results and refreshes the displayed list
    pub fn append_page(&mut self, items: Vec<Repository>) {
        if self.filter_text.is_empty() {
            self.displayed.extend(items.iter().cloned());
        } else {
            // The active text compiled before, so it compiles again
            match filter::apply(&items, &self.filter_text) {
                Ok(matching) => self.displayed.extend(matching),
                Err(e) => tracing::warn!(error = %e, "active filter failed on new page"),
            }
        }

        self.all.extend(items);
    }

    // Applies new filter text
    //
    // On an invalid pattern the previous filter text and displayed list stay
    // in place and the error is returned for the caller to surface.
    pub fn set_filter(&mut self, text: &str) -> Result<()> {
        let displayed = filter::apply(&self.all, text)?;
        self.displayed = displayed;
        self.filter_text = text.to_string();
        Ok(())
    }

    // Drops the filter and shows everything fetched so far
    pub fn reset_filter(&mut self) {
        self.filter_text.clear();
        self.displayed = self.all.clone();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SearchError;

    fn repos(names: &[&str]) -> Vec<Repository> {
        names.iter().map(|n| Repository::new(*n, "owner")).collect()
    }

    fn names(list: &[Repository]) -> Vec<&str> {
        list.iter().map(|r| r.name.as_str()).collect()
    }

    #[test]
    fn test_append_without_filter_mirrors_all() {
        let mut store = ResultStore::new();
        store.append_page(repos(&["a", "b"]));
        store.append_page(repos(&["c"]));

        assert_eq!(names(store.all()), vec!["a", "b", "c"]);
        assert_eq!(store.displayed(), store.all());
    }

    #[test]
    fn test_clear_empties_both() {
        let mut store = ResultStore::new();
        store.append_page(repos(&["a", "b"]));
        store.clear();

        assert_eq!(store.all().len(), 0);
        assert_eq!(store.displayed().len(), 0);
        assert!(store.is_empty());
    }

    #[test]
    fn test_total_count_kept_until_clear() {
        let mut store = ResultStore::new();
        store.set_total_count(Some(1200));
        // A page without a total doesn't erase the known one
        store.set_total_count(None);
        assert_eq!(store.total_count(), Some(1200));

        store.clear();
        assert_eq!(store.total_count(), None);
    }

    #[test]
    fn test_append_with_active_filter() {
        let mut store = ResultStore::new();
        store.append_page(repos(&["alpha-cli", "beta"]));
        store.set_filter("cli").unwrap();
        store.append_page(repos(&["gamma-cli", "delta"]));

        assert_eq!(store.all().len(), 4);
        assert_eq!(names(store.displayed()), vec!["alpha-cli", "gamma-cli"]);
    }

    #[test]
    fn test_bad_filter_keeps_previous_view() {
        let mut store = ResultStore::new();
        store.append_page(repos(&["alpha-cli", "beta"]));
        store.set_filter("beta").unwrap();

        let err = store.set_filter("[").unwrap_err();
        assert!(matches!(err, SearchError::FilterPatternError(_)));
        assert_eq!(store.filter_text(), "beta");
        assert_eq!(names(store.displayed()), vec!["beta"]);
    }

    #[test]
    fn test_reset_filter_shows_everything() {
        let mut store = ResultStore::new();
        store.append_page(repos(&["one", "two"]));
        store.set_filter("one").unwrap();
        store.reset_filter();

        assert_eq!(store.filter_text(), "");
        assert_eq!(store.displayed(), store.all());
    }

    #[test]
    fn test_filter_text_survives_clear() {
        let mut store = ResultStore::new();
        store.set_filter("x").unwrap();
        store.clear();
        store.append_page(repos(&["xylophone", "drum"]));

        assert_eq!(names(store.displayed()), vec!["xylophone"]);
    }
}
