// src/prefs/filters.rs
// =============================================================================
// Filter preferences: minimum stars and the language filter.
//
// These are read from the PreferenceStore every time a query is built, so a
// saved change applies to the very next fetch. Editing happens through a
// SettingsDraft: changes stay local until commit(), and discard() throws them
// away, like a settings screen with Save and Cancel buttons.
// =============================================================================

use crate::error::{Result, SearchError};
use crate::prefs::store::PreferenceStore;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

pub const MIN_STARS_KEY: &str = "minStars";
pub const LANGUAGE_FILTER_ENABLED_KEY: &str = "searchByLanguage";
pub const SELECTED_LANGUAGES_KEY: &str = "selectedLanguages";

/// Languages the user can filter by
pub const KNOWN_LANGUAGES: &[&str] = &["Swift", "Java", "Ruby", "Go", "Python", "C", "C++", "Rust"];

// Known languages in display order (alphabetical)
pub fn known_languages() -> Vec<&'static str> {
    let mut languages = KNOWN_LANGUAGES.to_vec();
    languages.sort_unstable();
    languages
}

// Maps user input onto the canonical spelling, e.g. "go" -> "Go"
pub fn canonical_language(name: &str) -> Option<&'static str> {
    KNOWN_LANGUAGES
        .iter()
        .copied()
        .find(|known| known.eq_ignore_ascii_case(name.trim()))
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterPreferences {
    pub min_stars: u32,
    pub language_filter_enabled: bool,
    pub selected_languages: BTreeSet<String>,
}

impl FilterPreferences {
    pub fn load(store: &dyn PreferenceStore) -> Self {
        let raw_stars = store.get_int(MIN_STARS_KEY, 0);
        let min_stars = u32::try_from(raw_stars.max(0)).unwrap_or(u32::MAX);

        let mut selected_languages = BTreeSet::new();
        for name in store.get_string_list(SELECTED_LANGUAGES_KEY, &[]) {
            match canonical_language(&name) {
                Some(language) => {
                    selected_languages.insert(language.to_string());
                }
                None => tracing::warn!(language = %name, "ignoring unknown stored language"),
            }
        }

        Self {
            min_stars,
            language_filter_enabled: store.get_bool(LANGUAGE_FILTER_ENABLED_KEY, false),
            selected_languages,
        }
    }

    pub fn save(&self, store: &mut dyn PreferenceStore) -> Result<()> {
        let languages: Vec<String> = self.selected_languages.iter().cloned().collect();

        store.set_int(MIN_STARS_KEY, i64::from(self.min_stars))?;
        store.set_string_list(SELECTED_LANGUAGES_KEY, &languages)?;
        store.set_bool(LANGUAGE_FILTER_ENABLED_KEY, self.language_filter_enabled)?;

        tracing::info!(
            min_stars = self.min_stars,
            language_filter = self.language_filter_enabled,
            languages = ?languages,
            "saved filter preferences"
        );
        Ok(())
    }

    /// Languages that actually constrain the query
    pub fn active_languages(&self) -> impl Iterator<Item = &str> {
        self.selected_languages
            .iter()
            .map(String::as_str)
            .filter(move |_| self.language_filter_enabled)
    }
}

// An editable copy of the stored preferences
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SettingsDraft {
    saved: FilterPreferences,
    draft: FilterPreferences,
}

impl SettingsDraft {
    pub fn open(store: &dyn PreferenceStore) -> Self {
        let saved = FilterPreferences::load(store);
        Self {
            draft: saved.clone(),
            saved,
        }
    }

    pub fn preferences(&self) -> &FilterPreferences {
        &self.draft
    }

    pub fn is_dirty(&self) -> bool {
        self.saved != self.draft
    }

    pub fn set_min_stars(&mut self, min_stars: u32) {
        self.draft.min_stars = min_stars;
    }

    // Turning the filter off hides the language list but keeps the selection
    pub fn set_language_filter(&mut self, enabled: bool) {
        self.draft.language_filter_enabled = enabled;
    }

    // Languages a settings screen should list under the toggle
    pub fn visible_languages(&self) -> Vec<&'static str> {
        if self.draft.language_filter_enabled {
            known_languages()
        } else {
            Vec::new()
        }
    }

    /// Flips a language in or out of the selection, returning whether it is
    /// now selected
    pub fn toggle_language(&mut self, name: &str) -> Result<bool> {
        let language = canonical_language(name)
            .ok_or_else(|| SearchError::Preferences(format!("unknown language: {}", name)))?;

        if self.draft.selected_languages.remove(language) {
            Ok(false)
        } else {
            self.draft.selected_languages.insert(language.to_string());
            Ok(true)
        }
    }

    pub fn clear_languages(&mut self) {
        self.draft.selected_languages.clear();
    }

    pub fn commit(self, store: &mut dyn PreferenceStore) -> Result<FilterPreferences> {
        self.draft.save(store)?;
        Ok(self.draft)
    }

    pub fn discard(self) -> FilterPreferences {
        tracing::debug!(dirty = self.is_dirty(), "discarding settings draft");
        self.saved
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prefs::store::MemoryPreferenceStore;

    #[test]
    fn test_defaults_from_empty_store() {
        let prefs = FilterPreferences::load(&MemoryPreferenceStore::new());
        assert_eq!(prefs, FilterPreferences::default());
        assert_eq!(prefs.min_stars, 0);
        assert!(!prefs.language_filter_enabled);
        assert!(prefs.selected_languages.is_empty());
    }

    #[test]
    fn test_save_then_load() {
        let mut store = MemoryPreferenceStore::new();
        let prefs = FilterPreferences {
            min_stars: 50,
            language_filter_enabled: true,
            selected_languages: ["Rust", "Go"].iter().map(|s| s.to_string()).collect(),
        };

        prefs.save(&mut store).unwrap();
        assert_eq!(FilterPreferences::load(&store), prefs);
    }

    #[test]
    fn test_negative_stars_clamp_to_zero() {
        let mut store = MemoryPreferenceStore::new();
        store.set_int(MIN_STARS_KEY, -5).unwrap();
        assert_eq!(FilterPreferences::load(&store).min_stars, 0);
    }

    #[test]
    fn test_unknown_stored_languages_are_dropped() {
        let mut store = MemoryPreferenceStore::new();
        store
            .set_string_list(
                SELECTED_LANGUAGES_KEY,
                &["go".to_string(), "COBOL".to_string()],
            )
            .unwrap();

        let prefs = FilterPreferences::load(&store);
        assert_eq!(prefs.selected_languages.len(), 1);
        assert!(prefs.selected_languages.contains("Go"));
    }

    #[test]
    fn test_active_languages_respect_toggle() {
        let mut prefs = FilterPreferences::default();
        prefs.selected_languages.insert("Swift".to_string());
        assert_eq!(prefs.active_languages().count(), 0);

        prefs.language_filter_enabled = true;
        assert_eq!(prefs.active_languages().collect::<Vec<_>>(), vec!["Swift"]);
    }

    #[test]
    fn test_known_languages_sorted() {
        let languages = known_languages();
        let mut sorted = languages.clone();
        sorted.sort();
        assert_eq!(languages, sorted);
        assert!(languages.contains(&"C++"));
    }

    #[test]
    fn test_draft_commit_and_discard() {
        let mut store = MemoryPreferenceStore::new();

        let mut draft = SettingsDraft::open(&store);
        draft.set_min_stars(10);
        draft.set_language_filter(true);
        assert!(draft.toggle_language("python").unwrap());
        assert!(draft.is_dirty());
        assert_eq!(draft.visible_languages(), known_languages());

        let committed = draft.commit(&mut store).unwrap();
        assert_eq!(committed.min_stars, 10);
        assert!(committed.selected_languages.contains("Python"));

        let mut draft = SettingsDraft::open(&store);
        draft.set_min_stars(999);
        assert!(!draft.toggle_language("Python").unwrap());
        let restored = draft.discard();
        assert_eq!(restored, committed);
        assert_eq!(FilterPreferences::load(&store).min_stars, 10);
    }

    #[test]
    fn test_toggle_unknown_language_fails() {
        let mut draft = SettingsDraft::open(&MemoryPreferenceStore::new());
        assert!(draft.toggle_language("Brainfuck").is_err());
        assert!(!draft.is_dirty());
    }

    #[test]
    fn test_disabling_filter_keeps_selection() {
        let mut draft = SettingsDraft::open(&MemoryPreferenceStore::new());
        draft.set_language_filter(true);
        draft.toggle_language("Ruby").unwrap();
        draft.set_language_filter(false);

        assert!(draft.visible_languages().is_empty());
        assert!(draft.preferences().selected_languages.contains("Ruby"));
    }
}
