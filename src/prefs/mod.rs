// src/prefs/mod.rs
// =============================================================================
// User filter preferences and where they are stored.
//
// Submodules:
// - store: the PreferenceStore trait and its memory/JSON-file implementations
// - filters: FilterPreferences, the known language list and SettingsDraft
// =============================================================================

mod filters;
mod store;

pub use filters::{
    canonical_language, known_languages, FilterPreferences, SettingsDraft, KNOWN_LANGUAGES,
    LANGUAGE_FILTER_ENABLED_KEY, MIN_STARS_KEY, SELECTED_LANGUAGES_KEY,
};
pub use store::{JsonFilePreferenceStore, MemoryPreferenceStore, PrefValue, PreferenceStore};
