// src/cli.rs
// =============================================================================
// This file defines our command-line interface using the `clap` crate.
//
// We use the "derive" API which lets us define the CLI structure using
// Rust structs and attributes (the #[...] things).
//
// Commands:
//   repo-finder search [TERMS]...    run a search and print the results
//   repo-finder prefs show           print the saved filter preferences
//   repo-finder prefs set ...        change the saved filter preferences
//   repo-finder prefs languages      list the languages you can filter by
// =============================================================================

use clap::{Parser, Subcommand};
use repo_finder::SortField;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "repo-finder",
    version,
    about = "Search GitHub repositories by keyword and owner",
    long_about = "repo-finder searches GitHub repositories by keyword and/or owner \
                  (user:<name>), applying your saved minimum-star and language filters."
)]
pub struct Cli {
    /// Preference file to use instead of the configured one
    #[arg(long, global = true)]
    pub prefs_file: Option<PathBuf>,

    /// Search endpoint to use instead of the configured one
    #[arg(long, global = true)]
    pub api_base: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Search repositories
    ///
    /// Example: repo-finder search swift user:techtierra --pages 2
    Search {
        /// Keywords and user:<name> terms; none means "browse with my filters"
        terms: Vec<String>,

        /// How many pages to load (stops early when results run out)
        #[arg(long, default_value_t = 1)]
        pages: u32,

        /// Only show fetched results matching this pattern (name, owner, description)
        #[arg(long)]
        filter: Option<String>,

        /// Sort by stars, forks, help-wanted-issues or updated
        #[arg(long)]
        sort: Option<SortField>,

        /// Output results in JSON format instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Show or change saved filter preferences
    Prefs {
        #[command(subcommand)]
        action: PrefsAction,
    },
}

#[derive(Subcommand, Debug)]
pub enum PrefsAction {
    /// Print the saved preferences
    Show {
        /// Output in JSON format
        #[arg(long)]
        json: bool,
    },

    /// Change saved preferences (unspecified values stay as they are)
    Set {
        /// Minimum star count (0 disables the star filter)
        #[arg(long)]
        min_stars: Option<u32>,

        /// Turn the language filter on or off
        #[arg(long)]
        language_filter: Option<bool>,

        /// Toggle a language in the selection (repeatable)
        #[arg(long = "language")]
        languages: Vec<String>,

        /// Clear the language selection before toggling
        #[arg(long)]
        clear_languages: bool,
    },

    /// List the languages you can filter by
    Languages,
}
