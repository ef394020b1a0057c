// src/main.rs
// =============================================================================
// This is the entry point of the CLI.
//
// What happens here:
// 1. Set up logging (RUST_LOG controls verbosity, e.g. RUST_LOG=debug)
// 2. Parse command-line arguments using clap and load the configuration
// 3. Dispatch to the appropriate subcommand handler
// 4. Exit with proper code (0 = success, 2 = error)
//
// The terminal is our "presentation layer": it drives a SearchSession the
// same way a mobile screen would (refresh, then ask for more pages) and
// prints whatever ends up in the displayed list.
// =============================================================================

mod cli;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Commands, PrefsAction};
use repo_finder::prefs::{known_languages, SettingsDraft};
use repo_finder::{
    Config, FilterPreferences, GithubClient, JsonFilePreferenceStore, PageOutcome, Repository,
    SearchEvents, SearchSession, SortField,
};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let exit_code = match run().await {
        Ok(()) => 0,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            2
        }
    };

    std::process::exit(exit_code);
}

async fn run() -> Result<()> {
    let cli = Cli::parse();

    let mut config = Config::from_env();
    if let Some(path) = cli.prefs_file {
        config.preferences_path = path;
    }
    if let Some(base) = cli.api_base {
        config.api_base = base;
    }

    match cli.command {
        Commands::Search {
            terms,
            pages,
            filter,
            sort,
            json,
        } => handle_search(&config, &terms.join(" "), pages, filter.as_deref(), sort, json).await,
        Commands::Prefs { action } => handle_prefs(&config, action),
    }
}

// Traces fetch progress
//
// Failures aren't printed here: they come back from the session as errors
// and run() reports them once, on the "Error:" line.
struct ConsoleEvents;

impl SearchEvents for ConsoleEvents {
    fn on_results_changed(&self, displayed: &[Repository]) {
        tracing::debug!(count = displayed.len(), "displayed results changed");
    }

    fn on_fetch_error(&self, message: &str) {
        tracing::debug!(message, "fetch error reported");
    }

    fn on_fetch_state_changed(&self, is_fetching: bool) {
        tracing::debug!(is_fetching, "fetch state changed");
    }
}

async fn handle_search(
    config: &Config,
    raw_terms: &str,
    pages: u32,
    filter: Option<&str>,
    sort: Option<SortField>,
    json: bool,
) -> Result<()> {
    let preferences = JsonFilePreferenceStore::open(&config.preferences_path)?;
    let client = GithubClient::new(config)?;

    let mut session = SearchSession::new(client, preferences, config.api_base.clone())
        .with_events(Arc::new(ConsoleEvents));
    session.set_sort(sort);

    if !json {
        let query = session.current_query();
        let shown = if raw_terms.trim().is_empty() {
            "(no terms)".to_string()
        } else {
            raw_terms.to_string()
        };
        println!("🔍 Searching repositories: {}", shown);
        if !query.qualifiers().is_empty() {
            println!("   Filters: {}", query.to_query_string());
        }
    }

    // A blank search is just the preference-based browse
    if raw_terms.trim().is_empty() {
        session.refresh().await?;
    } else {
        session.submit_search(raw_terms).await?;
    }

    for _ in 1..pages {
        match session.request_next_page().await? {
            Some(PageOutcome::Exhausted { .. }) | None => break,
            Some(_) => {}
        }
    }

    if let Some(text) = filter {
        session.text_changed(text)?;
    }

    let results = session.results();
    print_results(results.displayed(), results.all().len(), results.total_count(), json)
}

fn handle_prefs(config: &Config, action: PrefsAction) -> Result<()> {
    let mut store = JsonFilePreferenceStore::open(&config.preferences_path)?;

    match action {
        PrefsAction::Show { json } => {
            print_preferences(&FilterPreferences::load(&store), json)?;
        }
        PrefsAction::Set {
            min_stars,
            language_filter,
            languages,
            clear_languages,
        } => {
            let mut draft = SettingsDraft::open(&store);

            if let Some(min_stars) = min_stars {
                draft.set_min_stars(min_stars);
            }
            if let Some(enabled) = language_filter {
                draft.set_language_filter(enabled);
            }
            if clear_languages {
                draft.clear_languages();
            }
            for language in &languages {
                draft.toggle_language(language)?;
            }

            if draft.is_dirty() {
                let saved = draft.commit(&mut store)?;
                println!("💾 Saved to {}", store.path().display());
                print_preferences(&saved, false)?;
            } else {
                println!("Nothing changed");
            }
        }
        PrefsAction::Languages => {
            for language in known_languages() {
                println!("{}", language);
            }
        }
    }

    Ok(())
}

fn print_preferences(preferences: &FilterPreferences, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(preferences)?);
        return Ok(());
    }

    let languages = if preferences.selected_languages.is_empty() {
        "(none)".to_string()
    } else {
        preferences
            .selected_languages
            .iter()
            .cloned()
            .collect::<Vec<_>>()
            .join(", ")
    };

    println!("Minimum stars:    {}", preferences.min_stars);
    println!(
        "Language filter:  {}",
        if preferences.language_filter_enabled { "on" } else { "off" }
    );
    println!("Languages:        {}", languages);
    Ok(())
}

fn print_results(
    displayed: &[Repository],
    fetched: usize,
    total: Option<u64>,
    json: bool,
) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(displayed)?);
    } else {
        print_table(displayed, fetched, total);
    }
    Ok(())
}

fn print_table(displayed: &[Repository], fetched: usize, total: Option<u64>) {
    println!();
    println!("{:<45} {:>8} {:>7} {:<12} {:<40}", "REPOSITORY", "STARS", "FORKS", "LANGUAGE", "DESCRIPTION");
    println!("{}", "=".repeat(116));

    for repo in displayed {
        println!(
            "{:<45} {:>8} {:>7} {:<12} {:<40}",
            truncate(&repo.display_name(), 45),
            repo.star_count.map(|n| n.to_string()).unwrap_or_default(),
            repo.fork_count.map(|n| n.to_string()).unwrap_or_default(),
            repo.language.as_deref().unwrap_or(""),
            truncate(repo.description.as_deref().unwrap_or(""), 40),
        );
    }

    println!();
    match total {
        Some(total) => println!(
            "📊 Showing {} of {} fetched repositories ({} on GitHub)",
            displayed.len(),
            fetched,
            total
        ),
        None => println!("📊 Showing {} of {} fetched repositories", displayed.len(), fetched),
    }
}

// Cuts on a char boundary so multi-byte descriptions don't panic
fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        text.to_string()
    } else {
        let cut: String = text.chars().take(width.saturating_sub(3)).collect();
        format!("{}...", cut)
    }
}
