use std::io;

use anyhow::Context;
use tracing_subscriber::EnvFilter;

use mealrec::cli;
use mealrec::config::Config;
use mealrec::models::{Catalog, PreferenceState};
use mealrec::services::Recommender;
use mealrec::store::{JsonFileStore, PreferenceStore};

fn main() -> anyhow::Result<()> {
    // Log to stderr so the interactive prompt on stdout stays clean
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let config = Config::from_env()?;

    let catalog = Catalog::load(&config.menu_path)
        .with_context(|| format!("Failed to load menu from {}", config.menu_path.display()))?;

    let store = JsonFileStore::new(&config.preference_path);
    let state = match store.load().with_context(|| {
        format!(
            "Failed to load preferences from {}",
            config.preference_path.display()
        )
    })? {
        Some(state) => state,
        None => {
            let state = PreferenceState::new();
            store.save(&state)?;
            state
        }
    };

    let mut engine = Recommender::new(catalog, state, store);

    let stdin = io::stdin();
    cli::run(&mut engine, stdin.lock(), io::stdout())?;
    Ok(())
}
