//! Holodex command-line shell.

pub mod cli;
pub mod render;
pub mod state;

use anyhow::{bail, Context, Result};
use cli::Cli;
use holodex_auth::spawn_refresh_task;
use holodex_core::{AppConfig, FacetField};
use holodex_pipeline::{AggregationState, DisplayState};
use state::AppState;
use tracing::info;

/// Install the global tracing subscriber. `RUST_LOG` overrides the default filter.
pub fn init_tracing() {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info,holodex=debug"));

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(true).with_writer(std::io::stderr))
        .with(filter)
        .init();
}

fn load_config(cli: &Cli) -> Result<AppConfig> {
    match &cli.config {
        Some(path) => {
            let mut config = AppConfig::load_from(path)
                .with_context(|| format!("failed to load config from {}", path.display()))?;
            config.apply_env_overrides();
            config.validate()?;
            Ok(config)
        }
        None => AppConfig::load_with_env().context("failed to load config"),
    }
}

/// Run one invocation of the shell.
pub async fn run(cli: Cli) -> Result<()> {
    info!("Starting Holodex v{}", env!("CARGO_PKG_VERSION"));

    let config = load_config(&cli)?;
    let mut state = AppState::new(config).context("failed to create API client")?;

    let username = cli
        .username
        .clone()
        .unwrap_or_else(|| state.config.auth.username.clone());
    let password = cli
        .password
        .clone()
        .unwrap_or_else(|| state.config.auth.password.clone());
    if let Err(e) = state.session.login(&username, &password) {
        tracing::warn!("Login failed: {}", e);
    }

    if !state.session.is_authorized() {
        println!("{}", render::render_state(&DisplayState::Restricted));
        return Ok(());
    }

    let refresh = spawn_refresh_task(
        state.session.clone(),
        state.config.auth.refresh_interval(),
    );
    let outcome = browse(&cli, &mut state).await;
    refresh.abort();
    state.session.logout();
    outcome
}

async fn browse(cli: &Cli, state: &mut AppState) -> Result<()> {
    state.load_directory().await;

    if cli.list_species {
        if let Some(message) = state.aggregator.error() {
            bail!(message);
        }
        println!(
            "{}",
            render::render_facets(state.view.facets(FacetField::Species))
        );
        return Ok(());
    }

    state.view.set_search_term(cli.search.as_str());
    for (field, url) in cli.facet_filters(&state.config.api.base_url) {
        state.view.set_facet(field, url);
    }
    let page = state.view.set_page(cli.page);
    if page != cli.page {
        info!("Page {} is out of range, showing page {}", cli.page, page);
    }

    if state.aggregator.state() == AggregationState::Ready && state.view.total_pages() > 0 {
        state.enrich_visible_page().await;
    }

    let display = state
        .view
        .display_state(state.session.is_authorized(), &state.aggregator.state());
    println!("{}", render::render_state(&display));

    if let Some(n) = cli.details {
        let DisplayState::Page { records, .. } = &display else {
            bail!("no page to show details from");
        };
        let Some(record) = n.checked_sub(1).and_then(|index| records.get(index)) else {
            bail!("record {} is not on this page ({} records)", n, records.len());
        };

        let planet = if record.character.homeworld.is_empty() {
            None
        } else {
            state.homeworld(&record.character.homeworld).await
        };
        println!();
        println!("{}", render::render_details(record, planet.as_ref()));
    }

    Ok(())
}
