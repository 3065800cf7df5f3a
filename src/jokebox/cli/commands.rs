//! # CLI Layer
//!
//! This module is **one possible UI client** for jokebox. It is the only
//! place that parses arguments, reads stdin, prints, and picks exit codes.
//!
//! ## Structure
//!
//! - `run()`: Main dispatch logic (called by `main.rs`)
//! - `init_context()`: Builds `AppContext` with API and configuration
//! - `handle_*()`: Per-command handlers that call the API and print the result
//!
//! List positions shown to the user (1 = newest) are turned into joke ids
//! here; the API only ever sees ids.

use super::print::{print_error, print_joke, print_jokes, print_messages};
use super::session;
use crate::args::{ClearTarget, Cli, Commands};
use clap::Parser;
use directories::ProjectDirs;
use jokebox::api::{CmdResult, JokeboxApi};
use jokebox::clipboard::SystemClipboard;
use jokebox::config::JokeboxConfig;
use jokebox::controller::{Limits, SessionController};
use jokebox::error::{JokeboxError, Result};
use jokebox::fetcher::{Fetcher, JokeApiClient};
use jokebox::model::{CategoryFilter, Collection, JokeId};
use jokebox::store::fs::FileStore;
use std::io::{self, Write};
use std::path::PathBuf;
use std::sync::Arc;

pub(crate) type Api = JokeboxApi<FileStore, JokeApiClient>;

pub(crate) struct AppContext {
    pub api: Api,
    pub data_dir: PathBuf,
}

pub async fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let ctx = init_context(&cli)?;

    match cli.command {
        None => session::run(&ctx.api, None).await,
        Some(Commands::Play { category }) => session::run(&ctx.api, category).await,
        Some(Commands::New { category }) => handle_new(&ctx, category).await,
        Some(Commands::History) => handle_list(&ctx, Collection::History).await,
        Some(Commands::Favorites) => handle_list(&ctx, Collection::Favorites).await,
        Some(Commands::Show { index, favorites }) => {
            handle_show(&ctx, index, collection_flag(favorites)).await
        }
        Some(Commands::Star { index }) => handle_star(&ctx, index).await,
        Some(Commands::Unstar { index }) => handle_unstar(&ctx, index).await,
        Some(Commands::Copy { index, favorites }) => {
            handle_copy(&ctx, index.unwrap_or(1), collection_flag(favorites)).await
        }
        Some(Commands::Share { index, favorites }) => {
            handle_share(&ctx, index.unwrap_or(1), collection_flag(favorites)).await
        }
        Some(Commands::Clear { target, yes }) => handle_clear(&ctx, target, yes).await,
        Some(Commands::Theme) => handle_theme(&ctx).await,
        Some(Commands::Config { key, value }) => handle_config(&ctx, key, value),
    }
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .format_timestamp(None)
        .init();
}

fn init_context(cli: &Cli) -> Result<AppContext> {
    let data_dir = match &cli.data_dir {
        Some(dir) => dir.clone(),
        None => ProjectDirs::from("com", "jokebox", "jokebox")
            .map(|dirs| dirs.data_dir().to_path_buf())
            .ok_or_else(|| JokeboxError::Store("Could not determine data directory".into()))?,
    };

    let config = JokeboxConfig::load(&data_dir)?;
    let offline = cli.offline || config.offline;
    log::debug!("Using data directory {}", data_dir.display());

    let category: CategoryFilter = config.default_category.parse()?;
    let limits = Limits {
        history: config.history_limit,
        favorites: config.favorites_limit,
    };
    let controller =
        SessionController::new(FileStore::new(data_dir.clone()), limits).with_category(category);
    let fetcher = Fetcher::new(JokeApiClient::from_config(&config)?).offline(offline);
    let api = JokeboxApi::new(controller, fetcher, Arc::new(SystemClipboard));

    Ok(AppContext { api, data_dir })
}

fn collection_flag(favorites: bool) -> Collection {
    if favorites {
        Collection::Favorites
    } else {
        Collection::History
    }
}

/// Map a 1-based list position to the id of the joke shown there.
pub(crate) async fn resolve_position(api: &Api, source: Collection, index: usize) -> Result<JokeId> {
    let view = api.view().await;
    let jokes = match source {
        Collection::History => &view.history,
        Collection::Favorites => &view.favorites,
    };
    index
        .checked_sub(1)
        .and_then(|i| jokes.get(i))
        .map(|joke| joke.id.clone())
        .ok_or_else(|| JokeboxError::NotFound(format!("{} #{}", source, index)))
}

pub(crate) async fn print_result(api: &Api, result: &CmdResult) {
    if let Some(joke) = &result.joke {
        let favorited = api.is_favorited(&joke.id).await;
        let theme = api.view().await.theme;
        print_joke(joke, favorited, theme);
    }
    print_messages(&result.messages);
}

async fn handle_new(ctx: &AppContext, category: Option<String>) -> Result<()> {
    let category = category.map(|c| c.parse::<CategoryFilter>()).transpose()?;
    let result = ctx.api.new_joke(category).await?;
    print_result(&ctx.api, &result).await;
    Ok(())
}

async fn handle_list(ctx: &AppContext, source: Collection) -> Result<()> {
    let view = ctx.api.view().await;
    let jokes = match source {
        Collection::History => &view.history,
        Collection::Favorites => &view.favorites,
    };
    print_jokes(jokes, source, view.theme);
    Ok(())
}

async fn handle_show(ctx: &AppContext, index: usize, source: Collection) -> Result<()> {
    let id = resolve_position(&ctx.api, source, index).await?;
    let result = ctx.api.select_stored(&id, source).await?;
    print_result(&ctx.api, &result).await;
    Ok(())
}

async fn handle_star(ctx: &AppContext, index: usize) -> Result<()> {
    let id = resolve_position(&ctx.api, Collection::History, index).await?;
    let result = ctx.api.favorite_from_history(&id).await?;
    print_messages(&result.messages);
    Ok(())
}

async fn handle_unstar(ctx: &AppContext, index: usize) -> Result<()> {
    let id = resolve_position(&ctx.api, Collection::Favorites, index).await?;
    let result = ctx.api.remove_favorite(&id).await?;
    print_messages(&result.messages);
    Ok(())
}

async fn handle_copy(ctx: &AppContext, index: usize, source: Collection) -> Result<()> {
    let id = resolve_position(&ctx.api, source, index).await?;
    let result = ctx.api.copy_stored(&id, source).await?;
    print_messages(&result.messages);
    Ok(())
}

async fn handle_share(ctx: &AppContext, index: usize, source: Collection) -> Result<()> {
    let id = resolve_position(&ctx.api, source, index).await?;
    let result = ctx.api.share_stored(&id, source).await?;
    print_messages(&result.messages);
    Ok(())
}

async fn handle_clear(ctx: &AppContext, target: ClearTarget, yes: bool) -> Result<()> {
    let label = match target {
        ClearTarget::History => "all history",
        ClearTarget::Favorites => "all favorites",
    };

    if !yes {
        print!("Clear {}? [y/N]: ", label);
        io::stdout().flush().map_err(JokeboxError::Io)?;

        let mut input = String::new();
        io::stdin().read_line(&mut input).map_err(JokeboxError::Io)?;
        if !input.trim().eq_ignore_ascii_case("y") {
            print_messages(&[jokebox::api::CmdMessage::info("Operation cancelled.")]);
            return Ok(());
        }
    }

    let result = match target {
        ClearTarget::History => ctx.api.clear_history().await?,
        ClearTarget::Favorites => ctx.api.clear_favorites().await?,
    };
    print_messages(&result.messages);
    Ok(())
}

async fn handle_theme(ctx: &AppContext) -> Result<()> {
    let result = ctx.api.toggle_theme().await?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_config(ctx: &AppContext, key: Option<String>, value: Option<String>) -> Result<()> {
    let mut config = JokeboxConfig::load(&ctx.data_dir)?;

    match (key, value) {
        (None, _) => {
            for key in JokeboxConfig::keys() {
                println!("{} = {}", key, config.get_key(key)?);
            }
        }
        (Some(key), None) => println!("{} = {}", key, config.get_key(&key)?),
        (Some(key), Some(value)) => {
            if key == "category" {
                value.parse::<CategoryFilter>()?;
            }
            config.set_key(&key, &value)?;
            config.save(&ctx.data_dir)?;
            println!("{} = {}", key, config.get_key(&key)?);
        }
    }
    Ok(())
}

/// Report a failed action without ending the session.
pub(crate) fn report(outcome: Result<()>) {
    if let Err(e) = outcome {
        print_error(&e);
    }
}
