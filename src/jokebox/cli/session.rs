//! Interactive session: one line of input per action.
//!
//! Input is parsed into an [`Intent`] by [`parse_intent`], which never looks
//! at the terminal, then dispatched against the API. A failed action prints
//! an error and the loop keeps going.

use super::commands::{print_result, report, resolve_position, Api};
use super::print::{print_current, print_jokes, print_messages};
use colored::Colorize;
use jokebox::api::CmdMessage;
use jokebox::error::Result;
use jokebox::model::{CategoryFilter, Collection};
use std::io::Write;
use tokio::io::{AsyncBufReadExt, BufReader};

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Intent {
    NewJoke,
    ToggleFavorite,
    Copy,
    Share,
    ToggleTheme,
    List(Collection),
    Open(Collection, usize),
    SetCategory(String),
    Help,
    Quit,
    Unknown(String),
}

const HELP: &[(&str, &str)] = &[
    ("Enter, n", "new joke"),
    ("f", "favorite / unfavorite the joke on screen"),
    ("c", "copy the joke on screen"),
    ("s", "share the joke on screen"),
    ("t", "switch theme"),
    ("1", "list history"),
    ("2", "list favorites"),
    ("o h3, o f2", "open a joke from history or favorites"),
    ("cat <name>", "set the category (any, programming, pun, misc...)"),
    ("?", "this help"),
    ("q", "quit"),
];

pub(crate) fn parse_intent(line: &str) -> Intent {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        // Enter, or a line of spaces.
        return Intent::NewJoke;
    }

    let mut parts = trimmed.splitn(2, char::is_whitespace);
    let head = parts.next().unwrap_or_default();
    let rest = parts.next().map(str::trim).unwrap_or_default();

    match (head, rest) {
        ("n", "") => Intent::NewJoke,
        ("f", "") => Intent::ToggleFavorite,
        ("c", "") => Intent::Copy,
        ("s", "") => Intent::Share,
        ("t", "") => Intent::ToggleTheme,
        ("1", "") => Intent::List(Collection::History),
        ("2", "") => Intent::List(Collection::Favorites),
        ("?", "") | ("help", "") => Intent::Help,
        ("q", "") | ("quit", "") | ("exit", "") => Intent::Quit,
        ("cat", name) if !name.is_empty() => Intent::SetCategory(name.to_string()),
        ("o", target) => parse_open(target).unwrap_or_else(|| Intent::Unknown(trimmed.to_string())),
        _ => Intent::Unknown(trimmed.to_string()),
    }
}

/// `h3` or `f2`, optionally with a space between letter and number.
fn parse_open(target: &str) -> Option<Intent> {
    let mut chars = target.chars();
    let source = match chars.next()? {
        'h' | 'H' => Collection::History,
        'f' | 'F' => Collection::Favorites,
        _ => return None,
    };
    let index: usize = chars.as_str().trim().parse().ok()?;
    (index > 0).then_some(Intent::Open(source, index))
}

pub(crate) async fn run(api: &Api, category: Option<String>) -> Result<()> {
    if let Some(category) = category {
        let filter: CategoryFilter = category.parse()?;
        api.set_category(filter).await;
    }

    if api.is_offline() {
        print_messages(&[CmdMessage::warning("Offline mode: fallback jokes only")]);
    }
    print_messages(&[CmdMessage::info("Press Enter for a joke, ? for help, q to quit.")]);

    report(dispatch(api, Intent::NewJoke).await);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        prompt();
        let Some(line) = lines.next_line().await? else {
            break;
        };
        match parse_intent(&line) {
            Intent::Quit => break,
            intent => report(dispatch(api, intent).await),
        }
    }
    Ok(())
}

fn prompt() {
    print!("{} ", ">".dimmed());
    let _ = std::io::stdout().flush();
}

async fn dispatch(api: &Api, intent: Intent) -> Result<()> {
    match intent {
        Intent::NewJoke => {
            let result = api.new_joke(None).await?;
            if result.joke.is_none() && result.messages.is_empty() {
                // Superseded: show whatever is current now.
                let view = api.view().await;
                print_current(&view.current, view.current_is_favorite, view.theme);
            } else {
                print_result(api, &result).await;
            }
        }
        Intent::ToggleFavorite => print_messages(&api.toggle_favorite().await?.messages),
        Intent::Copy => print_messages(&api.copy_current().await?.messages),
        Intent::Share => print_messages(&api.share_current().await?.messages),
        Intent::ToggleTheme => print_messages(&api.toggle_theme().await?.messages),
        Intent::List(source) => {
            let view = api.view().await;
            let jokes = match source {
                Collection::History => &view.history,
                Collection::Favorites => &view.favorites,
            };
            print_jokes(jokes, source, view.theme);
        }
        Intent::Open(source, index) => {
            let id = resolve_position(api, source, index).await?;
            let result = api.select_stored(&id, source).await?;
            print_result(api, &result).await;
        }
        Intent::SetCategory(name) => {
            let filter: CategoryFilter = name.parse()?;
            print_messages(&api.set_category(filter).await.messages);
        }
        Intent::Help => print_help(),
        Intent::Unknown(input) => print_messages(&[CmdMessage::warning(format!(
            "Unknown command: {} (? for help)",
            input
        ))]),
        Intent::Quit => {}
    }
    Ok(())
}

fn print_help() {
    for (keys, action) in HELP {
        println!("  {} {}", format!("{:<12}", keys).bold(), action);
    }
}
