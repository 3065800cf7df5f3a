use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "jokebox", version)]
#[command(about = "Random jokes in your terminal, with history and favorites", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Directory holding history, favorites and config
    #[arg(long, global = true, value_name = "DIR")]
    pub data_dir: Option<PathBuf>,

    /// Only use the bundled jokes
    #[arg(long, global = true)]
    pub offline: bool,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Interactive session with single-key shortcuts (default)
    Play {
        /// Category to draw from (e.g. programming, pun, misc, any)
        #[arg(short, long)]
        category: Option<String>,
    },

    /// Fetch and show a new joke
    #[command(alias = "n")]
    New {
        /// Category to draw from (e.g. programming, pun, misc, any)
        #[arg(short, long)]
        category: Option<String>,
    },

    /// List recently shown jokes
    #[command(alias = "h")]
    History,

    /// List favorite jokes
    #[command(alias = "favs")]
    Favorites,

    /// Show a stored joke
    #[command(alias = "v")]
    Show {
        /// Position in the list (1 = newest)
        index: usize,

        /// Pick from favorites instead of history
        #[arg(short, long)]
        favorites: bool,
    },

    /// Add a history entry to favorites
    Star {
        /// Position in the history list
        index: usize,
    },

    /// Remove a favorite
    Unstar {
        /// Position in the favorites list
        index: usize,
    },

    /// Copy a stored joke to the clipboard
    #[command(alias = "c")]
    Copy {
        /// Position in the list (defaults to the newest)
        index: Option<usize>,

        /// Pick from favorites instead of history
        #[arg(short, long)]
        favorites: bool,
    },

    /// Share a stored joke (copies when sharing is unavailable)
    Share {
        /// Position in the list (defaults to the newest)
        index: Option<usize>,

        /// Pick from favorites instead of history
        #[arg(short, long)]
        favorites: bool,
    },

    /// Clear history or favorites
    Clear {
        #[arg(value_enum)]
        target: ClearTarget,

        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },

    /// Switch between the light and dark theme
    Theme,

    /// Get or set configuration
    Config {
        /// Configuration key (category, offline, api-url, timeout-ms)
        key: Option<String>,

        /// Value to set (if omitted, prints current value)
        value: Option<String>,
    },
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClearTarget {
    History,
    Favorites,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_subcommand_means_play() {
        let cli = Cli::try_parse_from(["jokebox"]).unwrap();
        assert!(cli.command.is_none());
    }

    #[test]
    fn parses_new_with_category_and_globals() {
        let cli =
            Cli::try_parse_from(["jokebox", "--offline", "n", "-c", "pun", "--data-dir", "/tmp/x"])
                .unwrap();
        assert!(cli.offline);
        assert_eq!(cli.data_dir, Some(PathBuf::from("/tmp/x")));
        match cli.command {
            Some(Commands::New { category }) => assert_eq!(category.as_deref(), Some("pun")),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn parses_clear_target() {
        let cli = Cli::try_parse_from(["jokebox", "clear", "favorites", "--yes"]).unwrap();
        match cli.command {
            Some(Commands::Clear { target, yes }) => {
                assert_eq!(target, ClearTarget::Favorites);
                assert!(yes);
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn show_requires_an_index() {
        assert!(Cli::try_parse_from(["jokebox", "show"]).is_err());
    }
}
