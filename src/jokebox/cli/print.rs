use chrono::{DateTime, Utc};
use colored::{Color, Colorize};
use jokebox::api::{CmdMessage, MessageLevel};
use jokebox::controller::CurrentJoke;
use jokebox::model::{Collection, JokeBody, JokeRecord, Theme};
use timeago::Formatter;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

const LINE_WIDTH: usize = 100;
const TIME_WIDTH: usize = 14;
const PREVIEW_CHARS: usize = 150;
const FAVORITE_MARKER: &str = "★";
const NOT_FAVORITE_MARKER: &str = "☆";

struct Palette {
    accent: Color,
    highlight: Color,
}

fn palette(theme: Theme) -> Palette {
    match theme {
        Theme::Light => Palette {
            accent: Color::Blue,
            highlight: Color::Magenta,
        },
        Theme::Dark => Palette {
            accent: Color::BrightCyan,
            highlight: Color::BrightYellow,
        },
    }
}

pub(crate) fn print_messages(messages: &[CmdMessage]) {
    for message in messages {
        match message.level {
            MessageLevel::Info => println!("{}", message.content.dimmed()),
            MessageLevel::Success => println!("{}", message.content.green()),
            MessageLevel::Warning => println!("{}", message.content.yellow()),
            MessageLevel::Error => println!("{}", message.content.red()),
        }
    }
}

pub(crate) fn print_error(error: &jokebox::error::JokeboxError) {
    eprintln!("{}", format!("Error: {}", error).red());
}

pub(crate) fn print_current(current: &CurrentJoke, is_favorite: bool, theme: Theme) {
    match current {
        CurrentJoke::Loaded(joke) => print_joke(joke, is_favorite, theme),
        CurrentJoke::Loading => println!("{}", "Loading a joke...".dimmed()),
        CurrentJoke::Failed => println!("{}", "Could not load a joke. Press Enter to retry.".red()),
        CurrentJoke::Empty => println!("{}", "No joke yet. Press Enter for one.".dimmed()),
    }
}

pub(crate) fn print_joke(joke: &JokeRecord, is_favorite: bool, theme: Theme) {
    let colors = palette(theme);
    let marker = if is_favorite {
        FAVORITE_MARKER.color(colors.highlight)
    } else {
        NOT_FAVORITE_MARKER.normal()
    };

    println!();
    println!("  {} {}", format!("[{}]", joke.category).color(colors.accent), marker);
    match &joke.body {
        JokeBody::Single { joke } => println!("  {}", joke.bold()),
        JokeBody::TwoPart { setup, delivery } => {
            println!("  {}", setup.bold());
            println!("  {}", delivery.color(colors.highlight));
        }
    }
    println!();
}

pub(crate) fn print_jokes(jokes: &[JokeRecord], source: Collection, theme: Theme) {
    if jokes.is_empty() {
        let (title, subtitle) = match source {
            Collection::History => ("No jokes in history yet.", "Fetch your first joke!"),
            Collection::Favorites => ("No favorite jokes yet.", "Star the ones you like!"),
        };
        println!("{}", title);
        println!("{}", subtitle.dimmed());
        return;
    }

    let colors = palette(theme);
    for (i, joke) in jokes.iter().enumerate() {
        let idx_str = format!("{:>3}. ", i + 1);
        let category = format!(" [{}]", joke.category);
        let time_ago = format_time_ago(joke.timestamp);

        let fixed_width = idx_str.width() + category.width() + TIME_WIDTH;
        let available = LINE_WIDTH.saturating_sub(fixed_width);
        let preview = truncate_to_width(&joke.preview(PREVIEW_CHARS), available);
        let padding = available.saturating_sub(preview.width());

        println!(
            "{}{}{}{}{}",
            idx_str.color(colors.accent),
            preview,
            " ".repeat(padding),
            category.dimmed(),
            time_ago.dimmed()
        );
    }
}

fn truncate_to_width(s: &str, max_width: usize) -> String {
    let mut result = String::new();
    let mut current_width = 0;

    for c in s.chars() {
        let c = if c == '\n' { ' ' } else { c };
        let char_width = c.width().unwrap_or(0);
        if current_width + char_width > max_width.saturating_sub(1) {
            result.push('…');
            return result;
        }
        result.push(c);
        current_width += char_width;
    }

    result
}

fn format_time_ago(timestamp: DateTime<Utc>) -> String {
    let duration = Utc::now().signed_duration_since(timestamp);

    let formatter = Formatter::new();
    let time_str = formatter.convert(duration.to_std().unwrap_or_default());

    format!("{:>width$}", time_str, width = TIME_WIDTH)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncate_keeps_short_text() {
        assert_eq!(truncate_to_width("short", 20), "short");
    }

    #[test]
    fn truncate_marks_cut_text() {
        let cut = truncate_to_width("abcdefghijkl", 6);
        assert_eq!(cut, "abcde…");
        assert!(cut.width() <= 6);
    }

    #[test]
    fn truncate_flattens_newlines() {
        assert_eq!(truncate_to_width("a\nb", 10), "a b");
    }

    #[test]
    fn time_ago_is_right_aligned() {
        let formatted = format_time_ago(Utc::now());
        assert_eq!(formatted.width(), TIME_WIDTH);
        assert!(formatted.trim_start().ends_with("ago") || formatted.trim().starts_with("now"));
    }
}
