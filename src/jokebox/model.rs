use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use crate::error::JokeboxError;

/// Stable identifier of a joke.
///
/// Remote ids arrive as numbers, fallback ids as strings. Both are kept as
/// strings so comparisons never depend on where a joke came from.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct JokeId(String);

impl JokeId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// A fresh id for jokes whose source did not provide one.
    pub fn synthesize() -> Self {
        Self(format!("local-{}", Uuid::new_v4()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for JokeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for JokeId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<i64> for JokeId {
    fn from(value: i64) -> Self {
        Self(value.to_string())
    }
}

impl<'de> Deserialize<'de> for JokeId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RawId {
            Text(String),
            Number(i64),
        }

        Ok(match RawId::deserialize(deserializer)? {
            RawId::Text(text) => JokeId(text),
            RawId::Number(n) => JokeId::from(n),
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JokeKind {
    Single,
    TwoPart,
}

/// The text of a joke. The variant decides which fields exist.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum JokeBody {
    #[serde(rename = "single")]
    Single { joke: String },
    #[serde(rename = "twopart")]
    TwoPart { setup: String, delivery: String },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JokeRecord {
    pub id: JokeId,
    pub category: String,
    #[serde(flatten)]
    pub body: JokeBody,
    #[serde(default = "Utc::now")]
    pub timestamp: DateTime<Utc>,
}

impl JokeRecord {
    pub fn single(id: impl Into<JokeId>, category: impl Into<String>, joke: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            category: category.into(),
            body: JokeBody::Single { joke: joke.into() },
            timestamp: Utc::now(),
        }
    }

    pub fn two_part(
        id: impl Into<JokeId>,
        category: impl Into<String>,
        setup: impl Into<String>,
        delivery: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            category: category.into(),
            body: JokeBody::TwoPart {
                setup: setup.into(),
                delivery: delivery.into(),
            },
            timestamp: Utc::now(),
        }
    }

    pub fn kind(&self) -> JokeKind {
        match self.body {
            JokeBody::Single { .. } => JokeKind::Single,
            JokeBody::TwoPart { .. } => JokeKind::TwoPart,
        }
    }

    /// Text used for copying, sharing and list previews.
    pub fn display_text(&self) -> String {
        match &self.body {
            JokeBody::Single { joke } => joke.clone(),
            JokeBody::TwoPart { setup, delivery } => format!("{} {}", setup, delivery),
        }
    }

    /// Display text cut to `max_chars` characters, with `...` appended when cut.
    pub fn preview(&self, max_chars: usize) -> String {
        let text = self.display_text();
        if text.chars().count() <= max_chars {
            return text;
        }
        let mut cut: String = text.chars().take(max_chars).collect();
        cut.push_str("...");
        cut
    }

    pub fn same_joke(&self, other: &JokeRecord) -> bool {
        self.id == other.id
    }

    pub fn stamped(mut self, at: DateTime<Utc>) -> Self {
        self.timestamp = at;
        self
    }
}

impl From<String> for JokeId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// Category requested by the user. `Any` is the "no filter" sentinel.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CategoryFilter {
    #[default]
    Any,
    Only(String),
}

impl CategoryFilter {
    /// Path segment used by the joke API.
    pub fn path_segment(&self) -> &str {
        match self {
            CategoryFilter::Any => "Any",
            CategoryFilter::Only(name) => name,
        }
    }

    pub fn matches(&self, category: &str) -> bool {
        match self {
            CategoryFilter::Any => true,
            CategoryFilter::Only(name) => name.eq_ignore_ascii_case(category),
        }
    }
}

impl FromStr for CategoryFilter {
    type Err = JokeboxError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("any") {
            Ok(CategoryFilter::Any)
        } else {
            Ok(CategoryFilter::Only(trimmed.to_lowercase()))
        }
    }
}

impl fmt::Display for CategoryFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CategoryFilter::Any => f.write_str("any"),
            CategoryFilter::Only(name) => f.write_str(name),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }
}

impl FromStr for Theme {
    type Err = JokeboxError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "light" => Ok(Theme::Light),
            "dark" => Ok(Theme::Dark),
            other => Err(JokeboxError::Api(format!("Unknown theme: {}", other))),
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The two stored collections a joke can be picked from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    History,
    Favorites,
}

impl Collection {
    pub fn label(self) -> &'static str {
        match self {
            Collection::History => "history",
            Collection::Favorites => "favorites",
        }
    }
}

impl FromStr for Collection {
    type Err = JokeboxError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "history" | "h" => Ok(Collection::History),
            "favorites" | "favs" | "f" => Ok(Collection::Favorites),
            other => Err(JokeboxError::Api(format!("Unknown collection: {}", other))),
        }
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
