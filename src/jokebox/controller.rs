//! # Session Controller
//!
//! [`SessionController`] owns everything a viewer session knows: the joke on
//! screen, the history and favorites collections, and the theme and category
//! preferences. It is plain synchronous code over a [`KeyValueStore`]; the
//! async side lives in [`crate::api`].
//!
//! ## Requests and tickets
//!
//! Fetching a joke is split in two so the network call can happen without
//! holding the controller:
//!
//! 1. [`SessionController::begin_request`] bumps the request sequence number,
//!    moves `current` to [`CurrentJoke::Loading`] and hands out a
//!    [`RequestTicket`].
//! 2. [`SessionController::complete_request`] takes the ticket back with the
//!    fetched joke. If another request was issued in between, the ticket is
//!    stale and the joke is dropped: it neither replaces `current` nor enters
//!    history. The last request issued always wins.
//!
//! Picking a stored joke with [`SessionController::select_stored`] also counts
//! as the user's latest intent and invalidates any outstanding ticket.

use crate::collection::CollectionStore;
use crate::error::Result;
use crate::model::{CategoryFilter, Collection, JokeId, JokeRecord, Theme};
use crate::store::{KeyValueStore, FAVORITES_KEY, HISTORY_KEY, THEME_KEY};
use chrono::Utc;

/// What the viewer is showing.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum CurrentJoke {
    #[default]
    Empty,
    Loading,
    Loaded(JokeRecord),
    Failed,
}

impl CurrentJoke {
    pub fn joke(&self) -> Option<&JokeRecord> {
        match self {
            CurrentJoke::Loaded(joke) => Some(joke),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestTicket(u64);

impl RequestTicket {
    pub fn sequence(self) -> u64 {
        self.0
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum RequestOutcome {
    Loaded(JokeRecord),
    /// A newer request was issued; this response was dropped.
    Superseded,
    /// No joke could be produced at all.
    Failed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FavoriteToggle {
    Added,
    Removed,
}

/// Caps for the two collections.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Limits {
    pub history: usize,
    pub favorites: usize,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            history: crate::config::DEFAULT_HISTORY_LIMIT,
            favorites: crate::config::DEFAULT_FAVORITES_LIMIT,
        }
    }
}

/// Snapshot handed to the presentation layer.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionView {
    pub current: CurrentJoke,
    pub current_is_favorite: bool,
    pub history: Vec<JokeRecord>,
    pub favorites: Vec<JokeRecord>,
    pub theme: Theme,
    pub category: CategoryFilter,
}

pub struct SessionController<S: KeyValueStore> {
    storage: S,
    history: CollectionStore<JokeRecord>,
    favorites: CollectionStore<JokeRecord>,
    current: CurrentJoke,
    latest_request: u64,
    theme: Theme,
    category: CategoryFilter,
}

impl<S: KeyValueStore> SessionController<S> {
    /// Build a controller from whatever `storage` holds. Never fails: unreadable
    /// entries start out empty (or as the default theme).
    pub fn new(storage: S, limits: Limits) -> Self {
        let history = CollectionStore::hydrate(&storage, HISTORY_KEY, limits.history);
        let favorites = CollectionStore::hydrate(&storage, FAVORITES_KEY, limits.favorites);
        let theme = match storage.get(THEME_KEY) {
            Ok(Some(raw)) => raw.parse().unwrap_or_else(|_| {
                log::warn!("Ignoring unknown theme {:?}", raw);
                Theme::default()
            }),
            Ok(None) => Theme::default(),
            Err(e) => {
                log::warn!("Could not read theme: {}", e);
                Theme::default()
            }
        };

        Self {
            storage,
            history,
            favorites,
            current: CurrentJoke::Empty,
            latest_request: 0,
            theme,
            category: CategoryFilter::Any,
        }
    }

    pub fn with_category(mut self, category: CategoryFilter) -> Self {
        self.category = category;
        self
    }

    pub fn begin_request(&mut self) -> RequestTicket {
        self.latest_request += 1;
        self.current = CurrentJoke::Loading;
        RequestTicket(self.latest_request)
    }

    pub fn is_latest(&self, ticket: RequestTicket) -> bool {
        ticket.0 == self.latest_request
    }

    /// Hand back the result of the fetch started with `ticket`.
    ///
    /// The joke becomes current before it is written to history, so a failed
    /// history write still leaves it on screen.
    pub fn complete_request(
        &mut self,
        ticket: RequestTicket,
        joke: Option<JokeRecord>,
    ) -> Result<RequestOutcome> {
        if !self.is_latest(ticket) {
            log::debug!(
                "Dropping response for request {} (latest is {})",
                ticket.0,
                self.latest_request
            );
            return Ok(RequestOutcome::Superseded);
        }

        let Some(joke) = joke else {
            self.current = CurrentJoke::Failed;
            return Ok(RequestOutcome::Failed);
        };

        let joke = joke.stamped(Utc::now());
        self.current = CurrentJoke::Loaded(joke.clone());
        self.history.add(&mut self.storage, joke.clone())?;
        Ok(RequestOutcome::Loaded(joke))
    }

    /// Add the current joke to favorites, or remove it if it is already there.
    /// Returns `None` when no joke is loaded.
    pub fn toggle_favorite(&mut self) -> Result<Option<FavoriteToggle>> {
        let Some(joke) = self.current.joke().cloned() else {
            return Ok(None);
        };

        if self.favorites.contains(&joke.id) {
            self.favorites.remove(&mut self.storage, &joke.id)?;
            Ok(Some(FavoriteToggle::Removed))
        } else {
            self.favorites
                .add(&mut self.storage, joke.stamped(Utc::now()))?;
            Ok(Some(FavoriteToggle::Added))
        }
    }

    /// Add a history entry to favorites. Returns false if it is not in history
    /// or is already a favorite.
    pub fn favorite_from_history(&mut self, id: &JokeId) -> Result<bool> {
        if self.favorites.contains(id) {
            return Ok(false);
        }
        let Some(joke) = self.history.find(id).cloned() else {
            return Ok(false);
        };
        self.favorites
            .add(&mut self.storage, joke.stamped(Utc::now()))?;
        Ok(true)
    }

    pub fn remove_favorite(&mut self, id: &JokeId) -> Result<bool> {
        Ok(self.favorites.remove(&mut self.storage, id)?.is_some())
    }

    /// Show a stored joke without fetching or touching history.
    pub fn select_stored(&mut self, id: &JokeId, source: Collection) -> Option<&JokeRecord> {
        let joke = self.find_stored(id, source)?.clone();
        self.latest_request += 1;
        self.current = CurrentJoke::Loaded(joke);
        self.current.joke()
    }

    pub fn find_stored(&self, id: &JokeId, source: Collection) -> Option<&JokeRecord> {
        self.collection(source).find(id)
    }

    pub fn clear_history(&mut self) -> Result<()> {
        self.history.clear(&mut self.storage)
    }

    pub fn clear_favorites(&mut self) -> Result<()> {
        self.favorites.clear(&mut self.storage)
    }

    pub fn is_favorited(&self, id: &JokeId) -> bool {
        self.favorites.contains(id)
    }

    pub fn toggle_theme(&mut self) -> Result<Theme> {
        let next = self.theme.toggled();
        self.storage.set(THEME_KEY, next.as_str())?;
        self.theme = next;
        Ok(next)
    }

    pub fn set_category(&mut self, category: CategoryFilter) {
        self.category = category;
    }

    pub fn category(&self) -> &CategoryFilter {
        &self.category
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn current(&self) -> &CurrentJoke {
        &self.current
    }

    pub fn current_text(&self) -> Option<String> {
        self.current.joke().map(JokeRecord::display_text)
    }

    pub fn history(&self) -> &[JokeRecord] {
        self.history.items()
    }

    pub fn favorites(&self) -> &[JokeRecord] {
        self.favorites.items()
    }

    pub fn collection(&self, source: Collection) -> &CollectionStore<JokeRecord> {
        match source {
            Collection::History => &self.history,
            Collection::Favorites => &self.favorites,
        }
    }

    pub fn view(&self) -> SessionView {
        SessionView {
            current: self.current.clone(),
            current_is_favorite: self
                .current
                .joke()
                .map(|joke| self.is_favorited(&joke.id))
                .unwrap_or(false),
            history: self.history.items().to_vec(),
            favorites: self.favorites.items().to_vec(),
            theme: self.theme,
            category: self.category.clone(),
        }
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }
}
