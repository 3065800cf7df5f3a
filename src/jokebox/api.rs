//! # API Facade
//!
//! [`JokeboxApi`] is the single entry point for every user intent, whatever
//! the UI. It is cheap to clone and safe to call concurrently: all clones
//! share one [`SessionController`] behind an async mutex.
//!
//! ## Role and Responsibilities
//!
//! - **Serializes** access to the controller; every mutation and its write to
//!   storage complete before the lock is released.
//! - **Runs fetches unlocked**: `new_joke` takes a ticket, releases the lock,
//!   awaits the [`Fetcher`], then locks again to hand the joke back. Other
//!   calls, including further `new_joke` calls, proceed in the meantime.
//! - **Returns structured types**: a [`CmdResult`] carrying the affected joke
//!   and user-facing [`CmdMessage`]s, or a [`SessionView`] snapshot. No
//!   printing happens here.

use crate::clipboard::{share_or_copy, Clipboard, ShareOutcome};
use crate::controller::{FavoriteToggle, RequestOutcome, SessionController, SessionView};
use crate::error::{JokeboxError, Result};
use crate::fetcher::{Fetcher, JokeSource};
use crate::model::{CategoryFilter, Collection, JokeId, JokeRecord, Theme};
use crate::store::KeyValueStore;
use std::sync::Arc;
use tokio::sync::Mutex;

pub use crate::controller::CurrentJoke;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageLevel {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CmdMessage {
    pub level: MessageLevel,
    pub content: String,
}

impl CmdMessage {
    pub fn info(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Info,
            content: content.into(),
        }
    }

    pub fn success(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Success,
            content: content.into(),
        }
    }

    pub fn warning(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Warning,
            content: content.into(),
        }
    }

    pub fn error(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Error,
            content: content.into(),
        }
    }
}

#[derive(Debug, Default)]
pub struct CmdResult {
    /// The joke the command acted on, if any.
    pub joke: Option<JokeRecord>,
    pub theme: Option<Theme>,
    pub messages: Vec<CmdMessage>,
}

impl CmdResult {
    pub fn add_message(&mut self, message: CmdMessage) {
        self.messages.push(message);
    }

    pub fn with_joke(mut self, joke: JokeRecord) -> Self {
        self.joke = Some(joke);
        self
    }

    pub fn with_message(mut self, message: CmdMessage) -> Self {
        self.messages.push(message);
        self
    }
}

pub struct JokeboxApi<S: KeyValueStore, J: JokeSource> {
    controller: Arc<Mutex<SessionController<S>>>,
    fetcher: Arc<Fetcher<J>>,
    clipboard: Arc<dyn Clipboard>,
}

impl<S: KeyValueStore, J: JokeSource> Clone for JokeboxApi<S, J> {
    fn clone(&self) -> Self {
        Self {
            controller: Arc::clone(&self.controller),
            fetcher: Arc::clone(&self.fetcher),
            clipboard: Arc::clone(&self.clipboard),
        }
    }
}

impl<S, J> JokeboxApi<S, J>
where
    S: KeyValueStore + Send,
    J: JokeSource,
{
    pub fn new(
        controller: SessionController<S>,
        fetcher: Fetcher<J>,
        clipboard: Arc<dyn Clipboard>,
    ) -> Self {
        Self {
            controller: Arc::new(Mutex::new(controller)),
            fetcher: Arc::new(fetcher),
            clipboard,
        }
    }

    /// Fetch a new joke, show it and record it in history.
    ///
    /// `category` overrides the session category for this request only.
    pub async fn new_joke(&self, category: Option<CategoryFilter>) -> Result<CmdResult> {
        let (ticket, category) = {
            let mut ctrl = self.controller.lock().await;
            let category = category.unwrap_or_else(|| ctrl.category().clone());
            (ctrl.begin_request(), category)
        };

        let joke = self.fetcher.fetch(&category).await;

        let mut ctrl = self.controller.lock().await;
        let outcome = match ctrl.complete_request(ticket, joke) {
            Ok(outcome) => outcome,
            Err(e) => {
                // The joke is already current; only the history write failed.
                log::warn!("Could not record joke in history: {}", e);
                let mut result = CmdResult::default()
                    .with_message(CmdMessage::warning(format!("History not saved: {}", e)));
                result.joke = ctrl.current().joke().cloned();
                return Ok(result);
            }
        };
        let result = match outcome {
            RequestOutcome::Loaded(joke) => CmdResult::default().with_joke(joke),
            RequestOutcome::Superseded => CmdResult::default(),
            RequestOutcome::Failed => CmdResult::default()
                .with_message(CmdMessage::error("Could not load a joke. Try again.")),
        };
        Ok(result)
    }

    pub async fn toggle_favorite(&self) -> Result<CmdResult> {
        let mut ctrl = self.controller.lock().await;
        let mut result = CmdResult::default();
        match ctrl.toggle_favorite()? {
            Some(FavoriteToggle::Added) => {
                result.add_message(CmdMessage::success("Added to favorites"))
            }
            Some(FavoriteToggle::Removed) => {
                result.add_message(CmdMessage::info("Removed from favorites"))
            }
            None => result.add_message(CmdMessage::warning("No joke to favorite yet")),
        }
        if let Some(joke) = ctrl.current().joke() {
            result.joke = Some(joke.clone());
        }
        Ok(result)
    }

    pub async fn favorite_from_history(&self, id: &JokeId) -> Result<CmdResult> {
        let mut ctrl = self.controller.lock().await;
        if ctrl.find_stored(id, Collection::History).is_none() {
            return Err(JokeboxError::NotFound(id.to_string()));
        }
        let message = if ctrl.favorite_from_history(id)? {
            CmdMessage::success("Added to favorites")
        } else {
            CmdMessage::info("Already in favorites")
        };
        Ok(CmdResult::default().with_message(message))
    }

    pub async fn remove_favorite(&self, id: &JokeId) -> Result<CmdResult> {
        let mut ctrl = self.controller.lock().await;
        if !ctrl.remove_favorite(id)? {
            return Err(JokeboxError::NotFound(id.to_string()));
        }
        Ok(CmdResult::default().with_message(CmdMessage::info("Removed from favorites")))
    }

    /// Copy the joke on screen.
    pub async fn copy_current(&self) -> Result<CmdResult> {
        let text = self.current_text().await?;
        self.clipboard.copy_text(&text)?;
        Ok(CmdResult::default().with_message(CmdMessage::success("Joke copied")))
    }

    /// Share the joke on screen, copying it when sharing is unavailable.
    pub async fn share_current(&self) -> Result<CmdResult> {
        let text = self.current_text().await?;
        let message = match share_or_copy(self.clipboard.as_ref(), &text)? {
            ShareOutcome::Shared => CmdMessage::success("Joke shared"),
            ShareOutcome::Copied => CmdMessage::success("Joke copied to the clipboard"),
        };
        Ok(CmdResult::default().with_message(message))
    }

    pub async fn copy_stored(&self, id: &JokeId, source: Collection) -> Result<CmdResult> {
        let text = self.stored_text(id, source).await?;
        self.clipboard.copy_text(&text)?;
        Ok(CmdResult::default().with_message(CmdMessage::success("Joke copied")))
    }

    pub async fn share_stored(&self, id: &JokeId, source: Collection) -> Result<CmdResult> {
        let text = self.stored_text(id, source).await?;
        let message = match share_or_copy(self.clipboard.as_ref(), &text)? {
            ShareOutcome::Shared => CmdMessage::success("Joke shared"),
            ShareOutcome::Copied => CmdMessage::success("Joke copied to the clipboard"),
        };
        Ok(CmdResult::default().with_message(message))
    }

    /// Put a stored joke on screen.
    pub async fn select_stored(&self, id: &JokeId, source: Collection) -> Result<CmdResult> {
        let mut ctrl = self.controller.lock().await;
        let joke = ctrl
            .select_stored(id, source)
            .cloned()
            .ok_or_else(|| JokeboxError::NotFound(id.to_string()))?;
        Ok(CmdResult::default().with_joke(joke))
    }

    pub async fn clear_history(&self) -> Result<CmdResult> {
        let mut ctrl = self.controller.lock().await;
        if ctrl.history().is_empty() {
            return Ok(CmdResult::default().with_message(CmdMessage::info("History is already empty")));
        }
        ctrl.clear_history()?;
        Ok(CmdResult::default().with_message(CmdMessage::info("History cleared")))
    }

    pub async fn clear_favorites(&self) -> Result<CmdResult> {
        let mut ctrl = self.controller.lock().await;
        if ctrl.favorites().is_empty() {
            return Ok(
                CmdResult::default().with_message(CmdMessage::info("Favorites are already empty"))
            );
        }
        ctrl.clear_favorites()?;
        Ok(CmdResult::default().with_message(CmdMessage::info("Favorites cleared")))
    }

    pub async fn toggle_theme(&self) -> Result<CmdResult> {
        let mut ctrl = self.controller.lock().await;
        let theme = ctrl.toggle_theme()?;
        let mut result = CmdResult::default()
            .with_message(CmdMessage::info(format!("{} theme enabled", capitalize(theme.as_str()))));
        result.theme = Some(theme);
        Ok(result)
    }

    pub async fn set_category(&self, category: CategoryFilter) -> CmdResult {
        let mut ctrl = self.controller.lock().await;
        ctrl.set_category(category.clone());
        CmdResult::default().with_message(CmdMessage::info(format!("Category set to {}", category)))
    }

    pub async fn view(&self) -> SessionView {
        self.controller.lock().await.view()
    }

    pub async fn is_favorited(&self, id: &JokeId) -> bool {
        self.controller.lock().await.is_favorited(id)
    }

    pub fn is_offline(&self) -> bool {
        self.fetcher.is_offline()
    }

    async fn stored_text(&self, id: &JokeId, source: Collection) -> Result<String> {
        self.controller
            .lock()
            .await
            .find_stored(id, source)
            .map(JokeRecord::display_text)
            .ok_or_else(|| JokeboxError::NotFound(id.to_string()))
    }

    async fn current_text(&self) -> Result<String> {
        self.controller
            .lock()
            .await
            .current_text()
            .ok_or_else(|| JokeboxError::Api("No joke on screen".to_string()))
    }
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
