//! # Storage Layer
//!
//! Everything jokebox persists lives behind the [`KeyValueStore`] trait: a
//! handful of string keys, each holding one serialized value.
//!
//! ## Keys
//!
//! - [`HISTORY_KEY`]: JSON array of recently shown jokes, newest first
//! - [`FAVORITES_KEY`]: JSON array of favorite jokes, newest first
//! - [`THEME_KEY`]: the theme preference (`light` or `dark`)
//!
//! ## Implementations
//!
//! - [`fs::FileStore`]: one `<key>.json` file per key in the data directory
//! - [`memory::InMemoryStore`]: no persistence, used by tests
//!
//! A missing key is not an error: `get` returns `Ok(None)`, and `remove` on a
//! missing key succeeds.

use crate::error::Result;

pub mod fs;
pub mod memory;

pub const HISTORY_KEY: &str = "history";
pub const FAVORITES_KEY: &str = "favorites";
pub const THEME_KEY: &str = "theme";

/// Abstract interface for the persistent key-value store.
pub trait KeyValueStore {
    /// Read the raw value stored under `key`.
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Replace the value stored under `key`.
    fn set(&mut self, key: &str, value: &str) -> Result<()>;

    /// Drop `key` entirely.
    fn remove(&mut self, key: &str) -> Result<()>;
}
