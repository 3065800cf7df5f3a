//! # Bounded Collections
//!
//! [`CollectionStore`] is the ordered, de-duplicated, size-capped sequence
//! behind both the history and the favorites list.
//!
//! Invariants, after every operation:
//! - newest first: `add` always inserts at the front
//! - unique ids: adding an id that is already present moves it to the front
//! - `len() <= cap()`: the oldest entries (the tail) are evicted first
//!
//! Every mutation is written through to the [`KeyValueStore`] before the call
//! returns. The new sequence is serialized and written first and only then
//! committed in memory, so a failed write leaves the collection as it was.

use crate::error::Result;
use crate::model::{JokeId, JokeRecord};
use crate::store::KeyValueStore;
use serde::de::DeserializeOwned;
use serde::Serialize;

/// Anything with a stable identity.
pub trait Keyed {
    fn key(&self) -> &JokeId;
}

impl Keyed for JokeRecord {
    fn key(&self) -> &JokeId {
        &self.id
    }
}

#[derive(Debug, Clone)]
pub struct CollectionStore<T> {
    storage_key: &'static str,
    cap: usize,
    items: Vec<T>,
}

impl<T> CollectionStore<T>
where
    T: Keyed + Clone + Serialize + DeserializeOwned,
{
    /// Load the collection persisted under `storage_key`.
    ///
    /// Never fails: a missing, unreadable or unparseable entry yields an empty
    /// collection. Loaded data is normalized so the invariants hold even for
    /// hand-edited files.
    pub fn hydrate<S: KeyValueStore>(storage: &S, storage_key: &'static str, cap: usize) -> Self {
        let items = match storage.get(storage_key) {
            Ok(Some(raw)) => match serde_json::from_str::<Vec<T>>(&raw) {
                Ok(items) => items,
                Err(e) => {
                    log::warn!("Ignoring unreadable {} data: {}", storage_key, e);
                    Vec::new()
                }
            },
            Ok(None) => Vec::new(),
            Err(e) => {
                log::warn!("Could not read {}: {}", storage_key, e);
                Vec::new()
            }
        };

        Self {
            storage_key,
            cap,
            items: normalize(items, cap),
        }
    }

    /// Insert `item` at the front, replacing any entry with the same id.
    pub fn add<S: KeyValueStore>(&mut self, storage: &mut S, item: T) -> Result<()> {
        let id = item.key().clone();
        let mut next: Vec<T> = Vec::with_capacity(self.items.len() + 1);
        next.push(item);
        next.extend(
            self.items
                .iter()
                .filter(|existing| *existing.key() != id)
                .cloned(),
        );
        next.truncate(self.cap);

        self.commit(storage, next)
    }

    /// Drop the entry with `id`. Returns the removed entry, if any.
    pub fn remove<S: KeyValueStore>(&mut self, storage: &mut S, id: &JokeId) -> Result<Option<T>> {
        let Some(position) = self.items.iter().position(|item| item.key() == id) else {
            return Ok(None);
        };

        let mut next = self.items.clone();
        let removed = next.remove(position);
        self.commit(storage, next)?;
        Ok(Some(removed))
    }

    /// Empty the collection and delete its persisted entry.
    pub fn clear<S: KeyValueStore>(&mut self, storage: &mut S) -> Result<()> {
        storage.remove(self.storage_key)?;
        self.items.clear();
        Ok(())
    }

    pub fn contains(&self, id: &JokeId) -> bool {
        self.items.iter().any(|item| item.key() == id)
    }

    pub fn find(&self, id: &JokeId) -> Option<&T> {
        self.items.iter().find(|item| item.key() == id)
    }

    /// Entries, newest first.
    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn cap(&self) -> usize {
        self.cap
    }

    fn commit<S: KeyValueStore>(&mut self, storage: &mut S, next: Vec<T>) -> Result<()> {
        let raw = serde_json::to_string(&next)?;
        storage.set(self.storage_key, &raw)?;
        self.items = next;
        Ok(())
    }
}

fn normalize<T: Keyed>(items: Vec<T>, cap: usize) -> Vec<T> {
    let mut seen: Vec<JokeId> = Vec::with_capacity(items.len());
    let mut kept = Vec::with_capacity(items.len().min(cap));
    for item in items {
        if kept.len() == cap {
            break;
        }
        if seen.contains(item.key()) {
            continue;
        }
        seen.push(item.key().clone());
        kept.push(item);
    }
    kept
}
