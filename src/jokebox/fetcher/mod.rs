//! # Fetching Jokes
//!
//! [`Fetcher`] turns "give me a joke in this category" into a [`JokeRecord`],
//! whatever the network does.
//!
//! The remote side is a [`JokeSource`]. Any error from it, be it a timeout,
//! a bad status, an unparseable body or an API-level error flag, is logged
//! and absorbed: the fetcher then picks a random joke from its fallback set,
//! preferring jokes of the requested category when there are any.
//!
//! `fetch` only yields `None` when the fallback set is empty, which the
//! bundled set never is.

use crate::error::Result;
use crate::model::{CategoryFilter, JokeRecord};
use async_trait::async_trait;
use chrono::Utc;
use rand::prelude::IndexedRandom;

pub mod fallback;
pub mod remote;

pub use fallback::FALLBACK_JOKES;
pub use remote::JokeApiClient;

/// A remote place jokes come from.
#[async_trait]
pub trait JokeSource: Send + Sync {
    async fn fetch_joke(&self, category: &CategoryFilter) -> Result<JokeRecord>;
}

pub struct Fetcher<J> {
    source: J,
    fallback: Vec<JokeRecord>,
    offline: bool,
}

impl<J: JokeSource> Fetcher<J> {
    pub fn new(source: J) -> Self {
        Self {
            source,
            fallback: FALLBACK_JOKES.clone(),
            offline: false,
        }
    }

    pub fn with_fallback(mut self, jokes: Vec<JokeRecord>) -> Self {
        self.fallback = jokes;
        self
    }

    /// When offline the source is never asked.
    pub fn offline(mut self, offline: bool) -> Self {
        self.offline = offline;
        self
    }

    pub fn is_offline(&self) -> bool {
        self.offline
    }

    pub async fn fetch(&self, category: &CategoryFilter) -> Option<JokeRecord> {
        if !self.offline {
            match self.source.fetch_joke(category).await {
                Ok(joke) => return Some(joke),
                Err(e) => log::warn!("Joke API request failed, using fallback: {}", e),
            }
        }
        self.fallback_joke(category)
    }

    pub fn fallback_joke(&self, category: &CategoryFilter) -> Option<JokeRecord> {
        let matching: Vec<&JokeRecord> = self
            .fallback
            .iter()
            .filter(|joke| category.matches(&joke.category))
            .collect();
        let pool: Vec<&JokeRecord> = if matching.is_empty() {
            self.fallback.iter().collect()
        } else {
            matching
        };

        pool.choose(&mut rand::rng())
            .map(|joke| (*joke).clone().stamped(Utc::now()))
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;
    use crate::error::JokeboxError;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Always answers with the same joke and counts calls.
    pub struct FixedSource {
        pub joke: JokeRecord,
        pub calls: AtomicUsize,
    }

    impl FixedSource {
        pub fn new(joke: JokeRecord) -> Self {
            Self {
                joke,
                calls: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl JokeSource for FixedSource {
        async fn fetch_joke(&self, _category: &CategoryFilter) -> Result<JokeRecord> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(self.joke.clone())
        }
    }

    /// Simulates a network that is down.
    pub struct FailingSource;

    #[async_trait]
    impl JokeSource for FailingSource {
        async fn fetch_joke(&self, _category: &CategoryFilter) -> Result<JokeRecord> {
            Err(JokeboxError::Remote("simulated network failure".to_string()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::testing::{FailingSource, FixedSource};
    use super::*;
    use std::sync::atomic::Ordering;

    #[tokio::test]
    async fn success_passes_the_remote_joke_through() {
        let remote = JokeRecord::single("99", "Programming", "Remote joke");
        let fetcher = Fetcher::new(FixedSource::new(remote.clone()));

        let joke = fetcher.fetch(&CategoryFilter::Any).await.unwrap();
        assert_eq!(joke, remote);
    }

    #[tokio::test]
    async fn failure_always_yields_a_fallback_joke() {
        let fetcher = Fetcher::new(FailingSource);
        for _ in 0..20 {
            let joke = fetcher.fetch(&CategoryFilter::Any).await.unwrap();
            assert!(FALLBACK_JOKES.iter().any(|f| f.same_joke(&joke)));
        }
    }

    #[tokio::test]
    async fn failure_respects_matching_category() {
        let fetcher = Fetcher::new(FailingSource);
        let wanted = CategoryFilter::Only("programming".to_string());
        for _ in 0..20 {
            let joke = fetcher.fetch(&wanted).await.unwrap();
            assert_eq!(joke.category, "programming");
        }
    }

    #[tokio::test]
    async fn unknown_category_draws_from_full_set() {
        let fetcher = Fetcher::new(FailingSource);
        let joke = fetcher
            .fetch(&CategoryFilter::Only("christmas".to_string()))
            .await
            .unwrap();
        assert!(FALLBACK_JOKES.iter().any(|f| f.same_joke(&joke)));
    }

    #[tokio::test]
    async fn offline_skips_the_source() {
        let source = FixedSource::new(JokeRecord::single("1", "misc", "remote"));
        let fetcher = Fetcher::new(source).offline(true);

        let joke = fetcher.fetch(&CategoryFilter::Any).await.unwrap();
        assert!(joke.id.as_str().starts_with("fallback-"));
        assert_eq!(fetcher.source.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn empty_fallback_set_yields_nothing() {
        let fetcher = Fetcher::new(FailingSource).with_fallback(Vec::new());
        assert!(fetcher.fetch(&CategoryFilter::Any).await.is_none());
    }
}
