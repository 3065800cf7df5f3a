//! Client for the public joke API.
//!
//! One request shape only:
//! `GET <base>/<category>?format=json&blacklistFlags=<flags>`.
//! The payload is either `{"error": true, "message": ...}` or a joke with
//! `type`, `category`, `id` and either `joke` or `setup` + `delivery`.
//! Other fields are ignored.

use super::JokeSource;
use crate::config::JokeboxConfig;
use crate::error::{JokeboxError, Result};
use crate::model::{CategoryFilter, JokeBody, JokeId, JokeRecord};
use async_trait::async_trait;
use chrono::Utc;
use reqwest::header::ACCEPT;
use serde::Deserialize;
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "https://v2.jokeapi.dev/joke";
pub const DEFAULT_TIMEOUT_MS: u64 = 5000;
pub const DEFAULT_BLACKLIST_FLAGS: &[&str] = &[
    "nsfw",
    "religious",
    "political",
    "racist",
    "sexist",
    "explicit",
];

pub struct JokeApiClient {
    client: reqwest::Client,
    base_url: String,
    blacklist_flags: Vec<String>,
}

impl JokeApiClient {
    pub fn new(base_url: &str, timeout: Duration, blacklist_flags: Vec<String>) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("jokebox/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            blacklist_flags,
        })
    }

    pub fn from_config(config: &JokeboxConfig) -> Result<Self> {
        Self::new(
            &config.api_base_url,
            Duration::from_millis(config.timeout_ms),
            config.blacklist_flags.clone(),
        )
    }

    pub fn request_url(&self, category: &CategoryFilter) -> String {
        format!(
            "{}/{}?format=json&blacklistFlags={}",
            self.base_url,
            category.path_segment(),
            self.blacklist_flags.join(",")
        )
    }
}

#[async_trait]
impl JokeSource for JokeApiClient {
    async fn fetch_joke(&self, category: &CategoryFilter) -> Result<JokeRecord> {
        let url = self.request_url(category);
        log::debug!("Requesting {}", url);

        let response = self
            .client
            .get(&url)
            .header(ACCEPT, "application/json")
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(JokeboxError::Remote(format!("HTTP status {}", status)));
        }

        let payload: ApiPayload = response.json().await?;
        payload.into_record()
    }
}

#[derive(Debug, Deserialize)]
struct ApiPayload {
    #[serde(default)]
    error: bool,
    message: Option<String>,
    #[serde(rename = "type")]
    kind: Option<String>,
    category: Option<String>,
    id: Option<JokeId>,
    joke: Option<String>,
    setup: Option<String>,
    delivery: Option<String>,
}

impl ApiPayload {
    fn into_record(self) -> Result<JokeRecord> {
        if self.error {
            return Err(JokeboxError::Remote(
                self.message.unwrap_or_else(|| "API error".to_string()),
            ));
        }

        let body = match (self.kind.as_deref(), self.joke, self.setup, self.delivery) {
            (Some("single"), Some(joke), _, _) => JokeBody::Single { joke },
            (Some("twopart"), _, Some(setup), Some(delivery)) => {
                JokeBody::TwoPart { setup, delivery }
            }
            (kind, ..) => {
                return Err(JokeboxError::Remote(format!(
                    "Malformed joke payload (type: {})",
                    kind.unwrap_or("missing")
                )))
            }
        };

        Ok(JokeRecord {
            id: self.id.unwrap_or_else(JokeId::synthesize),
            category: self.category.unwrap_or_else(|| "Misc".to_string()),
            body,
            timestamp: Utc::now(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fetcher::Fetcher;
    use crate::model::JokeKind;

    fn parse(json: &str) -> Result<JokeRecord> {
        let payload: ApiPayload = serde_json::from_str(json).unwrap();
        payload.into_record()
    }

    fn client() -> JokeApiClient {
        let flags = DEFAULT_BLACKLIST_FLAGS.iter().map(|f| f.to_string()).collect();
        JokeApiClient::new("https://v2.jokeapi.dev/joke/", Duration::from_secs(1), flags).unwrap()
    }

    #[test]
    fn request_url_for_any_category() {
        assert_eq!(
            client().request_url(&CategoryFilter::Any),
            "https://v2.jokeapi.dev/joke/Any?format=json&blacklistFlags=nsfw,religious,political,racist,sexist,explicit"
        );
    }

    #[test]
    fn request_url_for_named_category() {
        let url = client().request_url(&CategoryFilter::Only("programming".to_string()));
        assert!(url.starts_with("https://v2.jokeapi.dev/joke/programming?format=json"));
    }

    #[test]
    fn parses_single_joke() {
        let joke = parse(
            r#"{"error":false,"category":"Programming","type":"single","joke":"A joke","flags":{"nsfw":false},"id":17,"safe":true,"lang":"en"}"#,
        )
        .unwrap();
        assert_eq!(joke.id, JokeId::new("17"));
        assert_eq!(joke.category, "Programming");
        assert_eq!(joke.kind(), JokeKind::Single);
        assert_eq!(joke.display_text(), "A joke");
    }

    #[test]
    fn parses_two_part_joke() {
        let joke = parse(
            r#"{"error":false,"category":"Pun","type":"twopart","setup":"Setup?","delivery":"Delivery!","id":3}"#,
        )
        .unwrap();
        assert_eq!(joke.kind(), JokeKind::TwoPart);
        assert_eq!(joke.display_text(), "Setup? Delivery!");
    }

    #[test]
    fn missing_id_is_synthesized() {
        let joke = parse(r#"{"type":"single","joke":"No id","category":"Misc"}"#).unwrap();
        assert!(joke.id.as_str().starts_with("local-"));
    }

    #[test]
    fn error_flag_is_a_failure() {
        let err = parse(r#"{"error":true,"message":"No matching joke found"}"#).unwrap_err();
        assert!(err.to_string().contains("No matching joke found"));
    }

    #[test]
    fn mismatched_type_is_a_failure() {
        assert!(parse(r#"{"type":"twopart","joke":"only one part","id":1}"#).is_err());
        assert!(parse(r#"{"type":"limerick","joke":"?","id":1}"#).is_err());
        assert!(parse(r#"{"id":1}"#).is_err());
    }

    #[tokio::test]
    async fn unreachable_endpoint_is_an_error() {
        let api = JokeApiClient::new("http://127.0.0.1:9/joke", Duration::from_millis(500), vec![])
            .unwrap();
        assert!(api.fetch_joke(&CategoryFilter::Any).await.is_err());
    }

    #[tokio::test]
    async fn unreachable_endpoint_falls_back_to_matching_category() {
        let api = JokeApiClient::new("http://127.0.0.1:9/joke", Duration::from_millis(500), vec![])
            .unwrap();
        let fetcher = Fetcher::new(api);

        let joke = fetcher
            .fetch(&CategoryFilter::Only("pun".to_string()))
            .await
            .unwrap();
        assert!(joke.id.as_str().starts_with("fallback-"));
        assert!(joke.category.eq_ignore_ascii_case("pun"));
    }
}
