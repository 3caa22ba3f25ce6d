//! Learning assistant backed by a hosted text-generation API.
//!
//! The assistant only reads the session history; it never touches XP,
//! streak or history state.

mod prompt;

pub use prompt::{build_prompt, session_context, NO_HISTORY};

use std::time::Duration;

use reqwest::Client;
use serde_json::json;
use url::Url;

use crate::error::AssistantError;
use crate::storage::AssistantConfig;

/// Environment variable checked before the OS keyring.
pub const API_KEY_ENV: &str = "NEUROLEARN_API_KEY";

/// Keyring entry holding the API key.
pub const API_KEY_ENTRY: &str = "assistant_api_key";

/// Reply used when the response carries no text.
pub const FALLBACK_REPLY: &str = "Sorry, I could not process your request.";

/// Thin wrapper around the OS keyring for credential storage.
pub mod keyring_store {
    use crate::error::AssistantError;

    const SERVICE: &str = "neurolearn";

    pub fn get(key: &str) -> Result<Option<String>, AssistantError> {
        let entry = keyring::Entry::new(SERVICE, key)?;
        match entry.get_password() {
            Ok(pw) => Ok(Some(pw)),
            Err(keyring::Error::NoEntry) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    pub fn set(key: &str, value: &str) -> Result<(), AssistantError> {
        let entry = keyring::Entry::new(SERVICE, key)?;
        entry.set_password(value)?;
        Ok(())
    }

    pub fn delete(key: &str) -> Result<(), AssistantError> {
        let entry = keyring::Entry::new(SERVICE, key)?;
        match entry.delete_credential() {
            Ok(()) => Ok(()),
            Err(keyring::Error::NoEntry) => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

/// API key from `NEUROLEARN_API_KEY`, falling back to the keyring.
pub fn resolve_api_key() -> Result<String, AssistantError> {
    if let Ok(key) = std::env::var(API_KEY_ENV) {
        if !key.trim().is_empty() {
            return Ok(key.trim().to_string());
        }
    }
    keyring_store::get(API_KEY_ENTRY)?
        .filter(|k| !k.trim().is_empty())
        .ok_or(AssistantError::MissingApiKey)
}

/// Pull `candidates[0].content.parts[0].text` out of a response body.
pub fn extract_reply(body: &serde_json::Value) -> String {
    body.pointer("/candidates/0/content/parts/0/text")
        .and_then(|v| v.as_str())
        .filter(|s| !s.is_empty())
        .unwrap_or(FALLBACK_REPLY)
        .to_string()
}

/// Client for the generateContent endpoint.
pub struct AssistantClient {
    endpoint: Url,
    api_key: String,
    http_client: Client,
}

impl AssistantClient {
    pub fn new(
        endpoint: &str,
        api_key: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, AssistantError> {
        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            return Err(AssistantError::MissingApiKey);
        }
        let endpoint = Url::parse(endpoint).map_err(|e| AssistantError::InvalidEndpoint {
            endpoint: endpoint.to_string(),
            message: e.to_string(),
        })?;
        let http_client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            endpoint,
            api_key,
            http_client,
        })
    }

    /// Build from config, resolving the API key from env or keyring.
    pub fn from_config(config: &AssistantConfig) -> Result<Self, AssistantError> {
        Self::new(
            &config.endpoint,
            resolve_api_key()?,
            Duration::from_secs(config.timeout_secs),
        )
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// Send `prompt` and return the model's reply text.
    pub async fn ask(&self, prompt: &str) -> Result<String, AssistantError> {
        let body = json!({
            "contents": [
                { "parts": [ { "text": prompt } ] }
            ]
        });

        tracing::debug!(endpoint = %self.endpoint, chars = prompt.len(), "sending assistant request");

        let resp = self
            .http_client
            .post(self.endpoint.clone())
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            tracing::warn!(status = status.as_u16(), "assistant request failed");
            return Err(AssistantError::Http {
                status: status.as_u16(),
                body,
            });
        }

        let data: serde_json::Value = resp.json().await?;
        Ok(extract_reply(&data))
    }
}
