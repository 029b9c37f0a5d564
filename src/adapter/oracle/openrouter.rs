//! OpenRouter chat client (OpenAI-compatible API).

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::config::OracleConfig;
use crate::error::OracleError;

use super::chat::ChatCompletion;

/// OpenRouter client.
pub struct OpenRouter {
    client: Client,
    base_url: String,
    api_key: String,
    model: String,
    max_tokens: usize,
    temperature: f64,
}

impl OpenRouter {
    /// Create a new OpenRouter client.
    pub fn new(
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        model: impl Into<String>,
        max_tokens: usize,
        temperature: f64,
    ) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into(),
            api_key: api_key.into(),
            model: model.into(),
            max_tokens,
            temperature,
        }
    }

    /// Create from config. The API key must have been loaded from the
    /// environment.
    pub fn from_config(config: &OracleConfig) -> Result<Self, OracleError> {
        let api_key = config
            .api_key
            .clone()
            .ok_or_else(|| OracleError::Parse("OPENROUTER_API_KEY is not set".into()))?;

        Ok(Self::new(
            config.base_url.clone(),
            api_key,
            config.model.clone(),
            config.max_tokens,
            config.temperature,
        ))
    }
}

#[derive(Serialize)]
struct Request {
    model: String,
    max_tokens: usize,
    temperature: f64,
    messages: Vec<Message>,
}

#[derive(Serialize)]
struct Message {
    role: &'static str,
    content: String,
}

#[derive(Deserialize)]
struct Response {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    content: String,
}

#[async_trait]
impl ChatCompletion for OpenRouter {
    fn name(&self) -> &'static str {
        "openrouter"
    }

    async fn complete(&self, system: &str, prompt: &str) -> Result<String, OracleError> {
        let request = Request {
            model: self.model.clone(),
            max_tokens: self.max_tokens,
            temperature: self.temperature,
            messages: vec![
                Message {
                    role: "system",
                    content: system.to_string(),
                },
                Message {
                    role: "user",
                    content: prompt.to_string(),
                },
            ],
        };

        let response = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await?
            .error_for_status()?
            .json::<Response>()
            .await?;

        response
            .choices
            .into_iter()
            .next()
            .map(|c| c.message.content)
            .ok_or(OracleError::EmptyResponse)
    }
}
