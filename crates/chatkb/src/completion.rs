//! Upstream chat-completion client
//!
//! The service only needs `complete(message, model) -> text`; the trait keeps
//! the HTTP client swappable so the request flows can be exercised without a
//! live API.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

use crate::config::ApiConfig;

const SYSTEM_PROMPT: &str = "You are a helpful assistant.";

#[derive(Error, Debug)]
pub enum CompletionError {
  #[error("Completion request failed: {0}")]
  Request(#[from] reqwest::Error),

  #[error("Completion API returned {status}: {body}")]
  Status { status: u16, body: String },

  #[error("Completion API returned no choices")]
  NoChoices,
}

/// Anything that can turn a user message into an answer
#[async_trait]
pub trait ChatCompletion: Send + Sync {
  async fn complete(&self, message: &str, model: &str) -> Result<String, CompletionError>;
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
  model: &'a str,
  messages: Vec<ChatMessage<'a>>,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
  role: &'a str,
  content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
  #[serde(default)]
  choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
  message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
  #[serde(default)]
  content: Option<String>,
}

/// Client for OpenAI-compatible `/chat/completions` endpoints
pub struct OpenAiCompletion {
  client: Client,
  base_url: String,
  api_key: String,
}

impl OpenAiCompletion {
  pub fn new(config: &ApiConfig) -> Result<Self, CompletionError> {
    let client = Client::builder().timeout(Duration::from_secs(config.timeout_secs)).build()?;

    Ok(Self {
      client,
      base_url: config.base_url.trim_end_matches('/').to_string(),
      api_key: config.api_key.clone(),
    })
  }

  fn endpoint(&self) -> String {
    format!("{}/chat/completions", self.base_url)
  }
}

#[async_trait]
impl ChatCompletion for OpenAiCompletion {
  async fn complete(&self, message: &str, model: &str) -> Result<String, CompletionError> {
    let request = ChatRequest {
      model,
      messages: vec![
        ChatMessage { role: "system", content: SYSTEM_PROMPT },
        ChatMessage { role: "user", content: message },
      ],
    };

    tracing::debug!(model, "sending chat completion request");
    let response =
      self.client.post(self.endpoint()).bearer_auth(&self.api_key).json(&request).send().await?;

    let status = response.status();
    if !status.is_success() {
      let body = response.text().await.unwrap_or_default();
      return Err(CompletionError::Status { status: status.as_u16(), body });
    }

    let body: ChatResponse = response.json().await?;
    let choice = body.choices.into_iter().next().ok_or(CompletionError::NoChoices)?;
    Ok(choice.message.content.unwrap_or_default())
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use mockito::{Matcher, Server};

  fn api_config(base_url: String) -> ApiConfig {
    ApiConfig { base_url, api_key: "sk-test".to_string(), timeout_secs: 5 }
  }

  #[tokio::test]
  async fn test_complete_success() {
    let mut server = Server::new_async().await;
    let _mock = server
      .mock("POST", "/chat/completions")
      .match_header("authorization", "Bearer sk-test")
      .match_body(Matcher::PartialJson(serde_json::json!({
        "model": "gpt-4o-mini",
        "messages": [
          {"role": "system", "content": "You are a helpful assistant."},
          {"role": "user", "content": "hello"}
        ]
      })))
      .with_status(200)
      .with_header("content-type", "application/json")
      .with_body(r#"{"choices":[{"index":0,"message":{"role":"assistant","content":"hi there"}}]}"#)
      .create_async()
      .await;

    let client = OpenAiCompletion::new(&api_config(format!("{}/", server.url()))).unwrap();
    let answer = client.complete("hello", "gpt-4o-mini").await.unwrap();

    assert_eq!(answer, "hi there");
  }

  #[tokio::test]
  async fn test_complete_null_content_is_empty_answer() {
    let mut server = Server::new_async().await;
    let _mock = server
      .mock("POST", "/chat/completions")
      .with_status(200)
      .with_header("content-type", "application/json")
      .with_body(r#"{"choices":[{"message":{"role":"assistant","content":null}}]}"#)
      .create_async()
      .await;

    let client = OpenAiCompletion::new(&api_config(server.url())).unwrap();
    assert_eq!(client.complete("hello", "m").await.unwrap(), "");
  }

  #[tokio::test]
  async fn test_complete_error_status() {
    let mut server = Server::new_async().await;
    let _mock = server
      .mock("POST", "/chat/completions")
      .with_status(401)
      .with_body(r#"{"error":{"message":"invalid api key"}}"#)
      .create_async()
      .await;

    let client = OpenAiCompletion::new(&api_config(server.url())).unwrap();
    let err = client.complete("hello", "m").await.unwrap_err();

    match err {
      CompletionError::Status { status, body } => {
        assert_eq!(status, 401);
        assert!(body.contains("invalid api key"));
      }
      other => panic!("Expected Status error, got: {other:?}"),
    }
  }

  #[tokio::test]
  async fn test_complete_no_choices() {
    let mut server = Server::new_async().await;
    let _mock = server
      .mock("POST", "/chat/completions")
      .with_status(200)
      .with_header("content-type", "application/json")
      .with_body(r#"{"choices":[]}"#)
      .create_async()
      .await;

    let client = OpenAiCompletion::new(&api_config(server.url())).unwrap();
    assert!(matches!(client.complete("hello", "m").await, Err(CompletionError::NoChoices)));
  }

  #[tokio::test]
  async fn test_complete_malformed_body() {
    let mut server = Server::new_async().await;
    let _mock = server
      .mock("POST", "/chat/completions")
      .with_status(200)
      .with_body("invalid json")
      .create_async()
      .await;

    let client = OpenAiCompletion::new(&api_config(server.url())).unwrap();
    assert!(matches!(client.complete("hello", "m").await, Err(CompletionError::Request(_))));
  }
}
