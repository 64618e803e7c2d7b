//! Client for the vision-capable chat-completion endpoint.
//!
//! One request per send: a single user message carrying the question text
//! and the captured region as a base64 data URI. Only the first choice of
//! the response is read; an empty choices list is a structural failure.

use crate::config::Config;
use crate::error::{AppError, Result};
use serde::{Deserialize, Serialize};

/// Answer length cap submitted with every request.
pub const MAX_ANSWER_TOKENS: u32 = 200;

/// Vision chat-completion client.
///
/// Wraps a [`reqwest::Client`] with the endpoint, credential, and model
/// resolved at construction. No timeout is configured beyond the HTTP
/// client's default, and nothing retries.
pub struct VisionClient {
    http: reqwest::Client,
    endpoint: String,
    api_key: String,
    model: String,
}

#[derive(Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    max_tokens: u32,
}

#[derive(Serialize)]
struct ChatMessage {
    role: &'static str,
    content: Vec<ContentPart>,
}

#[derive(Serialize)]
#[serde(tag = "type")]
#[serde(rename_all = "snake_case")]
enum ContentPart {
    Text { text: String },
    ImageUrl { image_url: ImageUrl },
}

#[derive(Serialize)]
struct ImageUrl {
    url: String,
}

#[derive(Deserialize)]
struct ChatResponse {
    #[serde(default)]
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

impl VisionClient {
    /// Builds a client from the loaded configuration.
    pub fn new(config: &Config) -> Self {
        Self {
            http: reqwest::Client::new(),
            endpoint: format!("{}/chat/completions", config.api_base.trim_end_matches('/')),
            api_key: config.api_key.clone(),
            model: config.model.clone(),
        }
    }

    /// Returns the model submitted with each request.
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Replaces the model submitted with each request.
    pub fn set_model(&mut self, model: impl Into<String>) {
        self.model = model.into();
    }

    /// Submits the question and encoded image, returning the first
    /// choice's message content verbatim.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Api`] on transport or HTTP failures and
    /// [`AppError::NoAnswer`] when the response carries no choices.
    pub async fn ask(&self, prompt: &str, image_data_uri: &str) -> Result<String> {
        let request = ChatRequest {
            model: self.model.clone(),
            messages: vec![ChatMessage {
                role: "user",
                content: vec![
                    ContentPart::Text {
                        text: prompt.to_string(),
                    },
                    ContentPart::ImageUrl {
                        image_url: ImageUrl {
                            url: image_data_uri.to_string(),
                        },
                    },
                ],
            }],
            max_tokens: MAX_ANSWER_TOKENS,
        };

        let response = self
            .http
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| AppError::api(format!("Request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::api(format!("HTTP {}: {}", status, body)));
        }

        let parsed: ChatResponse = response
            .json()
            .await
            .map_err(|e| AppError::api(format!("Malformed response body: {}", e)))?;

        first_choice(parsed)
    }
}

fn first_choice(response: ChatResponse) -> Result<String> {
    response
        .choices
        .into_iter()
        .next()
        .map(|choice| choice.message.content)
        .ok_or(AppError::NoAnswer)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_choice_is_returned_verbatim() {
        let body = r#"{
            "choices": [
                {"message": {"role": "assistant", "content": "A rusty crab.\n"}},
                {"message": {"role": "assistant", "content": "ignored"}}
            ]
        }"#;
        let parsed: ChatResponse = serde_json::from_str(body).unwrap();
        assert_eq!(first_choice(parsed).unwrap(), "A rusty crab.\n");
    }

    #[test]
    fn empty_choices_is_no_answer() {
        let parsed: ChatResponse = serde_json::from_str(r#"{"choices": []}"#).unwrap();
        assert!(matches!(first_choice(parsed), Err(AppError::NoAnswer)));
    }

    #[test]
    fn missing_choices_field_is_no_answer() {
        let parsed: ChatResponse = serde_json::from_str("{}").unwrap();
        assert!(matches!(first_choice(parsed), Err(AppError::NoAnswer)));
    }

    #[test]
    fn request_body_matches_wire_format() {
        let request = ChatRequest {
            model: "gpt-4o-mini".to_string(),
            messages: vec![ChatMessage {
                role: "user",
                content: vec![
                    ContentPart::Text {
                        text: "What is this?".to_string(),
                    },
                    ContentPart::ImageUrl {
                        image_url: ImageUrl {
                            url: "data:image/png;base64,AAAA".to_string(),
                        },
                    },
                ],
            }],
            max_tokens: MAX_ANSWER_TOKENS,
        };

        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["model"], "gpt-4o-mini");
        assert_eq!(json["max_tokens"], 200);
        assert_eq!(json["messages"][0]["role"], "user");
        assert_eq!(json["messages"][0]["content"][0]["type"], "text");
        assert_eq!(json["messages"][0]["content"][1]["type"], "image_url");
        assert_eq!(
            json["messages"][0]["content"][1]["image_url"]["url"],
            "data:image/png;base64,AAAA"
        );
    }
}
