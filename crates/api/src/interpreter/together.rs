//! Together inference client.
//!
//! Sends the customer's request, wrapped in the drive-thru system prompt, to
//! the Together completion endpoint and parses the model's JSON answer.

use std::sync::Arc;

use async_trait::async_trait;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderValue};
use secrecy::ExposeSecret;
use serde::{Deserialize, Serialize};
use tracing::instrument;

use super::{Intent, InterpreterError, OrderInterpreter};
use crate::config::TogetherConfig;

/// Instructions given to the model ahead of every customer request.
pub const SYSTEM_PROMPT: &str = r#"You take orders at a drive-thru. Turn each customer request into JSON, exactly as described below.

THE MENU (nothing else can be ordered):
- burgers
- fries
- drinks

RULES:
1. Only include items from the menu.
2. Leave out anything that is not on the menu.
3. Leave out any item whose quantity is zero or negative.
4. A customer may cancel an earlier order by its number; extract that number.
5. If nothing valid is left, return an empty items list.

For a new order, answer with (item must be "burgers", "fries" or "drinks"):
{"type": "order", "items": [{"item": "<item>", "quantity": <number>}]}

For a cancellation, answer with:
{"type": "cancel", "order_id": <number>}

Answer with JSON only."#;

const MAX_TOKENS: u32 = 100;
const TEMPERATURE: f32 = 0.1;
const TOP_P: f32 = 0.7;
const TOP_K: u32 = 50;
const REPETITION_PENALTY: f32 = 1.0;
const STOP_SEQUENCES: [&str; 2] = ["\n", "</s>"];

/// Request body for the inference endpoint.
#[derive(Debug, Serialize)]
struct InferenceRequest<'a> {
    model: &'a str,
    prompt: String,
    max_tokens: u32,
    temperature: f32,
    top_p: f32,
    top_k: u32,
    repetition_penalty: f32,
    stop: [&'static str; 2],
}

#[derive(Debug, Deserialize)]
struct InferenceResponse {
    output: InferenceOutput,
}

#[derive(Debug, Deserialize)]
struct InferenceOutput {
    choices: Vec<InferenceChoice>,
}

#[derive(Debug, Deserialize)]
struct InferenceChoice {
    text: String,
}

/// [`OrderInterpreter`] backed by a model hosted on Together.
#[derive(Clone)]
pub struct TogetherClient {
    inner: Arc<TogetherClientInner>,
}

struct TogetherClientInner {
    client: reqwest::Client,
    endpoint: String,
    model: String,
}

impl TogetherClient {
    /// Create a new Together client.
    ///
    /// # Errors
    ///
    /// Returns an error if the API key is not a valid header value or the
    /// HTTP client fails to build.
    pub fn new(config: &TogetherConfig) -> Result<Self, InterpreterError> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let bearer = format!("Bearer {}", config.api_key.expose_secret());
        let mut auth_value = HeaderValue::from_str(&bearer)
            .map_err(|e| InterpreterError::Unauthorized(format!("invalid API key format: {e}")))?;
        auth_value.set_sensitive(true);
        headers.insert(AUTHORIZATION, auth_value);

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(config.timeout)
            .build()?;

        Ok(Self {
            inner: Arc::new(TogetherClientInner {
                client,
                endpoint: config.endpoint.clone(),
                model: config.model.clone(),
            }),
        })
    }
}

/// Full prompt sent for one customer request.
fn build_prompt(user_input: &str) -> String {
    format!("{SYSTEM_PROMPT}\n\nCustomer request: {user_input}\nResponse:")
}

#[async_trait]
impl OrderInterpreter for TogetherClient {
    #[instrument(skip_all, fields(model = %self.inner.model))]
    async fn interpret(&self, user_input: &str) -> Result<Intent, InterpreterError> {
        let request = InferenceRequest {
            model: &self.inner.model,
            prompt: build_prompt(user_input),
            max_tokens: MAX_TOKENS,
            temperature: TEMPERATURE,
            top_p: TOP_P,
            top_k: TOP_K,
            repetition_penalty: REPETITION_PENALTY,
            stop: STOP_SEQUENCES,
        };

        let response = self
            .inner
            .client
            .post(&self.inner.endpoint)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if status == reqwest::StatusCode::UNAUTHORIZED {
            return Err(InterpreterError::Unauthorized("Invalid API key".to_string()));
        }
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(InterpreterError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let body = response.text().await?;
        let parsed: InferenceResponse = serde_json::from_str(&body)
            .map_err(|e| InterpreterError::Parse(format!("Failed to parse response: {e}")))?;

        let text = parsed
            .output
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.text)
            .ok_or_else(|| InterpreterError::Parse("response had no choices".to_string()))?;

        tracing::debug!(completion = %text, "Model completion received");
        Intent::from_completion(&text)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use secrecy::SecretString;

    use super::*;

    #[test]
    fn test_prompt_wraps_request() {
        let prompt = build_prompt("two fries please");
        assert!(prompt.starts_with(SYSTEM_PROMPT));
        assert!(prompt.ends_with("Customer request: two fries please\nResponse:"));
    }

    #[test]
    fn test_inference_request_body() {
        let request = InferenceRequest {
            model: "m",
            prompt: "p".to_string(),
            max_tokens: MAX_TOKENS,
            temperature: TEMPERATURE,
            top_p: TOP_P,
            top_k: TOP_K,
            repetition_penalty: REPETITION_PENALTY,
            stop: STOP_SEQUENCES,
        };
        let json = serde_json::to_value(&request).unwrap();

        assert_eq!(json["model"], "m");
        assert_eq!(json["max_tokens"], 100);
        assert_eq!(json["top_k"], 50);
        assert_eq!(json["stop"], serde_json::json!(["\n", "</s>"]));
    }

    #[test]
    fn test_inference_response_parsing() {
        let body = r#"{"output": {"choices": [{"text": " {\"type\": \"cancel\", \"order_id\": 2}"}]}}"#;
        let parsed: InferenceResponse = serde_json::from_str(body).unwrap();
        let text = &parsed.output.choices[0].text;
        assert_eq!(
            Intent::from_completion(text).unwrap(),
            Intent::Cancel { order_id: 2 }
        );
    }

    #[test]
    fn test_invalid_api_key_rejected() {
        let config = TogetherConfig::new(SecretString::from("bad\nkey"));
        assert!(matches!(
            TogetherClient::new(&config),
            Err(InterpreterError::Unauthorized(_))
        ));
    }

    #[test]
    fn test_together_client_is_send_sync() {
        fn assert_send_sync<T: Send + Sync + Clone>() {}
        assert_send_sync::<TogetherClient>();
    }
}
