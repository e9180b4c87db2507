use serde::Serialize;
use serde_json::Value;

use crate::config::Config;
use crate::conversation::ASSISTANT_CUE;
use crate::error::MotError;
use crate::llm::traits::*;

pub const DEFAULT_ENDPOINT: &str =
    "https://api-inference.huggingface.co/models/mistralai/Mixtral-8x7B-Instruct-v0.1";

/// Client for the Hugging Face text-generation inference API.
pub struct HuggingFaceClient {
    client: reqwest::Client,
    api_token: String,
    endpoint: String,
    params: GenerationParams,
}

impl HuggingFaceClient {
    pub fn new(api_token: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_token: api_token.into(),
            endpoint: DEFAULT_ENDPOINT.to_string(),
            params: GenerationParams::default(),
        }
    }

    pub fn from_config(config: &Config) -> Result<Self, MotError> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("mot/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            api_token: config.api_token.clone(),
            endpoint: config.endpoint.clone(),
            params: config.generation,
        })
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    pub fn with_params(mut self, params: GenerationParams) -> Self {
        self.params = params;
        self
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[derive(Debug, Serialize)]
struct GenerationRequest<'a> {
    inputs: &'a str,
    parameters: GenerationParams,
}

#[async_trait::async_trait]
impl InferenceClient for HuggingFaceClient {
    async fn generate(&self, prompt: &str) -> Result<String, InferenceFailure> {
        let request_body = GenerationRequest {
            inputs: prompt,
            parameters: self.params,
        };
        tracing::debug!(
            endpoint = %self.endpoint,
            prompt_chars = prompt.len(),
            "sending generation request"
        );

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_token)
            .json(&request_body)
            .send()
            .await
            .map_err(|e| {
                tracing::warn!("Inference request failed: {e}");
                InferenceFailure::Transport(e.to_string())
            })?;

        let status = response.status();
        let response_text = response.text().await.map_err(|e| {
            tracing::warn!("Failed to read inference response: {e}");
            InferenceFailure::Transport(e.to_string())
        })?;

        // Error bodies go through the same decoding; `{"error": ...}` lands
        // in UnexpectedShape.
        if !status.is_success() {
            tracing::warn!("Inference API error ({}): {}", status, response_text);
        }

        parse_generation(&response_text).inspect_err(|failure| {
            tracing::warn!("Discarding model response: {failure}");
        })
    }
}

/// Decode a `[{"generated_text": ...}, ...]` body into the assistant reply.
pub fn parse_generation(body: &str) -> Result<String, InferenceFailure> {
    let value: Value = serde_json::from_str(body)
        .map_err(|e| InferenceFailure::Undecodable(e.to_string()))?;

    let records = value
        .as_array()
        .ok_or_else(|| InferenceFailure::UnexpectedShape("expected a JSON array".into()))?;

    let generated = records
        .first()
        .ok_or_else(|| InferenceFailure::UnexpectedShape("empty result array".into()))?
        .get("generated_text")
        .and_then(Value::as_str)
        .ok_or_else(|| {
            InferenceFailure::UnexpectedShape("first record has no string `generated_text`".into())
        })?;

    Ok(extract_reply(generated))
}

/// Everything after the last `Assistant:` cue, trimmed. Text without the cue
/// is returned whole.
pub fn extract_reply(generated: &str) -> String {
    generated
        .rsplit(ASSISTANT_CUE)
        .next()
        .unwrap_or(generated)
        .trim()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_body_shape() {
        let body = serde_json::to_value(GenerationRequest {
            inputs: "User: Hi\nAssistant:",
            parameters: GenerationParams::default(),
        })
        .unwrap();

        assert_eq!(body["inputs"], "User: Hi\nAssistant:");
        assert_eq!(body["parameters"]["max_new_tokens"], 200);
        let temperature = body["parameters"]["temperature"].as_f64().unwrap();
        assert!((temperature - 0.7).abs() < 1e-6);
    }

    #[test]
    fn test_parse_generation_takes_last_cue() {
        let body = r#"[{"generated_text": "User: Hello\nAssistant: Hi there!"}]"#;
        assert_eq!(parse_generation(body).unwrap(), "Hi there!");

        let echoed = r#"[{"generated_text": "User: a\nAssistant: b\nUser: c\nAssistant:   d  \n"}]"#;
        assert_eq!(parse_generation(echoed).unwrap(), "d");
    }

    #[test]
    fn test_parse_generation_without_cue() {
        let body = r#"[{"generated_text": "  plain answer "}]"#;
        assert_eq!(parse_generation(body).unwrap(), "plain answer");
    }

    #[test]
    fn test_parse_generation_uses_first_record() {
        let body = r#"[{"generated_text": "Assistant: first"}, {"generated_text": "Assistant: second"}]"#;
        assert_eq!(parse_generation(body).unwrap(), "first");
    }

    #[test]
    fn test_parse_generation_shape_failures() {
        for body in [
            r#"{"error": "Model is currently loading"}"#,
            r#"[]"#,
            r#"[{"text": "hi"}]"#,
            r#"[{"generated_text": 42}]"#,
            r#""just a string""#,
        ] {
            let failure = parse_generation(body).unwrap_err();
            assert!(
                matches!(failure, InferenceFailure::UnexpectedShape(_)),
                "{body} gave {failure:?}"
            );
            assert_eq!(failure.sentinel(), INVALID_OUTPUT_SENTINEL);
        }
    }

    #[test]
    fn test_parse_generation_not_json() {
        let failure = parse_generation("<html>502 Bad Gateway</html>").unwrap_err();
        assert!(matches!(failure, InferenceFailure::Undecodable(_)));
        assert_eq!(failure.sentinel(), INVALID_RESPONSE_SENTINEL);
    }
}
