use crate::config::Config;
use crate::error::{TranslateError, TranslateResult};
use reqwest::blocking::Client;
use serde::Serialize;
use serde_json::Value;
use std::time::Duration;

/// Everything the model needs for one call.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationRequest {
    pub prompt: String,
    pub schema: Value,
    pub temperature: f32,
}

/// Seam between the orchestrator and the hosted model.
///
/// `Ok(None)` means the call succeeded but the model produced no text.
pub trait ModelClient {
    fn generate_content(&self, request: &GenerationRequest) -> TranslateResult<Option<String>>;
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentBody<'a> {
    contents: Vec<Content<'a>>,
    generation_config: GenerationConfig<'a>,
}

#[derive(Serialize)]
struct Content<'a> {
    role: &'static str,
    parts: Vec<Part<'a>>,
}

#[derive(Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig<'a> {
    response_mime_type: &'static str,
    response_schema: &'a Value,
    temperature: f32,
}

pub struct GeminiClient {
    http: Client,
    api_base_url: String,
    model: String,
    api_key: Option<String>,
}

impl GeminiClient {
    pub fn new(config: &Config, api_key: Option<String>) -> TranslateResult<Self> {
        let http = Client::builder()
            .user_agent("linguasync")
            .timeout(None::<Duration>)
            .build()?;
        Ok(Self {
            http,
            api_base_url: config.api_base_url.trim_end_matches('/').to_string(),
            model: config.model.clone(),
            api_key,
        })
    }

    pub fn endpoint(&self) -> String {
        format!("{}/v1beta/models/{}:generateContent", self.api_base_url, self.model)
    }
}

impl ModelClient for GeminiClient {
    fn generate_content(&self, request: &GenerationRequest) -> TranslateResult<Option<String>> {
        let api_key = self.api_key.as_deref().ok_or_else(|| {
            TranslateError::ModelCallFailure("API key is not set in the environment".to_string())
        })?;

        let body = GenerateContentBody {
            contents: vec![Content {
                role: "user",
                parts: vec![Part { text: &request.prompt }],
            }],
            generation_config: GenerationConfig {
                response_mime_type: "application/json",
                response_schema: &request.schema,
                temperature: request.temperature,
            },
        };

        log::debug!("POST {} (model {})", self.endpoint(), self.model);
        let response = self
            .http
            .post(self.endpoint())
            .header("x-goog-api-key", api_key)
            .json(&body)
            .send()?;

        let status = response.status();
        let payload: Value = response.json().map_err(|e| {
            TranslateError::ModelCallFailure(format!("unreadable reply (HTTP {}): {}", status, e))
        })?;

        if !status.is_success() {
            let message = payload
                .get("error")
                .and_then(|e| e.get("message"))
                .and_then(|m| m.as_str())
                .unwrap_or("no error message");
            return Err(TranslateError::ModelCallFailure(format!(
                "model API returned {}: {}",
                status, message
            )));
        }

        Ok(extract_candidate_text(&payload))
    }
}

/// Joins the text parts of the first candidate. `None` if there is no text.
pub fn extract_candidate_text(payload: &Value) -> Option<String> {
    let parts = payload
        .get("candidates")
        .and_then(|c| c.get(0))
        .and_then(|c| c.get("content"))
        .and_then(|c| c.get("parts"))
        .and_then(|p| p.as_array())?;

    let text: String = parts
        .iter()
        .filter_map(|part| part.get("text").and_then(|t| t.as_str()))
        .collect();

    if text.trim().is_empty() {
        None
    } else {
        Some(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn candidate_parts_are_concatenated() {
        let payload = json!({
            "candidates": [{
                "content": { "parts": [{ "text": "{\"sourceSeg" }, { "text": "ments\": []}" }] }
            }]
        });
        assert_eq!(
            extract_candidate_text(&payload).as_deref(),
            Some("{\"sourceSegments\": []}")
        );
    }

    #[test]
    fn missing_or_blank_candidates_yield_none() {
        assert_eq!(extract_candidate_text(&json!({ "candidates": [] })), None);
        assert_eq!(extract_candidate_text(&json!({})), None);
        let blank = json!({ "candidates": [{ "content": { "parts": [{ "text": "  " }] } }] });
        assert_eq!(extract_candidate_text(&blank), None);
    }

    #[test]
    fn missing_key_fails_before_any_request() {
        let client = GeminiClient::new(&Config::default(), None).unwrap();
        let request = GenerationRequest {
            prompt: "hi".into(),
            schema: json!({}),
            temperature: 0.2,
        };
        let err = client.generate_content(&request).unwrap_err();
        assert!(matches!(err, TranslateError::ModelCallFailure(_)));
    }

    #[test]
    fn endpoint_includes_model_and_trims_slash() {
        let config = Config {
            api_base_url: "http://localhost:9000/".into(),
            ..Config::default()
        };
        let client = GeminiClient::new(&config, Some("k".into())).unwrap();
        assert_eq!(
            client.endpoint(),
            "http://localhost:9000/v1beta/models/gemini-2.5-flash:generateContent"
        );
    }

    #[test]
    fn request_body_uses_camel_case_generation_config() {
        let schema = json!({ "type": "OBJECT" });
        let body = GenerateContentBody {
            contents: vec![Content { role: "user", parts: vec![Part { text: "p" }] }],
            generation_config: GenerationConfig {
                response_mime_type: "application/json",
                response_schema: &schema,
                temperature: 0.2,
            },
        };
        let value = serde_json::to_value(&body).unwrap();
        assert_eq!(value["generationConfig"]["responseMimeType"], "application/json");
        assert_eq!(value["generationConfig"]["responseSchema"]["type"], "OBJECT");
        assert_eq!(value["contents"][0]["parts"][0]["text"], "p");
    }
}
