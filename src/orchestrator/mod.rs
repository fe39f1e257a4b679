pub mod client;
pub mod prompt;

pub use client::{GeminiClient, GenerationRequest, ModelClient};

use crate::error::{TranslateError, TranslateResult};
use crate::parsing::response_parser::parse_translation_response;
use crate::types::translation::{Language, TranslationResponse};

pub const DEFAULT_TEMPERATURE: f32 = 0.2;

/// Sends `text` to the model and returns the segmented, linked translations.
///
/// One call, no retries. Input is validated before anything is sent:
/// blank text is `EmptyInput`, an empty target list is `NoTargetsSelected`.
pub fn translate(
    client: &dyn ModelClient,
    text: &str,
    source: Language,
    targets: &[Language],
    temperature: f32,
) -> TranslateResult<TranslationResponse> {
    if text.trim().is_empty() {
        return Err(TranslateError::EmptyInput);
    }
    if targets.is_empty() {
        return Err(TranslateError::NoTargetsSelected);
    }

    let request = GenerationRequest {
        prompt: prompt::build_prompt(text, source, targets),
        schema: prompt::response_schema(),
        temperature,
    };

    log::info!(
        "Requesting translation {} -> [{}] ({} chars)",
        source,
        targets.iter().map(|l| l.display_name()).collect::<Vec<_>>().join(", "),
        text.chars().count()
    );

    let outcome = client
        .generate_content(&request)
        .and_then(|reply| {
            reply.ok_or_else(|| TranslateError::ModelCallFailure("No response from model".to_string()))
        })
        .and_then(|raw| parse_translation_response(&raw));

    match &outcome {
        Ok(response) => log::info!(
            "Received {} source segment(s) and {} translation(s)",
            response.source_segments.len(),
            response.translations.len()
        ),
        Err(e) => log::error!("Translation error: {}", e),
    }
    outcome
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::{Cell, RefCell};

    struct ScriptedClient {
        reply: TranslateResult<Option<String>>,
        calls: Cell<usize>,
        last_request: RefCell<Option<GenerationRequest>>,
    }

    impl ScriptedClient {
        fn new(reply: TranslateResult<Option<String>>) -> Self {
            Self { reply, calls: Cell::new(0), last_request: RefCell::new(None) }
        }
    }

    impl ModelClient for ScriptedClient {
        fn generate_content(&self, request: &GenerationRequest) -> TranslateResult<Option<String>> {
            self.calls.set(self.calls.get() + 1);
            *self.last_request.borrow_mut() = Some(request.clone());
            self.reply.clone()
        }
    }

    const REPLY: &str = r#"{"sourceSegments":[{"text":"cat","matchId":1}],"translations":[{"language":"Italian","segments":[{"text":"gatto","matchId":1}]}]}"#;

    #[test]
    fn blank_text_never_reaches_the_model() {
        let client = ScriptedClient::new(Ok(Some(REPLY.into())));
        let err = translate(&client, "   \n", Language::English, &[Language::Italian], 0.2).unwrap_err();
        assert_eq!(err, TranslateError::EmptyInput);
        assert_eq!(client.calls.get(), 0);
    }

    #[test]
    fn no_targets_never_reaches_the_model() {
        let client = ScriptedClient::new(Ok(Some(REPLY.into())));
        let err = translate(&client, "cat", Language::English, &[], 0.2).unwrap_err();
        assert_eq!(err, TranslateError::NoTargetsSelected);
        assert_eq!(client.calls.get(), 0);
    }

    #[test]
    fn successful_call_sends_prompt_schema_and_temperature() {
        let client = ScriptedClient::new(Ok(Some(format!("```json\n{}\n```", REPLY))));
        let response = translate(&client, "cat", Language::English, &[Language::Italian], 0.2).unwrap();
        assert_eq!(response.translations[0].segments[0].text, "gatto");
        assert_eq!(client.calls.get(), 1);

        let sent = client.last_request.borrow().clone().unwrap();
        assert!(sent.prompt.contains("from English to: Italian"));
        assert_eq!(sent.schema, prompt::response_schema());
        assert!((sent.temperature - DEFAULT_TEMPERATURE).abs() < f32::EPSILON);
    }

    #[test]
    fn empty_reply_is_a_model_failure() {
        let client = ScriptedClient::new(Ok(None));
        let err = translate(&client, "cat", Language::English, &[Language::Italian], 0.2).unwrap_err();
        assert!(matches!(err, TranslateError::ModelCallFailure(_)));
    }

    #[test]
    fn transport_errors_pass_through_once() {
        let client = ScriptedClient::new(Err(TranslateError::ModelCallFailure("offline".into())));
        let err = translate(&client, "cat", Language::English, &[Language::Italian], 0.2).unwrap_err();
        assert_eq!(err, TranslateError::ModelCallFailure("offline".into()));
        assert_eq!(client.calls.get(), 1);
    }

    #[test]
    fn garbage_reply_is_malformed() {
        let client = ScriptedClient::new(Ok(Some("not json".into())));
        let err = translate(&client, "cat", Language::English, &[Language::Italian], 0.2).unwrap_err();
        assert!(matches!(err, TranslateError::MalformedResponse(_)));
    }
}
