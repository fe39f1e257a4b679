use crate::error::{TranslateError, TranslateResult};
use crate::types::translation::TranslationResponse;
use regex::Regex;
use std::sync::OnceLock;

fn fence_regex() -> &'static Regex {
    static FENCE: OnceLock<Regex> = OnceLock::new();
    FENCE.get_or_init(|| Regex::new(r"```(?:json)?").expect("fence pattern is valid"))
}

/// Removes every "```json" and "```" marker and trims the rest.
/// Models sometimes wrap JSON output in a markdown block even when asked not to.
pub fn strip_code_fences(raw: &str) -> String {
    fence_regex().replace_all(raw, "").trim().to_string()
}

/// Parses the model's reply into a typed response.
///
/// Typed deserialization doubles as the shape check: a missing field or a
/// value of the wrong type is reported as `MalformedResponse`, never assumed.
pub fn parse_translation_response(raw: &str) -> TranslateResult<TranslationResponse> {
    let cleaned = strip_code_fences(raw);
    if cleaned.is_empty() {
        return Err(TranslateError::MalformedResponse(
            "response contained no JSON after removing code fences".to_string(),
        ));
    }

    let response: TranslationResponse = serde_json::from_str(&cleaned)?;

    for (index, translation) in response.translations.iter().enumerate() {
        if translation.language.trim().is_empty() {
            return Err(TranslateError::MalformedResponse(format!(
                "translation #{} has no language name",
                index + 1
            )));
        }
    }

    let negative = response.all_segments().filter(|s| s.match_id < 0).count();
    if negative > 0 {
        log::debug!("{} segment(s) carry a negative matchId; rendering them as unlinked", negative);
    }

    Ok(response)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::translation::Segment;

    const PLAIN: &str = r#"{
        "sourceSegments": [{"text": "The", "matchId": 0}, {"text": "red cat", "matchId": 1}],
        "translations": [{"language": "Italian", "segments": [{"text": "Il", "matchId": 0}, {"text": "gatto rosso", "matchId": 1}]}]
    }"#;

    #[test]
    fn fenced_reply_parses_like_plain_reply() {
        let fenced = format!("```json\n{}\n```", PLAIN);
        assert_eq!(
            parse_translation_response(&fenced).unwrap(),
            parse_translation_response(PLAIN).unwrap()
        );
    }

    #[test]
    fn bare_fence_without_language_tag_is_stripped() {
        let fenced = format!("```{}```", PLAIN);
        let parsed = parse_translation_response(&fenced).unwrap();
        assert_eq!(parsed.source_segments[1], Segment::new("red cat", 1));
        assert_eq!(parsed.translations[0].language, "Italian");
    }

    #[test]
    fn non_json_is_malformed() {
        let err = parse_translation_response("Sorry, I cannot help with that.").unwrap_err();
        assert!(matches!(err, TranslateError::MalformedResponse(_)));
    }

    #[test]
    fn fence_only_reply_is_malformed() {
        let err = parse_translation_response("```json\n```").unwrap_err();
        assert!(matches!(err, TranslateError::MalformedResponse(_)));
    }

    #[test]
    fn wrong_shape_is_malformed() {
        let missing_translations = r#"{"sourceSegments": []}"#;
        assert!(matches!(
            parse_translation_response(missing_translations),
            Err(TranslateError::MalformedResponse(_))
        ));

        let string_match_id = r#"{"sourceSegments": [{"text": "a", "matchId": "1"}], "translations": []}"#;
        assert!(matches!(
            parse_translation_response(string_match_id),
            Err(TranslateError::MalformedResponse(_))
        ));
    }

    #[test]
    fn blank_language_name_is_malformed() {
        let reply = r#"{"sourceSegments": [], "translations": [{"language": " ", "segments": []}]}"#;
        assert!(matches!(
            parse_translation_response(reply),
            Err(TranslateError::MalformedResponse(_))
        ));
    }

    #[test]
    fn negative_match_ids_are_kept() {
        let reply = r#"{"sourceSegments": [{"text": "do", "matchId": -1}], "translations": []}"#;
        let parsed = parse_translation_response(reply).unwrap();
        assert_eq!(parsed.source_segments[0].match_id, -1);
    }
}
