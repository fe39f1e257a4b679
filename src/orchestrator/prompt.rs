use crate::types::translation::Language;
use serde_json::{json, Value};

/// Builds the instruction sent to the model for one translation request.
pub fn build_prompt(text: &str, source: Language, targets: &[Language]) -> String {
    let target_names = targets
        .iter()
        .map(|lang| lang.display_name())
        .collect::<Vec<_>>()
        .join(", ");

    format!(
        "You are a sophisticated linguistic engine.
Translate the following text from {source} to: {target_names}.

Analyze the syntax and vocabulary.
Break down the source text and the translated texts into corresponding \"segments\" (words or meaningful phrases).
Assign a unique 'matchId' (integer > 0) to concepts that are the same across languages.

If a word exists in one language but is implied or non-existent in another (like articles or auxiliary verbs sometimes), use 'matchId: 0' for that specific word, or group it with the relevant noun/verb if it makes semantic sense.

Ensure the 'segments' in the target languages appear in the natural, correct word order for that language, so the reader can see how the position of each concept moves relative to the others.

Text to translate:
\"{text}\"
"
    )
}

fn segment_array_schema(description: &str, match_id_description: &str) -> Value {
    json!({
        "type": "ARRAY",
        "description": description,
        "items": {
            "type": "OBJECT",
            "properties": {
                "text": { "type": "STRING" },
                "matchId": { "type": "INTEGER", "description": match_id_description }
            },
            "required": ["text", "matchId"]
        }
    })
}

/// Response schema in the model API's OpenAPI subset. Mirrors `TranslationResponse`.
pub fn response_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "sourceSegments": segment_array_schema(
                "The source text broken down into grammatical units (words or phrases).",
                "A unique ID for the concept. 0 if it has no direct translation.",
            ),
            "translations": {
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "language": { "type": "STRING" },
                        "segments": segment_array_schema(
                            "The translated text broken down into grammatical units, reordered as per the target language syntax.",
                            "Must match the matchId of the corresponding concept in sourceSegments.",
                        )
                    },
                    "required": ["language", "segments"]
                }
            }
        },
        "required": ["sourceSegments", "translations"]
    })
}
