use serde::{Deserialize, Serialize};
use std::fmt;

/// Languages offered in the source selector and as translation targets.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Language {
    English,
    Italian,
    Danish,
    French,
    Korean,
    #[serde(rename = "Mandarin Chinese")]
    MandarinChinese,
}

pub const SUPPORTED_LANGUAGES: [Language; 6] = [
    Language::English,
    Language::Italian,
    Language::Danish,
    Language::French,
    Language::Korean,
    Language::MandarinChinese,
];

impl Language {
    /// Name shown in the UI and handed to the model in the prompt.
    pub fn display_name(self) -> &'static str {
        match self {
            Language::English => "English",
            Language::Italian => "Italian",
            Language::Danish => "Danish",
            Language::French => "French",
            Language::Korean => "Korean",
            Language::MandarinChinese => "Mandarin Chinese",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// A word or phrase tagged with the concept it expresses.
/// `match_id == 0` marks a segment with no counterpart in the other languages.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct Segment {
    pub text: String,
    pub match_id: i64,
}

impl Segment {
    pub fn new(text: impl Into<String>, match_id: i64) -> Self {
        Self { text: text.into(), match_id }
    }

    pub fn is_linked(&self) -> bool {
        self.match_id > 0
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct TranslationResult {
    pub language: String,
    pub segments: Vec<Segment>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct TranslationResponse {
    pub source_segments: Vec<Segment>,
    pub translations: Vec<TranslationResult>,
}

impl TranslationResponse {
    /// Every segment of the response, source panel first, in render order.
    pub fn all_segments(&self) -> impl Iterator<Item = &Segment> {
        self.source_segments
            .iter()
            .chain(self.translations.iter().flat_map(|t| t.segments.iter()))
    }
}
