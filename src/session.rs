use crate::error::{TranslateError, NO_TARGETS_MESSAGE};
use crate::types::translation::{Language, TranslationResponse, SUPPORTED_LANGUAGES};

/// Snapshot of the form handed to the worker when a submission is accepted.
#[derive(Debug, Clone, PartialEq)]
pub struct TranslationJob {
    pub text: String,
    pub source: Language,
    pub targets: Vec<Language>,
}

/// All UI state for one window. The app owns it and mutates it only
/// through the methods below.
#[derive(Debug, Clone)]
pub struct SessionState {
    input_text: String,
    source_language: Language,
    target_languages: Vec<Language>,
    loading: bool,
    error: Option<String>,
    hovered_match_id: Option<i64>,
    result: Option<TranslationResponse>,
    result_source: Option<Language>,
}

impl Default for SessionState {
    fn default() -> Self {
        Self {
            input_text: String::new(),
            source_language: Language::English,
            target_languages: vec![Language::Italian],
            loading: false,
            error: None,
            hovered_match_id: None,
            result: None,
            result_source: None,
        }
    }
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn input_text(&self) -> &str {
        &self.input_text
    }

    pub fn source_language(&self) -> Language {
        self.source_language
    }

    pub fn target_languages(&self) -> &[Language] {
        &self.target_languages
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn hovered_match_id(&self) -> Option<i64> {
        self.hovered_match_id
    }

    pub fn result(&self) -> Option<&TranslationResponse> {
        self.result.as_ref()
    }

    /// Source language the displayed result was requested with.
    pub fn result_source(&self) -> Option<Language> {
        self.result_source
    }

    pub fn set_input_text(&mut self, text: impl Into<String>) {
        self.input_text = text.into();
    }

    /// Changes the source and drops it from the targets if it was selected there.
    pub fn set_source_language(&mut self, language: Language) {
        self.source_language = language;
        self.target_languages.retain(|l| *l != language);
    }

    /// Targets the user can toggle: every supported language but the source.
    pub fn available_targets(&self) -> Vec<Language> {
        SUPPORTED_LANGUAGES
            .iter()
            .copied()
            .filter(|l| *l != self.source_language)
            .collect()
    }

    pub fn is_target_selected(&self, language: Language) -> bool {
        self.target_languages.contains(&language)
    }

    /// Adds or removes a target. The source language cannot be added.
    pub fn toggle_target(&mut self, language: Language) {
        if let Some(pos) = self.target_languages.iter().position(|l| *l == language) {
            self.target_languages.remove(pos);
        } else if language != self.source_language {
            self.target_languages.push(language);
        }
    }

    pub fn can_submit(&self) -> bool {
        !self.loading && !self.input_text.trim().is_empty()
    }

    /// Validates the form and, if it passes, enters the loading state.
    ///
    /// Blank text is ignored outright. Missing targets set the validation
    /// message. In both cases the previous result is left untouched.
    pub fn begin_submission(&mut self) -> Option<TranslationJob> {
        if self.loading || self.input_text.trim().is_empty() {
            return None;
        }
        if self.target_languages.is_empty() {
            self.error = Some(NO_TARGETS_MESSAGE.to_string());
            return None;
        }

        self.loading = true;
        self.error = None;
        self.result = None;
        self.result_source = None;
        self.hovered_match_id = None;

        Some(TranslationJob {
            text: self.input_text.clone(),
            source: self.source_language,
            targets: self.target_languages.clone(),
        })
    }

    /// Applies the outcome of a job. Loading is cleared on every path.
    pub fn finish_submission(
        &mut self,
        source: Language,
        outcome: Result<TranslationResponse, TranslateError>,
    ) {
        self.loading = false;
        match outcome {
            Ok(response) => {
                self.result = Some(response);
                self.result_source = Some(source);
                self.error = None;
            }
            Err(e) => {
                self.result = None;
                self.result_source = None;
                self.error = e.user_message().map(str::to_string);
            }
        }
    }

    /// Pointer entered a segment. Unlinked segments do not start a hover.
    pub fn hover_enter(&mut self, match_id: i64) {
        if match_id > 0 {
            self.hovered_match_id = Some(match_id);
        }
    }

    pub fn hover_leave(&mut self) {
        self.hovered_match_id = None;
    }
}
