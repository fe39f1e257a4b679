use thiserror::Error;

/// Message shown for every failure that reaches the user after a model call.
pub const GENERIC_FAILURE_MESSAGE: &str =
    "Failed to translate. Please try again or check your connection.";

pub const NO_TARGETS_MESSAGE: &str = "Please select at least one target language.";

pub type TranslateResult<T> = Result<T, TranslateError>;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TranslateError {
    /// Input text is blank after trimming. The UI treats this as a no-op.
    #[error("Input text is empty")]
    EmptyInput,

    #[error("No target language selected")]
    NoTargetsSelected,

    /// Transport error, non-success status, model-side error or empty reply.
    #[error("Model call failed: {0}")]
    ModelCallFailure(String),

    /// Reply text is not JSON of the expected shape, even after removing code fences.
    #[error("Malformed model response: {0}")]
    MalformedResponse(String),
}

impl TranslateError {
    /// Text for the error banner, or `None` when the failure should be silent.
    pub fn user_message(&self) -> Option<&'static str> {
        match self {
            TranslateError::EmptyInput => None,
            TranslateError::NoTargetsSelected => Some(NO_TARGETS_MESSAGE),
            TranslateError::ModelCallFailure(_) | TranslateError::MalformedResponse(_) => {
                Some(GENERIC_FAILURE_MESSAGE)
            }
        }
    }
}

impl From<reqwest::Error> for TranslateError {
    fn from(err: reqwest::Error) -> Self {
        TranslateError::ModelCallFailure(err.to_string())
    }
}

impl From<serde_json::Error> for TranslateError {
    fn from(err: serde_json::Error) -> Self {
        TranslateError::MalformedResponse(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn call_and_parse_failures_share_one_user_message() {
        let call = TranslateError::ModelCallFailure("timeout".into());
        let parse = TranslateError::MalformedResponse("eof".into());
        assert_eq!(call.user_message(), Some(GENERIC_FAILURE_MESSAGE));
        assert_eq!(parse.user_message(), call.user_message());
    }

    #[test]
    fn empty_input_is_silent() {
        assert_eq!(TranslateError::EmptyInput.user_message(), None);
        assert_eq!(
            TranslateError::NoTargetsSelected.user_message(),
            Some(NO_TARGETS_MESSAGE)
        );
    }
}
