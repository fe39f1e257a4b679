// Declare all modules that are part of this library
pub mod config;
pub mod error;
pub mod types {
    pub mod translation;
}
pub mod parsing {
    pub mod response_parser;
}
pub mod orchestrator;
pub mod highlight;
pub mod session;
pub mod worker;
pub mod app;

pub use error::{TranslateError, TranslateResult};
pub use orchestrator::translate;
pub use types::translation::{Language, Segment, TranslationResponse, TranslationResult};

