use serde::Deserialize;
use std::fs;
use std::path::Path;

pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";
pub const DEFAULT_API_BASE_URL: &str = "https://generativelanguage.googleapis.com";
pub const DEFAULT_API_KEY_ENV: &str = "API_KEY";
const FALLBACK_API_KEY_ENV: &str = "GEMINI_API_KEY";

#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct Config {
    pub model: String,
    pub temperature: f32,
    pub api_base_url: String,
    /// Name of the environment variable holding the API key.
    pub api_key_env: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            // Low temperature keeps the segmentation structurally stable.
            temperature: 0.2,
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            api_key_env: DEFAULT_API_KEY_ENV.to_string(),
        }
    }
}

impl Config {
    /// Reads the API key from the configured variable, then from `GEMINI_API_KEY`.
    /// A missing key is not an error here; the model call reports it.
    pub fn api_key_from_env(&self) -> Option<String> {
        [self.api_key_env.as_str(), FALLBACK_API_KEY_ENV]
            .iter()
            .filter_map(|name| std::env::var(name).ok())
            .map(|key| key.trim().to_string())
            .find(|key| !key.is_empty())
    }
}

/// Loads `file_path` if it exists. A missing file yields the defaults.
pub fn load_config_from_file(file_path: &Path) -> Result<Config, String> {
    if !file_path.exists() {
        log::info!("No config file at {}, using defaults", file_path.display());
        return Ok(Config::default());
    }
    match fs::read_to_string(file_path) {
        Ok(contents) => match toml::from_str::<Config>(&contents) {
            Ok(loaded_config) => {
                if loaded_config.model.trim().is_empty() {
                    Err(format!(
                        "Error: model specified in {} is empty.",
                        file_path.display()
                    ))
                } else {
                    Ok(loaded_config)
                }
            }
            Err(e) => Err(format!("Failed to parse {}: {}", file_path.display(), e)),
        },
        Err(e) => Err(format!(
            "Failed to read {}: {}. Please check its permissions.",
            file_path.display(),
            e
        )),
    }
}
