//! Configuration for the smoke test and its Gemini client

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use tracing::{debug, warn};

/// Local environment file read at startup
pub const ENV_FILE: &str = ".env.local";

/// Environment variable holding the API key
pub const API_KEY_VAR: &str = "GOOGLE_GENERATIVE_AI_API_KEY";

/// Environment variable that overrides the service base URL
pub const BASE_URL_VAR: &str = "GOOGLE_GENERATIVE_AI_BASE_URL";

/// Configuration for the Gemini API client
#[derive(Clone, Serialize, Deserialize)]
pub struct GeminiConfig {
    /// API key for authentication
    pub api_key: String,

    /// Base URL for the API (can be overridden for testing)
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// API version to use
    #[serde(default)]
    pub api_version: ApiVersion,

    /// Default model configuration
    #[serde(default)]
    pub model_config: ModelConfig,
}

// Keeps the key out of logs and panic messages.
impl fmt::Debug for GeminiConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GeminiConfig")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .field("api_version", &self.api_version)
            .field("model_config", &self.model_config)
            .finish()
    }
}

/// API version to use for requests
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq)]
pub enum ApiVersion {
    /// Stable v1 API
    #[serde(rename = "v1")]
    V1,
    /// Beta API, which also serves the `-latest` model aliases
    #[default]
    #[serde(rename = "v1beta")]
    V1Beta,
}

impl ApiVersion {
    /// Convert the API version to a string
    pub fn as_str(&self) -> &'static str {
        match self {
            ApiVersion::V1 => "v1",
            ApiVersion::V1Beta => "v1beta",
        }
    }
}

/// Model configuration for default behavior
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelConfig {
    /// Default model to use
    #[serde(default = "default_model")]
    pub model: String,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            model: default_model(),
        }
    }
}

fn default_base_url() -> String {
    "https://generativelanguage.googleapis.com".to_string()
}

fn default_model() -> String {
    "gemini-flash-latest".to_string()
}

impl GeminiConfig {
    /// Create a new configuration with an API key
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            ..Default::default()
        }
    }

    /// Override the base URL
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Load configuration from the process environment
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load configuration through an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::new(resolve_api_key(&lookup)?);

        if let Some(base_url) = lookup(BASE_URL_VAR).filter(|url| !url.is_empty()) {
            debug!("Using base URL override: {}", base_url);
            config.base_url = base_url;
        }

        Ok(config)
    }

    /// Get the model name, falling back to the configured default
    pub fn get_model_name<'a>(&'a self, model: Option<&'a str>) -> &'a str {
        model.unwrap_or(&self.model_config.model)
    }

    /// Full endpoint URL for a model method such as `generateContent`
    pub fn endpoint(&self, model: &str, method: &str) -> String {
        format!(
            "{}/{}/models/{}:{}",
            self.base_url.trim_end_matches('/'),
            self.api_version.as_str(),
            model,
            method
        )
    }
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: default_base_url(),
            api_version: ApiVersion::default(),
            model_config: ModelConfig::default(),
        }
    }
}

/// Look up the API key. An empty value counts as absent; anything else is
/// returned verbatim.
pub fn resolve_api_key<F>(lookup: F) -> Result<String>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(API_KEY_VAR)
        .filter(|key| !key.is_empty())
        .ok_or(Error::MissingCredential { var: API_KEY_VAR })
}

/// Load `KEY=value` pairs from `path` into the process environment and
/// return how many variables were set.
///
/// Variables that are already set are left alone. A missing file is not an
/// error, since the key may come from the environment directly. Lines that
/// cannot be parsed are logged and skipped; the rest of the file still
/// applies.
pub fn load_env_file(path: impl AsRef<Path>) -> usize {
    let path = path.as_ref();
    let entries = match dotenv::from_path_iter(path) {
        Ok(entries) => entries,
        Err(dotenv::Error::Io(e)) if e.kind() == std::io::ErrorKind::NotFound => {
            debug!("No environment file at {}", path.display());
            return 0;
        }
        Err(e) => {
            warn!("Failed to load {}: {}", path.display(), e);
            return 0;
        }
    };

    let mut applied = 0;
    for entry in entries {
        match entry {
            Ok((key, value)) => {
                if std::env::var_os(&key).is_none() {
                    std::env::set_var(&key, value);
                    applied += 1;
                }
            }
            Err(e) => warn!("Skipping entry in {}: {}", path.display(), e),
        }
    }

    debug!("Loaded {} variables from {}", applied, path.display());
    applied
}
