//! Environment-sourced configuration.
//!
//! Credentials for the Whisper endpoint live in the environment (or a
//! `.env` file loaded at startup). They are resolved once into a [`Config`]
//! value that is passed explicitly to everything that needs it.

use std::env;
use std::fmt;
use std::time::Duration;
use thiserror::Error;

/// Environment variable holding the full transcription endpoint URL.
pub const ENDPOINT_VAR: &str = "AZURE_OPENAI_ENDPOINT";
/// Environment variable holding the API key.
pub const API_KEY_VAR: &str = "AZURE_OPENAI_KEY";
/// Environment variable holding the API version query value.
pub const API_VERSION_VAR: &str = "API_VERSION";

/// Language hint sent with every request.
pub const DEFAULT_LANGUAGE: &str = "es";

/// Instruction prompt sent with every request. Whisper sometimes mistakes
/// Galician for Portuguese on these recordings; the prompt pins the output
/// to Spanish.
pub const DEFAULT_PROMPT: &str = "You are going to be provided audio of \
    interviews in Spanish, help transcribe them returning the text in Spanish";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingVar(&'static str),

    #[error("Invalid configuration: {0}")]
    ValidationError(String),
}

/// Retry behaviour for transient endpoint failures.
#[derive(Debug, Clone)]
pub struct RetryConfig {
    /// Total attempts per file, including the first one.
    pub max_attempts: u32,
    /// Pause between attempts.
    pub delay: Duration,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            delay: Duration::from_secs(60),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    /// Transcription endpoint URL (the full deployment path).
    pub endpoint: String,
    /// API key sent in the `api-key` header.
    pub api_key: String,
    /// Value for the `api-version` query parameter.
    pub api_version: String,
    /// Language hint for the decoder.
    pub language: String,
    /// Instruction prompt for the decoder.
    pub prompt: String,
    /// Decoding temperature.
    pub temperature: f32,
    /// Retry policy settings.
    pub retry: RetryConfig,
}

impl Config {
    /// Resolve configuration from the environment.
    ///
    /// Only the three endpoint values are required; everything else has a
    /// fixed default.
    pub fn from_env() -> Result<Self, ConfigError> {
        let config = Self {
            endpoint: require_var(ENDPOINT_VAR)?,
            api_key: require_var(API_KEY_VAR)?,
            api_version: require_var(API_VERSION_VAR)?,
            language: DEFAULT_LANGUAGE.to_string(),
            prompt: DEFAULT_PROMPT.to_string(),
            temperature: 0.0,
            retry: RetryConfig::default(),
        };
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.endpoint.starts_with("http://") && !self.endpoint.starts_with("https://") {
            return Err(ConfigError::ValidationError(
                "endpoint must be an http(s) URL".into(),
            ));
        }

        if self.api_key.is_empty() {
            return Err(ConfigError::ValidationError("api key is empty".into()));
        }

        if self.retry.max_attempts == 0 {
            return Err(ConfigError::ValidationError(
                "retry max_attempts must be at least 1".into(),
            ));
        }

        Ok(())
    }
}

/// Display wrapper that never prints the API key.
pub struct Redacted<'a>(pub &'a Config);

impl fmt::Display for Redacted<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "endpoint    = {}", self.0.endpoint)?;
        writeln!(f, "api_key     = <redacted>")?;
        writeln!(f, "api_version = {}", self.0.api_version)?;
        writeln!(f, "language    = {}", self.0.language)?;
        writeln!(f, "prompt      = {}", self.0.prompt)?;
        writeln!(f, "temperature = {}", self.0.temperature)?;
        writeln!(
            f,
            "retry       = {} attempt(s), {}s delay",
            self.0.retry.max_attempts,
            self.0.retry.delay.as_secs()
        )
    }
}

fn require_var(name: &'static str) -> Result<String, ConfigError> {
    env::var(name).map_err(|_| ConfigError::MissingVar(name))
}
