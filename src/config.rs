//! Pipeline configuration.
//!
//! Credentials and endpoints are explicit values passed into the
//! clients that need them, scoped to those instances — never held in
//! process-wide mutable state.

use std::env;

use thiserror::Error;

pub const DEFAULT_GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com";
pub const DEFAULT_GEMINI_MODEL: &str = "gemini-1.5-flash";
/// Bounded wait on the remote model; the source design left this open.
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("GEMINI_API_KEY is not set")]
    MissingApiKey,

    #[error("invalid value for {name}: {value}")]
    InvalidValue { name: &'static str, value: String },
}

/// Endpoint, model and credentials for the Gemini API.
#[derive(Debug, Clone)]
pub struct GeminiConfig {
    pub api_key: String,
    pub base_url: String,
    pub model: String,
    pub timeout_secs: u64,
}

impl GeminiConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_GEMINI_BASE_URL.to_string(),
            model: DEFAULT_GEMINI_MODEL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

/// Full pipeline configuration for the CLI.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    pub gemini: GeminiConfig,
    pub render_dpi: u32,
}

impl PipelineConfig {
    /// Read configuration from the environment. `GEMINI_API_KEY` is
    /// required; `GEMINI_BASE_URL`, `GEMINI_MODEL`,
    /// `GEMINI_TIMEOUT_SECS` and `RXVISION_RENDER_DPI` override the
    /// defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        let api_key = env::var("GEMINI_API_KEY").map_err(|_| ConfigError::MissingApiKey)?;

        let mut gemini = GeminiConfig::new(api_key);
        if let Ok(base_url) = env::var("GEMINI_BASE_URL") {
            gemini.base_url = base_url;
        }
        if let Ok(model) = env::var("GEMINI_MODEL") {
            gemini.model = model;
        }
        if let Ok(timeout) = env::var("GEMINI_TIMEOUT_SECS") {
            gemini.timeout_secs = parse_env_number("GEMINI_TIMEOUT_SECS", &timeout)?;
        }

        let render_dpi = match env::var("RXVISION_RENDER_DPI") {
            Ok(dpi) => parse_env_number("RXVISION_RENDER_DPI", &dpi)? as u32,
            Err(_) => crate::pipeline::render::DEFAULT_RENDER_DPI,
        };

        Ok(Self { gemini, render_dpi })
    }
}

fn parse_env_number(name: &'static str, value: &str) -> Result<u64, ConfigError> {
    value
        .trim()
        .parse::<u64>()
        .ok()
        .filter(|n| *n > 0)
        .ok_or_else(|| ConfigError::InvalidValue {
            name,
            value: value.to_string(),
        })
}
