use serde::Deserialize;
use std::fs;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("invalid config: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Browser origins allowed to call the API; `"*"` allows any.
    pub cors_origins: Vec<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".into(),
            port: 3000,
            cors_origins: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LlmConfig {
    pub endpoint: String,
    pub model: String,
    pub temperature: f32,
    /// Falls back to `OPENAI_API_KEY` when absent.
    pub api_key: Option<String>,
    /// No timeout when absent.
    pub timeout_seconds: Option<u64>,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            endpoint: "https://api.openai.com/v1/chat/completions".into(),
            model: "gpt-4.1-mini".into(),
            temperature: 0.7,
            api_key: None,
            timeout_seconds: None,
        }
    }
}

impl LlmConfig {
    pub fn resolved_api_key(&self) -> Option<String> {
        self.api_key
            .clone()
            .filter(|k| !k.trim().is_empty())
            .or_else(|| std::env::var("OPENAI_API_KEY").ok())
            .filter(|k| !k.trim().is_empty())
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RecommendationConfig {
    pub prompt_candidate_limit: usize,
    pub fallback_count: usize,
}

impl Default for RecommendationConfig {
    fn default() -> Self {
        Self {
            prompt_candidate_limit: 20,
            fallback_count: 3,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub catalog_dir: PathBuf,
    pub llm: LlmConfig,
    pub recommendations: RecommendationConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            catalog_dir: PathBuf::from("data"),
            llm: LlmConfig::default(),
            recommendations: RecommendationConfig::default(),
        }
    }
}

impl AppConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        if self.recommendations.prompt_candidate_limit == 0 {
            return Err(ConfigError::Invalid(
                "recommendations.prompt_candidate_limit must be positive".into(),
            ));
        }
        if !(1..=5).contains(&self.recommendations.fallback_count) {
            return Err(ConfigError::Invalid(format!(
                "recommendations.fallback_count must be within 1..=5: {}",
                self.recommendations.fallback_count
            )));
        }
        if !(0.0..=2.0).contains(&self.llm.temperature) {
            return Err(ConfigError::Invalid(format!(
                "llm.temperature out of range: {}",
                self.llm.temperature
            )));
        }
        Ok(())
    }
}

pub fn load_config(path: &str) -> Result<AppConfig, ConfigError> {
    let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_string(),
        source,
    })?;
    let mut config: AppConfig =
        serde_json::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_string(),
            source,
        })?;
    if config.catalog_dir.as_os_str().is_empty() {
        config.catalog_dir = PathBuf::from("data");
    }
    config.validate()?;
    Ok(config)
}
