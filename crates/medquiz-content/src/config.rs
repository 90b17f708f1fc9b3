//! Configuration loading and content source factory.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use medquiz_core::model::Tier;
use medquiz_core::traits::ContentSource;

use crate::directory::DirectorySource;
use crate::http::HttpContentSource;

/// Where content documents come from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ContentConfig {
    Http { base_url: String },
    Directory {
        #[serde(default = "default_content_dir")]
        path: PathBuf,
    },
}

impl Default for ContentConfig {
    fn default() -> Self {
        ContentConfig::Directory {
            path: default_content_dir(),
        }
    }
}

fn default_content_dir() -> PathBuf {
    PathBuf::from("./content")
}

/// Top-level medquiz configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MedquizConfig {
    /// Content backend.
    #[serde(default)]
    pub content: ContentConfig,
    /// Directory for persisted preferences and statistics.
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
    /// Tier used until one is selected.
    #[serde(default = "default_tier")]
    pub default_tier: Tier,
    /// Questions per quiz when none is requested.
    #[serde(default = "default_question_count")]
    pub default_question_count: usize,
    /// HTTP request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub request_timeout_secs: u64,
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("./.medquiz")
}
fn default_tier() -> Tier {
    Tier::Emt
}
fn default_question_count() -> usize {
    10
}
fn default_timeout() -> u64 {
    30
}

impl Default for MedquizConfig {
    fn default() -> Self {
        Self {
            content: ContentConfig::default(),
            data_dir: default_data_dir(),
            default_tier: default_tier(),
            default_question_count: default_question_count(),
            request_timeout_secs: default_timeout(),
        }
    }
}

/// Resolve environment variable references like `${VAR_NAME}` in a string.
fn resolve_env_vars(s: &str) -> String {
    let mut result = s.to_string();
    while let Some(start) = result.find("${") {
        if let Some(end) = result[start..].find('}') {
            let var_name = &result[start + 2..start + end];
            let value = std::env::var(var_name).unwrap_or_default();
            result = format!(
                "{}{}{}",
                &result[..start],
                value,
                &result[start + end + 1..]
            );
        } else {
            break;
        }
    }
    result
}

fn resolve_content_config(config: &ContentConfig) -> ContentConfig {
    match config {
        ContentConfig::Http { base_url } => ContentConfig::Http {
            base_url: resolve_env_vars(base_url),
        },
        ContentConfig::Directory { path } => ContentConfig::Directory {
            path: PathBuf::from(resolve_env_vars(&path.to_string_lossy())),
        },
    }
}

/// Load configuration from well-known paths.
///
/// Search order:
/// 1. `medquiz.toml` in the current directory
/// 2. `~/.config/medquiz/config.toml`
///
/// `MEDQUIZ_CONTENT_URL` replaces the content backend with an HTTP source.
pub fn load_config() -> Result<MedquizConfig> {
    load_config_from(None)
}

/// Load config from an explicit path, or search the default locations.
pub fn load_config_from(path: Option<&Path>) -> Result<MedquizConfig> {
    let config_path = if let Some(p) = path {
        if p.exists() {
            Some(p.to_path_buf())
        } else {
            anyhow::bail!("config file not found: {}", p.display());
        }
    } else {
        let local = PathBuf::from("medquiz.toml");
        if local.exists() {
            Some(local)
        } else {
            dirs_path()
                .map(|home| home.join("config.toml"))
                .filter(|global| global.exists())
        }
    };

    let mut config = match config_path {
        Some(path) => {
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read config: {}", path.display()))?;
            parse_config(&content)
                .with_context(|| format!("failed to parse config: {}", path.display()))?
        }
        None => MedquizConfig::default(),
    };

    if let Ok(url) = std::env::var("MEDQUIZ_CONTENT_URL") {
        config.content = ContentConfig::Http { base_url: url };
    }
    config.content = resolve_content_config(&config.content);

    anyhow::ensure!(
        config.default_question_count >= 1,
        "default_question_count must be at least 1"
    );

    Ok(config)
}

/// Parse a TOML config string.
pub fn parse_config(content: &str) -> Result<MedquizConfig> {
    Ok(toml::from_str(content)?)
}

fn dirs_path() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("medquiz"))
}

/// Create the content source described by the configuration.
pub fn create_source(config: &MedquizConfig) -> Result<Arc<dyn ContentSource>> {
    match &config.content {
        ContentConfig::Http { base_url } => Ok(Arc::new(HttpContentSource::new(
            base_url,
            config.request_timeout_secs,
        )?)),
        ContentConfig::Directory { path } => Ok(Arc::new(DirectorySource::new(path.clone()))),
    }
}
