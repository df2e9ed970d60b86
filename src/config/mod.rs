// src/config/mod.rs
//
// Pipeline configuration
//
// PRINCIPLES:
// - Every field has a default, a config file only overrides
// - Explicit path wins over the default location
// - Credentials may come from the environment instead of the file

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::{AppError, AppResult};

/// Environment variable holding the metadata catalog credential
pub const TOKEN_ENV: &str = "DOUBANHUB_TMDB_TOKEN";

/// Environment variable overriding the request timeout
pub const TIMEOUT_ENV: &str = "DOUBANHUB_TIMEOUT_SECS";

const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Mobile API root of the source catalog
    pub source_base_url: String,

    /// Root of the legacy HTML list pages
    pub doulist_base_url: String,

    /// Curated carousel document, served whole
    pub carousel_url: String,

    /// Metadata catalog API root
    pub metadata_base_url: String,

    /// API key or read access token for the metadata catalog
    pub metadata_token: String,

    pub metadata_language: String,

    pub user_agent: String,

    pub request_timeout_secs: u64,

    /// Attempts per source page, including the first one
    pub retry_attempts: u32,

    pub retry_delay_ms: u64,

    /// Items per page in plain paging
    pub page_size: u32,

    /// Items per upstream page while accumulating a sample
    pub sample_page_size: u32,

    pub sample_size: usize,

    /// Ceiling on upstream pages read while accumulating a sample
    pub max_sample_pages: u32,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            source_base_url: "https://m.douban.com/rexxar/api/v2".to_string(),
            doulist_base_url: "https://www.douban.com/doulist".to_string(),
            carousel_url: "https://gist.githubusercontent.com/huangxd-/5ae61c105b417218b9e5bad7073d2f36/raw/douban_carousel.json"
                .to_string(),
            metadata_base_url: "https://api.themoviedb.org/3".to_string(),
            metadata_token: String::new(),
            metadata_language: "zh-CN".to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            request_timeout_secs: 30,
            retry_attempts: 3,
            retry_delay_ms: 1000,
            page_size: 20,
            sample_page_size: 50,
            sample_size: 9,
            max_sample_pages: 100,
        }
    }
}

impl PipelineConfig {
    /// Default config file location: {CONFIG_DIR}/doubanhub/config.toml
    pub fn default_path() -> AppResult<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| AppError::Config("Could not determine config directory".to_string()))?;
        Ok(config_dir.join("doubanhub").join("config.toml"))
    }

    /// Parse a TOML document; absent keys keep their defaults
    pub fn from_toml_str(contents: &str) -> AppResult<Self> {
        let config: PipelineConfig = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from an explicit file. The file must exist.
    pub fn from_file(path: &Path) -> AppResult<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Load from `path`, or from the default location when it exists,
    /// or fall back to defaults. Environment overrides apply last.
    pub fn load(path: Option<&Path>) -> AppResult<Self> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => {
                let default_path = Self::default_path()?;
                if default_path.exists() {
                    log::debug!("Loading config from {}", default_path.display());
                    Self::from_file(&default_path)?
                } else {
                    Self::default()
                }
            }
        };

        config.apply_env_overrides(|key| std::env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    /// Apply overrides from a key lookup (the process environment in practice)
    pub fn apply_env_overrides<F>(&mut self, lookup: F) -> AppResult<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(token) = lookup(TOKEN_ENV).filter(|t| !t.trim().is_empty()) {
            self.metadata_token = token.trim().to_string();
        }

        if let Some(raw) = lookup(TIMEOUT_ENV) {
            self.request_timeout_secs = raw.trim().parse().map_err(|_| {
                AppError::Config(format!("{} must be a whole number of seconds, got '{}'", TIMEOUT_ENV, raw))
            })?;
        }

        Ok(())
    }

    pub fn validate(&self) -> AppResult<()> {
        if self.retry_attempts == 0 {
            return Err(AppError::Config("retry_attempts must be at least 1".to_string()));
        }
        if self.page_size == 0 || self.sample_page_size == 0 {
            return Err(AppError::Config("page sizes must be at least 1".to_string()));
        }
        if self.sample_size == 0 {
            return Err(AppError::Config("sample_size must be at least 1".to_string()));
        }
        if self.max_sample_pages == 0 {
            return Err(AppError::Config("max_sample_pages must be at least 1".to_string()));
        }
        for (name, value) in [
            ("source_base_url", &self.source_base_url),
            ("doulist_base_url", &self.doulist_base_url),
            ("carousel_url", &self.carousel_url),
            ("metadata_base_url", &self.metadata_base_url),
        ] {
            if value.trim().is_empty() {
                return Err(AppError::Config(format!("{} cannot be empty", name)));
            }
        }
        Ok(())
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn retry_delay(&self) -> Duration {
        Duration::from_millis(self.retry_delay_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults_are_valid() {
        let config = PipelineConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.retry_attempts, 3);
        assert_eq!(config.retry_delay(), Duration::from_secs(1));
        assert_eq!(config.sample_size, 9);
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = PipelineConfig::from_toml_str(
            r#"
            metadata_token = "abc123"
            page_size = 30
            "#,
        )
        .unwrap();

        assert_eq!(config.metadata_token, "abc123");
        assert_eq!(config.page_size, 30);
        assert_eq!(config.sample_page_size, 50);
    }

    #[test]
    fn test_invalid_values_rejected() {
        assert!(PipelineConfig::from_toml_str("retry_attempts = 0").is_err());
        assert!(PipelineConfig::from_toml_str("sample_size = 0").is_err());
        assert!(PipelineConfig::from_toml_str("metadata_base_url = \"\"").is_err());
        assert!(PipelineConfig::from_toml_str("page_size = \"many\"").is_err());
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "max_sample_pages = 7").unwrap();

        let config = PipelineConfig::from_file(file.path()).unwrap();
        assert_eq!(config.max_sample_pages, 7);
    }

    #[test]
    fn test_missing_explicit_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = PipelineConfig::load(Some(&dir.path().join("absent.toml")));
        assert!(matches!(result, Err(AppError::Io(_))));
    }

    #[test]
    fn test_env_overrides() {
        let mut config = PipelineConfig::default();
        config
            .apply_env_overrides(|key| match key {
                TOKEN_ENV => Some(" eyJtoken ".to_string()),
                TIMEOUT_ENV => Some("5".to_string()),
                _ => None,
            })
            .unwrap();

        assert_eq!(config.metadata_token, "eyJtoken");
        assert_eq!(config.request_timeout(), Duration::from_secs(5));

        let result = config.apply_env_overrides(|key| (key == TIMEOUT_ENV).then(|| "soon".to_string()));
        assert!(result.is_err());
    }
}
