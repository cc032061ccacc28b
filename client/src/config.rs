//! Client configuration.
//!
//! The browser build has no process environment, so values are baked in at
//! compile time from `API_BASE_URL`, `PAGE_SIZE` and `LOG_LEVEL`.

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8000/api/";
pub const DEFAULT_PAGE_SIZE: u32 = 10;
pub const DEFAULT_LOG_LEVEL: &str = "info";
pub const DEFAULT_STORAGE_KEY: &str = "collections.session";

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("API base URL is empty")]
    EmptyBaseUrl,
    #[error("API base URL must start with http:// or https://, got {0}")]
    UnsupportedScheme(String),
    #[error("page size must be between 1 and 100, got {0}")]
    PageSize(u32),
    #[error("{key} is not a number: {value}")]
    NotANumber { key: &'static str, value: String },
    #[error("unknown log level: {0}")]
    LogLevel(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Always ends with `/`.
    pub api_base_url: String,
    pub page_size: u32,
    pub storage_key: String,
    pub log_level: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            page_size: DEFAULT_PAGE_SIZE,
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            log_level: DEFAULT_LOG_LEVEL.to_string(),
        }
    }
}

impl ClientConfig {
    pub fn new(api_base_url: &str) -> Result<Self, ConfigError> {
        Self::from_values(Some(api_base_url), None, None)
    }

    pub fn from_build_env() -> Result<Self, ConfigError> {
        Self::from_values(
            option_env!("API_BASE_URL"),
            option_env!("PAGE_SIZE"),
            option_env!("LOG_LEVEL"),
        )
    }

    /// Build from optional raw values; absent or blank values take defaults.
    pub fn from_values(
        api_base_url: Option<&str>,
        page_size: Option<&str>,
        log_level: Option<&str>,
    ) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(url) = api_base_url.filter(|v| !v.trim().is_empty()) {
            config.api_base_url = url.trim().to_string();
        }
        if let Some(raw) = page_size.filter(|v| !v.trim().is_empty()) {
            config.page_size = raw.trim().parse().map_err(|_| ConfigError::NotANumber {
                key: "PAGE_SIZE",
                value: raw.to_string(),
            })?;
        }
        if let Some(level) = log_level.filter(|v| !v.trim().is_empty()) {
            config.log_level = level.trim().to_lowercase();
        }

        config.validate()
    }

    pub fn with_page_size(mut self, page_size: u32) -> Result<Self, ConfigError> {
        self.page_size = page_size;
        self.validate()
    }

    pub fn with_storage_key(mut self, key: impl Into<String>) -> Self {
        self.storage_key = key.into();
        self
    }

    /// Check every value and normalize the base URL to end with `/`.
    pub fn validate(mut self) -> Result<Self, ConfigError> {
        let url = self.api_base_url.trim();
        if url.is_empty() {
            return Err(ConfigError::EmptyBaseUrl);
        }
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(ConfigError::UnsupportedScheme(url.to_string()));
        }
        self.api_base_url = if url.ends_with('/') {
            url.to_string()
        } else {
            format!("{url}/")
        };

        if !(1..=100).contains(&self.page_size) {
            return Err(ConfigError::PageSize(self.page_size));
        }
        if !LOG_LEVELS.contains(&self.log_level.as_str()) {
            return Err(ConfigError::LogLevel(self.log_level));
        }
        Ok(self)
    }

    /// Absolute URL for a resource path such as `customers/12/`.
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.api_base_url, path.trim_start_matches('/'))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ClientConfig::from_values(None, None, None).unwrap();
        assert_eq!(config.api_base_url, DEFAULT_API_BASE_URL);
        assert_eq!(config.page_size, 10);
        assert_eq!(config.log_level, "info");
    }

    #[test]
    fn test_trailing_slash_added() {
        let config = ClientConfig::new("https://api.example.com/v1").unwrap();
        assert_eq!(config.api_base_url, "https://api.example.com/v1/");
        assert_eq!(config.endpoint("/customers/"), "https://api.example.com/v1/customers/");
    }

    #[test]
    fn test_rejects_bad_values() {
        assert_eq!(
            ClientConfig::new("ftp://example.com"),
            Err(ConfigError::UnsupportedScheme("ftp://example.com".into()))
        );
        assert_eq!(
            ClientConfig::from_values(None, Some("0"), None),
            Err(ConfigError::PageSize(0))
        );
        assert!(matches!(
            ClientConfig::from_values(None, Some("ten"), None),
            Err(ConfigError::NotANumber { .. })
        ));
        assert_eq!(
            ClientConfig::from_values(None, None, Some("loud")),
            Err(ConfigError::LogLevel("loud".into()))
        );
    }

    #[test]
    fn test_blank_values_use_defaults() {
        let config = ClientConfig::from_values(Some("  "), Some(""), Some("DEBUG")).unwrap();
        assert_eq!(config.api_base_url, DEFAULT_API_BASE_URL);
        assert_eq!(config.log_level, "debug");
    }
}
