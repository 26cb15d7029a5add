use crate::error::AppError;
use reqwest::Url;
use serde::{Deserialize, Serialize};
use std::time::Duration;

pub const DEFAULT_API_BASE: &str = "https://api-web.nhle.com/v1";
pub const DEFAULT_CORS_PROXY: &str = "https://api.allorigins.win/raw";
pub const DEFAULT_SEASON: &str = "20242025";
pub const DEFAULT_CACHE_SECONDS: u64 = 5 * 60;
pub const DEFAULT_HTTP_TIMEOUT_SECONDS: u64 = 30;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    pub api_base: String,
    // None sends requests directly
    pub proxy_url: Option<String>,
    pub season: String,
    pub cache_duration_secs: u64,
    pub http_timeout_seconds: u64,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            api_base: DEFAULT_API_BASE.to_string(),
            proxy_url: Some(DEFAULT_CORS_PROXY.to_string()),
            season: DEFAULT_SEASON.to_string(),
            cache_duration_secs: DEFAULT_CACHE_SECONDS,
            http_timeout_seconds: DEFAULT_HTTP_TIMEOUT_SECONDS,
        }
    }
}

impl Config {
    /// Defaults overridden by `NHL_API_BASE`, `NHL_CORS_PROXY` (empty disables the relay),
    /// `NHL_SEASON`, `NHL_CACHE_SECONDS` and `NHL_HTTP_TIMEOUT`.
    pub fn load() -> Result<Self, AppError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Config::default();

        if let Some(api_base) = lookup("NHL_API_BASE") {
            config.api_base = api_base;
        }

        if let Some(proxy) = lookup("NHL_CORS_PROXY") {
            config.proxy_url = if proxy.trim().is_empty() {
                None
            } else {
                Some(proxy)
            };
        }

        if let Some(season) = lookup("NHL_SEASON") {
            config.season = season;
        }

        if let Some(raw) = lookup("NHL_CACHE_SECONDS") {
            config.cache_duration_secs = raw.trim().parse().map_err(|_| {
                AppError::config_error(format!("NHL_CACHE_SECONDS is not a number: {raw}"))
            })?;
        }

        if let Some(raw) = lookup("NHL_HTTP_TIMEOUT") {
            config.http_timeout_seconds = raw.trim().parse().map_err(|_| {
                AppError::config_error(format!("NHL_HTTP_TIMEOUT is not a number: {raw}"))
            })?;
        }

        config.api_base = config.api_base.trim_end_matches('/').to_string();
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), AppError> {
        validate_http_url("API base", &self.api_base)?;
        if let Some(proxy) = &self.proxy_url {
            validate_http_url("CORS proxy", proxy)?;
        }
        validate_season(&self.season)?;
        if self.http_timeout_seconds == 0 {
            return Err(AppError::config_error("HTTP timeout must be at least one second"));
        }
        Ok(())
    }

    pub fn cache_duration(&self) -> Duration {
        Duration::from_secs(self.cache_duration_secs)
    }

    pub fn http_timeout(&self) -> Duration {
        Duration::from_secs(self.http_timeout_seconds)
    }
}

fn validate_http_url(what: &str, value: &str) -> Result<(), AppError> {
    let url = Url::parse(value)
        .map_err(|e| AppError::config_error(format!("{what} is not a valid URL ({value}): {e}")))?;
    match url.scheme() {
        "http" | "https" => Ok(()),
        other => Err(AppError::config_error(format!(
            "{what} must use http or https, got {other}"
        ))),
    }
}

pub fn validate_season(season: &str) -> Result<(), AppError> {
    if season.len() != 8 || !season.bytes().all(|b| b.is_ascii_digit()) {
        return Err(AppError::config_error(format!(
            "Season must be 8 digits like 20242025, got {season}"
        )));
    }

    let (start, end) = season.split_at(4);
    let start: u32 = start.parse().map_err(|_| AppError::config_error("Invalid season start"))?;
    let end: u32 = end.parse().map_err(|_| AppError::config_error("Invalid season end"))?;
    if end != start + 1 {
        return Err(AppError::config_error(format!(
            "Season years must be consecutive, got {season}"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn test_defaults_without_environment() {
        let config = Config::from_lookup(|_| None).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.cache_duration(), Duration::from_secs(300));
    }

    #[test]
    fn test_environment_overrides() {
        let config = Config::from_lookup(lookup_from(&[
            ("NHL_API_BASE", "http://localhost:9000/v1/"),
            ("NHL_CORS_PROXY", ""),
            ("NHL_SEASON", "20232024"),
            ("NHL_CACHE_SECONDS", "60"),
            ("NHL_HTTP_TIMEOUT", "5"),
        ]))
        .unwrap();

        assert_eq!(config.api_base, "http://localhost:9000/v1");
        assert_eq!(config.proxy_url, None);
        assert_eq!(config.season, "20232024");
        assert_eq!(config.cache_duration_secs, 60);
        assert_eq!(config.http_timeout_seconds, 5);
    }

    #[test]
    fn test_bad_numbers_are_rejected() {
        let result = Config::from_lookup(lookup_from(&[("NHL_CACHE_SECONDS", "soon")]));
        assert!(matches!(result, Err(AppError::Config(_))));
    }

    #[test]
    fn test_validate_season() {
        assert!(validate_season("20242025").is_ok());
        assert!(validate_season("2024202").is_err());
        assert!(validate_season("2024-2025").is_err());
        assert!(validate_season("20242026").is_err());
        assert!(validate_season("abcdefgh").is_err());
    }

    #[test]
    fn test_validate_rejects_non_http_urls() {
        let config = Config {
            proxy_url: Some("ftp://relay.example".to_string()),
            ..Config::default()
        };
        assert!(config.validate().is_err());

        let config = Config {
            api_base: "not a url".to_string(),
            ..Config::default()
        };
        assert!(config.validate().is_err());
    }
}
