use std::str::FromStr;
use std::time::Duration;

use anyhow::{anyhow, Context, Result};

use crate::extraction::Strategy;

const DEFAULT_MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// Application configuration loaded from environment variables.
/// Startup fails if the webhook URLs are missing or a value does not parse.
#[derive(Debug, Clone)]
pub struct Config {
    pub analyze_webhook_url: String,
    pub structure_webhook_url: String,
    pub port: u16,
    pub rust_log: String,
    pub extraction_strategy: Strategy,
    pub extraction_timeout: Duration,
    pub max_upload_bytes: usize,
    pub webhook_timeout: Duration,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            analyze_webhook_url: require_env("ANALYZE_WEBHOOK_URL")?,
            structure_webhook_url: require_env("STRUCTURE_WEBHOOK_URL")?,
            port: parse_env("PORT", 8080)?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            extraction_strategy: std::env::var("EXTRACTION_STRATEGY")
                .ok()
                .map(|s| s.parse::<Strategy>().map_err(|e| anyhow!(e)))
                .transpose()
                .context("EXTRACTION_STRATEGY is invalid")?
                .unwrap_or(Strategy::Structured),
            extraction_timeout: Duration::from_secs(parse_env("EXTRACTION_TIMEOUT_SECS", 10)?),
            max_upload_bytes: parse_env("MAX_UPLOAD_BYTES", DEFAULT_MAX_UPLOAD_BYTES)?,
            webhook_timeout: Duration::from_secs(parse_env("WEBHOOK_TIMEOUT_SECS", 120)?),
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

fn parse_env<T>(key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    parse_value(key, std::env::var(key).ok(), default)
}

fn parse_value<T>(key: &str, raw: Option<String>, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match raw {
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("{key} has an invalid value '{raw}'")),
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_value_uses_default_when_unset() {
        let port: u16 = parse_value("PORT", None, 8080).unwrap();
        assert_eq!(port, 8080);
    }

    #[test]
    fn test_parse_value_parses_trimmed_input() {
        let secs: u64 = parse_value("EXTRACTION_TIMEOUT_SECS", Some(" 5 ".to_string()), 10).unwrap();
        assert_eq!(secs, 5);
    }

    #[test]
    fn test_parse_value_reports_key_on_error() {
        let err = parse_value::<u16>("PORT", Some("eighty".to_string()), 8080).unwrap_err();
        assert!(err.to_string().contains("PORT"));
    }
}
