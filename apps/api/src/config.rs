use std::path::PathBuf;

use anyhow::{Context, Result};

pub const DEFAULT_MAX_DOCUMENT_CHARS: usize = 200_000;
const DEFAULT_MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// Application configuration loaded from environment variables.
/// Every variable is optional; malformed numbers fail startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    /// JSON file overriding the built-in domain vocabulary.
    pub vocabulary_path: Option<PathBuf>,
    pub max_document_chars: usize,
    pub max_upload_bytes: usize,
    /// Year that "present" resolves to in date ranges. Unset: the current year.
    pub reference_year: Option<i32>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 8080,
            rust_log: "info".to_string(),
            vocabulary_path: None,
            max_document_chars: DEFAULT_MAX_DOCUMENT_CHARS,
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
            reference_year: None,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            vocabulary_path: std::env::var("VOCABULARY_PATH").ok().map(PathBuf::from),
            max_document_chars: parse_usize_env("MAX_DOCUMENT_CHARS", DEFAULT_MAX_DOCUMENT_CHARS)?,
            max_upload_bytes: parse_usize_env("MAX_UPLOAD_BYTES", DEFAULT_MAX_UPLOAD_BYTES)?,
            reference_year: std::env::var("REFERENCE_YEAR")
                .ok()
                .map(|raw| {
                    raw.trim()
                        .parse::<i32>()
                        .with_context(|| format!("REFERENCE_YEAR must be a year, got '{raw}'"))
                })
                .transpose()?,
        })
    }
}

fn parse_usize_env(key: &str, default: usize) -> Result<usize> {
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse::<usize>()
            .with_context(|| format!("{key} must be a non-negative integer, got '{raw}'")),
        Err(_) => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_limits() {
        let config = Config::default();
        assert_eq!(config.port, 8080);
        assert_eq!(config.max_document_chars, 200_000);
        assert!(config.vocabulary_path.is_none());
        assert!(config.reference_year.is_none());
    }

    #[test]
    fn test_parse_usize_env_falls_back_when_unset() {
        let value = parse_usize_env("STATEMENT_API_TEST_UNSET_VARIABLE", 42).unwrap();
        assert_eq!(value, 42);
    }
}
