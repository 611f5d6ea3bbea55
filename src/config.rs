//! Process configuration
//!
//! The Gemini credential is required; a missing key aborts startup instead of
//! letting the first submission fail later.

use crate::error::ReportError;

const DEFAULT_PORT: u16 = 8080;

#[derive(Debug, Clone)]
pub struct Config {
    pub gemini_api_key: String,
    pub port: u16,
}

impl Config {
    pub fn from_env() -> crate::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> crate::Result<Self> {
        let gemini_api_key = lookup("GEMINI_API_KEY")
            .filter(|value| !value.trim().is_empty())
            .ok_or_else(|| {
                ReportError::Configuration("GEMINI_API_KEY environment variable not set".into())
            })?;

        let port = match lookup("PORT").or_else(|| lookup("API_PORT")) {
            Some(raw) => raw.parse().map_err(|_| {
                ReportError::Configuration(format!("invalid port value: {}", raw))
            })?,
            None => DEFAULT_PORT,
        };

        Ok(Self {
            gemini_api_key,
            port,
        })
    }
}
