use std::str::FromStr;

use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};

use crate::classify::ClassifierThresholds;

/// Optional collaborators the host has wired in. Replaces probing for
/// "is the NLP library installed" at call time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Capabilities {
    pub entity_recognition: bool,
    pub llm_enhancement: bool,
}

/// Screening configuration loaded from environment variables.
/// Every variable is optional; unset ones take the defaults below.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub resume_threshold: u32,
    pub override_cutoff: u32,
    pub min_text_length: usize,
    /// OCR quality (0.0–1.0) under which a warning is logged.
    pub min_extraction_quality: f32,
    pub capabilities: Capabilities,
    pub rust_log: String,
}

impl Default for Config {
    fn default() -> Self {
        let thresholds = ClassifierThresholds::default();
        Self {
            resume_threshold: thresholds.resume_threshold,
            override_cutoff: thresholds.override_cutoff,
            min_text_length: thresholds.min_text_length,
            min_extraction_quality: 0.5,
            capabilities: Capabilities::default(),
            rust_log: "info".to_string(),
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds a config from any key lookup; `from_env` passes the process environment.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let defaults = Config::default();

        Ok(Config {
            resume_threshold: optional(&lookup, "SCREENER_RESUME_THRESHOLD", defaults.resume_threshold)?,
            override_cutoff: optional(&lookup, "SCREENER_OVERRIDE_CUTOFF", defaults.override_cutoff)?,
            min_text_length: optional(&lookup, "SCREENER_MIN_TEXT_LENGTH", defaults.min_text_length)?,
            min_extraction_quality: optional(
                &lookup,
                "SCREENER_MIN_EXTRACTION_QUALITY",
                defaults.min_extraction_quality,
            )?,
            capabilities: Capabilities {
                entity_recognition: flag(&lookup, "SCREENER_ENABLE_NER")?,
                llm_enhancement: flag(&lookup, "SCREENER_ENABLE_LLM_ENHANCEMENT")?,
            },
            rust_log: lookup("RUST_LOG").unwrap_or(defaults.rust_log),
        })
    }

    pub fn thresholds(&self) -> ClassifierThresholds {
        ClassifierThresholds {
            resume_threshold: self.resume_threshold,
            override_cutoff: self.override_cutoff,
            min_text_length: self.min_text_length,
            ..ClassifierThresholds::default()
        }
    }
}

fn optional<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("{key} must be a valid number, got '{raw}'")),
        None => Ok(default),
    }
}

fn flag(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Result<bool> {
    let Some(raw) = lookup(key) else {
        return Ok(false);
    };
    match raw.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" | "" => Ok(false),
        other => Err(anyhow!("{key} must be a boolean flag, got '{other}'")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> Result<Config> {
        let env: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| env.get(key).cloned())
    }

    #[test]
    fn test_defaults_when_unset() {
        let config = config_from(&[]).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.thresholds(), ClassifierThresholds::default());
    }

    #[test]
    fn test_overrides_parsed() {
        let config = config_from(&[
            ("SCREENER_RESUME_THRESHOLD", "20"),
            ("SCREENER_OVERRIDE_CUTOFF", " 30 "),
            ("SCREENER_MIN_EXTRACTION_QUALITY", "0.7"),
            ("SCREENER_ENABLE_NER", "true"),
            ("RUST_LOG", "debug"),
        ])
        .unwrap();
        assert_eq!(config.resume_threshold, 20);
        assert_eq!(config.thresholds().override_cutoff, 30);
        assert!((config.min_extraction_quality - 0.7).abs() < f32::EPSILON);
        assert!(config.capabilities.entity_recognition);
        assert!(!config.capabilities.llm_enhancement);
        assert_eq!(config.rust_log, "debug");
    }

    #[test]
    fn test_invalid_number_is_an_error() {
        let err = config_from(&[("SCREENER_MIN_TEXT_LENGTH", "fifty")]).unwrap_err();
        assert!(err.to_string().contains("SCREENER_MIN_TEXT_LENGTH"));
    }

    #[test]
    fn test_invalid_flag_is_an_error() {
        assert!(config_from(&[("SCREENER_ENABLE_LLM_ENHANCEMENT", "maybe")]).is_err());
    }
}
