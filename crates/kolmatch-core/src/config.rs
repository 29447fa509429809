use thiserror::Error;

use crate::app_config::AppConfig;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required env var: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for env var {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the
/// process, without touching `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// The parsing/validation logic is decoupled from the actual environment so it
/// can be tested with a pure `HashMap` lookup — no `set_var`/`remove_var`.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let require = |var: &str| -> Result<String, ConfigError> {
        lookup(var).map_err(|_| ConfigError::MissingEnvVar(var.to_string()))
    };

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_usize = |var: &str, default: &str| -> Result<usize, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<usize>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            })
    };

    let apify_token = require("APIFY_API_TOKEN")?;

    let ollama_url = or_default("KOLMATCH_OLLAMA_URL", "http://localhost:11434");
    let ollama_model = or_default("KOLMATCH_OLLAMA_MODEL", "mistral");
    let apify_actor = or_default("KOLMATCH_APIFY_ACTOR", "clockworks~tiktok-scraper");
    let search_region = or_default("KOLMATCH_SEARCH_REGION", "TH");
    let log_level = or_default("KOLMATCH_LOG_LEVEL", "info");

    let request_timeout_secs = parse_u64("KOLMATCH_REQUEST_TIMEOUT_SECS", "120")?;
    let search_results_per_page = parse_usize("KOLMATCH_SEARCH_RESULTS_PER_PAGE", "10")?;
    let max_concurrent_scoring = parse_usize("KOLMATCH_MAX_CONCURRENT_SCORING", "4")?;

    Ok(AppConfig {
        ollama_url,
        ollama_model,
        apify_token,
        apify_actor,
        search_region,
        request_timeout_secs,
        search_results_per_page,
        max_concurrent_scoring,
        log_level,
    })
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::env::VarError;

    use super::*;

    fn lookup_from_map<'a>(
        map: &'a HashMap<&'a str, &'a str>,
    ) -> impl Fn(&str) -> Result<String, VarError> + 'a {
        move |key| {
            map.get(key)
                .map(|v| (*v).to_string())
                .ok_or(VarError::NotPresent)
        }
    }

    fn full_env<'a>() -> HashMap<&'a str, &'a str> {
        let mut m = HashMap::new();
        m.insert("APIFY_API_TOKEN", "test-token");
        m
    }

    #[test]
    fn fails_without_apify_token() {
        let map: HashMap<&str, &str> = HashMap::new();
        let result = build_app_config(lookup_from_map(&map));
        assert!(
            matches!(result, Err(ConfigError::MissingEnvVar(ref v)) if v == "APIFY_API_TOKEN"),
            "expected MissingEnvVar(APIFY_API_TOKEN), got: {result:?}"
        );
    }

    #[test]
    fn succeeds_with_defaults() {
        let map = full_env();
        let cfg = build_app_config(lookup_from_map(&map)).unwrap();
        assert_eq!(cfg.ollama_url, "http://localhost:11434");
        assert_eq!(cfg.ollama_model, "mistral");
        assert_eq!(cfg.apify_actor, "clockworks~tiktok-scraper");
        assert_eq!(cfg.search_region, "TH");
        assert_eq!(cfg.request_timeout_secs, 120);
        assert_eq!(cfg.search_results_per_page, 10);
        assert_eq!(cfg.max_concurrent_scoring, 4);
        assert_eq!(cfg.log_level, "info");
    }

    #[test]
    fn overrides_are_applied() {
        let mut map = full_env();
        map.insert("KOLMATCH_OLLAMA_MODEL", "llama3");
        map.insert("KOLMATCH_SEARCH_REGION", "US");
        map.insert("KOLMATCH_MAX_CONCURRENT_SCORING", "8");
        let cfg = build_app_config(lookup_from_map(&map)).unwrap();
        assert_eq!(cfg.ollama_model, "llama3");
        assert_eq!(cfg.search_region, "US");
        assert_eq!(cfg.max_concurrent_scoring, 8);
    }

    #[test]
    fn invalid_timeout_is_rejected() {
        let mut map = full_env();
        map.insert("KOLMATCH_REQUEST_TIMEOUT_SECS", "not-a-number");
        let result = build_app_config(lookup_from_map(&map));
        assert!(
            matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "KOLMATCH_REQUEST_TIMEOUT_SECS"),
            "expected InvalidEnvVar(KOLMATCH_REQUEST_TIMEOUT_SECS), got: {result:?}"
        );
    }

    #[test]
    fn invalid_concurrency_is_rejected() {
        let mut map = full_env();
        map.insert("KOLMATCH_MAX_CONCURRENT_SCORING", "-1");
        let result = build_app_config(lookup_from_map(&map));
        assert!(
            matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "KOLMATCH_MAX_CONCURRENT_SCORING"),
            "expected InvalidEnvVar(KOLMATCH_MAX_CONCURRENT_SCORING), got: {result:?}"
        );
    }

    #[test]
    fn debug_redacts_token() {
        let map = full_env();
        let cfg = build_app_config(lookup_from_map(&map)).unwrap();
        let debug = format!("{cfg:?}");
        assert!(!debug.contains("test-token"), "token leaked: {debug}");
        assert!(debug.contains("[redacted]"));
    }
}
