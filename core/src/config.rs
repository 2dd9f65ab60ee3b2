// Configuration for the analytics API client and map loader.
//
// Plain structs with env-driven defaults; no config file is required.

use std::path::PathBuf;

/// Analytics API configuration
#[derive(Clone, Debug)]
pub struct ApiConfig {
    /// Base URL of the analytics backend (no trailing slash)
    pub base_url: String,
    /// Timeout for API requests in milliseconds
    pub timeout_ms: u64,
    /// User agent string
    pub user_agent: String,
    /// Row limit for the contact list endpoint
    pub contact_limit: u32,
    /// Row limit for the upcoming-birthdays endpoint
    pub birthday_limit: u32,
    /// Row limit for the coverage-by-puesto endpoint
    pub coverage_limit: u32,
    /// Local path of the geographic boundary document
    pub map_path: PathBuf,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000".to_string(),
            timeout_ms: 10_000,
            user_agent: "tablero-core/0.1".to_string(),
            contact_limit: 100,
            birthday_limit: 100,
            coverage_limit: 50,
            map_path: PathBuf::from("maps/colombia.json"),
        }
    }
}

impl ApiConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            base_url: std::env::var("TABLERO_API_URL")
                .ok()
                .filter(|s| !s.is_empty())
                .map(|s| s.trim_end_matches('/').to_string())
                .unwrap_or(defaults.base_url),
            timeout_ms: std::env::var("TABLERO_TIMEOUT_MS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.timeout_ms),
            user_agent: std::env::var("TABLERO_USER_AGENT").unwrap_or(defaults.user_agent),
            contact_limit: std::env::var("TABLERO_CONTACT_LIMIT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.contact_limit),
            birthday_limit: std::env::var("TABLERO_BIRTHDAY_LIMIT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.birthday_limit),
            coverage_limit: std::env::var("TABLERO_COVERAGE_LIMIT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.coverage_limit),
            map_path: std::env::var("TABLERO_MAP_PATH")
                .map(PathBuf::from)
                .unwrap_or(defaults.map_path),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_base_url_has_no_trailing_slash() {
        let cfg = ApiConfig::default();
        assert!(!cfg.base_url.ends_with('/'));
    }
}
