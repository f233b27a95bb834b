use anyhow::{Context, Result};

pub const DEFAULT_PROVIDER_BASE_URL: &str = "https://serpapi.com";
pub const DEFAULT_ALLOWED_ORIGINS: [&str; 2] = ["http://localhost:5173", "http://localhost:3000"];

/// Application configuration, built once at startup and handed to the state
/// and the provider client. Nothing below `main` reads the environment.
#[derive(Debug, Clone)]
pub struct Config {
    /// SerpApi key. `None` switches the search endpoint into mock mode.
    pub serpapi_key: Option<String>,
    pub serpapi_base_url: String,
    pub port: u16,
    pub rust_log: String,
    pub log_file: String,
    pub allowed_origins: Vec<String>,
    /// Whether a `.env` file was found at startup.
    pub env_file_loaded: bool,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        // load .env if present; a missing file is reported, not fatal
        let env_file_loaded = dotenvy::dotenv().is_ok();

        Ok(Config {
            env_file_loaded,
            ..Self::from_lookup(|key| std::env::var(key).ok())?
        })
    }

    /// Builds the config from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let port = match non_empty("PORT") {
            Some(raw) => raw
                .trim()
                .parse::<u16>()
                .with_context(|| format!("PORT must be a valid port number, got '{raw}'"))?,
            None => 8080,
        };

        let allowed_origins = match non_empty("CORS_ALLOWED_ORIGINS") {
            Some(raw) => raw
                .split(',')
                .map(str::trim)
                .filter(|o| !o.is_empty())
                .map(str::to_string)
                .collect(),
            None => DEFAULT_ALLOWED_ORIGINS.iter().map(|o| o.to_string()).collect(),
        };

        Ok(Config {
            serpapi_key: non_empty("SERPAPI_KEY"),
            serpapi_base_url: non_empty("SERPAPI_BASE_URL")
                .unwrap_or_else(|| DEFAULT_PROVIDER_BASE_URL.to_string()),
            port,
            rust_log: non_empty("RUST_LOG").unwrap_or_else(|| "info".to_string()),
            log_file: non_empty("LOG_FILE").unwrap_or_else(|| "app.log".to_string()),
            allowed_origins,
            env_file_loaded: false,
        })
    }

    pub fn has_api_key(&self) -> bool {
        self.serpapi_key.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> Result<Config> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults_when_environment_is_empty() {
        let config = config_from(&[]).unwrap();
        assert_eq!(config.port, 8080);
        assert!(config.serpapi_key.is_none());
        assert!(!config.has_api_key());
        assert_eq!(config.serpapi_base_url, DEFAULT_PROVIDER_BASE_URL);
        assert_eq!(config.rust_log, "info");
        assert_eq!(config.log_file, "app.log");
        assert_eq!(
            config.allowed_origins,
            vec!["http://localhost:5173", "http://localhost:3000"]
        );
    }

    #[test]
    fn test_empty_api_key_means_mock_mode() {
        let config = config_from(&[("SERPAPI_KEY", "  ")]).unwrap();
        assert!(config.serpapi_key.is_none());
    }

    #[test]
    fn test_api_key_and_port_are_read() {
        let config = config_from(&[("SERPAPI_KEY", "secret"), ("PORT", "9090")]).unwrap();
        assert_eq!(config.serpapi_key.as_deref(), Some("secret"));
        assert_eq!(config.port, 9090);
    }

    #[test]
    fn test_invalid_port_is_an_error() {
        let err = config_from(&[("PORT", "eighty")]).unwrap_err();
        assert!(err.to_string().contains("PORT"));
    }

    #[test]
    fn test_allowed_origins_are_split_and_trimmed() {
        let config = config_from(&[(
            "CORS_ALLOWED_ORIGINS",
            "http://a.test, http://b.test ,,",
        )])
        .unwrap();
        assert_eq!(config.allowed_origins, vec!["http://a.test", "http://b.test"]);
    }
}
