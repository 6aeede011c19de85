use std::env;

/// Application configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Server host address.
    pub host: String,
    /// Server port.
    pub port: u16,
    /// Alpha Vantage API key. Without one the mock provider is used.
    pub alpha_vantage_api_key: Option<String>,
    /// TTL for cached price histories, in seconds.
    pub history_cache_ttl_secs: u64,
    /// Concurrency bound for multi-symbol batch fetches.
    pub fetch_concurrency: usize,
    /// Projection horizon when the request does not specify one.
    pub default_horizon: u32,
    /// Days of daily history requested from the provider.
    pub history_days: usize,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        Self {
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8000),
            alpha_vantage_api_key: env::var("ALPHA_VANTAGE_API_KEY").ok(),
            history_cache_ttl_secs: env::var("HISTORY_CACHE_TTL_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(300),
            fetch_concurrency: env::var("FETCH_CONCURRENCY")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(8),
            default_horizon: env::var("DEFAULT_HORIZON")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(30),
            history_days: env::var("HISTORY_DAYS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(90),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_manual_values() {
        let config = Config {
            host: "127.0.0.1".to_string(),
            port: 9000,
            alpha_vantage_api_key: Some("demo".to_string()),
            history_cache_ttl_secs: 60,
            fetch_concurrency: 4,
            default_horizon: 14,
            history_days: 120,
        };

        assert_eq!(config.port, 9000);
        assert_eq!(config.default_horizon, 14);
        assert_eq!(config.alpha_vantage_api_key.as_deref(), Some("demo"));
    }

    #[test]
    fn test_config_clone() {
        let config = Config {
            host: "h".to_string(),
            port: 1,
            alpha_vantage_api_key: None,
            history_cache_ttl_secs: 1,
            fetch_concurrency: 1,
            default_horizon: 1,
            history_days: 1,
        };
        let cloned = config.clone();
        assert_eq!(cloned.host, config.host);
        assert_eq!(cloned.port, config.port);
    }
}
