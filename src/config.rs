use serde::Deserialize;
use std::time::Duration;

/// Application configuration loaded from environment variables
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Base URL of the perfume recommendation backend
    #[serde(default = "default_backend_api_url")]
    pub backend_api_url: String,

    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,

    /// Number of similar perfumes requested when the client gives no limit
    #[serde(default = "default_similar_limit")]
    pub default_similar_limit: usize,

    /// Timeout for calls to the recommendation backend, in seconds
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

fn default_backend_api_url() -> String {
    "http://localhost:8000/api".to_string()
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_similar_limit() -> usize {
    10
}

fn default_request_timeout_secs() -> u64 {
    10
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        envy::from_env::<Config>().map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_from_empty_env() {
        let config: Config = envy::from_iter(Vec::<(String, String)>::new()).unwrap();
        assert_eq!(config.backend_api_url, "http://localhost:8000/api");
        assert_eq!(config.bind_address(), "127.0.0.1:3000");
        assert_eq!(config.default_similar_limit, 10);
        assert_eq!(config.request_timeout(), Duration::from_secs(10));
    }

    #[test]
    fn test_overrides_from_env() {
        let vars = vec![
            ("BACKEND_API_URL".to_string(), "https://api.example.com".to_string()),
            ("PORT".to_string(), "8080".to_string()),
            ("DEFAULT_SIMILAR_LIMIT".to_string(), "25".to_string()),
        ];

        let config: Config = envy::from_iter(vars).unwrap();
        assert_eq!(config.backend_api_url, "https://api.example.com");
        assert_eq!(config.port, 8080);
        assert_eq!(config.default_similar_limit, 25);
    }
}
