use dotenv::dotenv;
use once_cell::sync::Lazy;
use std::env;
use std::fmt;

pub struct Config {
    pub port: u16,
    /// Base URL of the bills API. Unset means the in-memory store is used.
    pub api_url: Option<String>,
    pub seed_file: Option<String>,
    pub log_level: String,
    pub jwt_secret: String,
    pub api_timeout_seconds: u64,
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("port", &self.port)
            .field("api_url", &self.api_url)
            .field("seed_file", &self.seed_file)
            .field("log_level", &self.log_level)
            .field("jwt_secret", &"<redacted>")
            .field("api_timeout_seconds", &self.api_timeout_seconds)
            .finish()
    }
}

impl Config {
    fn from_env() -> Self {
        dotenv().ok();

        Self {
            port: env::var("PORT").ok().and_then(|v| v.parse().ok()).unwrap_or(3000),
            api_url: env::var("BILLED_API_URL").ok().filter(|v| !v.trim().is_empty()),
            seed_file: env::var("BILLED_SEED_FILE").ok().filter(|v| !v.trim().is_empty()),
            log_level: env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),
            jwt_secret: env::var("JWT_SECRET").unwrap_or_else(|_| "secret".to_string()), // Use a secure secret in production
            api_timeout_seconds: env::var("API_TIMEOUT_SECONDS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(30),
        }
    }
}

pub static CONFIG: Lazy<Config> = Lazy::new(Config::from_env);
