//! Application configuration loaded from environment variables.

use std::env;

use quickblog_infra::Argon2Config;

#[cfg(feature = "redis")]
use quickblog_infra::RedisConfig;

/// Origins the browser client is served from during development.
const DEFAULT_CORS_ORIGINS: &[&str] = &[
    "http://localhost:8000",
    "http://127.0.0.1:5501",
    "http://localhost:5501",
];

/// Application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    /// Base of the shareable article links handed back on publish.
    pub public_base_url: String,
    /// Where the browser client lives; article pages link back to it.
    pub frontend_url: String,
    pub cors_allowed_origins: Vec<String>,
    pub argon2: Argon2Config,
    #[cfg(feature = "redis")]
    pub redis: RedisConfig,
}

impl AppConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Build the configuration from any variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let host = lookup("HOST").unwrap_or_else(|| "127.0.0.1".to_string());
        let port = lookup("PORT")
            .and_then(|p| p.parse().ok())
            .unwrap_or(3001);

        let public_base_url = lookup("PUBLIC_BASE_URL")
            .map(|url| url.trim_end_matches('/').to_string())
            .unwrap_or_else(|| format!("http://localhost:{port}"));

        let frontend_url = lookup("FRONTEND_URL")
            .map(|url| url.trim_end_matches('/').to_string())
            .unwrap_or_else(|| "http://localhost:8000".to_string());

        let cors_allowed_origins = lookup("CORS_ALLOWED_ORIGINS")
            .map(|raw| {
                raw.split(',')
                    .map(str::trim)
                    .filter(|origin| !origin.is_empty())
                    .map(String::from)
                    .collect()
            })
            .unwrap_or_else(|| DEFAULT_CORS_ORIGINS.iter().map(|o| o.to_string()).collect());

        let argon2 = {
            let defaults = Argon2Config::default();
            let read = |name: &str, fallback: u32| {
                lookup(name).and_then(|s| s.parse().ok()).unwrap_or(fallback)
            };
            Argon2Config {
                memory_kib: read("ARGON2_MEMORY_KIB", defaults.memory_kib),
                iterations: read("ARGON2_ITERATIONS", defaults.iterations),
                parallelism: read("ARGON2_PARALLELISM", defaults.parallelism),
            }
        };

        Self {
            host,
            port,
            public_base_url,
            frontend_url,
            cors_allowed_origins,
            argon2,
            #[cfg(feature = "redis")]
            redis: RedisConfig::from_env(),
        }
    }

    /// Public link for a post slug.
    pub fn article_url(&self, slug: &str) -> String {
        format!("{}/article/{}", self.public_base_url, slug)
    }
}
