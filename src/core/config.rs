use std::env;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct Config {
    pub catalog_api: CatalogApiConfig,
}

/// Remote catalog API configuration (JSON over HTTP, cookie session)
#[derive(Debug, Clone)]
pub struct CatalogApiConfig {
    /// Base URL of the remote catalog API, e.g. "https://api.example.com"
    pub base_url: String,
    /// Per-request timeout
    pub request_timeout: Duration,
}

impl Config {
    pub fn from_env() -> Result<Self, String> {
        // Load .env file if exists, ignore if not found (optional for production)
        if let Err(e) = dotenvy::dotenv() {
            if !e.to_string().contains("not found") {
                eprintln!("Warning: Error loading .env file: {}", e);
            }
        }

        Ok(Config {
            catalog_api: CatalogApiConfig::from_env()?,
        })
    }
}

impl CatalogApiConfig {
    const DEFAULT_TIMEOUT_SECS: u64 = 15;

    pub fn from_env() -> Result<Self, String> {
        let base_url =
            env::var("CATALOG_API_URL").map_err(|_| "CATALOG_API_URL must be set".to_string())?;
        // Trailing slash would double up when joining paths
        let base_url = base_url.trim_end_matches('/').to_string();

        let timeout_secs = env::var("CATALOG_API_TIMEOUT_SECS")
            .unwrap_or_else(|_| Self::DEFAULT_TIMEOUT_SECS.to_string())
            .parse::<u64>()
            .map_err(|e| format!("Invalid CATALOG_API_TIMEOUT_SECS: {}", e))?;

        Ok(CatalogApiConfig {
            base_url,
            request_timeout: Duration::from_secs(timeout_secs),
        })
    }
}
