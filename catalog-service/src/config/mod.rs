use serde::Deserialize;
use service_core::config as core_config;
use service_core::error::AppError;
use service_core::query::DEFAULT_PAGE_SIZE;
use std::env;

#[derive(Debug, Clone, Deserialize)]
pub struct CatalogConfig {
    #[serde(flatten)]
    pub common: core_config::Config,
    pub store: StoreConfig,
    pub auth: AuthConfig,
    pub pagination: PaginationConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StoreConfig {
    pub backend: StoreBackend,
    pub mongodb_uri: Option<String>,
    pub database: String,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    Memory,
    Mongo,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AuthConfig {
    pub algorithm: JwtAlgorithm,
    /// Shared secret for HS256.
    pub secret: Option<String>,
    /// PEM public key of the identity provider for RS256.
    pub public_key_path: Option<String>,
    pub audience: Option<String>,
    pub issuer: Option<String>,
}

#[derive(Debug, Clone, Copy, Deserialize, PartialEq)]
pub enum JwtAlgorithm {
    HS256,
    RS256,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PaginationConfig {
    pub page_size: i64,
}

impl CatalogConfig {
    pub fn load() -> Result<Self, AppError> {
        // Load common config (handles .env and APP__ prefix)
        let common_config = core_config::Config::load()?;

        let is_prod = env::var("ENVIRONMENT").unwrap_or_else(|_| "dev".to_string()) == "prod";

        let backend: StoreBackend = get_env("STORE_BACKEND", Some("memory"), is_prod)?
            .parse()
            .map_err(|e: String| AppError::ConfigError(anyhow::anyhow!(e)))?;

        let mongodb_uri = match backend {
            StoreBackend::Mongo => Some(get_env("MONGODB_URI", None, is_prod)?),
            StoreBackend::Memory => env::var("MONGODB_URI").ok(),
        };

        let algorithm: JwtAlgorithm = get_env("JWT_ALGORITHM", Some("HS256"), is_prod)?
            .parse()
            .map_err(|e: String| AppError::ConfigError(anyhow::anyhow!(e)))?;

        let (secret, public_key_path) = match algorithm {
            JwtAlgorithm::HS256 => (
                Some(get_env("JWT_SECRET", Some("dev-only-secret"), is_prod)?),
                None,
            ),
            JwtAlgorithm::RS256 => (None, Some(get_env("JWT_PUBLIC_KEY_PATH", None, is_prod)?)),
        };

        let page_size = get_env(
            "PAGE_SIZE",
            Some(&DEFAULT_PAGE_SIZE.to_string()),
            false,
        )?
        .parse::<i64>()
        .map_err(|e| AppError::ConfigError(anyhow::anyhow!("Invalid PAGE_SIZE: {}", e)))?;

        if page_size <= 0 {
            return Err(AppError::ConfigError(anyhow::anyhow!(
                "PAGE_SIZE must be positive, got {}",
                page_size
            )));
        }

        Ok(CatalogConfig {
            common: common_config,
            store: StoreConfig {
                backend,
                mongodb_uri,
                database: get_env("MONGODB_DATABASE", Some("catalog_db"), is_prod)?,
            },
            auth: AuthConfig {
                algorithm,
                secret,
                public_key_path,
                audience: env::var("JWT_AUDIENCE").ok(),
                issuer: env::var("JWT_ISSUER").ok(),
            },
            pagination: PaginationConfig { page_size },
        })
    }
}

impl std::str::FromStr for StoreBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "memory" => Ok(StoreBackend::Memory),
            "mongo" | "mongodb" => Ok(StoreBackend::Mongo),
            _ => Err(format!("Invalid store backend: {}", s)),
        }
    }
}

impl std::str::FromStr for JwtAlgorithm {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "HS256" => Ok(JwtAlgorithm::HS256),
            "RS256" => Ok(JwtAlgorithm::RS256),
            _ => Err(format!("Unsupported JWT algorithm: {}", s)),
        }
    }
}

fn get_env(key: &str, default: Option<&str>, is_prod: bool) -> Result<String, AppError> {
    match env::var(key) {
        Ok(val) => Ok(val),
        Err(_) => {
            if is_prod {
                Err(AppError::ConfigError(anyhow::anyhow!(
                    "{} is required in production but not set",
                    key
                )))
            } else if let Some(def) = default {
                Ok(def.to_string())
            } else {
                Err(AppError::ConfigError(anyhow::anyhow!(
                    "{} is required but not set",
                    key
                )))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backend_parsing() {
        assert_eq!("Memory".parse::<StoreBackend>(), Ok(StoreBackend::Memory));
        assert_eq!("mongodb".parse::<StoreBackend>(), Ok(StoreBackend::Mongo));
        assert!("sqlite".parse::<StoreBackend>().is_err());
    }

    #[test]
    fn test_algorithm_parsing() {
        assert_eq!("rs256".parse::<JwtAlgorithm>(), Ok(JwtAlgorithm::RS256));
        assert!("none".parse::<JwtAlgorithm>().is_err());
    }
}
