use anyhow::{Context, Result};
use serde::Deserialize;
use std::env;
use std::str::FromStr;

pub const DEFAULT_GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1";
pub const DEFAULT_GEMINI_MODEL: &str = "gemini-1.5-flash";

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub llm: LLMConfig,
    pub cors: CorsConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub port: u16,
    pub host: String,
    pub max_upload_bytes: usize,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
}

#[derive(Clone, Deserialize)]
pub struct LLMConfig {
    pub gemini_api_key: String,
    pub gemini_api_base: String,
    pub gemini_model: String,
}

// Keeps the key out of startup logs
impl std::fmt::Debug for LLMConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LLMConfig")
            .field("gemini_api_key", &"<redacted>")
            .field("gemini_api_base", &self.gemini_api_base)
            .field("gemini_model", &self.gemini_model)
            .finish()
    }
}

/// Fixed cross-origin policy stamped on every response.
#[derive(Debug, Clone, Deserialize)]
pub struct CorsConfig {
    pub allowed_origin: String,
    pub allowed_methods: Vec<String>,
    pub allowed_headers: Vec<String>,
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            allowed_origin: "https://pdf-qan-ui.vercel.app".to_string(),
            allowed_methods: ["GET", "POST", "PUT", "DELETE"]
                .iter()
                .map(|m| m.to_string())
                .collect(),
            allowed_headers: vec!["Content-Type".to_string()],
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build the configuration from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var_or = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        Ok(Self {
            server: ServerConfig {
                port: parse_var(&lookup, "PORT", "5000")?,
                host: var_or("HOST", "0.0.0.0"),
                max_upload_bytes: parse_var(&lookup, "MAX_UPLOAD_BYTES", "52428800")?,
            },
            database: DatabaseConfig {
                url: database_url(&lookup)?,
                max_connections: parse_var(&lookup, "DB_MAX_CONNECTIONS", "10")?,
                min_connections: parse_var(&lookup, "DB_MIN_CONNECTIONS", "1")?,
            },
            llm: LLMConfig {
                gemini_api_key: lookup("GEMINI_API_KEY").unwrap_or_default(),
                gemini_api_base: var_or("GEMINI_API_BASE", DEFAULT_GEMINI_API_BASE),
                gemini_model: var_or("GEMINI_MODEL", DEFAULT_GEMINI_MODEL),
            },
            cors: CorsConfig::default(),
        })
    }
}

/// `DATABASE_URL`, or the older `MONGO_URI` name when only that one is set.
fn database_url<F>(lookup: &F) -> Result<String>
where
    F: Fn(&str) -> Option<String>,
{
    let non_empty = |key: &str| lookup(key).filter(|url| !url.trim().is_empty());

    if let Some(url) = non_empty("DATABASE_URL") {
        return Ok(url);
    }

    match non_empty("MONGO_URI") {
        Some(url) if url.starts_with("mongodb") => anyhow::bail!(
            "MONGO_URI points at MongoDB, but documents are stored in PostgreSQL; \
             set DATABASE_URL to a postgres:// connection string"
        ),
        Some(url) => Ok(url),
        None => anyhow::bail!("DATABASE_URL must be set"),
    }
}

fn parse_var<F, T>(lookup: &F, key: &str, default: &str) -> Result<T>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    let raw = lookup(key).unwrap_or_else(|| default.to_string());
    raw.parse()
        .with_context(|| format!("{key} has an invalid value: {raw:?}"))
}
