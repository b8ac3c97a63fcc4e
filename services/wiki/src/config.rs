use std::path::PathBuf;

use anyhow::{Context as _, bail};

use delight_core::tracing::AuditLogConfig;
use delight_domain::pagination::DEFAULT_PER_PAGE;

/// Wiki service configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct WikiConfig {
    /// Database URL (default `sqlite://wiki.db?mode=rwc`). Env var: `DATABASE_URL`.
    pub database_url: String,
    /// TCP port for the HTTP server (default 5000). Env var: `WIKI_PORT`.
    pub wiki_port: u16,
    /// HS256 secret for session tokens. Env var: `JWT_SECRET`.
    pub jwt_secret: String,
    /// Env var: `COOKIE_DOMAIN`. Host-only cookie when unset.
    pub cookie_domain: Option<String>,
    /// Env var: `COOKIE_SECURE` (default false).
    pub cookie_secure: bool,
    /// Catalog page size (default 12). Env var: `ITEMS_PER_PAGE`.
    pub items_per_page: u32,
    /// `LOG_DIR`, `LOG_FILE`, `LOG_MAX_BYTES`, `LOG_BACKUP_COUNT`.
    pub audit_log: AuditLogConfig,
    /// Run pending migrations at startup (default true). Env var: `AUTO_MIGRATE`.
    pub auto_migrate: bool,
}

pub const DEFAULT_DATABASE_URL: &str = "sqlite://wiki.db?mode=rwc";
const DEFAULT_PORT: u16 = 5000;
const DEFAULT_LOG_MAX_BYTES: u64 = 10_240_000;
const DEFAULT_LOG_BACKUP_COUNT: usize = 10;

impl WikiConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the configuration from an arbitrary key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let jwt_secret = var("JWT_SECRET").context("JWT_SECRET must be set")?;
        let items_per_page = parse_or(var("ITEMS_PER_PAGE"), "ITEMS_PER_PAGE", DEFAULT_PER_PAGE)?;
        if items_per_page == 0 {
            bail!("ITEMS_PER_PAGE must be positive");
        }

        Ok(Self {
            database_url: var("DATABASE_URL").unwrap_or_else(|| DEFAULT_DATABASE_URL.to_owned()),
            wiki_port: parse_or(var("WIKI_PORT"), "WIKI_PORT", DEFAULT_PORT)?,
            jwt_secret,
            cookie_domain: var("COOKIE_DOMAIN"),
            cookie_secure: parse_flag(var("COOKIE_SECURE"), "COOKIE_SECURE", false)?,
            items_per_page,
            audit_log: AuditLogConfig {
                dir: PathBuf::from(var("LOG_DIR").unwrap_or_else(|| "logs".to_owned())),
                file: var("LOG_FILE").unwrap_or_else(|| "app.log".to_owned()),
                max_bytes: parse_or(var("LOG_MAX_BYTES"), "LOG_MAX_BYTES", DEFAULT_LOG_MAX_BYTES)?,
                backup_count: parse_or(
                    var("LOG_BACKUP_COUNT"),
                    "LOG_BACKUP_COUNT",
                    DEFAULT_LOG_BACKUP_COUNT,
                )?,
            },
            auto_migrate: parse_flag(var("AUTO_MIGRATE"), "AUTO_MIGRATE", true)?,
        })
    }
}

fn parse_or<T>(value: Option<String>, key: &str, default: T) -> anyhow::Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match value {
        Some(raw) => raw
            .trim()
            .parse()
            .with_context(|| format!("{key} has an invalid value: {raw:?}")),
        None => Ok(default),
    }
}

fn parse_flag(value: Option<String>, key: &str, default: bool) -> anyhow::Result<bool> {
    let Some(raw) = value else {
        return Ok(default);
    };
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => bail!("{key} has an invalid value: {raw:?}"),
    }
}
