//! Centralized configuration (environment variables + defaults).
//!
//! Values are read once at startup by the binaries. `.env` files are honoured through
//! `dotenv`, real environment variables win over the file.

use anyhow::{anyhow, Context, Result};
use std::str::FromStr;
use std::time::Duration;

const DEFAULT_DB_PORT: u16 = 5432;
const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 30;
const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 3000;

/// Connection parameters for the relational database.
#[derive(Debug, Clone)]
pub struct DatabaseSettings {
    pub host: String,
    pub port: u16,
    pub user: String,
    pub password: String,
    pub name: String,
    /// Upper bound on the initial connection attempt and on each wait for the shared connection.
    pub connect_timeout: Duration,
    /// Create the tables at startup (`CREATE TABLE IF NOT EXISTS`).
    pub bootstrap_schema: bool,
}

/// Everything the API server needs to start.
#[derive(Debug, Clone)]
pub struct Settings {
    pub database: DatabaseSettings,
    pub host: String,
    pub port: u16,
}

impl Settings {
    /// Loads `.env` (if present) and then reads the process environment.
    pub fn from_env() -> Result<Self> {
        dotenv::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds settings from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let database = DatabaseSettings {
            host: required(&lookup, "DB_HOST")?,
            port: parsed_or(&lookup, "DB_PORT", DEFAULT_DB_PORT)?,
            user: required(&lookup, "DB_USER")?,
            password: lookup("DB_PASSWORD").unwrap_or_default(),
            name: required(&lookup, "DB_NAME")?,
            connect_timeout: Duration::from_secs(parsed_or(
                &lookup,
                "DB_CONNECT_TIMEOUT_SECS",
                DEFAULT_CONNECT_TIMEOUT_SECS,
            )?),
            bootstrap_schema: flag(&lookup, "DB_BOOTSTRAP_SCHEMA")?,
        };

        Ok(Self {
            database,
            host: lookup("HOST").unwrap_or_else(|| DEFAULT_HOST.to_string()),
            port: parsed_or(&lookup, "PORT", DEFAULT_PORT)?,
        })
    }

    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn required<F>(lookup: &F, key: &str) -> Result<String>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        Some(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(anyhow!("{} must be set", key)),
    }
}

fn parsed_or<F, T>(lookup: &F, key: &str, default: T) -> Result<T>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match lookup(key) {
        Some(v) if !v.trim().is_empty() => v
            .trim()
            .parse::<T>()
            .with_context(|| format!("{} has an invalid value: {:?}", key, v)),
        _ => Ok(default),
    }
}

fn flag<F>(lookup: &F, key: &str) -> Result<bool>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(key).as_deref().map(str::trim) {
        None | Some("") => Ok(false),
        Some("1") | Some("true") | Some("TRUE") | Some("yes") => Ok(true),
        Some("0") | Some("false") | Some("FALSE") | Some("no") => Ok(false),
        Some(other) => Err(anyhow!("{} must be a boolean, got {:?}", key, other)),
    }
}
