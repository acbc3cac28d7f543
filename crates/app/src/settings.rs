//! Application settings.
//!
//! Settings are read from an optional `shadowbudget.toml` in the working
//! directory, with `SHADOWBUDGET__*` environment variables taking precedence
//! (e.g. `SHADOWBUDGET__SERVER__PORT=8070`).

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

/// Database selector for the server.
#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Database {
    /// In-memory sqlite, lost on shutdown.
    Memory,
    /// Sqlite file at the given path, created if missing.
    Sqlite(String),
}

#[derive(Clone, Debug, Deserialize)]
pub struct App {
    pub level: String,
}

#[derive(Clone, Debug, Deserialize)]
pub struct Server {
    pub bind: Option<String>,
    pub port: u16,
    pub database: Database,
}

#[derive(Clone, Debug, Deserialize)]
pub struct Settings {
    pub app: App,
    pub server: Server,
}

impl Settings {
    pub fn new() -> Result<Self, ConfigError> {
        Config::builder()
            .set_default("app.level", "info")?
            .set_default("server.port", 3000)?
            .set_default("server.database", "memory")?
            .add_source(File::with_name("shadowbudget").required(false))
            .add_source(Environment::with_prefix("SHADOWBUDGET").separator("__"))
            .build()?
            .try_deserialize()
    }
}
