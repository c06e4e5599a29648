//! Program configuration.
//!
//! Values come from three layers, lowest precedence first: built-in
//! defaults, an optional TOML file, and environment variables. The database
//! password has no built-in value; supply it through the file, `PGPASSWORD`
//! or `DATABASE_URL`.
//!
//! ```toml
//! [database]
//! host = "db.internal"
//! port = 5432
//! user = "report"
//! dbname = "dvdrental"
//! ssl_mode = "prefer"
//! connect_timeout_secs = 5
//!
//! [rentals]
//! district = "California"
//! postal_code = "52137"
//! rental_date = "2006-01-01T00:00:00"
//! returned = false
//!
//! [films]
//! actor_first_name = "CATE"
//! actor_last_name = "MCQUEEN"
//! ratings = ["G", "PG"]
//!
//! [logging]
//! level = "info"
//! format = "compact"
//! ```
//!
//! A `[rentals]` or `[films]` section replaces the built-in sample filters
//! as a whole; fields it leaves out are unfiltered.

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::Deserialize;
use sqlx::postgres::{PgConnectOptions, PgSslMode};

use crate::error::ConfigError;
use crate::logging::LogConfig;
use crate::models::{FilmQueryParam, RentalQueryParam};

/// Environment variable naming a config file when none is given on the
/// command line.
pub const CONFIG_ENV: &str = "DVDRENTAL_CONFIG";

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub database: DatabaseConfig,
    pub rentals: RentalQueryParam,
    pub films: FilmQueryParam,
    pub logging: LogConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database: DatabaseConfig::default(),
            rentals: RentalQueryParam {
                district: Some("California".to_string()),
                postal_code: Some("52137".to_string()),
                rental_date: Some(chrono::Utc::now().naive_utc()),
                returned: false,
            },
            films: FilmQueryParam {
                actor_first_name: Some("CATE".to_string()),
                actor_last_name: Some("MCQUEEN".to_string()),
                ratings: vec!["G".to_string(), "PG".to_string()],
            },
            logging: LogConfig::default(),
        }
    }
}

impl Config {
    /// Loads the configuration from `path` (or `$DVDRENTAL_CONFIG`) and the
    /// process environment.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        Self::load_with(path, |key| std::env::var(key).ok())
    }

    /// Same as [`load`](Self::load) with an explicit environment lookup.
    pub fn load_with<F>(path: Option<&Path>, env: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let path = path
            .map(Path::to_path_buf)
            .or_else(|| env(CONFIG_ENV).map(PathBuf::from));

        let mut config = match path {
            Some(path) => {
                let shown = path.display().to_string();
                let text = std::fs::read_to_string(&path).map_err(|source| ConfigError::Read {
                    path: shown.clone(),
                    source,
                })?;
                tracing::debug!(path = %shown, "loaded config file");
                Self::from_toml(&text).map_err(|source| ConfigError::Parse {
                    path: shown,
                    source,
                })?
            }
            None => Self::default(),
        };

        config.database.apply_env(env)?;
        Ok(config)
    }

    pub fn from_toml(text: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(text)
    }
}

/// Connection settings.
#[derive(Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DatabaseConfig {
    /// A full `postgres://` URL. When set, the other fields are ignored.
    pub url: Option<String>,
    pub host: String,
    pub port: u16,
    pub user: String,
    pub password: Option<String>,
    pub dbname: String,
    /// libpq `sslmode` value.
    pub ssl_mode: String,
    /// Seconds to wait for the connection before giving up.
    pub connect_timeout_secs: u64,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: None,
            host: "localhost".to_string(),
            port: 5432,
            user: "postgres".to_string(),
            password: None,
            dbname: "postgres".to_string(),
            ssl_mode: "disable".to_string(),
            connect_timeout_secs: 10,
        }
    }
}

impl DatabaseConfig {
    /// Overrides fields from `DATABASE_URL` and the libpq `PG*` variables.
    pub fn apply_env<F>(&mut self, env: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = env("DATABASE_URL") {
            self.url = Some(url);
        }
        if let Some(host) = env("PGHOST") {
            self.host = host;
        }
        if let Some(port) = env("PGPORT") {
            self.port = port.parse().map_err(|e| ConfigError::Invalid {
                field: "PGPORT".to_string(),
                reason: format!("{}: {:?}", e, port),
            })?;
        }
        if let Some(user) = env("PGUSER") {
            self.user = user;
        }
        if let Some(password) = env("PGPASSWORD") {
            self.password = Some(password);
        }
        if let Some(dbname) = env("PGDATABASE") {
            self.dbname = dbname;
        }
        if let Some(ssl_mode) = env("PGSSLMODE") {
            self.ssl_mode = ssl_mode;
        }
        if let Some(timeout) = env("PGCONNECT_TIMEOUT") {
            self.connect_timeout_secs = timeout.parse().map_err(|e| ConfigError::Invalid {
                field: "PGCONNECT_TIMEOUT".to_string(),
                reason: format!("{}: {:?}", e, timeout),
            })?;
        }
        Ok(())
    }

    /// Builds sqlx connect options from these settings.
    pub fn connect_options(&self) -> Result<PgConnectOptions, ConfigError> {
        if let Some(url) = &self.url {
            return PgConnectOptions::from_str(url).map_err(|e| ConfigError::Invalid {
                field: "database.url".to_string(),
                reason: e.to_string(),
            });
        }

        let ssl_mode = PgSslMode::from_str(&self.ssl_mode).map_err(|e| ConfigError::Invalid {
            field: "database.ssl_mode".to_string(),
            reason: e.to_string(),
        })?;

        let mut options = PgConnectOptions::new()
            .host(&self.host)
            .port(self.port)
            .username(&self.user)
            .database(&self.dbname)
            .ssl_mode(ssl_mode);
        if let Some(password) = &self.password {
            options = options.password(password);
        }
        Ok(options)
    }
}

// Never prints the password.
impl fmt::Display for DatabaseConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.url.is_some() {
            return write!(f, "DATABASE_URL");
        }
        write!(
            f,
            "host={} port={} user={} dbname={} sslmode={}",
            self.host, self.port, self.user, self.dbname, self.ssl_mode
        )
    }
}

impl fmt::Debug for DatabaseConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DatabaseConfig")
            .field("url", &self.url.as_ref().map(|_| "<redacted>"))
            .field("host", &self.host)
            .field("port", &self.port)
            .field("user", &self.user)
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .field("dbname", &self.dbname)
            .field("ssl_mode", &self.ssl_mode)
            .field("connect_timeout_secs", &self.connect_timeout_secs)
            .finish()
    }
}
