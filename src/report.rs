//! Report entry logic.

use std::fmt;
use std::io::Write;
use std::path::PathBuf;
use std::str::FromStr;

use sqlx::PgPool;

use crate::config::Config;
use crate::db::with_pool;
use crate::error::{ConfigError, Result};
use crate::queries::{list_authors, list_films, list_rentals};
use crate::table::{print_authors, print_films, print_rentals};

/// Line printed between the rental and film tables.
pub const DIVIDER: &str =
    "---------------------------------------------------------------------------------------------------------";

/// Which reports to run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ReportMode {
    /// Rentals table, divider, films table.
    #[default]
    RentalsAndFilms,
    /// All authors ordered by id.
    Authors,
}

impl FromStr for ReportMode {
    type Err = ConfigError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "rentals-and-films" => Ok(ReportMode::RentalsAndFilms),
            "authors" => Ok(ReportMode::Authors),
            other => Err(ConfigError::UnknownMode(other.to_string())),
        }
    }
}

impl fmt::Display for ReportMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReportMode::RentalsAndFilms => write!(f, "rentals-and-films"),
            ReportMode::Authors => write!(f, "authors"),
        }
    }
}

/// Reads `[MODE] [CONFIG_PATH]` from the command-line arguments (program
/// name already skipped). Anything after the config path is rejected.
pub fn parse_args(
    args: &[String],
) -> std::result::Result<(ReportMode, Option<PathBuf>), ConfigError> {
    let mode = match args.first() {
        Some(mode) => mode.parse()?,
        None => ReportMode::default(),
    };
    let config_path = args.get(1).map(PathBuf::from);
    if let Some(extra) = args.get(2) {
        return Err(ConfigError::UnexpectedArgument(extra.clone()));
    }
    Ok((mode, config_path))
}

/// Connects, runs the selected reports, prints them and closes the
/// connection.
pub async fn run(config: &Config, mode: ReportMode) -> Result<()> {
    tracing::info!(%mode, "running report");
    with_pool(&config.database, |pool| async move {
        match mode {
            ReportMode::RentalsAndFilms => rentals_and_films(&pool, config).await,
            ReportMode::Authors => authors(&pool).await,
        }
    })
    .await
}

async fn rentals_and_films(pool: &PgPool, config: &Config) -> Result<()> {
    let rentals = list_rentals(pool, &config.rentals).await?;
    print_rentals(&rentals)?;

    {
        let mut out = std::io::stdout().lock();
        writeln!(out, "{}", DIVIDER)?;
    }

    let films = list_films(pool, &config.films).await?;
    print_films(&films)
}

async fn authors(pool: &PgPool) -> Result<()> {
    let authors = list_authors(pool).await?;
    print_authors(&authors)
}
