//! Filtered rental and film reports over the PostgreSQL `dvdrental` sample
//! schema.
//!
//! Listers take a parameter struct of optional filters, build a SELECT with
//! only the conditions that are set, run it through sqlx and map the rows
//! into typed records. The [`table`] module renders the records as aligned
//! text tables.
//!
//! ```ignore
//! use dvdrental_report::{db, queries, table, FilmQueryParam};
//!
//! let pool = db::connect(&config.database).await?;
//! let films = queries::list_films(&pool, &FilmQueryParam {
//!     ratings: vec!["G".into(), "PG".into()],
//!     ..Default::default()
//! }).await?;
//! table::print_films(&films)?;
//! pool.close().await;
//! ```

pub mod bind;
pub mod builder;
pub mod config;
pub mod db;
pub mod error;
pub mod logging;
pub mod models;
pub mod queries;
pub mod report;
pub mod table;

pub use bind::{BindProxy, BindValue};
pub use builder::{BuildError, Order, SelectBuilder};
pub use config::{Config, DatabaseConfig};
pub use error::{ConfigError, Error, Result};
pub use models::{Author, Film, FilmQueryParam, Rental, RentalQueryParam};
pub use report::{parse_args, run, ReportMode};
