//! Report queries.
//!
//! Each lister turns its parameter struct into a [`SelectBuilder`], appending
//! only the conditions whose filter is set, then runs the statement and maps
//! the rows. Listers accept any PostgreSQL executor: a `&PgPool`, a
//! `&mut PgConnection` or an open transaction.

use futures::TryStreamExt;
use sqlx::postgres::{PgExecutor, PgRow};
use sqlx::FromRow;

use crate::bind::{bind_all, BindValue};
use crate::builder::{Order, SelectBuilder};
use crate::error::{Error, Result};
use crate::models::{Author, Film, FilmQueryParam, Rental, RentalQueryParam};

/// Hard cap on the rows a lister returns.
pub const ROW_LIMIT: u64 = 100;

const AUTHOR_COLUMNS: &[&str] = &["id", "bio", "birth_year"];

/// Statement behind [`list_rentals`].
pub fn rentals_query(params: &RentalQueryParam) -> SelectBuilder {
    let mut query = SelectBuilder::new(&[
        "r.rental_id",
        "r.rental_date",
        "r.inventory_id",
        "r.customer_id",
        "r.return_date",
        "r.staff_id",
        "r.last_update",
        "c.first_name",
        "c.last_name",
        "c.email",
    ])
    .from("customer AS c")
    .join("rental AS r", "c.customer_id = r.customer_id")
    .join("address AS a", "c.address_id = a.address_id")
    .join("city AS ct", "a.city_id = ct.city_id");

    if let Some(district) = &params.district {
        query = query.where_eq("a.district", district);
    }
    if let Some(postal_code) = &params.postal_code {
        query = query.where_eq("a.postal_code", postal_code);
    }
    if let Some(rental_date) = &params.rental_date {
        query = query.where_lt("r.rental_date", rental_date);
    }
    query = if params.returned {
        query.where_not_null("r.return_date")
    } else {
        query.where_null("r.return_date")
    };

    query.order_by("r.rental_date", Order::Desc).limit(ROW_LIMIT)
}

/// Lists up to [`ROW_LIMIT`] rentals, newest first.
pub async fn list_rentals<'c, E>(executor: E, params: &RentalQueryParam) -> Result<Vec<Rental>>
where
    E: PgExecutor<'c>,
{
    let (sql, args) = rentals_query(params).to_sql()?;
    let rentals = fetch_all(executor, &sql, args).await?;
    tracing::info!(rows = rentals.len(), "listed rentals");
    Ok(rentals)
}

/// Statement behind [`list_films`].
///
/// The actor tables are joined only when an actor name is part of the
/// filter.
pub fn films_query(params: &FilmQueryParam) -> SelectBuilder {
    let mut query = SelectBuilder::new(&["f.title"])
        .column_cast("f.rating", "TEXT", "rating")
        .from("film AS f");

    if params.filters_by_actor() {
        query = query
            .columns(&["a.first_name", "a.last_name"])
            .join("film_actor AS fa", "f.film_id = fa.film_id")
            .join("actor AS a", "fa.actor_id = a.actor_id");
    }
    if let Some(first_name) = &params.actor_first_name {
        query = query.where_eq("a.first_name", first_name);
    }
    if let Some(last_name) = &params.actor_last_name {
        query = query.where_eq("a.last_name", last_name);
    }
    // `rating` is the mpaa_rating enum; compare its text form.
    if !params.ratings.is_empty() {
        query = query.where_in("f.rating::TEXT", &params.ratings);
    }

    query.limit(ROW_LIMIT)
}

/// Lists up to [`ROW_LIMIT`] films with their rating.
pub async fn list_films<'c, E>(executor: E, params: &FilmQueryParam) -> Result<Vec<Film>>
where
    E: PgExecutor<'c>,
{
    let (sql, args) = films_query(params).to_sql()?;
    let films = fetch_all(executor, &sql, args).await?;
    tracing::info!(rows = films.len(), "listed films");
    Ok(films)
}

/// Fetches one author by id.
///
/// Returns [`Error::NotFound`] when no row has that id.
pub async fn get_author<'c, E>(executor: E, id: i32) -> Result<Author>
where
    E: PgExecutor<'c>,
{
    let (sql, args) = SelectBuilder::new(AUTHOR_COLUMNS)
        .from("authors")
        .where_eq("id", id)
        .to_sql()?;
    tracing::debug!(sql = %sql, args = args.len(), "executing");

    bind_all(sqlx::query_as::<_, Author>(&sql), args)
        .fetch_optional(executor)
        .await
        .map_err(Error::from_query)?
        .ok_or(Error::NotFound {
            entity: "author",
            id: id.into(),
        })
}

/// Lists every author ordered by id. Empty when the table is empty.
pub async fn list_authors<'c, E>(executor: E) -> Result<Vec<Author>>
where
    E: PgExecutor<'c>,
{
    let (sql, args) = SelectBuilder::new(AUTHOR_COLUMNS)
        .from("authors")
        .order_by("id", Order::Asc)
        .to_sql()?;
    tracing::debug!(sql = %sql, args = args.len(), "executing");

    bind_all(sqlx::query_as::<_, Author>(&sql), args)
        .fetch(executor)
        .try_collect::<Vec<Author>>()
        .await
        .map_err(Error::from_query)
}

async fn fetch_all<'c, E, O>(executor: E, sql: &str, args: Vec<BindValue>) -> Result<Vec<O>>
where
    E: PgExecutor<'c>,
    O: for<'r> FromRow<'r, PgRow> + Send + Unpin + 'static,
{
    tracing::debug!(sql = %sql, args = args.len(), "executing");
    bind_all(sqlx::query_as::<_, O>(sql), args)
        .fetch_all(executor)
        .await
        .map_err(Error::from_query)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    const RENTAL_SELECT: &str = "SELECT r.rental_id, r.rental_date, r.inventory_id, \
        r.customer_id, r.return_date, r.staff_id, r.last_update, c.first_name, \
        c.last_name, c.email FROM customer AS c \
        JOIN rental AS r ON c.customer_id = r.customer_id \
        JOIN address AS a ON c.address_id = a.address_id \
        JOIN city AS ct ON a.city_id = ct.city_id";

    #[test]
    fn test_rentals_without_filters() {
        let (sql, args) = rentals_query(&RentalQueryParam::default()).to_sql().unwrap();
        assert_eq!(
            sql,
            format!(
                "{} WHERE r.return_date IS NULL ORDER BY r.rental_date DESC LIMIT 100",
                RENTAL_SELECT
            )
        );
        assert!(args.is_empty());
    }

    #[test]
    fn test_rentals_returned_flag() {
        let params = RentalQueryParam {
            returned: true,
            ..Default::default()
        };
        let (sql, _) = rentals_query(&params).to_sql().unwrap();
        assert!(sql.contains("WHERE r.return_date IS NOT NULL ORDER BY"));
        assert!(!sql.contains("r.return_date IS NULL"));
    }

    #[test]
    fn test_rentals_all_filters() {
        let cutoff = NaiveDate::from_ymd_opt(2006, 1, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        let params = RentalQueryParam {
            district: Some("California".to_string()),
            postal_code: Some("52137".to_string()),
            rental_date: Some(cutoff),
            returned: false,
        };
        let (sql, args) = rentals_query(&params).to_sql().unwrap();
        assert_eq!(
            sql,
            format!(
                "{} WHERE a.district = $1 AND a.postal_code = $2 AND r.rental_date < $3 \
                 AND r.return_date IS NULL ORDER BY r.rental_date DESC LIMIT 100",
                RENTAL_SELECT
            )
        );
        assert_eq!(
            args,
            vec![
                BindValue::String("California".to_string()),
                BindValue::String("52137".to_string()),
                BindValue::NaiveDateTime(cutoff),
            ]
        );
    }

    #[test]
    fn test_rentals_skip_absent_filters() {
        let params = RentalQueryParam {
            postal_code: Some("52137".to_string()),
            ..Default::default()
        };
        let (sql, args) = rentals_query(&params).to_sql().unwrap();
        assert!(sql.contains("WHERE a.postal_code = $1 AND r.return_date IS NULL"));
        assert!(!sql.contains("a.district"));
        assert_eq!(args.len(), 1);
    }

    #[test]
    fn test_films_rating_only_has_no_actor_join() {
        let params = FilmQueryParam {
            ratings: vec!["G".to_string(), "PG".to_string()],
            ..Default::default()
        };
        let query = films_query(&params);
        assert_eq!(query.join_count(), 0);
        let (sql, args) = query.to_sql().unwrap();
        assert_eq!(
            sql,
            "SELECT f.title, f.rating::TEXT AS rating FROM film AS f \
             WHERE f.rating::TEXT IN ($1, $2) LIMIT 100"
        );
        assert_eq!(args.len(), 2);
    }

    #[test]
    fn test_films_unfiltered() {
        let (sql, args) = films_query(&FilmQueryParam::default()).to_sql().unwrap();
        assert_eq!(sql, "SELECT f.title, f.rating::TEXT AS rating FROM film AS f LIMIT 100");
        assert!(args.is_empty());
    }

    #[test]
    fn test_films_by_actor_and_rating() {
        let params = FilmQueryParam {
            actor_first_name: Some("CATE".to_string()),
            actor_last_name: Some("MCQUEEN".to_string()),
            ratings: vec!["G".to_string(), "PG".to_string()],
        };
        let (sql, args) = films_query(&params).to_sql().unwrap();
        assert_eq!(
            sql,
            "SELECT f.title, f.rating::TEXT AS rating, a.first_name, a.last_name FROM film AS f \
             JOIN film_actor AS fa ON f.film_id = fa.film_id \
             JOIN actor AS a ON fa.actor_id = a.actor_id \
             WHERE a.first_name = $1 AND a.last_name = $2 AND f.rating::TEXT IN ($3, $4) \
             LIMIT 100"
        );
        assert_eq!(
            args,
            vec![
                BindValue::String("CATE".to_string()),
                BindValue::String("MCQUEEN".to_string()),
                BindValue::String("G".to_string()),
                BindValue::String("PG".to_string()),
            ]
        );
    }

    #[test]
    fn test_films_last_name_alone_still_joins() {
        let params = FilmQueryParam {
            actor_last_name: Some("MCQUEEN".to_string()),
            ..Default::default()
        };
        let query = films_query(&params);
        assert_eq!(query.join_count(), 2);
        let (sql, _) = query.to_sql().unwrap();
        assert!(sql.ends_with("WHERE a.last_name = $1 LIMIT 100"));
    }
}
