//! Row and filter types.

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::Deserialize;
use sqlx::FromRow;

/// One rental joined with the renting customer.
///
/// `customer_id` and `staff_id` are `smallint` in the rental table.
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct Rental {
    pub rental_id: i32,
    pub rental_date: NaiveDateTime,
    pub inventory_id: i32,
    pub customer_id: i16,
    pub return_date: Option<NaiveDateTime>,
    pub staff_id: i16,
    pub last_update: NaiveDateTime,
    pub first_name: String,
    pub last_name: String,
    pub email: Option<String>,
}

/// A film row.
///
/// The film listing selects only `title` and `rating` (plus the actor names
/// when filtering by actor); the remaining fields keep their defaults.
#[derive(Debug, Clone, Default, PartialEq, FromRow)]
pub struct Film {
    #[sqlx(default)]
    pub film_id: i32,
    pub title: String,
    #[sqlx(default)]
    pub description: Option<String>,
    #[sqlx(default)]
    pub release_year: Option<i32>,
    #[sqlx(default)]
    pub language_id: i16,
    #[sqlx(default)]
    pub original_language_id: Option<i16>,
    #[sqlx(default)]
    pub rental_duration: i16,
    #[sqlx(default)]
    pub rental_rate: Decimal,
    #[sqlx(default)]
    pub length: Option<i16>,
    #[sqlx(default)]
    pub replacement_cost: Decimal,
    pub rating: Option<String>,
    #[sqlx(default)]
    pub first_name: String,
    #[sqlx(default)]
    pub last_name: String,
    #[sqlx(default)]
    pub last_update: Option<NaiveDateTime>,
}

/// A row of the `authors` table.
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct Author {
    pub id: i32,
    pub bio: String,
    pub birth_year: i32,
}

/// Filters for [`list_rentals`](crate::queries::list_rentals).
///
/// `None` leaves the corresponding condition out of the statement.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RentalQueryParam {
    pub district: Option<String>,
    pub postal_code: Option<String>,
    /// Exclusive upper bound on `rental_date`.
    pub rental_date: Option<NaiveDateTime>,
    /// `true` selects returned rentals, `false` outstanding ones.
    pub returned: bool,
}

/// Filters for [`list_films`](crate::queries::list_films).
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FilmQueryParam {
    pub actor_first_name: Option<String>,
    pub actor_last_name: Option<String>,
    /// Accepted MPAA ratings; empty means any rating.
    pub ratings: Vec<String>,
}

impl FilmQueryParam {
    pub fn filters_by_actor(&self) -> bool {
        self.actor_first_name.is_some() || self.actor_last_name.is_some()
    }
}
