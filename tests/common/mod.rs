// Shared setup for the database tests.
//
// Each test gets its own single-connection pool and builds a small copy of the
// dvdrental tables as TEMP tables on that connection, so the tests run against
// any PostgreSQL server and never touch real data. Temp tables shadow any
// permanent table of the same name for the lifetime of the connection.
// Column types follow the dvdrental dump, including the smallint rental
// columns and the `mpaa_rating` enum, which lives in the session's temp schema.

#![allow(dead_code)]

use sqlx::postgres::{PgPool, PgPoolOptions};

const SCHEMA: &[&str] = &[
    "CREATE TYPE pg_temp.mpaa_rating AS ENUM ('G', 'PG', 'PG-13', 'R', 'NC-17')",
    "CREATE TEMP TABLE city (city_id INT4 PRIMARY KEY, city TEXT NOT NULL)",
    "CREATE TEMP TABLE address (
        address_id INT4 PRIMARY KEY,
        district TEXT NOT NULL,
        city_id INT4 NOT NULL,
        postal_code VARCHAR(10)
    )",
    "CREATE TEMP TABLE customer (
        customer_id INT4 PRIMARY KEY,
        first_name TEXT NOT NULL,
        last_name TEXT NOT NULL,
        email TEXT,
        address_id INT4 NOT NULL
    )",
    "CREATE TEMP TABLE rental (
        rental_id INT4 PRIMARY KEY,
        rental_date TIMESTAMP NOT NULL,
        inventory_id INT4 NOT NULL,
        customer_id SMALLINT NOT NULL,
        return_date TIMESTAMP,
        staff_id SMALLINT NOT NULL,
        last_update TIMESTAMP NOT NULL DEFAULT LOCALTIMESTAMP
    )",
    "CREATE TEMP TABLE film (
        film_id INT4 PRIMARY KEY,
        title TEXT NOT NULL,
        rating pg_temp.mpaa_rating
    )",
    "CREATE TEMP TABLE actor (
        actor_id INT4 PRIMARY KEY,
        first_name TEXT NOT NULL,
        last_name TEXT NOT NULL
    )",
    "CREATE TEMP TABLE film_actor (actor_id INT4 NOT NULL, film_id INT4 NOT NULL)",
    "CREATE TEMP TABLE authors (id INT4 PRIMARY KEY, bio TEXT NOT NULL, birth_year INT4 NOT NULL)",
];

const SEED: &[&str] = &[
    "INSERT INTO city VALUES (1, 'Sacramento'), (2, 'Toronto')",
    "INSERT INTO address VALUES
        (1, 'California', 1, '52137'),
        (2, 'California', 1, '90210'),
        (3, 'Ontario', 2, 'M5V')",
    "INSERT INTO customer VALUES
        (1, 'Philip', 'Causey', 'philip.causey@sakilacustomer.org', 1),
        (2, 'Jane', 'Roe', NULL, 1),
        (3, 'Mark', 'Doe', 'mark.doe@sakilacustomer.org', 2),
        (4, 'Ann', 'Lee', 'ann.lee@sakilacustomer.org', 3)",
    // 400 rentals one hour apart, spread round-robin over the four
    // customers; every third one is still outstanding.
    "INSERT INTO rental (rental_id, rental_date, inventory_id, customer_id, return_date, staff_id)
     SELECT g,
            TIMESTAMP '2005-05-24 00:00:00' + g * INTERVAL '1 hour',
            g,
            (((g - 1) % 4) + 1)::SMALLINT,
            CASE WHEN g % 3 = 0 THEN NULL
                 ELSE TIMESTAMP '2005-05-24 00:00:00' + g * INTERVAL '1 hour' + INTERVAL '3 days'
            END,
            (1 + g % 2)::SMALLINT
     FROM generate_series(1, 400) AS g",
    "INSERT INTO film VALUES
        (1, 'ACADEMY DINOSAUR', 'PG'),
        (2, 'ACE GOLDFINGER', 'G'),
        (3, 'ADAPTATION HOLES', 'NC-17'),
        (4, 'AFFAIR PREJUDICE', 'G'),
        (5, 'AGENT TRUMAN', 'PG'),
        (6, 'AIRPLANE SIERRA', 'PG-13'),
        (7, 'ALABAMA DEVIL', NULL)",
    "INSERT INTO film SELECT g, 'FILLER ' || g, 'R'::pg_temp.mpaa_rating FROM generate_series(100, 249) AS g",
    "INSERT INTO actor VALUES (1, 'CATE', 'MCQUEEN'), (2, 'CATE', 'HARRIS'), (3, 'NICK', 'WAHLBERG')",
    "INSERT INTO film_actor VALUES (1, 1), (1, 2), (1, 3), (1, 6), (2, 4), (3, 5), (3, 1)",
    "INSERT INTO authors VALUES
        (3, 'Wrote about databases.', 1961),
        (1, 'Wrote about compilers.', 1942),
        (2, 'Wrote about networks.', 1955)",
];

/// Number of seeded films.
pub const FILM_COUNT: usize = 157;

/// Number of seeded rentals with no return date.
pub const OUTSTANDING_RENTALS: usize = 133;

/// Connection URL for the test database, if one is configured.
pub fn database_url() -> Option<String> {
    match std::env::var("DATABASE_URL") {
        Ok(url) => Some(url),
        Err(_) => {
            eprintln!("DATABASE_URL is not set; skipping database test");
            None
        }
    }
}

/// A single-connection pool holding freshly seeded temp tables, or `None`
/// when no database is configured.
pub async fn seeded_pool() -> Option<PgPool> {
    let url = database_url()?;
    let pool = PgPoolOptions::new()
        .max_connections(1)
        .connect(&url)
        .await
        .expect("Failed to connect to database");

    for statement in SCHEMA.iter().chain(SEED) {
        sqlx::query(statement)
            .execute(&pool)
            .await
            .unwrap_or_else(|e| panic!("Failed to run {:?}: {}", statement, e));
    }
    Some(pool)
}
