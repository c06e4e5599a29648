// Bind arguments for generated statements
//
// The builder collects filter values as `BindValue`s in placeholder order and
// applies them to a sqlx query once the SQL text is final.

use sqlx::postgres::{PgArguments, Postgres};
use sqlx::query::QueryAs;

/// A value bound to one `$n` placeholder.
///
/// Values keep their native type so PostgreSQL can compare them against the
/// column without implicit casts (a `timestamp` column needs a timestamp
/// argument, not its string form).
#[derive(Debug, Clone, PartialEq)]
pub enum BindValue {
    String(String),
    I32(i32),
    /// `timestamp without time zone`, the type of every dvdrental date column
    NaiveDateTime(chrono::NaiveDateTime),
}

/// Trait for types that can be turned into a [`BindValue`].
///
/// Implemented for the scalar types the report filters use. Implement it for
/// a custom type to pass it to the `where_*` methods of the builder.
///
/// # Example
///
/// ```ignore
/// struct PostalCode(u32);
///
/// impl BindProxy for PostalCode {
///     fn into_bind_value(self) -> BindValue {
///         BindValue::String(format!("{:05}", self.0))
///     }
/// }
/// ```
pub trait BindProxy {
    fn into_bind_value(self) -> BindValue;
}

impl BindProxy for BindValue {
    fn into_bind_value(self) -> BindValue {
        self
    }
}

impl BindProxy for String {
    fn into_bind_value(self) -> BindValue {
        BindValue::String(self)
    }
}

impl<'a> BindProxy for &'a str {
    fn into_bind_value(self) -> BindValue {
        BindValue::String(self.to_string())
    }
}

impl<'a> BindProxy for &'a String {
    fn into_bind_value(self) -> BindValue {
        BindValue::String(self.clone())
    }
}

impl BindProxy for i32 {
    fn into_bind_value(self) -> BindValue {
        BindValue::I32(self)
    }
}

impl BindProxy for chrono::NaiveDateTime {
    fn into_bind_value(self) -> BindValue {
        BindValue::NaiveDateTime(self)
    }
}

impl<'a> BindProxy for &'a chrono::NaiveDateTime {
    fn into_bind_value(self) -> BindValue {
        BindValue::NaiveDateTime(*self)
    }
}

/// Applies `args` to `query` in order, one per placeholder.
pub fn bind_all<'q, O>(
    mut query: QueryAs<'q, Postgres, O, PgArguments>,
    args: Vec<BindValue>,
) -> QueryAs<'q, Postgres, O, PgArguments> {
    for arg in args {
        query = match arg {
            BindValue::String(s) => query.bind(s),
            BindValue::I32(i) => query.bind(i),
            BindValue::NaiveDateTime(t) => query.bind(t),
        };
    }
    query
}
