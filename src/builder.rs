//! Fluent SELECT builder.
//!
//! Assembles a SELECT statement from columns, joins, predicates, ordering and
//! a row limit. Predicates are AND-combined and every value becomes a
//! numbered `$n` placeholder, so callers only append the conditions whose
//! filter is actually set.

use std::fmt;

use crate::bind::{BindProxy, BindValue};

/// Type of SQL join.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JoinType {
    Inner,
    Left,
}

impl fmt::Display for JoinType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            JoinType::Inner => write!(f, "JOIN"),
            JoinType::Left => write!(f, "LEFT JOIN"),
        }
    }
}

/// Represents a JOIN operation in the query.
#[derive(Debug, Clone, PartialEq)]
pub struct Join {
    pub join_type: JoinType,
    pub table: String,
    pub condition: String,
}

/// Sort direction for ORDER BY.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Order {
    Asc,
    Desc,
}

impl fmt::Display for Order {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Order::Asc => write!(f, "ASC"),
            Order::Desc => write!(f, "DESC"),
        }
    }
}

/// One WHERE condition.
#[derive(Debug, Clone, PartialEq)]
pub enum Predicate {
    Eq(String, BindValue),
    NotEq(String, BindValue),
    Lt(String, BindValue),
    IsNull(String),
    IsNotNull(String),
    In(String, Vec<BindValue>),
}

/// Misuse of [`SelectBuilder`] detected by [`SelectBuilder::to_sql`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BuildError {
    #[error("select statement has no columns")]
    NoColumns,
    #[error("select statement has no FROM table")]
    NoFrom,
    #[error("IN list for `{0}` is empty")]
    EmptyIn(String),
}

/// Fluent builder for parameterized SELECT statements.
///
/// # Example
///
/// ```
/// use dvdrental_report::builder::{Order, SelectBuilder};
///
/// let (sql, args) = SelectBuilder::new(&["c.first_name", "r.rental_date"])
///     .from("customer AS c")
///     .join("rental AS r", "c.customer_id = r.customer_id")
///     .where_eq("c.store_id", 1)
///     .where_null("r.return_date")
///     .order_by("r.rental_date", Order::Desc)
///     .limit(100)
///     .to_sql()
///     .unwrap();
///
/// assert_eq!(
///     sql,
///     "SELECT c.first_name, r.rental_date FROM customer AS c \
///      JOIN rental AS r ON c.customer_id = r.customer_id \
///      WHERE c.store_id = $1 AND r.return_date IS NULL \
///      ORDER BY r.rental_date DESC LIMIT 100"
/// );
/// assert_eq!(args.len(), 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct SelectBuilder {
    columns: Vec<String>,
    table: Option<String>,
    joins: Vec<Join>,
    predicates: Vec<Predicate>,
    order_by: Vec<(String, Order)>,
    limit: Option<u64>,
}

impl SelectBuilder {
    /// Creates a builder selecting the given column expressions.
    pub fn new(columns: &[&str]) -> Self {
        Self {
            columns: columns.iter().map(|c| c.to_string()).collect(),
            ..Default::default()
        }
    }

    /// Appends several column expressions.
    pub fn columns(mut self, columns: &[&str]) -> Self {
        self.columns.extend(columns.iter().map(|c| c.to_string()));
        self
    }

    /// Appends `expr::ty AS alias`.
    ///
    /// Used for columns whose database type has no Rust mapping, such as the
    /// `mpaa_rating` enum, which is read as TEXT.
    pub fn column_cast(mut self, expr: &str, ty: &str, alias: &str) -> Self {
        self.columns.push(format!("{}::{} AS {}", expr, ty, alias));
        self
    }

    /// Sets the FROM table, optionally aliased (`"film AS f"`).
    pub fn from(mut self, table: &str) -> Self {
        self.table = Some(table.to_string());
        self
    }

    /// Adds an INNER JOIN with the specified table and condition.
    ///
    /// # Example
    ///
    /// ```ignore
    /// .join("film_actor AS fa", "f.film_id = fa.film_id")
    /// ```
    pub fn join(mut self, table: &str, condition: &str) -> Self {
        self.joins.push(Join {
            join_type: JoinType::Inner,
            table: table.to_string(),
            condition: condition.to_string(),
        });
        self
    }

    /// Adds a LEFT JOIN with the specified table and condition.
    pub fn join_left(mut self, table: &str, condition: &str) -> Self {
        self.joins.push(Join {
            join_type: JoinType::Left,
            table: table.to_string(),
            condition: condition.to_string(),
        });
        self
    }

    /// `column = $n`
    pub fn where_eq<V: BindProxy>(mut self, column: &str, value: V) -> Self {
        self.predicates
            .push(Predicate::Eq(column.to_string(), value.into_bind_value()));
        self
    }

    /// `column <> $n`
    pub fn where_not_eq<V: BindProxy>(mut self, column: &str, value: V) -> Self {
        self.predicates
            .push(Predicate::NotEq(column.to_string(), value.into_bind_value()));
        self
    }

    /// `column < $n`
    pub fn where_lt<V: BindProxy>(mut self, column: &str, value: V) -> Self {
        self.predicates
            .push(Predicate::Lt(column.to_string(), value.into_bind_value()));
        self
    }

    /// `column IS NULL`
    pub fn where_null(mut self, column: &str) -> Self {
        self.predicates.push(Predicate::IsNull(column.to_string()));
        self
    }

    /// `column IS NOT NULL`
    pub fn where_not_null(mut self, column: &str) -> Self {
        self.predicates.push(Predicate::IsNotNull(column.to_string()));
        self
    }

    /// `column IN ($n, $n+1, ...)`, one placeholder per value.
    ///
    /// An empty list is rejected by [`to_sql`](Self::to_sql); leave the
    /// predicate out instead.
    pub fn where_in<I, V>(mut self, column: &str, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: BindProxy,
    {
        let values = values.into_iter().map(BindProxy::into_bind_value).collect();
        self.predicates.push(Predicate::In(column.to_string(), values));
        self
    }

    /// Adds an ORDER BY term. Terms are emitted in the order they are added.
    pub fn order_by(mut self, column: &str, order: Order) -> Self {
        self.order_by.push((column.to_string(), order));
        self
    }

    /// Caps the row count. The limit is inlined, not bound.
    pub fn limit(mut self, n: u64) -> Self {
        self.limit = Some(n);
        self
    }

    /// Number of joins added so far.
    pub fn join_count(&self) -> usize {
        self.joins.len()
    }

    /// Renders the statement and its arguments in placeholder order.
    pub fn to_sql(&self) -> Result<(String, Vec<BindValue>), BuildError> {
        if self.columns.is_empty() {
            return Err(BuildError::NoColumns);
        }
        let table = self.table.as_deref().ok_or(BuildError::NoFrom)?;

        let mut sql = format!("SELECT {} FROM {}", self.columns.join(", "), table);
        for join in &self.joins {
            sql.push_str(&format!(" {} {} ON {}", join.join_type, join.table, join.condition));
        }

        let mut args = Vec::new();
        let mut conditions = Vec::with_capacity(self.predicates.len());
        for predicate in &self.predicates {
            let condition = match predicate {
                Predicate::Eq(col, v) => format!("{} = {}", col, push_arg(&mut args, v)),
                Predicate::NotEq(col, v) => format!("{} <> {}", col, push_arg(&mut args, v)),
                Predicate::Lt(col, v) => format!("{} < {}", col, push_arg(&mut args, v)),
                Predicate::IsNull(col) => format!("{} IS NULL", col),
                Predicate::IsNotNull(col) => format!("{} IS NOT NULL", col),
                Predicate::In(col, values) => {
                    if values.is_empty() {
                        return Err(BuildError::EmptyIn(col.clone()));
                    }
                    let placeholders: Vec<String> =
                        values.iter().map(|v| push_arg(&mut args, v)).collect();
                    format!("{} IN ({})", col, placeholders.join(", "))
                }
            };
            conditions.push(condition);
        }
        if !conditions.is_empty() {
            sql.push_str(" WHERE ");
            sql.push_str(&conditions.join(" AND "));
        }

        if !self.order_by.is_empty() {
            let terms: Vec<String> = self
                .order_by
                .iter()
                .map(|(col, order)| format!("{} {}", col, order))
                .collect();
            sql.push_str(" ORDER BY ");
            sql.push_str(&terms.join(", "));
        }

        if let Some(n) = self.limit {
            sql.push_str(&format!(" LIMIT {}", n));
        }

        Ok((sql, args))
    }
}

fn push_arg(args: &mut Vec<BindValue>, value: &BindValue) -> String {
    args.push(value.clone());
    format!("${}", args.len())
}
