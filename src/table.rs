//! Tab-aligned text tables.
//!
//! Cells are left-aligned, padded to a common column width and each cell is
//! closed by a `|` border:
//!
//! ```text
//! Title            |Rating    |
//! ANONYMOUS HUMAN  |NC-17     |
//! ```

use std::io::{self, Write};

use chrono::NaiveDateTime;
use tabled::builder::Builder;
use tabled::settings::object::Segment;
use tabled::settings::{Padding, Style, Width};
use tabled::Table;

use crate::error::Result;
use crate::models::{Author, Film, Rental};

/// Narrowest a column may be, padding included.
pub const MIN_WIDTH: usize = 10;
/// Spaces added after the widest cell of a column.
pub const PADDING: usize = 2;

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// A row type that can be rendered as a table line.
pub trait TableRow {
    /// Column titles, in cell order.
    const HEADER: &'static [&'static str];

    fn cells(&self) -> Vec<String>;
}

impl TableRow for Rental {
    const HEADER: &'static [&'static str] = &[
        "First Name",
        "Last Name",
        "Email",
        "Rental ID",
        "Rental Date",
        "Return Date",
    ];

    fn cells(&self) -> Vec<String> {
        vec![
            self.first_name.clone(),
            self.last_name.clone(),
            self.email.clone().unwrap_or_default(),
            self.rental_id.to_string(),
            timestamp(&self.rental_date),
            self.return_date.as_ref().map(timestamp).unwrap_or_default(),
        ]
    }
}

impl TableRow for Film {
    const HEADER: &'static [&'static str] = &["Title", "Rating"];

    fn cells(&self) -> Vec<String> {
        vec![self.title.clone(), self.rating.clone().unwrap_or_default()]
    }
}

impl TableRow for Author {
    const HEADER: &'static [&'static str] = &["ID", "Bio", "Birth Year"];

    fn cells(&self) -> Vec<String> {
        vec![self.id.to_string(), self.bio.clone(), self.birth_year.to_string()]
    }
}

fn timestamp(t: &NaiveDateTime) -> String {
    t.format(TIMESTAMP_FORMAT).to_string()
}

/// Builds the table for `rows`, header first.
pub fn build_table<R: TableRow>(rows: &[R]) -> Table {
    let mut builder = Builder::default();
    builder.push_record(R::HEADER.iter().map(|h| h.to_string()));
    for row in rows {
        builder.push_record(row.cells());
    }

    let mut table = builder.build();
    table
        .with(Style::empty().vertical('|').right('|'))
        .with(Padding::new(0, PADDING, 0, 0))
        .modify(Segment::all(), Width::increase(MIN_WIDTH - PADDING));
    table
}

/// Writes `rows` under their header as an aligned table.
pub fn write_table<W: Write, R: TableRow>(w: &mut W, rows: &[R]) -> io::Result<()> {
    writeln!(w, "{}", build_table(rows))?;
    w.flush()
}

fn print<R: TableRow>(rows: &[R]) -> Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    write_table(&mut out, rows)?;
    Ok(())
}

pub fn print_rentals(rentals: &[Rental]) -> Result<()> {
    print(rentals)
}

pub fn print_films(films: &[Film]) -> Result<()> {
    print(films)
}

pub fn print_authors(authors: &[Author]) -> Result<()> {
    print(authors)
}
