//! Permit status lookup over the tables scraped from a county results page.

use serde::Serialize;

use crate::error::PermitError;
use crate::table::{parse_tables, HtmlTable};
use crate::Query;

pub const TOWNSHIP_COLUMN: &str = "Township Name";
pub const ISSUED_COLUMN: &str = "Burning Permits Issued";
pub const GUIDELINES_COLUMN: &str = "Guidelines and Restrictions";

/// Raw cell text from the matched township row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PermitRecord {
    pub issued: String,
    pub guidelines: String,
}

/// Attribute mapping exposed alongside the on/off signal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PermitAttributes {
    pub burning_permitted: String,
    pub guidelines_restrictions: String,
}

impl PermitRecord {
    /// Permits are issued with no time-of-day restriction.
    #[must_use]
    pub fn is_unrestricted(&self) -> bool {
        self.issued == "Yes" && self.guidelines == "All Day"
    }

    #[must_use]
    pub fn attributes(&self) -> PermitAttributes {
        PermitAttributes {
            burning_permitted: self.issued.clone(),
            guidelines_restrictions: self.guidelines.clone(),
        }
    }
}

/// Parses a results page and looks up the permit row for `query`.
///
/// `url` is only used for error context.
///
/// # Errors
///
/// See [`lookup_permit`].
pub fn extract_permit(html: &str, query: &Query, url: &str) -> Result<PermitRecord, PermitError> {
    let tables = parse_tables(html);
    tracing::debug!(county = query.county(), tables = tables.len(), "parsed results page");
    lookup_permit(&tables, query, url)
}

/// Selects the first table with a "Township Name" column and reads the
/// permit cells for the query's township.
///
/// Only the first qualifying table is consulted; a township missing from it
/// is not searched for in later tables.
///
/// # Errors
///
/// - [`PermitError::TableNotFound`] if no table has a "Township Name" column.
/// - [`PermitError::TownshipNotFound`] if the table has no row for the township.
/// - [`PermitError::MissingColumn`] if a value column is absent from the table.
pub fn lookup_permit(
    tables: &[HtmlTable],
    query: &Query,
    url: &str,
) -> Result<PermitRecord, PermitError> {
    let (table, key_column) = tables
        .iter()
        .find_map(|t| t.column(TOWNSHIP_COLUMN).map(|idx| (t, idx)))
        .ok_or_else(|| PermitError::TableNotFound {
            county: query.county().to_string(),
        })?;

    let row = table
        .find_row(key_column, query.township())
        .ok_or_else(|| PermitError::TownshipNotFound {
            township: query.township().to_string(),
            url: url.to_string(),
        })?;

    let cell = |column: &'static str| -> Result<String, PermitError> {
        table
            .column(column)
            .map(|idx| row.get(idx).cloned().unwrap_or_default())
            .ok_or_else(|| PermitError::MissingColumn {
                column,
                county: query.county().to_string(),
            })
    };

    Ok(PermitRecord {
        issued: cell(ISSUED_COLUMN)?,
        guidelines: cell(GUIDELINES_COLUMN)?,
    })
}
