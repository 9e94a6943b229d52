use serde::Serialize;

use crate::ConfigError;

/// The county/township pair a permit lookup is keyed on.
///
/// Both values are trimmed and upper-cased at construction, matching the
/// upper-case keys used in the DNR results table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Query {
    county: String,
    township: String,
}

impl Query {
    /// Builds a query from raw user input.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EmptyField`] if either value is empty after trimming.
    pub fn new(county: &str, township: &str) -> Result<Self, ConfigError> {
        Ok(Self {
            county: normalize(county, "county")?,
            township: normalize(township, "township")?,
        })
    }

    #[must_use]
    pub fn county(&self) -> &str {
        &self.county
    }

    #[must_use]
    pub fn township(&self) -> &str {
        &self.township
    }
}

fn normalize(raw: &str, field: &'static str) -> Result<String, ConfigError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ConfigError::EmptyField { field });
    }
    Ok(trimmed.to_uppercase())
}
