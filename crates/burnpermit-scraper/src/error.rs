use thiserror::Error;

#[derive(Debug, Error)]
pub enum PermitError {
    /// The HTTP client itself could not be constructed.
    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),

    /// Network failure, timeout, or non-2xx status while fetching the search page.
    #[error("error fetching data: {url} failed with {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// No table on the page has a "Township Name" column.
    #[error("no data obtained for county {county}")]
    TableNotFound { county: String },

    #[error("township {township} not found on {url}")]
    TownshipNotFound { township: String, url: String },

    /// The permit table was found but lacks one of the value columns.
    #[error("permit table for county {county} has no \"{column}\" column")]
    MissingColumn {
        column: &'static str,
        county: String,
    },

    #[error("invalid search URL \"{url}\": {reason}")]
    InvalidSearchUrl { url: String, reason: String },
}
