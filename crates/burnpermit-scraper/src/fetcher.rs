//! Burn permit status fetcher for a single county/township.
//!
//! One [`PermitStatusFetcher::refresh`] call issues one GET against the DNR
//! search page, scrapes the results table, and stores the township's row.
//! Failures are logged and clear the stored record; nothing is retried here.
//! The host owns the polling cadence and the shared `reqwest::Client`.

use std::time::Duration;

use burnpermit_core::DEFAULT_SEARCH_URL;
use chrono::{DateTime, Utc};
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use reqwest::{redirect, Client, Url};
use serde::Serialize;

use crate::error::PermitError;
use crate::permit::{extract_permit, PermitAttributes, PermitRecord};
use crate::Query;

/// Characters left unescaped in the county query string.
const COUNTY_ENCODE_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~')
    .remove(b'/');

const MAX_REDIRECTS: usize = 10;

/// Builds a `reqwest::Client` suited for the permit search page: bounded
/// timeouts, a descriptive `User-Agent`, and redirect following.
///
/// # Errors
///
/// Returns [`PermitError::Http`] if the client cannot be constructed.
pub fn build_client(timeout_secs: u64, user_agent: &str) -> Result<Client, PermitError> {
    let client = Client::builder()
        .timeout(Duration::from_secs(timeout_secs))
        .connect_timeout(Duration::from_secs(10))
        .user_agent(user_agent)
        .redirect(redirect::Policy::limited(MAX_REDIRECTS))
        .build()?;
    Ok(client)
}

/// Builds `<base>?<percent-encoded county>`.
///
/// # Errors
///
/// Returns [`PermitError::InvalidSearchUrl`] if `base` is not an absolute
/// http(s) URL or already carries a query string or fragment.
pub fn search_url(base: &str, county: &str) -> Result<String, PermitError> {
    let invalid = |reason: String| PermitError::InvalidSearchUrl {
        url: base.to_string(),
        reason,
    };

    let parsed = Url::parse(base).map_err(|e| invalid(e.to_string()))?;
    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(invalid(format!("unsupported scheme '{}'", parsed.scheme())));
    }
    if parsed.query().is_some() || parsed.fragment().is_some() {
        return Err(invalid(
            "base URL must not carry a query string or fragment".to_string(),
        ));
    }

    let encoded = utf8_percent_encode(county, COUNTY_ENCODE_SET);
    Ok(format!("{base}?{encoded}"))
}

/// Serializable snapshot of a fetcher's read surface.
#[derive(Debug, Clone, Serialize)]
pub struct PermitStatus {
    pub county: String,
    pub township: String,
    pub url: String,
    pub available: bool,
    pub is_on: bool,
    pub attributes: Option<PermitAttributes>,
    pub last_refreshed: Option<DateTime<Utc>>,
}

/// Holds the last fetched permit record for one county/township.
///
/// `refresh` takes `&mut self`, so a single instance can never have two
/// requests in flight.
#[derive(Debug)]
pub struct PermitStatusFetcher {
    client: Client,
    query: Query,
    url: String,
    record: Option<PermitRecord>,
    last_refreshed: Option<DateTime<Utc>>,
}

impl PermitStatusFetcher {
    /// Creates a fetcher pointed at the production DNR search page.
    ///
    /// # Errors
    ///
    /// Returns [`PermitError::InvalidSearchUrl`] if the search URL cannot be built.
    pub fn new(client: Client, query: Query) -> Result<Self, PermitError> {
        Self::with_search_url(client, query, DEFAULT_SEARCH_URL)
    }

    /// Creates a fetcher with a custom search endpoint (mock servers, mirrors).
    ///
    /// # Errors
    ///
    /// Returns [`PermitError::InvalidSearchUrl`] if `base_url` is not a usable
    /// http(s) URL.
    pub fn with_search_url(
        client: Client,
        query: Query,
        base_url: &str,
    ) -> Result<Self, PermitError> {
        let url = search_url(base_url, query.county())?;
        Ok(Self {
            client,
            query,
            url,
            record: None,
            last_refreshed: None,
        })
    }

    /// Runs one fetch-and-parse cycle and stores the outcome.
    ///
    /// Never fails: any error is logged at `error` level and clears the
    /// stored record, making the fetcher unavailable until the next
    /// successful refresh.
    pub async fn refresh(&mut self) {
        let outcome = self.fetch().await;
        self.last_refreshed = Some(Utc::now());

        match outcome {
            Ok(record) => {
                tracing::debug!(
                    county = self.query.county(),
                    township = self.query.township(),
                    issued = %record.issued,
                    guidelines = %record.guidelines,
                    "burn permit status updated"
                );
                self.record = Some(record);
            }
            Err(e) => {
                tracing::error!(
                    county = self.query.county(),
                    township = self.query.township(),
                    url = %self.url,
                    error = %e,
                    "burn permit status refresh failed"
                );
                self.record = None;
            }
        }
    }

    /// Fetches and parses the search page without touching stored state.
    ///
    /// # Errors
    ///
    /// - [`PermitError::Transport`] on network failure, timeout, or non-2xx status.
    /// - [`PermitError::TableNotFound`] if the page has no permit table.
    /// - [`PermitError::TownshipNotFound`] if the township row is absent.
    /// - [`PermitError::MissingColumn`] if the permit table lacks a value column.
    pub async fn fetch(&self) -> Result<PermitRecord, PermitError> {
        let response = self
            .client
            .get(&self.url)
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;
        let response = response
            .error_for_status()
            .map_err(|e| self.transport_error(e))?;
        let body = response.text().await.map_err(|e| self.transport_error(e))?;

        extract_permit(&body, &self.query, &self.url)
    }

    fn transport_error(&self, source: reqwest::Error) -> PermitError {
        PermitError::Transport {
            url: self.url.clone(),
            source,
        }
    }

    /// Permits are issued ("Yes") with no restriction ("All Day").
    #[must_use]
    pub fn is_on(&self) -> bool {
        self.record.as_ref().is_some_and(PermitRecord::is_unrestricted)
    }

    #[must_use]
    pub fn is_available(&self) -> bool {
        self.record.is_some()
    }

    #[must_use]
    pub fn attributes(&self) -> Option<PermitAttributes> {
        self.record.as_ref().map(PermitRecord::attributes)
    }

    #[must_use]
    pub fn record(&self) -> Option<&PermitRecord> {
        self.record.as_ref()
    }

    #[must_use]
    pub fn query(&self) -> &Query {
        &self.query
    }

    /// The full search URL, county query string included.
    #[must_use]
    pub fn full_url(&self) -> &str {
        &self.url
    }

    /// When the last refresh finished, successful or not.
    #[must_use]
    pub fn last_refreshed(&self) -> Option<DateTime<Utc>> {
        self.last_refreshed
    }

    #[must_use]
    pub fn status(&self) -> PermitStatus {
        PermitStatus {
            county: self.query.county().to_string(),
            township: self.query.township().to_string(),
            url: self.url.clone(),
            available: self.is_available(),
            is_on: self.is_on(),
            attributes: self.attributes(),
            last_refreshed: self.last_refreshed,
        }
    }
}

#[cfg(test)]
#[path = "fetcher_test.rs"]
mod tests;
