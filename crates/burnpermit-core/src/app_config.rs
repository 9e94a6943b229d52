use crate::Query;

/// Michigan DNR burn permit search endpoint. The county is appended as a bare
/// query string (`?KENT`).
pub const DEFAULT_SEARCH_URL: &str = "https://www2.dnr.state.mi.us/burnpermits/SearchResults.asp";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub query: Query,
    pub search_url: String,
    pub log_level: String,
    pub request_timeout_secs: u64,
    pub user_agent: String,
}
