pub mod error;
pub mod fetcher;
pub mod permit;
pub mod table;

pub use burnpermit_core::Query;
pub use error::PermitError;
pub use fetcher::{build_client, search_url, PermitStatus, PermitStatusFetcher};
pub use permit::{extract_permit, lookup_permit, PermitAttributes, PermitRecord};
pub use table::{parse_tables, HtmlTable};
