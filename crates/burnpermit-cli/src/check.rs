//! `check` command: one refresh cycle against the DNR search page.
//!
//! Flags override the matching `BURNPERMIT_*` environment variables; the
//! merged values go through the same loader the env-only path uses.

use std::collections::HashMap;

use clap::Args;

use burnpermit_scraper::{build_client, PermitStatus, PermitStatusFetcher};

#[derive(Debug, Args)]
pub struct CheckArgs {
    /// County to query (overrides BURNPERMIT_COUNTY)
    #[arg(long)]
    pub county: Option<String>,

    /// Township to look up (overrides BURNPERMIT_TOWNSHIP)
    #[arg(long)]
    pub township: Option<String>,

    /// Search endpoint (overrides BURNPERMIT_SEARCH_URL)
    #[arg(long)]
    pub search_url: Option<String>,

    /// Print the status as JSON instead of text
    #[arg(long)]
    pub json: bool,
}

impl CheckArgs {
    fn overrides(&self) -> HashMap<&'static str, String> {
        [
            ("BURNPERMIT_COUNTY", &self.county),
            ("BURNPERMIT_TOWNSHIP", &self.township),
            ("BURNPERMIT_SEARCH_URL", &self.search_url),
        ]
        .into_iter()
        .filter_map(|(var, value)| value.clone().map(|v| (var, v)))
        .collect()
    }
}

pub(crate) async fn run(args: CheckArgs) -> anyhow::Result<()> {
    let overrides = args.overrides();
    let config = burnpermit_core::build_app_config(|key| {
        overrides
            .get(key)
            .cloned()
            .map_or_else(|| std::env::var(key), Ok)
    })?;
    tracing::debug!(?config, "loaded configuration");

    let client = build_client(config.request_timeout_secs, &config.user_agent)?;
    let mut fetcher =
        PermitStatusFetcher::with_search_url(client, config.query.clone(), &config.search_url)?;
    fetcher.refresh().await;

    let status = fetcher.status();
    if args.json {
        println!("{}", serde_json::to_string_pretty(&status)?);
    } else {
        print!("{}", render_status(&status));
    }

    if !status.available {
        anyhow::bail!(
            "burn permit status unavailable for {} township, {} county",
            status.township,
            status.county
        );
    }
    Ok(())
}

pub(crate) fn render_status(status: &PermitStatus) -> String {
    let headline = match (&status.attributes, status.is_on) {
        (None, _) => "unavailable",
        (Some(_), true) => "on (permits issued, unrestricted)",
        (Some(_), false) => "off",
    };

    let mut out = format!("{} / {}: {headline}\n", status.county, status.township);
    if let Some(attrs) = &status.attributes {
        out.push_str(&format!("  burning_permitted: {}\n", attrs.burning_permitted));
        out.push_str(&format!(
            "  guidelines_restrictions: {}\n",
            attrs.guidelines_restrictions
        ));
    }
    out
}
