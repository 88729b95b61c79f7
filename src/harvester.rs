//! Main harvester service that ties fetching and parsing together.

use crate::builder::build_act;
use crate::config::{card_url, print_url, validate_act_ref};
use crate::error::{HarvestError, Result};
use crate::http::PortalClient;
use crate::types::{Act, Grammar, SourceConfig};

/// Download and parse one act.
///
/// Fetches the grammar-appropriate page for the configured reference
/// and runs the extraction core over the body.
pub fn download_act(client: &PortalClient, config: &SourceConfig) -> Result<Act> {
    validate_act_ref(&config.act_ref)?;

    let url = match config.grammar {
        Grammar::PrintPage => print_url(&config.act_ref),
        Grammar::CardPage => card_url(&config.act_ref),
    };

    tracing::debug!(act_ref = %config.act_ref, url = %url, "fetching act page");
    let (status, body) = client.fetch_page(&url)?;

    if !(200..300).contains(&status) {
        return Err(HarvestError::PortalStatus { status, url });
    }

    build_act(&body, config)
}
