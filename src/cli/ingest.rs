//! Ingest command handler.
//!
//! Parses a file listing and appends its entries as observations for one
//! service, then persists the store snapshot.

use super::exit_codes;
use crate::config::AppConfig;
use crate::error::{JarDiffError, Result};
use crate::ingest::{ingest_listing, ListingParser, ThirdPartyClassifier};
use std::path::Path;

/// Run the ingest command, returning the desired exit code.
pub fn run_ingest(
    store_path: &Path,
    listing_path: &Path,
    service: &str,
    environment: &str,
    config: &AppConfig,
) -> Result<i32> {
    let text = std::fs::read_to_string(listing_path)
        .map_err(|e| JarDiffError::io(listing_path, e))?;

    let parser = ListingParser::new(&config.ingest.classes_dir);
    let parsed = parser.parse_str(&text);

    for rejected in &parsed.rejected {
        tracing::warn!(
            line = rejected.line_no,
            reason = %rejected.reason,
            "Rejected listing line"
        );
    }

    let mut store = super::open_store(store_path)?;
    let service_id = store.register_service(service, environment);
    let ids = ingest_listing(&mut store, service_id, &parsed, &classifier(config))?;
    store.save(store_path)?;

    println!(
        "Ingested {} observations for {service} ({} lines rejected)",
        ids.len(),
        parsed.rejected.len()
    );
    Ok(exit_codes::SUCCESS)
}

fn classifier(config: &AppConfig) -> ThirdPartyClassifier {
    ThirdPartyClassifier::new(config.ingest.internal_prefixes.clone())
}
