//! Ingestion of raw file listings into artifact observations.
//!
//! The remote/local acquisition of listings belongs to an external
//! collaborator; this module covers the boundary the core owns: parsing
//! `ls -l`-style listing text, deriving class full names from compiled class
//! paths, classifying third-party JARs, and appending the resulting
//! observations to the store.

mod classify;
mod listing;

pub use classify::ThirdPartyClassifier;
pub use listing::{ListingEntry, ListingParser, ParsedListing, RejectedLine};

use crate::error::Result;
use crate::model::{ArtifactKind, ObservationId, ServiceId};
use crate::store::{NewObservation, ObservationStore};

/// Append every parsed listing entry as an observation for one service.
pub fn ingest_listing<S: ObservationStore + ?Sized>(
    store: &mut S,
    service_id: ServiceId,
    parsed: &ParsedListing,
    classifier: &ThirdPartyClassifier,
) -> Result<Vec<ObservationId>> {
    let mut ids = Vec::with_capacity(parsed.entries.len());
    for entry in &parsed.entries {
        let is_third_party =
            entry.kind == ArtifactKind::Jar && classifier.is_third_party(&entry.artifact_name);
        ids.push(store.append_observation(NewObservation {
            service_id,
            artifact_name: entry.artifact_name.clone(),
            kind: entry.kind,
            byte_size: entry.byte_size,
            last_modified: entry.last_modified,
            is_third_party,
        }));
    }
    tracing::info!(
        service = %service_id,
        observations = ids.len(),
        rejected = parsed.rejected.len(),
        "Ingested listing"
    );
    Ok(ids)
}
