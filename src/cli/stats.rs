//! Stats command handler.
//!
//! Prints aggregate counts over the store snapshot.

use super::exit_codes;
use crate::error::Result;
use crate::model::ArtifactKind;
use crate::store::ObservationStore;
use std::path::Path;

/// Run the stats command, returning the desired exit code.
pub fn run_stats(store_path: &Path) -> Result<i32> {
    let store = super::open_store(store_path)?;

    println!("Services:     {}", store.service_count());
    println!("Observations: {}", store.observation_count());
    println!("Sources:      {}", store.source_count());
    println!(
        "Artifacts:    {} jars, {} classes",
        store.artifact_names(ArtifactKind::Jar).len(),
        store.artifact_names(ArtifactKind::Class).len()
    );

    Ok(exit_codes::SUCCESS)
}
