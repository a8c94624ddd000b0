//! Clean exported data

use anyhow::Result;
use std::fs;

use super::export::data_dir;
use crate::Folio;

/// Remove the exported JSON data from the public directory
pub fn run(folio: &Folio) -> Result<()> {
    let data_dir = data_dir(folio);
    if data_dir.exists() {
        fs::remove_dir_all(&data_dir)?;
        tracing::info!("Deleted: {:?}", data_dir);
    }

    Ok(())
}
