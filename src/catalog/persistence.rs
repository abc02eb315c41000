use std::fs;
use std::path::Path;

use tracing::info;

use crate::catalog::CatalogManager;
use crate::error::{CostingError, Result};
use crate::models::{CartRow, CatalogFile};

/// Load a catalog from a JSON file.
pub fn load_catalog<P: AsRef<Path>>(path: P) -> Result<CatalogFile> {
    let content = fs::read_to_string(path.as_ref())?;
    let catalog: CatalogFile = serde_json::from_str(&content)?;
    info!(
        path = %path.as_ref().display(),
        meals = catalog.meals.len(),
        packets = catalog.packets.len(),
        services = catalog.services.len(),
        "Loaded catalog"
    );
    Ok(catalog)
}

/// Load a catalog and index it, failing when the file is missing or holds
/// nothing sellable.
pub fn open_catalog<P: AsRef<Path>>(path: P) -> Result<CatalogManager> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(CostingError::CatalogNotFound(path.to_path_buf()));
    }

    let manager = CatalogManager::new(load_catalog(path)?);
    if manager.is_empty() {
        return Err(CostingError::EmptyCatalog);
    }
    Ok(manager)
}

/// Load cart rows from a JSON file. A missing file is an empty cart.
pub fn load_cart<P: AsRef<Path>>(path: P) -> Result<Vec<CartRow>> {
    let path = path.as_ref();
    if !path.exists() {
        info!(path = %path.display(), "No cart file, starting empty");
        return Ok(Vec::new());
    }

    let content = fs::read_to_string(path)?;
    let rows: Vec<CartRow> = serde_json::from_str(&content)?;
    Ok(rows)
}

/// Save cart rows to a JSON file.
pub fn save_cart<P: AsRef<Path>>(path: P, rows: &[CartRow]) -> Result<()> {
    let json = serde_json::to_string_pretty(rows)?;
    fs::write(path.as_ref(), json)?;
    info!(path = %path.as_ref().display(), rows = rows.len(), "Saved cart");
    Ok(())
}
