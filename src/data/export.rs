//! JSON export of a snapshot.

use std::io::Write;
use std::path::Path;

use anyhow::Result;

use pulsewatch_types::HealthSnapshot;

use super::format::DisplayFields;

/// Build the export document: the raw snapshot plus its display strings.
pub fn export_value(snapshot: &HealthSnapshot) -> serde_json::Value {
    serde_json::json!({
        "snapshot": snapshot,
        "display": DisplayFields::from_snapshot(snapshot),
    })
}

/// Write a snapshot to `path` as pretty-printed JSON.
pub fn write_export(snapshot: &HealthSnapshot, path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(&export_value(snapshot))?;
    let mut file = std::fs::File::create(path)?;
    file.write_all(json.as_bytes())?;
    Ok(())
}
