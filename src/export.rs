use std::{fs::File, io::BufWriter, path::Path};

use anyhow::Context;
use log::info;

use crate::records::SessionTable;

/// Write the dataset as a delimited text file: one header row from the
/// column set, one row per session.
pub fn write_csv(table: &SessionTable, path: &Path) -> anyhow::Result<()> {
    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("failed to open {} for writing", path.display()))?;
    for record in table.rows() {
        writer.serialize(record)?;
    }
    writer.flush()?;
    info!("wrote {} rows to {}", table.len(), path.display());
    Ok(())
}

/// Write the dataset as a serialized table file.
pub fn write_json(table: &SessionTable, path: &Path) -> anyhow::Result<()> {
    let file = File::create(path)
        .with_context(|| format!("failed to open {} for writing", path.display()))?;
    serde_json::to_writer_pretty(BufWriter::new(file), table.rows())
        .with_context(|| format!("failed to serialize dataset to {}", path.display()))?;
    info!("wrote {} rows to {}", table.len(), path.display());
    Ok(())
}
