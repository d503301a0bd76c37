use anyhow::{Context, Result};
use csv::WriterBuilder;
use std::collections::HashMap;
use std::path::Path;
use tracing::info;

/// Write normalized records as a fixed-schema CSV: header row always
/// present, one row per record, empty string for any missing key. Output is
/// UTF-8 with no byte-order mark and fully overwrites any previous run.
pub fn write_csv<P: AsRef<Path>>(
    path: P,
    columns: &[&str],
    records: &[HashMap<String, String>],
) -> Result<()> {
    let mut writer = WriterBuilder::new()
        .from_path(&path)
        .with_context(|| format!("creating output file {}", path.as_ref().display()))?;

    writer
        .write_record(columns)
        .context("writing header row")?;
    for rec in records {
        let row = columns
            .iter()
            .map(|c| rec.get(*c).map(String::as_str).unwrap_or(""));
        writer.write_record(row).context("writing data row")?;
    }
    writer.flush().context("flushing output file")?;

    info!(
        path = %path.as_ref().display(),
        rows = records.len(),
        "wrote normalized table"
    );
    Ok(())
}
