use anyhow::{Context, Result};
use std::collections::HashMap;
use std::path::Path;
use std::time::Instant;
use tracing::{info, instrument};

use crate::assets::AssetFileIndex;
use crate::ingest::{load_lines, locate_header, materialize};
use crate::output::write_csv;
use crate::reconcile::{reconcile, tables, TableSpec};

/// Asset directory, relative to the project root.
pub const ASSETS_DIR: &str = "assets";

/// (table, source export, normalized output), all relative to the root.
static TABLES: [(&TableSpec, &str, &str); 3] = [
    (
        &tables::ASSETS,
        "data/HCD2025_assets_full.csv",
        "data/assets_full.csv",
    ),
    (
        &tables::SCHEDULE,
        "data/HCD2025_schedule_master.csv",
        "data/schedule.csv",
    ),
    (
        &tables::SPEAKERS,
        "data/HCD2025_speakers_master.csv",
        "data/speakers_master.csv",
    ),
];

/// Per-table row counts from one completed run.
#[derive(Debug)]
pub struct RunSummary {
    pub tables: Vec<(&'static str, usize)>,
}

/// Normalize a single source table: load, locate the header, materialize
/// rows, reconcile fields. Unreadable sources are fatal; bad rows are only
/// skipped.
#[instrument(level = "info", skip(src, spec, index), fields(table = spec.name))]
pub fn normalize_table(
    src: &Path,
    spec: &TableSpec,
    index: &AssetFileIndex,
) -> Result<Vec<HashMap<String, String>>> {
    let lines = load_lines(src)?;
    let candidate = locate_header(&lines, spec.must_keys);
    let table = materialize(&lines, &candidate)?;

    let total = table.records.len();
    let rows: Vec<_> = table
        .records
        .iter()
        .filter_map(|rec| reconcile(spec, rec, index))
        .collect();

    info!(
        header_row = candidate.index,
        kept = rows.len(),
        skipped = total - rows.len(),
        "reconciled table"
    );
    Ok(rows)
}

/// Run the whole pipeline under `root`: build the asset index once, then
/// normalize and write all three tables. Reruns are idempotent; outputs are
/// fully overwritten.
pub fn run<P: AsRef<Path>>(root: P) -> Result<RunSummary> {
    let root = root.as_ref();
    let start = Instant::now();

    let index = AssetFileIndex::from_dir(root.join(ASSETS_DIR));
    info!(files = index.len(), "asset index loaded");

    let mut summary = RunSummary { tables: Vec::new() };
    for &(spec, src, dest) in &TABLES {
        let rows = normalize_table(&root.join(src), spec, &index)
            .with_context(|| format!("normalizing {} table", spec.name))?;
        write_csv(root.join(dest), spec.columns, &rows)
            .with_context(|| format!("writing {} table", spec.name))?;
        summary.tables.push((spec.name, rows.len()));
    }

    info!(elapsed = ?start.elapsed(), "normalization complete");
    Ok(summary)
}
