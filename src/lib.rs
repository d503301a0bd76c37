//! hcdnorm normalizes the loosely-structured spreadsheet exports behind the
//! HCD2025 conference site (assets, schedule, speakers) into three
//! fixed-schema CSV files the static build consumes.
//!
//! The exports are human-maintained: delimiters vary, label and metadata
//! rows precede the real header, concatenated sheets re-embed their header
//! mid-file, and column names drift between revisions. Every stage here is
//! best-effort by design; a bad row is skipped and logged, never fatal.

pub mod assets;
pub mod ingest;
pub mod output;
pub mod pipeline;
pub mod reconcile;
