pub mod tables;

use std::collections::HashMap;
use tracing::debug;

use crate::assets::{normalize_asset_url, AssetFileIndex};
use crate::ingest::Record;

/// One canonical output field and the source column names that may feed it,
/// in priority order. `asset_url` fields run through the asset resolver
/// after junk filtering.
pub struct FieldSpec {
    pub name: &'static str,
    pub candidates: &'static [&'static str],
    pub asset_url: bool,
}

/// Header-contamination signature: the rule fires when every listed field
/// resolved to one of its literal source column names, which means a
/// misdetected header row slipped past the materializer.
pub struct JunkRule {
    pub conditions: &'static [(&'static str, &'static [&'static str])],
}

/// Everything the generic reconciler needs to normalize one table.
pub struct TableSpec {
    pub name: &'static str,
    /// Column names scored by the header locator.
    pub must_keys: &'static [&'static str],
    /// Output column order; also the full set of reconciled fields.
    pub columns: &'static [&'static str],
    pub fields: &'static [FieldSpec],
    pub junk: &'static [JunkRule],
    /// Fields that must be non-empty for the row to be emitted. When empty,
    /// any single non-empty field retains the row.
    pub required: &'static [&'static str],
}

/// Reconcile one raw record against a table spec. Returns `None` when the
/// record is junk-filtered or fails retention.
pub fn reconcile(
    spec: &TableSpec,
    record: &Record,
    index: &AssetFileIndex,
) -> Option<HashMap<String, String>> {
    // First non-empty candidate wins, per field.
    let mut resolved: HashMap<&str, String> = HashMap::with_capacity(spec.fields.len());
    for field in spec.fields {
        let value = field
            .candidates
            .iter()
            .filter_map(|c| record.get(*c))
            .map(|v| v.trim())
            .find(|v| !v.is_empty())
            .unwrap_or_default();
        resolved.insert(field.name, value.to_string());
    }

    // Junk check runs on the raw resolved values, before URL normalization.
    for rule in spec.junk {
        let fired = rule
            .conditions
            .iter()
            .all(|(field, literals)| match resolved.get(*field) {
                Some(v) => literals.contains(&v.as_str()),
                None => false,
            });
        if fired {
            debug!(table = spec.name, "dropping header-contaminated record");
            return None;
        }
    }

    for field in spec.fields.iter().filter(|f| f.asset_url) {
        if let Some(value) = resolved.get(field.name) {
            let normalized = normalize_asset_url(index, value);
            resolved.insert(field.name, normalized);
        }
    }

    let retained = if spec.required.is_empty() {
        resolved.values().any(|v| !v.is_empty())
    } else {
        spec.required
            .iter()
            .all(|f| resolved.get(*f).is_some_and(|v| !v.is_empty()))
    };
    if !retained {
        debug!(table = spec.name, "dropping record with no usable fields");
        return None;
    }

    Some(
        resolved
            .into_iter()
            .map(|(k, v)| (k.to_string(), v))
            .collect(),
    )
}

#[cfg(test)]
mod tests {
    use super::tables::{ASSETS, SCHEDULE, SPEAKERS};
    use super::*;

    fn record(pairs: &[(&str, &str)]) -> Record {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn no_assets() -> AssetFileIndex {
        AssetFileIndex::from_names(Vec::<String>::new())
    }

    #[test]
    fn schedule_fields_reconcile_by_priority() {
        let rec = record(&[
            ("timetable1", "09:00"),
            ("timetable2", "10:00"),
            ("session_title_filled", "Opening"),
            ("track", "Hall A"),
        ]);
        let out = reconcile(&SCHEDULE, &rec, &no_assets()).unwrap();
        assert_eq!(out["start"], "09:00");
        assert_eq!(out["end"], "10:00");
        assert_eq!(out["title"], "Opening");
        assert_eq!(out["desc"], "");
        assert_eq!(out["location"], "Hall A");
    }

    #[test]
    fn earlier_candidates_shadow_later_ones() {
        let rec = record(&[
            ("session_title_filled", "Final title"),
            ("session_title", "Draft title"),
            ("title", "Old title"),
        ]);
        let out = reconcile(&SCHEDULE, &rec, &no_assets()).unwrap();
        assert_eq!(out["title"], "Final title");
    }

    #[test]
    fn empty_candidates_are_skipped_in_order() {
        let rec = record(&[("session_title_filled", ""), ("session_title", "Panel")]);
        let out = reconcile(&SCHEDULE, &rec, &no_assets()).unwrap();
        assert_eq!(out["title"], "Panel");
    }

    #[test]
    fn all_empty_record_is_dropped() {
        let rec = record(&[("name_jp", ""), ("bio_ja", "")]);
        assert!(reconcile(&SPEAKERS, &rec, &no_assets()).is_none());
    }

    #[test]
    fn single_populated_field_retains_speaker() {
        let rec = record(&[("name_jp", "田中")]);
        let out = reconcile(&SPEAKERS, &rec, &no_assets()).unwrap();
        assert_eq!(out["name"], "田中");
        assert_eq!(out["id"], "");
        assert_eq!(out["title"], "");
        assert_eq!(out["org"], "");
        assert_eq!(out["bio"], "");
        assert_eq!(out["photo_url"], "");
    }

    #[test]
    fn speaker_photo_runs_through_the_resolver() {
        let idx = AssetFileIndex::from_names(["speaker_tanaka.jpg"]);
        let rec = record(&[("name_jp", "田中"), ("photo_file", "speaker_tanaka")]);
        let out = reconcile(&SPEAKERS, &rec, &idx).unwrap();
        assert_eq!(out["photo_url"], "./assets/speaker_tanaka.jpg");
    }

    #[test]
    fn asset_rows_require_both_key_and_url() {
        let rec = record(&[("file_key", "hero")]);
        assert!(reconcile(&ASSETS, &rec, &no_assets()).is_none());

        let rec = record(&[("file_key", "hero"), ("url", "hero.png")]);
        let out = reconcile(&ASSETS, &rec, &no_assets()).unwrap();
        assert_eq!(out["url"], "./assets/hero.png");
    }

    #[test]
    fn contaminated_asset_header_row_is_dropped() {
        let rec = record(&[("key", "file_key"), ("path", "url")]);
        assert!(reconcile(&ASSETS, &rec, &no_assets()).is_none());
    }

    #[test]
    fn contaminated_schedule_header_row_is_dropped() {
        let rec = record(&[("timetable1", "timetable1"), ("timetable2", "timetable2")]);
        assert!(reconcile(&SCHEDULE, &rec, &no_assets()).is_none());

        let rec = record(&[("title", "session_title")]);
        assert!(reconcile(&SCHEDULE, &rec, &no_assets()).is_none());
    }

    #[test]
    fn contaminated_speaker_header_row_is_dropped() {
        let rec = record(&[("name", "name_jp"), ("image", "photo_file")]);
        assert!(reconcile(&SPEAKERS, &rec, &no_assets()).is_none());
    }

    #[test]
    fn junk_rule_needs_every_condition() {
        // A real speaker whose photo cell happens to say "photo_file" but
        // whose name is genuine must survive.
        let rec = record(&[("name_jp", "田中"), ("photo_url", "photo_file")]);
        assert!(reconcile(&SPEAKERS, &rec, &no_assets()).is_some());
    }

    #[test]
    fn asset_url_falls_back_to_file_name_column() {
        let rec = record(&[("category", "venue"), ("file_name", "venue_map.png")]);
        let out = reconcile(&ASSETS, &rec, &no_assets()).unwrap();
        assert_eq!(out["file_key"], "venue");
        assert_eq!(out["url"], "./assets/venue_map.png");
    }
}
