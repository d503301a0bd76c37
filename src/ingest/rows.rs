use anyhow::{Context, Result};
use csv::ReaderBuilder;
use std::collections::HashMap;
use std::io::Cursor;
use tracing::debug;

use super::header::HeaderCandidate;

/// One data row, keyed by the raw header token each value sat under.
pub type Record = HashMap<String, String>;

/// Parsed view of one source table: the header tokens as the file spelled
/// them, plus every surviving data row in document order.
#[derive(Debug)]
pub struct Table {
    pub header: Vec<String>,
    pub records: Vec<Record>,
}

/// Parse everything from the located header onward into records.
///
/// Rows run through a real CSV reader so quoted fields with embedded
/// delimiters survive. Values beyond the header width are ignored and
/// missing trailing fields default to empty. Rows whose trimmed tokens are
/// identical to the header are duplicate header blocks from concatenated
/// exports and are dropped.
pub fn materialize(lines: &[String], candidate: &HeaderCandidate) -> Result<Table> {
    let body = lines
        .get(candidate.index..)
        .unwrap_or(&[])
        .join("\n");

    let mut reader = ReaderBuilder::new()
        .delimiter(candidate.delimiter as u8)
        .has_headers(false)
        .flexible(true)
        .from_reader(Cursor::new(body));

    let mut header: Vec<String> = Vec::new();
    let mut records = Vec::new();

    for (row_no, result) in reader.records().enumerate() {
        let row = result.with_context(|| format!("parsing row {row_no}"))?;
        let fields: Vec<String> = row.iter().map(|f| f.trim().to_string()).collect();

        if row_no == 0 {
            header = fields;
            continue;
        }
        if fields.iter().all(|f| f.is_empty()) {
            continue;
        }
        if fields == header {
            debug!(row = row_no, "dropping re-embedded header row");
            continue;
        }

        let mut rec = Record::with_capacity(header.len());
        for (i, key) in header.iter().enumerate() {
            let value = fields.get(i).cloned().unwrap_or_default();
            rec.insert(key.clone(), value);
        }
        records.push(rec);
    }

    Ok(Table { header, records })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(raw: &[&str], delimiter: char, index: usize) -> Table {
        let lines: Vec<String> = raw.iter().map(|s| s.to_string()).collect();
        let candidate = HeaderCandidate { index, delimiter, hits: 0 };
        materialize(&lines, &candidate).unwrap()
    }

    #[test]
    fn maps_header_tokens_to_values() {
        let t = table(&["file_key,url", "hero,hero.png"], ',', 0);
        assert_eq!(t.header, vec!["file_key", "url"]);
        assert_eq!(t.records.len(), 1);
        assert_eq!(t.records[0]["file_key"], "hero");
        assert_eq!(t.records[0]["url"], "hero.png");
    }

    #[test]
    fn short_rows_default_missing_fields_to_empty() {
        let t = table(&["a,b,c", "1,2"], ',', 0);
        assert_eq!(t.records[0]["c"], "");
    }

    #[test]
    fn surplus_fields_are_ignored() {
        let t = table(&["a,b", "1,2,3,4"], ',', 0);
        assert_eq!(t.records[0].len(), 2);
        assert_eq!(t.records[0]["b"], "2");
    }

    #[test]
    fn duplicate_header_rows_are_dropped() {
        let t = table(
            &["file_key,url", "hero,hero.png", "file_key,url", "logo,logo.png"],
            ',',
            0,
        );
        assert_eq!(t.records.len(), 2);
        assert_eq!(t.records[1]["file_key"], "logo");
    }

    #[test]
    fn quoted_fields_keep_embedded_delimiters() {
        let t = table(&["title,desc", "\"Opening, keynote\",welcome"], ',', 0);
        assert_eq!(t.records[0]["title"], "Opening, keynote");
    }

    #[test]
    fn fields_are_trimmed() {
        let t = table(&["a\tb", " 1 \t 2 "], '\t', 0);
        assert_eq!(t.records[0]["a"], "1");
        assert_eq!(t.records[0]["b"], "2");
    }

    #[test]
    fn header_offset_skips_preamble() {
        let t = table(&["exported 2025", "a,b", "1,2"], ',', 1);
        assert_eq!(t.header, vec!["a", "b"]);
        assert_eq!(t.records.len(), 1);
    }
}
