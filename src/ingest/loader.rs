use anyhow::{Context, Result};
use std::{fs, path::Path};
use tracing::debug;

/// First line of an export sometimes carries the sheet name instead of data,
/// e.g. "HCD2025_speakers_master". Literal convention from the upstream
/// spreadsheets, not part of any table.
pub const LABEL_PREFIX: &str = "HCD2025_";

const BOM: &str = "\u{feff}";

/// Read a source table as text and return its non-empty lines, line endings
/// normalized and any leading sheet-label line removed.
pub fn load_lines<P: AsRef<Path>>(path: P) -> Result<Vec<String>> {
    let raw = fs::read_to_string(&path)
        .with_context(|| format!("reading source file {}", path.as_ref().display()))?;
    Ok(split_lines(&raw))
}

/// Same as [`load_lines`] but over already-loaded text. Exports arrive with
/// an optional BOM and mixed CRLF/CR terminators.
pub fn split_lines(raw: &str) -> Vec<String> {
    let text = raw.strip_prefix(BOM).unwrap_or(raw);
    let text = text.replace("\r\n", "\n").replace('\r', "\n");

    let mut lines: Vec<String> = text
        .split('\n')
        .filter(|ln| !ln.trim().is_empty())
        .map(|ln| ln.to_string())
        .collect();

    if lines
        .first()
        .is_some_and(|ln| ln.trim().starts_with(LABEL_PREFIX))
    {
        debug!(label = %lines[0].trim(), "dropping sheet label line");
        lines.remove(0);
    }

    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn strips_bom_and_normalizes_line_endings() {
        let lines = split_lines("\u{feff}a,b\r\nc,d\re,f\n");
        assert_eq!(lines, vec!["a,b", "c,d", "e,f"]);
    }

    #[test]
    fn drops_blank_lines_entirely() {
        let lines = split_lines("a,b\n\n   \n\t\nc,d\n");
        assert_eq!(lines, vec!["a,b", "c,d"]);
    }

    #[test]
    fn strips_leading_label_line() {
        let lines = split_lines("HCD2025_speakers_master\nname,org\nTanaka,ACME\n");
        assert_eq!(lines, vec!["name,org", "Tanaka,ACME"]);
    }

    #[test]
    fn label_line_only_stripped_when_first() {
        // A data cell starting with the prefix further down must survive.
        let lines = split_lines("name,org\nHCD2025_banner,ACME\n");
        assert_eq!(lines, vec!["name,org", "HCD2025_banner,ACME"]);
    }

    #[test]
    fn label_detection_tolerates_leading_blanks() {
        let lines = split_lines("\n\nHCD2025_assets_full\nfile_key,url\n");
        assert_eq!(lines, vec!["file_key,url"]);
    }

    #[test]
    fn load_lines_reads_from_disk() {
        let mut f = NamedTempFile::new().unwrap();
        write!(f, "\u{feff}HCD2025_assets_full\r\nfile_key,url\r\nhero,hero.png\r\n").unwrap();
        let lines = load_lines(f.path()).unwrap();
        assert_eq!(lines, vec!["file_key,url", "hero,hero.png"]);
    }

    #[test]
    fn missing_file_is_an_error() {
        assert!(load_lines("definitely/not/here.csv").is_err());
    }
}
