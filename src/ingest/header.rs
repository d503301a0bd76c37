use tracing::{debug, warn};

/// How many leading lines may precede the real header. Upstream exports
/// prepend at most a handful of metadata rows.
const HEADER_SCAN_LIMIT: usize = 20;

/// Delimiters tried per candidate line. Comma first: on ties (and on the
/// all-zero fallback) the earlier delimiter wins, so a file with no tab
/// characters always resolves to comma.
const DELIMITERS: [char; 2] = [',', '\t'];

/// Best guess at which line is the real header, and how it was delimited.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeaderCandidate {
    /// Index of the header line within the input line sequence.
    pub index: usize,
    pub delimiter: char,
    /// Number of must-have keys found verbatim among the line's tokens.
    pub hits: usize,
}

/// Scan the first `min(20, lines.len())` lines and pick the (line, delimiter)
/// pair whose trimmed tokens contain the most `must_keys` verbatim. Ties keep
/// the earliest candidate. A zero-score result falls back to (0, comma) and
/// is logged, since downstream parsing then treats an arbitrary row as the
/// header.
pub fn locate_header(lines: &[String], must_keys: &[&str]) -> HeaderCandidate {
    let mut best = HeaderCandidate {
        index: 0,
        delimiter: ',',
        hits: 0,
    };
    let mut best_score: i64 = -1;

    for (i, line) in lines.iter().take(HEADER_SCAN_LIMIT).enumerate() {
        for delim in DELIMITERS {
            let tokens: Vec<&str> = line.split(delim).map(str::trim).collect();
            let hits = must_keys.iter().filter(|k| tokens.contains(*k)).count();
            if hits as i64 > best_score {
                best_score = hits as i64;
                best = HeaderCandidate {
                    index: i,
                    delimiter: delim,
                    hits,
                };
            }
        }
    }

    if best.hits == 0 {
        warn!(
            "no header candidate matched any known column name; assuming row 0 is the header"
        );
    } else {
        debug!(
            index = best.index,
            delimiter = ?best.delimiter,
            hits = best.hits,
            "located header"
        );
    }
    best
}
