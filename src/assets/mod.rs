use glob::glob;
use once_cell::sync::Lazy;
use regex::Regex;
use std::path::Path;
use tracing::{debug, warn};

/// Canonical relative prefix every local asset URL carries.
pub const ASSET_PREFIX: &str = "./assets/";

/// Extensions a finished asset URL is expected to end in.
static IMG_EXT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\.(png|jpe?g|webp|gif|svg)$").unwrap());

/// Extensions probed, in order, when a bare name has no match in the index.
const PROBE_EXTENSIONS: [&str; 4] = [".jpg", ".png", ".jpeg", ".webp"];

/// Shorthand tokens the spreadsheets use for well-known assets, mapped to
/// the full base name actually on disk.
const ALIASES: [(&str, &str); 2] = [("hero", "hero_main"), ("logo", "logo_hcd_2025")];

/// Filenames present in the assets directory, enumerated once per run and
/// held sorted so prefix resolution is deterministic regardless of how the
/// filesystem orders its listings.
#[derive(Debug, Clone)]
pub struct AssetFileIndex {
    names: Vec<String>,
}

impl AssetFileIndex {
    /// Enumerate `dir` non-recursively, keeping plain files only. An
    /// unreadable or missing directory yields an empty index; asset
    /// resolution then degrades to prefix-only output.
    pub fn from_dir<P: AsRef<Path>>(dir: P) -> Self {
        let pattern = format!("{}/*", dir.as_ref().display());
        let mut names = Vec::new();
        match glob(&pattern) {
            Ok(entries) => {
                for entry in entries {
                    let path = match entry {
                        Ok(p) => p,
                        Err(e) => {
                            warn!("cannot read asset dir entry: {:?}", e);
                            continue;
                        }
                    };
                    if !path.is_file() {
                        continue;
                    }
                    if let Some(name) = path.file_name().and_then(|f| f.to_str()) {
                        names.push(name.to_string());
                    }
                }
            }
            Err(e) => warn!(
                "cannot list assets directory {}: {}",
                dir.as_ref().display(),
                e
            ),
        }
        if names.is_empty() {
            warn!(
                "asset index for {} is empty; extension-less references will pass through unresolved",
                dir.as_ref().display()
            );
        }
        Self::from_names(names)
    }

    /// Build an index from arbitrary names. Lets resolution be tested
    /// without touching a real filesystem.
    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut names: Vec<String> = names.into_iter().map(Into::into).collect();
        names.sort();
        names.dedup();
        Self { names }
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    fn contains(&self, name: &str) -> bool {
        self.names.binary_search_by(|n| n.as_str().cmp(name)).is_ok()
    }

    /// Deterministic prefix lookup: among every indexed name starting with
    /// `prefix`, the shortest wins, ties broken lexicographically.
    fn best_prefix_match(&self, prefix: &str) -> Option<&str> {
        self.names
            .iter()
            .filter(|n| n.starts_with(prefix))
            .min_by(|a, b| (a.len(), a.as_str()).cmp(&(b.len(), b.as_str())))
            .map(String::as_str)
    }
}

/// Prefix a bare filename with the canonical asset path. Absolute http(s)
/// URLs and already-prefixed paths pass through untouched; empty stays empty.
pub fn ensure_asset_url(raw: &str) -> String {
    let s = raw.trim();
    if s.is_empty() {
        return String::new();
    }
    if s.starts_with("http://") || s.starts_with("https://") || s.starts_with(ASSET_PREFIX) {
        return s.to_string();
    }
    format!("{ASSET_PREFIX}{s}")
}

/// Whether a URL already ends in a recognized image extension.
pub fn has_image_extension(url: &str) -> bool {
    IMG_EXT_RE.is_match(url)
}

/// Best-effort completion of an extension-less asset reference against the
/// on-disk index. Tried in order: exact name, alias-then-literal prefix
/// match, extension probing. Falls back to the prefixed-but-unresolved path;
/// never an error.
pub fn resolve_candidate(index: &AssetFileIndex, value: &str) -> String {
    let val = value.trim();
    if val.is_empty() {
        return String::new();
    }
    let base = val.strip_prefix(ASSET_PREFIX).unwrap_or(val);

    if index.contains(base) {
        return format!("{ASSET_PREFIX}{base}");
    }

    let alias = ALIASES
        .iter()
        .find(|(short, _)| *short == base)
        .map(|(_, full)| *full);
    for candidate in alias.into_iter().chain(std::iter::once(base)) {
        if let Some(hit) = index.best_prefix_match(candidate) {
            debug!(reference = base, resolved = hit, "asset resolved by prefix");
            return format!("{ASSET_PREFIX}{hit}");
        }
    }

    for ext in PROBE_EXTENSIONS {
        let probe = format!("{base}{ext}");
        if index.contains(&probe) {
            return format!("{ASSET_PREFIX}{probe}");
        }
    }

    warn!(reference = base, "asset reference unresolved");
    format!("{ASSET_PREFIX}{base}")
}

/// Full URL normalization for an asset-bearing field: canonical prefixing,
/// then index resolution when no recognized extension is present.
pub fn normalize_asset_url(index: &AssetFileIndex, raw: &str) -> String {
    let url = ensure_asset_url(raw);
    if url.starts_with(ASSET_PREFIX) && !has_image_extension(&url) {
        return resolve_candidate(index, &url);
    }
    url
}
