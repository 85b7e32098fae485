//! Extra searchable names keyed by emoji code.
//!
//! Alias files are TOML documents of `[[alias]]` records:
//!
//! ```toml
//! [[alias]]
//! alias = "lol"
//! value = "😂"
//! ```
//!
//! Files are merged in the order given; aliases for one code keep their load
//! order and are not deduplicated. A `builtin:<name>` entry names one of the
//! alias files compiled into the crate (`builtin:github`, `builtin:gitmoji`).

use std::borrow::Cow;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::{debug, warn};

pub const BUILTIN_PREFIX: &str = "builtin:";

/// Alias files enabled by default.
pub const DEFAULT_ALIAS_FILES: [&str; 2] = ["builtin:github", "builtin:gitmoji"];

const GITHUB_ALIASES: &str = include_str!("aliases/github.toml");
const GITMOJI_ALIASES: &str = include_str!("aliases/gitmoji.toml");

pub fn default_alias_files() -> Vec<PathBuf> {
    DEFAULT_ALIAS_FILES.iter().map(PathBuf::from).collect()
}

fn builtin(name: &str) -> Option<&'static str> {
    match name {
        "github" => Some(GITHUB_ALIASES),
        "gitmoji" => Some(GITMOJI_ALIASES),
        _ => None,
    }
}

fn read_source(path: &Path) -> Result<Cow<'static, str>, String> {
    if let Some(name) = path.to_str().and_then(|p| p.strip_prefix(BUILTIN_PREFIX)) {
        return builtin(name)
            .map(Cow::Borrowed)
            .ok_or_else(|| format!("no builtin alias file {name:?}"));
    }
    std::fs::read_to_string(path)
        .map(Cow::Owned)
        .map_err(|e| e.to_string())
}

#[derive(Debug, Clone, Deserialize)]
pub struct AliasRecord {
    pub alias: String,
    pub value: String,
}

#[derive(Deserialize)]
struct AliasFile {
    #[serde(default)]
    alias: Vec<AliasRecord>,
}

#[derive(Debug, Clone, Default)]
pub struct AliasIndex {
    by_code: HashMap<String, Vec<String>>,
}

impl AliasIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load and merge alias files. A file that cannot be read or parsed
    /// contributes nothing.
    pub fn load<P: AsRef<Path>>(paths: &[P]) -> Self {
        let mut index = Self::new();
        for path in paths {
            let path = path.as_ref();
            let content = match read_source(path) {
                Ok(c) => c,
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "alias file unavailable");
                    continue;
                }
            };
            match parse_alias_toml(&content) {
                Ok(records) => {
                    debug!(path = %path.display(), count = records.len(), "aliases loaded");
                    index.extend(records);
                }
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "alias file malformed");
                }
            }
        }
        index
    }

    pub fn insert(&mut self, code: &str, alias: &str) {
        self.by_code
            .entry(code.to_string())
            .or_default()
            .push(alias.to_string());
    }

    pub fn extend<I: IntoIterator<Item = AliasRecord>>(&mut self, records: I) {
        for rec in records {
            self.by_code.entry(rec.value).or_default().push(rec.alias);
        }
    }

    /// Aliases for `code` in load order; empty when none are known.
    pub fn aliases_for(&self, code: &str) -> &[String] {
        self.by_code.get(code).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn len(&self) -> usize {
        self.by_code.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.by_code.is_empty()
    }
}

pub fn parse_alias_toml(content: &str) -> Result<Vec<AliasRecord>, toml::de::Error> {
    let file: AliasFile = toml::from_str(content)?;
    Ok(file.alias)
}
