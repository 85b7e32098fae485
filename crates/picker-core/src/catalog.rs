//! Immutable emoji and kaomoji tables.
//!
//! The catalog is built once and shared read-only (`Arc<Catalog>`) between
//! every component. Display items refer to entries by [`ItemRef`] so that no
//! component holds borrowed entry data across rebuilds.

use std::collections::HashMap;

use serde::Deserialize;

/// Version value for entries that carry no Unicode emoji version.
pub const UNVERSIONED: i32 = -1;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct EmojiEntry {
    pub name: String,
    pub code: String,
    #[serde(default = "unversioned")]
    pub version: i32,
    #[serde(default, rename = "skin_tone")]
    pub skin_tone_variant: bool,
    #[serde(default, rename = "gender")]
    pub gender_variant: bool,
}

fn unversioned() -> i32 {
    UNVERSIONED
}

impl EmojiEntry {
    pub fn new(name: &str, code: &str, version: i32) -> Self {
        Self {
            name: name.to_string(),
            code: code.to_string(),
            version,
            skin_tone_variant: false,
            gender_variant: false,
        }
    }

    pub fn with_skin_tone(mut self) -> Self {
        self.skin_tone_variant = true;
        self
    }

    pub fn with_gender(mut self) -> Self {
        self.gender_variant = true;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct KaomojiEntry {
    pub name: String,
    pub text: String,
}

impl KaomojiEntry {
    pub fn new(name: &str, text: &str) -> Self {
        Self {
            name: name.to_string(),
            text: text.to_string(),
        }
    }

    /// Pseudo-emoji view: the text doubles as the code, no version.
    pub fn as_entry(&self) -> EntryView<'_> {
        EntryView {
            name: &self.name,
            code: &self.text,
            version: UNVERSIONED,
            real: false,
        }
    }
}

/// Stable handle to a catalog entry, used as the arena key for grid items.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ItemRef {
    Emoji(usize),
    Kaomoji(usize),
}

impl ItemRef {
    pub fn is_real_emoji(self) -> bool {
        matches!(self, ItemRef::Emoji(_))
    }

    /// Grid columns occupied by this item. Kaomoji render wide.
    pub fn column_span(self) -> usize {
        match self {
            ItemRef::Emoji(_) => 1,
            ItemRef::Kaomoji(_) => 2,
        }
    }
}

/// Uniform read-only view over either kind of entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EntryView<'a> {
    pub name: &'a str,
    pub code: &'a str,
    pub version: i32,
    /// `false` for kaomoji pseudo-entries.
    pub real: bool,
}

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("TOML parse error: {0}")]
    Parse(String),
    #[error("duplicate emoji code {code:?}")]
    Duplicate { code: String },
}

#[derive(Deserialize)]
struct CatalogFile {
    #[serde(default)]
    emoji: Vec<EmojiEntry>,
    #[serde(default)]
    kaomoji: Vec<KaomojiEntry>,
}

#[derive(Debug, Default)]
pub struct Catalog {
    emojis: Vec<EmojiEntry>,
    kaomojis: Vec<KaomojiEntry>,
    by_code: HashMap<String, usize>,
    by_text: HashMap<String, usize>,
}

impl Catalog {
    pub fn new(
        emojis: Vec<EmojiEntry>,
        kaomojis: Vec<KaomojiEntry>,
    ) -> Result<Self, CatalogError> {
        let mut by_code = HashMap::with_capacity(emojis.len());
        for (i, e) in emojis.iter().enumerate() {
            if by_code.insert(e.code.clone(), i).is_some() {
                return Err(CatalogError::Duplicate {
                    code: e.code.clone(),
                });
            }
        }
        // Kaomoji texts may repeat across names; first occurrence wins.
        let mut by_text = HashMap::with_capacity(kaomojis.len());
        for (i, k) in kaomojis.iter().enumerate() {
            by_text.entry(k.text.clone()).or_insert(i);
        }
        Ok(Self {
            emojis,
            kaomojis,
            by_code,
            by_text,
        })
    }

    pub fn from_toml_str(content: &str) -> Result<Self, CatalogError> {
        let file: CatalogFile =
            toml::from_str(content).map_err(|e| CatalogError::Parse(e.to_string()))?;
        Self::new(file.emoji, file.kaomoji)
    }

    pub fn emojis(&self) -> &[EmojiEntry] {
        &self.emojis
    }

    pub fn kaomojis(&self) -> &[KaomojiEntry] {
        &self.kaomojis
    }

    pub fn emoji_by_code(&self, code: &str) -> Option<ItemRef> {
        self.by_code.get(code).map(|&i| ItemRef::Emoji(i))
    }

    pub fn kaomoji_by_text(&self, text: &str) -> Option<ItemRef> {
        self.by_text.get(text).map(|&i| ItemRef::Kaomoji(i))
    }

    /// Resolve a committed code against both tables, emoji first.
    pub fn lookup(&self, code: &str) -> Option<ItemRef> {
        self.emoji_by_code(code)
            .or_else(|| self.kaomoji_by_text(code))
    }

    /// Panics if `item` did not come from this catalog.
    pub fn entry(&self, item: ItemRef) -> EntryView<'_> {
        match item {
            ItemRef::Emoji(i) => {
                let e = &self.emojis[i];
                EntryView {
                    name: &e.name,
                    code: &e.code,
                    version: e.version,
                    real: true,
                }
            }
            ItemRef::Kaomoji(i) => self.kaomojis[i].as_entry(),
        }
    }
}
