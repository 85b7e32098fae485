//! User settings loaded from TOML.
//!
//! - `parse_settings_toml(content)` deserializes and validates a document
//! - Default values are embedded via `include_str!("default_settings.toml")`
//! - `FileSettings` re-reads its file on every `load()`, so edits take effect
//!   the next time the picker is enabled

use std::collections::HashMap;
use std::io;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::{debug, warn};

use crate::alias::default_alias_files;
use crate::filter::FilterPolicy;
use crate::keymap::{HotkeyMap, KeyChord};

pub const DEFAULT_SETTINGS_TOML: &str = include_str!("default_settings.toml");

/// Returns the embedded default settings TOML content.
pub fn default_toml() -> &'static str {
    DEFAULT_SETTINGS_TOML
}

#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("TOML parse error: {0}")]
    Parse(String),
    #[error("invalid value for {field}: {reason}")]
    InvalidValue { field: String, reason: String },
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub filter: FilterSettings,
    pub behavior: BehaviorSettings,
    pub appearance: AppearanceSettings,
    pub aliases: AliasSettings,
    hotkeys: HashMap<String, String>,
    #[serde(skip)]
    hotkeys_parsed: HotkeyMap,
}

impl Settings {
    pub fn filter_policy(&self) -> FilterPolicy {
        let f = &self.filter;
        FilterPolicy {
            max_version: (f.max_emoji_version >= 0).then_some(f.max_emoji_version),
            skin_tones_disabled: f.skin_tones_disabled,
            genders_disabled: f.genders_disabled,
            use_system_font: f.use_system_font,
            use_system_font_width_heuristics: f.use_system_font_width_heuristics,
        }
    }

    /// Parsed `scale_factor`, `None` when unset.
    pub fn scale_factor(&self) -> Option<f64> {
        parse_scale_factor(&self.appearance.scale_factor).ok().flatten()
    }

    pub fn hotkeys(&self) -> &HotkeyMap {
        &self.hotkeys_parsed
    }

    pub fn alias_files(&self) -> &[PathBuf] {
        &self.aliases.files
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct FilterSettings {
    pub max_emoji_version: i32,
    pub skin_tones_disabled: bool,
    pub genders_disabled: bool,
    pub use_system_font: bool,
    pub use_system_font_width_heuristics: bool,
}

impl Default for FilterSettings {
    fn default() -> Self {
        Self {
            max_emoji_version: -1,
            skin_tones_disabled: false,
            genders_disabled: false,
            use_system_font: false,
            use_system_font_width_heuristics: true,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct BehaviorSettings {
    pub close_after_first_input: bool,
    pub save_kaomoji_in_mru: bool,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AppearanceSettings {
    pub hide_status_bar: bool,
    pub use_system_theme: bool,
    pub window_opacity: f64,
    pub scale_factor: String,
    pub system_font_override: String,
}

impl Default for AppearanceSettings {
    fn default() -> Self {
        Self {
            hide_status_bar: false,
            use_system_theme: false,
            window_opacity: 0.90,
            scale_factor: String::new(),
            system_font_override: String::new(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AliasSettings {
    pub files: Vec<PathBuf>,
}

impl Default for AliasSettings {
    fn default() -> Self {
        Self {
            files: default_alias_files(),
        }
    }
}

pub fn parse_settings_toml(toml_str: &str) -> Result<Settings, SettingsError> {
    let mut s: Settings =
        toml::from_str(toml_str).map_err(|e| SettingsError::Parse(e.to_string()))?;
    validate(&s)?;
    s.hotkeys_parsed = parse_hotkeys(&s.hotkeys)?;
    Ok(s)
}

fn parse_scale_factor(raw: &str) -> Result<Option<f64>, String> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(None);
    }
    match raw.parse::<f64>() {
        Ok(v) if v.is_finite() && v > 0.0 => Ok(Some(v)),
        Ok(_) => Err("must be positive".to_string()),
        Err(_) => Err("must be empty or a number".to_string()),
    }
}

fn parse_hotkeys(raw: &HashMap<String, String>) -> Result<HotkeyMap, SettingsError> {
    let mut map = HotkeyMap::new();
    for (source, target) in raw {
        let mut chars = source.chars();
        let c = match (chars.next(), chars.next()) {
            (Some(c), None) => c,
            _ => {
                return Err(SettingsError::InvalidValue {
                    field: format!("hotkeys.{}", source),
                    reason: "source must be a single character".to_string(),
                })
            }
        };
        let chord = KeyChord::parse(target).map_err(|e| SettingsError::InvalidValue {
            field: format!("hotkeys.{}", source),
            reason: e.to_string(),
        })?;
        map.insert(c, chord);
    }
    Ok(map)
}

fn validate(s: &Settings) -> Result<(), SettingsError> {
    if s.filter.max_emoji_version < -1 {
        return Err(SettingsError::InvalidValue {
            field: "filter.max_emoji_version".to_string(),
            reason: "must be -1 or a version number".to_string(),
        });
    }
    let opacity = s.appearance.window_opacity;
    if !(0.0..=1.0).contains(&opacity) {
        return Err(SettingsError::InvalidValue {
            field: "appearance.window_opacity".to_string(),
            reason: "must be between 0.0 and 1.0".to_string(),
        });
    }
    parse_scale_factor(&s.appearance.scale_factor).map_err(|reason| {
        SettingsError::InvalidValue {
            field: "appearance.scale_factor".to_string(),
            reason,
        }
    })?;
    Ok(())
}

/// Where settings come from. Read again on every enable.
pub trait SettingsSource: Send {
    fn load(&self) -> Settings;
}

/// Fixed settings, mostly for tests and embedders.
impl SettingsSource for Settings {
    fn load(&self) -> Settings {
        self.clone()
    }
}

#[derive(Debug, Clone)]
pub struct FileSettings {
    path: PathBuf,
}

impl FileSettings {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn try_load(&self) -> Result<Option<Settings>, SettingsError> {
        match std::fs::read_to_string(&self.path) {
            Ok(content) => parse_settings_toml(&content).map(Some),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(SettingsError::Parse(e.to_string())),
        }
    }

    /// Write the embedded defaults unless the file already exists.
    /// Returns whether a file was written.
    pub fn write_defaults_if_missing(&self) -> io::Result<bool> {
        if self.path.exists() {
            return Ok(false);
        }
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&self.path, DEFAULT_SETTINGS_TOML)?;
        debug!(path = %self.path.display(), "default settings written");
        Ok(true)
    }
}

impl SettingsSource for FileSettings {
    fn load(&self) -> Settings {
        match self.try_load() {
            Ok(Some(s)) => s,
            Ok(None) => Settings::default(),
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "settings unreadable, using defaults");
                Settings::default()
            }
        }
    }
}
