//! Shared application settings (database path, display locale).
//!
//! Frontends use these functions so the settings file is always
//! `~/.config/tabletop/settings.toml` and database-path resolution is
//! consistent everywhere.

use std::io;
use std::path::{Path, PathBuf};

use tabletop_catalog::Locale;

/// Canonical path to the shared settings file: `~/.config/tabletop/settings.toml`.
pub fn settings_path() -> PathBuf {
    let config = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
    config.join("tabletop").join("settings.toml")
}

/// Default collection database: `<data dir>/tabletop/collection.db`.
pub fn default_db_path() -> PathBuf {
    let data = dirs::data_dir().unwrap_or_else(|| PathBuf::from("."));
    data.join("tabletop").join("collection.db")
}

/// Resolve the database path using a priority chain:
///
/// 1. CLI override (if `Some`)
/// 2. Saved `database.path` in `settings.toml`
/// 3. [`default_db_path`]
pub fn resolve_db_path(cli_override: Option<PathBuf>) -> PathBuf {
    SettingsFile::default_location().resolve_db_path(cli_override)
}

/// Save (or clear) the database path in `settings.toml`.
pub fn save_db_path(path: Option<&Path>) -> io::Result<()> {
    SettingsFile::default_location().set_db_path(path)
}

/// The saved display locale, English when unset or unrecognised.
pub fn load_locale() -> Locale {
    SettingsFile::default_location().locale()
}

pub fn save_locale(locale: Locale) -> io::Result<()> {
    SettingsFile::default_location().set_locale(locale)
}

/// Load the full settings file as a pretty-printed TOML string for display.
pub fn load_settings_string() -> Option<String> {
    SettingsFile::default_location().to_pretty_string()
}

/// A settings file at a specific location.
///
/// Updates go through `toml::Value` so keys this crate does not know about
/// are preserved, and are written atomically.
#[derive(Debug, Clone)]
pub struct SettingsFile {
    path: PathBuf,
}

impl SettingsFile {
    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn default_location() -> Self {
        Self::at(settings_path())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn resolve_db_path(&self, cli_override: Option<PathBuf>) -> PathBuf {
        if let Some(p) = cli_override {
            return p;
        }
        if let Some(p) = self.db_path() {
            return p;
        }
        default_db_path()
    }

    /// `database.path`, if set and non-empty.
    pub fn db_path(&self) -> Option<PathBuf> {
        let doc = self.read()?;
        let path = doc.get("database")?.get("path")?.as_str()?;
        if path.is_empty() {
            None
        } else {
            Some(PathBuf::from(path))
        }
    }

    pub fn set_db_path(&self, path: Option<&Path>) -> io::Result<()> {
        let value = path.map(|p| toml::Value::String(p.to_string_lossy().into_owned()));
        self.update("database", "path", value)
    }

    pub fn locale(&self) -> Locale {
        self.read()
            .and_then(|doc| {
                let code = doc.get("display")?.get("locale")?.as_str()?.to_string();
                Locale::from_code(&code)
            })
            .unwrap_or_default()
    }

    pub fn set_locale(&self, locale: Locale) -> io::Result<()> {
        self.update(
            "display",
            "locale",
            Some(toml::Value::String(locale.code().to_string())),
        )
    }

    pub fn to_pretty_string(&self) -> Option<String> {
        toml::to_string_pretty(&self.read()?).ok()
    }

    fn read(&self) -> Option<toml::Value> {
        let contents = std::fs::read_to_string(&self.path).ok()?;
        contents.parse().ok()
    }

    /// Set (or remove, for `None`) `[section] key` and write the file back.
    fn update(&self, section: &str, key: &str, value: Option<toml::Value>) -> io::Result<()> {
        let mut doc = self
            .read()
            .unwrap_or_else(|| toml::Value::Table(Default::default()));

        let table = doc
            .as_table_mut()
            .ok_or_else(|| io::Error::other("settings.toml root is not a table"))?;
        let section_value = table
            .entry(section)
            .or_insert_with(|| toml::Value::Table(Default::default()));
        let section_table = section_value
            .as_table_mut()
            .ok_or_else(|| io::Error::other(format!("[{section}] is not a table")))?;

        match value {
            Some(v) => {
                section_table.insert(key.to_string(), v);
            }
            None => {
                section_table.remove(key);
            }
        }

        // Write atomically
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let serialized = toml::to_string_pretty(&doc).map_err(io::Error::other)?;
        let tmp = self.path.with_extension("toml.tmp");
        std::fs::write(&tmp, &serialized)?;
        std::fs::rename(&tmp, &self.path)?;

        log::debug!("updated {section}.{key} in {}", self.path.display());
        Ok(())
    }
}
