//! Persisted per-field encoding preferences.
//!
//! Preferences are scoped by index path, field name and category, so the same
//! field name in two indexes, or the same field in two views, keep separate
//! choices.

use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};

use marple_common::{Error, Result};
use serde::{Deserialize, Serialize};

pub trait EncodingPreferences {
    /// The persisted encoding of `field`, if one was ever stored.
    fn field_encoding(&self, index_path: &str, field: &str, category: &str) -> Option<String>;

    fn set_field_encoding(
        &mut self,
        index_path: &str,
        field: &str,
        category: &str,
        encoding: &str,
    ) -> Result<()>;
}

impl<T: EncodingPreferences + ?Sized> EncodingPreferences for Box<T> {
    fn field_encoding(&self, index_path: &str, field: &str, category: &str) -> Option<String> {
        (**self).field_encoding(index_path, field, category)
    }

    fn set_field_encoding(
        &mut self,
        index_path: &str,
        field: &str,
        category: &str,
        encoding: &str,
    ) -> Result<()> {
        (**self).set_field_encoding(index_path, field, category, encoding)
    }
}

/// Preferences held in memory for the lifetime of the process.
#[derive(Debug, Default, Clone)]
pub struct MemoryPreferences {
    entries: HashMap<(String, String, String), String>,
}

impl MemoryPreferences {
    pub fn new() -> MemoryPreferences {
        MemoryPreferences::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl EncodingPreferences for MemoryPreferences {
    fn field_encoding(&self, index_path: &str, field: &str, category: &str) -> Option<String> {
        self.entries
            .get(&(index_path.to_string(), field.to_string(), category.to_string()))
            .cloned()
    }

    fn set_field_encoding(
        &mut self,
        index_path: &str,
        field: &str,
        category: &str,
        encoding: &str,
    ) -> Result<()> {
        self.entries.insert(
            (index_path.to_string(), field.to_string(), category.to_string()),
            encoding.to_string(),
        );
        Ok(())
    }
}

/// index path -> field -> category -> encoding
type PreferenceTree = BTreeMap<String, BTreeMap<String, BTreeMap<String, String>>>;

/// Preferences stored in a JSON file, rewritten on every change.
#[derive(Debug, Clone)]
pub struct JsonFilePreferences {
    path: PathBuf,
    entries: PreferenceTree,
}

#[derive(Serialize, Deserialize)]
struct PreferencesFile {
    #[serde(default)]
    encodings: PreferenceTree,
}

impl JsonFilePreferences {
    /// Opens the preferences stored at `path`. A missing file starts empty and
    /// is created on the first change.
    pub fn open(path: impl Into<PathBuf>) -> Result<JsonFilePreferences> {
        let path = path.into();
        let entries = match std::fs::read_to_string(&path) {
            Ok(json) => {
                let file: PreferencesFile = serde_json::from_str(&json)
                    .map_err(|e| Error::json(path.display().to_string(), e))?;
                file.encodings
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => PreferenceTree::new(),
            Err(e) => return Err(Error::io(path.display().to_string(), e)),
        };
        Ok(JsonFilePreferences { path, entries })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn save(&self) -> Result<()> {
        let file = PreferencesFile {
            encodings: self.entries.clone(),
        };
        let json = serde_json::to_string_pretty(&file)
            .map_err(|e| Error::json(self.path.display().to_string(), e))?;
        std::fs::write(&self.path, json).map_err(|e| Error::io(self.path.display().to_string(), e))
    }
}

impl EncodingPreferences for JsonFilePreferences {
    fn field_encoding(&self, index_path: &str, field: &str, category: &str) -> Option<String> {
        self.entries
            .get(index_path)
            .and_then(|fields| fields.get(field))
            .and_then(|categories| categories.get(category))
            .cloned()
    }

    fn set_field_encoding(
        &mut self,
        index_path: &str,
        field: &str,
        category: &str,
        encoding: &str,
    ) -> Result<()> {
        self.entries
            .entry(index_path.to_string())
            .or_default()
            .entry(field.to_string())
            .or_default()
            .insert(category.to_string(), encoding.to_string());
        self.save()
    }
}
