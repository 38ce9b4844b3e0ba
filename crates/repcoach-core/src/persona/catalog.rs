//! Read-only persona catalog.

use std::collections::BTreeMap;
use std::path::Path;

use serde::Deserialize;

use super::model::Persona;
use super::preset::get_default_presets;
use crate::error::Result;

/// TOML file shape: a `[[persona]]` table array.
#[derive(Debug, Deserialize)]
struct CatalogFile {
    #[serde(rename = "persona", default)]
    personas: Vec<Persona>,
}

/// Immutable persona lookup, loaded once at process start.
///
/// Backed by the built-in presets or by a TOML catalog file. Ordered by
/// key so listings are stable.
#[derive(Debug, Clone)]
pub struct PersonaCatalog {
    personas: BTreeMap<String, Persona>,
}

impl PersonaCatalog {
    /// Builds the catalog from the built-in presets.
    pub fn from_presets() -> Self {
        Self::from_personas(get_default_presets())
    }

    /// Loads the catalog from a TOML file of `[[persona]]` entries.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        let file: CatalogFile = toml::from_str(&raw)?;
        Ok(Self::from_personas(file.personas))
    }

    fn from_personas(personas: Vec<Persona>) -> Self {
        Self {
            personas: personas.into_iter().map(|p| (p.key.clone(), p)).collect(),
        }
    }

    /// Looks up a persona by key.
    pub fn get(&self, key: &str) -> Option<&Persona> {
        self.personas.get(key)
    }

    /// Whether the catalog contains the key.
    pub fn contains(&self, key: &str) -> bool {
        self.personas.contains_key(key)
    }

    /// All personas, ordered by key.
    pub fn all(&self) -> impl Iterator<Item = &Persona> {
        self.personas.values()
    }

    pub fn len(&self) -> usize {
        self.personas.len()
    }

    pub fn is_empty(&self) -> bool {
        self.personas.is_empty()
    }
}
