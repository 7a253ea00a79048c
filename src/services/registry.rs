//! Module registry — ordered, read-only list of module descriptors.

use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::config::ConfigError;

/// A downstream service registered for dashboard display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModuleDescriptor {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Base origin, e.g. `http://localhost:8501`.
    pub url: String,
    /// Path appended to `url` when probing.
    #[serde(rename = "healthEndpoint", alias = "healthPath")]
    pub health_path: String,
    #[serde(default)]
    pub icon: String,
    #[serde(default)]
    pub category: String,
}

impl ModuleDescriptor {
    /// Full probe URL: `url` without trailing slash + `health_path` with a
    /// leading slash.
    #[must_use]
    pub fn health_url(&self) -> String {
        let base = self.url.trim_end_matches('/');
        if self.health_path.starts_with('/') {
            format!("{base}{}", self.health_path)
        } else {
            format!("{base}/{}", self.health_path)
        }
    }
}

#[derive(Deserialize)]
struct RegistryFile {
    modules: Vec<ModuleDescriptor>,
}

/// Registry preserving file order.
#[derive(Debug, Default)]
pub struct ModuleRegistry {
    modules: Vec<ModuleDescriptor>,
}

impl ModuleRegistry {
    /// # Errors
    ///
    /// Returns [`ConfigError::DuplicateModule`] if two descriptors share an id.
    pub fn new(modules: Vec<ModuleDescriptor>) -> Result<Self, ConfigError> {
        let mut seen = HashSet::with_capacity(modules.len());
        for module in &modules {
            if !seen.insert(module.id.as_str()) {
                return Err(ConfigError::DuplicateModule(module.id.clone()));
            }
        }
        Ok(Self { modules })
    }

    /// Load a `{"modules": [...]}` JSON file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file is unreadable, malformed, or contains
    /// duplicate ids.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Io { path: path.to_path_buf(), source })?;
        let file: RegistryFile =
            serde_json::from_str(&raw).map_err(|source| ConfigError::Parse { path: path.to_path_buf(), source })?;
        Self::new(file.modules)
    }

    /// All descriptors in registry order.
    #[must_use]
    pub fn list_modules(&self) -> &[ModuleDescriptor] {
        &self.modules
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.modules.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }
}

#[cfg(test)]
#[path = "registry_test.rs"]
mod tests;
