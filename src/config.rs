use anyhow::Result;
use std::collections::HashMap;
use std::path::Path;

/// Maps interface keys to the names shown in reports and charts.
///
/// Stored as a plain JSON object on disk:
/// ```json
/// {
///   "keyboard": "Tastatur",
///   "voice": "Tale",
///   "touch": "Berøring"
/// }
/// ```
/// Keys without an entry are shown capitalized (`voice` → `Voice`).
#[derive(Debug, Default, Clone)]
pub struct DisplayNames {
    entries: HashMap<String, String>,
}

impl DisplayNames {
    /// Loads the table from a JSON file at `path`. Keys are matched
    /// case-insensitively.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let entries: HashMap<String, String> = serde_json::from_str(&content)?;
        Ok(Self::from_entries(entries))
    }

    pub fn from_entries(entries: impl IntoIterator<Item = (String, String)>) -> Self {
        Self {
            entries: entries
                .into_iter()
                .map(|(k, v)| (k.trim().to_lowercase(), v))
                .collect(),
        }
    }

    /// Returns the display name for an interface key.
    pub fn resolve(&self, key: &str) -> String {
        match self.entries.get(key) {
            Some(name) => name.clone(),
            None => capitalize(key),
        }
    }

    /// Resolves a sequence of keys, preserving order.
    pub fn resolve_all<'a>(&self, keys: impl IntoIterator<Item = &'a str>) -> Vec<String> {
        keys.into_iter().map(|k| self.resolve(k)).collect()
    }
}

/// Upper-cases the first character and lower-cases the rest.
pub fn capitalize(key: &str) -> String {
    let mut chars = key.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}
