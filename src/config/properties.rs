use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::constants::PROPERTIES_SUFFIX;
use crate::error::{WatchdogError, WatchdogResult};

/// `key=value` pairs read from a properties override file.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Properties {
    values: HashMap<String, String>,
}

impl Properties {
    /// Lines without `=` or with an empty key are skipped; later keys win.
    pub fn parse(text: &str) -> Self {
        let mut values = HashMap::new();
        for line in text.lines() {
            let Some((key, value)) = line.split_once('=') else {
                continue;
            };
            let key = key.trim();
            if key.is_empty() {
                continue;
            }
            values.insert(key.to_string(), value.trim().to_string());
        }
        Self { values }
    }

    pub fn load(path: &Path) -> WatchdogResult<Self> {
        let text = fs::read_to_string(path).map_err(|e| WatchdogError::Properties {
            path: path.to_path_buf(),
            source: e,
        })?;
        Ok(Self::parse(&text))
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }
}

/// First file under `root` whose name ends in `.properties`, in file-name order.
pub fn find_properties_file(root: &Path) -> Option<PathBuf> {
    WalkDir::new(root)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|e| e.ok())
        .find(|entry| {
            entry.file_type().is_file()
                && entry
                    .file_name()
                    .to_string_lossy()
                    .ends_with(PROPERTIES_SUFFIX)
        })
        .map(|entry| entry.into_path())
}
