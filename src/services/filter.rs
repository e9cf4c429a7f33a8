use std::fmt;
use std::path::Path;

use crate::constants::DEFAULT_EXTENSIONS;

/// Lowercased set of document extensions, without the leading dot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtensionSet {
    extensions: Vec<String>,
}

impl ExtensionSet {
    /// Parses a comma separated list such as `"pdf, TIFF,png"`.
    ///
    /// Entries are trimmed and lowercased; a list with no usable entries
    /// falls back to the default document extensions.
    pub fn parse(list: &str) -> Self {
        let extensions: Vec<String> = list
            .split(',')
            .map(|s| s.trim().trim_start_matches('.').to_lowercase())
            .filter(|s| !s.is_empty())
            .collect();

        if extensions.is_empty() {
            return Self::default();
        }
        Self { extensions }
    }

    /// Returns true iff the lowercased path ends with `.` + one of the extensions.
    pub fn matches(&self, path: &Path) -> bool {
        let lowered = path.to_string_lossy().to_lowercase();
        self.extensions.iter().any(|ext| {
            lowered
                .strip_suffix(ext.as_str())
                .is_some_and(|rest| rest.ends_with('.'))
        })
    }
}

impl Default for ExtensionSet {
    fn default() -> Self {
        Self {
            extensions: DEFAULT_EXTENSIONS.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl fmt::Display for ExtensionSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.extensions.join(","))
    }
}
