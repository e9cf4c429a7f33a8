pub mod properties;

use log::{debug, info, warn};
use std::path::PathBuf;
use std::time::Duration;

use crate::constants::{
    DEFAULT_FREQUENCY_SECS, DEFAULT_OCR_BINARY, DEFAULT_OCR_PARAMETER, KEY_EXTENSIONS,
    KEY_OCR_PARAMETER, KEY_OCR_PARAMETER_ALIAS,
};
use crate::services::filter::ExtensionSet;
use crate::services::ocr::InvocationStyle;
use properties::{Properties, find_properties_file};

/// Configuration snapshot for one pass. Overrides derive a new value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub input_dir: PathBuf,
    pub output_dir: PathBuf,
    pub ocr_binary: String,
    pub ocr_parameter: String,
    pub interval: Duration,
    pub extensions: ExtensionSet,
    pub invocation: InvocationStyle,
    pub pre_hook: Option<String>,
    pub post_hook: Option<String>,
}

impl Config {
    /// Snapshot with built-in defaults for everything but the two folders.
    pub fn new(input_dir: PathBuf, output_dir: PathBuf) -> Self {
        Self {
            input_dir,
            output_dir,
            ocr_binary: DEFAULT_OCR_BINARY.to_string(),
            ocr_parameter: DEFAULT_OCR_PARAMETER.to_string(),
            interval: Duration::from_secs(DEFAULT_FREQUENCY_SECS),
            extensions: ExtensionSet::default(),
            invocation: InvocationStyle::default(),
            pre_hook: None,
            post_hook: None,
        }
    }

    /// Copy of `self` with the OCR parameter and extension overrides applied.
    pub fn with_properties(&self, props: &Properties) -> Config {
        let mut derived = self.clone();
        if let Some(parameter) = props
            .get(KEY_OCR_PARAMETER)
            .or_else(|| props.get(KEY_OCR_PARAMETER_ALIAS))
        {
            derived.ocr_parameter = parameter.to_string();
        }
        if let Some(extensions) = props.get(KEY_EXTENSIONS) {
            derived.extensions = ExtensionSet::parse(extensions);
        }
        derived
    }

    /// Snapshot for the coming pass: `self` merged with the first properties
    /// file under the input directory. Any problem falls back to `self`.
    pub fn resolve_pass(&self) -> Config {
        let Some(path) = find_properties_file(&self.input_dir) else {
            return self.clone();
        };
        match Properties::load(&path) {
            Ok(props) => {
                let derived = self.with_properties(&props);
                if derived != *self {
                    debug!("Using overrides from {:?}", path);
                }
                derived
            }
            Err(e) => {
                warn!("Ignoring properties file: {}", e);
                self.clone()
            }
        }
    }

    pub fn log_summary(&self) {
        info!("Watchdog started with:");
        info!("in = {}", self.input_dir.display());
        info!("out = {}", self.output_dir.display());
        info!("Frequency = {} seconds", self.interval.as_secs());
        info!("Extensions to look for: {}", self.extensions);
        info!("OCR binary = {}", self.ocr_binary);
        info!("OCR parameter = {}", self.ocr_parameter);
        info!("Invocation = {}", self.invocation);
        info!("PreScript = {}", self.pre_hook.as_deref().unwrap_or(""));
        info!("PostScript = {}", self.post_hook.as_deref().unwrap_or(""));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::Path;
    use tempfile::TempDir;

    fn base(input: &Path) -> Config {
        Config::new(input.to_path_buf(), PathBuf::from("/out"))
    }

    #[test]
    fn defaults() {
        let config = Config::new(PathBuf::from("/in"), PathBuf::from("/out"));
        assert_eq!(config.ocr_binary, "ocrmypdf");
        assert_eq!(
            config.ocr_parameter,
            "-l eng+fra+deu --rotate-pages --deskew --jobs 4 --output-type pdfa"
        );
        assert_eq!(config.interval, Duration::from_secs(1));
        assert_eq!(config.extensions, ExtensionSet::default());
        assert_eq!(config.pre_hook, None);
    }

    #[test]
    fn overrides_only_parameter_and_extensions() {
        let config = base(Path::new("/in"));
        let props = Properties::parse(
            "OCRMYPDF_PARAMETER=-l deu\nWATCHDOG_EXTENSIONS=png\nOCRMYPDF_BINARY=/bin/false\n",
        );

        let derived = config.with_properties(&props);

        assert_eq!(derived.ocr_parameter, "-l deu");
        assert_eq!(derived.extensions, ExtensionSet::parse("png"));
        assert_eq!(derived.ocr_binary, config.ocr_binary);
        // the base snapshot is untouched
        assert_eq!(config.extensions, ExtensionSet::default());
    }

    #[test]
    fn parameter_alias_is_accepted() {
        let config = base(Path::new("/in"));
        let derived = config.with_properties(&Properties::parse("OCR_PARAMETER=--jobs 1"));
        assert_eq!(derived.ocr_parameter, "--jobs 1");
    }

    #[test]
    fn resolve_without_properties_returns_base() {
        let dir = TempDir::new().unwrap();
        let config = base(dir.path());
        assert_eq!(config.resolve_pass(), config);
    }

    #[test]
    fn resolve_reads_properties_from_input_dir() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join("watchdog.properties"),
            "WATCHDOG_EXTENSIONS = tif , TIFF\n",
        )
        .unwrap();
        let config = base(dir.path());

        let resolved = config.resolve_pass();

        assert_eq!(resolved.extensions, ExtensionSet::parse("tif,tiff"));
        assert_eq!(resolved.ocr_parameter, config.ocr_parameter);
    }

    #[test]
    fn resolve_on_missing_input_dir_returns_base() {
        let config = base(Path::new("/definitely/not/here"));
        assert_eq!(config.resolve_pass(), config);
    }
}
