// src/constants.rs

pub const DEFAULT_OCR_BINARY: &str = "ocrmypdf";
pub const DEFAULT_OCR_PARAMETER: &str =
    "-l eng+fra+deu --rotate-pages --deskew --jobs 4 --output-type pdfa";
pub const DEFAULT_FREQUENCY_SECS: u64 = 1;

// Eligible document extensions
pub const DEFAULT_EXTENSIONS: &[&str] = &["pdf", "tif", "tiff", "jpg", "jpeg", "png", "gif"];

// Properties override file
pub const PROPERTIES_SUFFIX: &str = ".properties";
pub const KEY_OCR_PARAMETER: &str = "OCRMYPDF_PARAMETER";
pub const KEY_OCR_PARAMETER_ALIAS: &str = "OCR_PARAMETER";
pub const KEY_EXTENSIONS: &str = "WATCHDOG_EXTENSIONS";

// Output naming
pub const PROVISIONAL_EXT: &str = "tmp";
pub const OUTPUT_EXT: &str = "pdf";

// Random segment length of a claim name
pub const CLAIM_RAND_BYTES: usize = 6;

pub const HOOK_SHELL: &str = "bash";
