use clap::Parser;
use log::warn;
use std::convert::Infallible;
use std::path::PathBuf;
use std::time::Duration;

use crate::config::Config;
use crate::constants::{DEFAULT_FREQUENCY_SECS, DEFAULT_OCR_BINARY, DEFAULT_OCR_PARAMETER};
use crate::services::filter::ExtensionSet;
use crate::services::ocr::InvocationStyle;

#[derive(Parser, Debug)]
#[command(name = "ocr-watchdog")]
#[command(author, version, about = "Watches a folder and runs new documents through OCR", long_about = None)]
pub struct Cli {
    /// Input folder to watch
    #[arg(long = "in", env = "OCRMYPDF_IN", value_name = "DIR")]
    pub input: PathBuf,

    /// Output folder for converted documents
    #[arg(long = "out", env = "OCRMYPDF_OUT", value_name = "DIR")]
    pub output: PathBuf,

    /// OCR binary to use
    #[arg(long = "ocrmypdf", env = "OCRMYPDF_BINARY", default_value = DEFAULT_OCR_BINARY)]
    pub binary: String,

    /// Parameters passed to the OCR binary, space separated
    #[arg(
        long,
        env = "OCRMYPDF_PARAMETER",
        default_value = DEFAULT_OCR_PARAMETER,
        allow_hyphen_values = true
    )]
    pub parameter: String,

    /// Seconds to wait between two scans
    #[arg(
        long,
        env = "WATCHDOG_FREQUENCY",
        default_value_t = DEFAULT_FREQUENCY_SECS,
        value_parser = lenient_frequency
    )]
    pub frequency: u64,

    /// Comma separated list of extensions to pick up
    #[arg(long, env = "WATCHDOG_EXTENSIONS", default_value = "")]
    pub extensions: String,

    /// Name of the script in the input folder to run before each document
    #[arg(long, env = "WATCHDOG_PRESCRIPT")]
    pub prescript: Option<String>,

    /// Name of the script in the output folder to run after each document
    #[arg(long, env = "WATCHDOG_POSTSCRIPT")]
    pub postscript: Option<String>,

    /// How parameters and paths are passed to the OCR binary
    #[arg(long, value_enum, env = "OCRMYPDF_INVOCATION", default_value_t = InvocationStyle::Positional)]
    pub invocation: InvocationStyle,

    /// Run a single pass and exit
    #[arg(long)]
    pub once: bool,
}

impl Cli {
    /// Base configuration snapshot. Blank values fall back to the defaults.
    pub fn to_config(&self) -> Config {
        let mut config = Config::new(self.input.clone(), self.output.clone());
        if !self.binary.trim().is_empty() {
            config.ocr_binary = self.binary.trim().to_string();
        }
        if !self.parameter.trim().is_empty() {
            config.ocr_parameter = self.parameter.clone();
        }
        config.interval = Duration::from_secs(self.frequency);
        config.extensions = ExtensionSet::parse(&self.extensions);
        config.invocation = self.invocation;
        config.pre_hook = non_blank(self.prescript.as_deref());
        config.post_hook = non_blank(self.postscript.as_deref());
        config
    }
}

/// Unparsable intervals fall back to the default instead of aborting startup.
fn lenient_frequency(value: &str) -> Result<u64, Infallible> {
    Ok(value.trim().parse().unwrap_or_else(|_| {
        warn!(
            "Invalid WATCHDOG_FREQUENCY {:?}, using {}s",
            value, DEFAULT_FREQUENCY_SECS
        );
        DEFAULT_FREQUENCY_SECS
    }))
}

fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}
