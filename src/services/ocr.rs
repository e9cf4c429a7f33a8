use log::{error, info};
use std::ffi::OsString;
use std::fmt;
use std::path::Path;
use std::process::{Command, ExitStatus};

use crate::config::Config;
use crate::error::{WatchdogError, WatchdogResult};

/// How the OCR parameters and the two paths are handed to the binary.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum InvocationStyle {
    /// Parameters split on spaces, then source and target as the last two arguments.
    #[default]
    Positional,
    /// Parameters and single-quoted paths joined into one argument.
    Combined,
}

impl fmt::Display for InvocationStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InvocationStyle::Positional => write!(f, "positional"),
            InvocationStyle::Combined => write!(f, "combined"),
        }
    }
}

/// A fully assembled subprocess call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub program: OsString,
    pub args: Vec<OsString>,
}

impl Invocation {
    pub fn display(&self) -> String {
        let mut line = self.program.to_string_lossy().into_owned();
        for arg in &self.args {
            line.push(' ');
            line.push_str(&arg.to_string_lossy());
        }
        line
    }

    /// Runs the command to completion, blocking the caller.
    pub fn run(&self) -> WatchdogResult<ConversionResult> {
        let output = Command::new(&self.program)
            .args(&self.args)
            .output()
            .map_err(|e| WatchdogError::Launch {
                program: self.program.to_string_lossy().into_owned(),
                source: e,
            })?;

        let mut combined = String::from_utf8_lossy(&output.stdout).into_owned();
        combined.push_str(&String::from_utf8_lossy(&output.stderr));

        Ok(ConversionResult {
            status: output.status,
            output: combined,
        })
    }
}

/// Exit status and captured stdout/stderr of one subprocess run.
#[derive(Debug)]
pub struct ConversionResult {
    pub status: ExitStatus,
    pub output: String,
}

impl ConversionResult {
    pub fn success(&self) -> bool {
        self.status.success()
    }
}

/// Builds OCR command lines from a configuration snapshot.
pub struct OcrCommand<'a> {
    binary: &'a str,
    parameter: &'a str,
    style: InvocationStyle,
}

impl<'a> OcrCommand<'a> {
    pub fn new(config: &'a Config) -> Self {
        Self {
            binary: &config.ocr_binary,
            parameter: &config.ocr_parameter,
            style: config.invocation,
        }
    }

    pub fn invocation(&self, source: &Path, target: &Path) -> Invocation {
        match self.style {
            InvocationStyle::Positional => {
                let mut args: Vec<OsString> = self
                    .parameter
                    .split(' ')
                    .filter(|token| !token.is_empty())
                    .map(OsString::from)
                    .collect();
                args.push(source.as_os_str().to_owned());
                args.push(target.as_os_str().to_owned());
                Invocation {
                    program: OsString::from(self.binary),
                    args,
                }
            }
            InvocationStyle::Combined => {
                let mut line = String::new();
                if !self.parameter.trim().is_empty() {
                    line.push_str(self.parameter.trim());
                    line.push(' ');
                }
                line.push_str(&shell_quote(&source.to_string_lossy()));
                line.push(' ');
                line.push_str(&shell_quote(&target.to_string_lossy()));
                Invocation {
                    program: OsString::from(self.binary),
                    args: vec![OsString::from(line)],
                }
            }
        }
    }

    /// Converts `source` into `target`. Launch errors and non-zero exits are failures.
    pub fn convert(&self, source: &Path, target: &Path) -> WatchdogResult<ConversionResult> {
        let invocation = self.invocation(source, target);
        info!("Run command >{}<", invocation.display());

        let result = invocation.run()?;
        if !result.output.trim().is_empty() {
            info!("{}", result.output.trim_end());
        }
        info!("Job finished with result {}", result.status);

        if !result.success() {
            error!("OCR of {:?} failed: {}", source, result.status);
            return Err(WatchdogError::ConversionFailed {
                path: source.to_path_buf(),
                status: result.status.to_string(),
            });
        }
        Ok(result)
    }
}

fn shell_quote(s: &str) -> String {
    format!("'{}'", s.replace('\'', r"'\''"))
}
