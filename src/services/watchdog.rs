use log::{debug, info, warn};
use std::fs;
use std::path::{Path, PathBuf};
use std::thread;
use walkdir::WalkDir;

use crate::config::Config;
use crate::error::{WatchdogError, WatchdogResult};
use crate::services::processor::{DocumentOutcome, process_document};

/// Counters for one scan-and-process pass.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct PassSummary {
    pub candidates: usize,
    pub converted: usize,
    pub restored: usize,
    pub stranded: usize,
    pub skipped: usize,
}

impl PassSummary {
    fn record(&mut self, outcome: &DocumentOutcome) {
        match outcome {
            DocumentOutcome::Converted(_) => self.converted += 1,
            DocumentOutcome::Restored => self.restored += 1,
            DocumentOutcome::Stranded(_) => self.stranded += 1,
            DocumentOutcome::Skipped => self.skipped += 1,
        }
    }
}

/// Polls the input folder and feeds every eligible document to the OCR tool.
pub struct Watchdog {
    config: Config,
}

impl Watchdog {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Scans and processes forever, sleeping the configured interval between passes.
    /// Only an unreadable input directory ends the loop.
    pub fn run(&self) -> WatchdogResult<()> {
        loop {
            self.run_pass()?;
            thread::sleep(self.config.interval);
        }
    }

    /// One pass: resolve the configuration snapshot, scan, process in walk order.
    pub fn run_pass(&self) -> WatchdogResult<PassSummary> {
        let snapshot = self.config.resolve_pass();
        let candidates = scan(&snapshot)?;

        let mut summary = PassSummary {
            candidates: candidates.len(),
            ..Default::default()
        };
        for path in &candidates {
            let outcome = process_document(&snapshot, path);
            summary.record(&outcome);
        }

        if summary.candidates > 0 {
            info!(
                "Pass finished: {} candidates, {} converted, {} restored, {} stranded, {} skipped",
                summary.candidates,
                summary.converted,
                summary.restored,
                summary.stranded,
                summary.skipped
            );
        } else {
            debug!("Pass finished: nothing to do");
        }
        Ok(summary)
    }
}

/// Walks the input directory and returns the eligible files in walk order.
///
/// Fails only when the input directory itself cannot be read; unreadable
/// entries below it are skipped. An output directory nested inside the input
/// directory is not descended into.
pub fn scan(config: &Config) -> WatchdogResult<Vec<PathBuf>> {
    let output_dir = fs::canonicalize(&config.output_dir).ok();
    let walker = WalkDir::new(&config.input_dir)
        .into_iter()
        .filter_entry(|entry| {
            !(entry.depth() > 0
                && entry.file_type().is_dir()
                && is_same_dir(entry.path(), output_dir.as_deref()))
        });

    let mut candidates = Vec::new();
    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) if e.depth() == 0 => {
                return Err(WatchdogError::Walk {
                    root: config.input_dir.clone(),
                    source: e,
                });
            }
            Err(e) => {
                warn!("Skipping unreadable entry: {}", e);
                continue;
            }
        };

        if entry.file_type().is_dir() {
            continue;
        }
        if config.extensions.matches(entry.path()) {
            candidates.push(entry.into_path());
        }
    }
    Ok(candidates)
}

fn is_same_dir(path: &Path, target: Option<&Path>) -> bool {
    match target {
        Some(target) => fs::canonicalize(path).is_ok_and(|p| p.as_path() == target),
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::filter::ExtensionSet;
    use tempfile::TempDir;

    fn config(root: &Path) -> Config {
        let input = root.join("in");
        let output = root.join("out");
        fs::create_dir_all(&input).unwrap();
        fs::create_dir_all(&output).unwrap();
        Config::new(input, output)
    }

    fn sorted(mut paths: Vec<PathBuf>) -> Vec<PathBuf> {
        paths.sort();
        paths
    }

    #[test]
    fn scan_collects_matching_files_recursively() {
        let root = TempDir::new().unwrap();
        let config = config(root.path());
        let input = &config.input_dir;
        fs::create_dir_all(input.join("batch/deeper")).unwrap();
        fs::create_dir(input.join("folder.pdf")).unwrap();
        for name in ["a.pdf", "b.JPG", "notes.txt", "batch/c.tiff", "batch/deeper/d.png"] {
            fs::write(input.join(name), b"").unwrap();
        }

        let found = sorted(scan(&config).unwrap());

        assert_eq!(
            found,
            vec![
                input.join("a.pdf"),
                input.join("b.JPG"),
                input.join("batch/c.tiff"),
                input.join("batch/deeper/d.png"),
            ]
        );
    }

    #[test]
    fn scan_honours_extension_set() {
        let root = TempDir::new().unwrap();
        let mut config = config(root.path());
        config.extensions = ExtensionSet::parse("tif");
        fs::write(config.input_dir.join("a.pdf"), b"").unwrap();
        fs::write(config.input_dir.join("b.TIF"), b"").unwrap();

        assert_eq!(scan(&config).unwrap(), vec![config.input_dir.join("b.TIF")]);
    }

    #[test]
    fn scan_skips_output_dir_inside_input_dir() {
        let root = TempDir::new().unwrap();
        let input = root.path().join("in");
        let output = input.join("done");
        fs::create_dir_all(&output).unwrap();
        fs::write(output.join("old.pdf"), b"").unwrap();
        fs::write(input.join("new.pdf"), b"").unwrap();
        let config = Config::new(input.clone(), output);

        assert_eq!(scan(&config).unwrap(), vec![input.join("new.pdf")]);
    }

    #[cfg(unix)]
    #[test]
    fn unreadable_subdirectory_is_skipped() {
        use std::os::unix::fs::PermissionsExt;

        let root = TempDir::new().unwrap();
        let config = config(root.path());
        let locked = config.input_dir.join("locked");
        fs::create_dir(&locked).unwrap();
        fs::write(locked.join("hidden.pdf"), b"").unwrap();
        fs::write(config.input_dir.join("a.pdf"), b"").unwrap();
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o000)).unwrap();

        // permission bits do not stop root
        if fs::read_dir(&locked).is_ok() {
            fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();
            return;
        }

        let found = scan(&config);
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();

        assert_eq!(found.unwrap(), vec![config.input_dir.join("a.pdf")]);
    }

    #[test]
    fn missing_input_dir_is_fatal() {
        let root = TempDir::new().unwrap();
        let config = Config::new(root.path().join("nope"), root.path().join("out"));

        let err = scan(&config).unwrap_err();
        assert!(matches!(err, WatchdogError::Walk { .. }));
        assert!(Watchdog::new(config).run_pass().is_err());
    }

    #[test]
    fn empty_pass_changes_nothing() {
        let root = TempDir::new().unwrap();
        let config = config(root.path());
        fs::write(config.output_dir.join("scan.pdf"), b"done").unwrap();
        fs::write(config.input_dir.join("readme.txt"), b"keep").unwrap();

        let summary = Watchdog::new(config.clone()).run_pass().unwrap();

        assert_eq!(summary, PassSummary::default());
        assert_eq!(fs::read_dir(&config.output_dir).unwrap().count(), 1);
        assert_eq!(fs::read(config.output_dir.join("scan.pdf")).unwrap(), b"done");
        assert_eq!(fs::read_dir(&config.input_dir).unwrap().count(), 1);
    }
}
