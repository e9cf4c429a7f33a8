use log::{info, warn};
use std::fs;
use std::path::{Path, PathBuf};

use crate::constants::{OUTPUT_EXT, PROVISIONAL_EXT};
use crate::error::{WatchdogError, WatchdogResult};

/// Target naming for one document in the output directory.
pub struct OutputPlacer {
    output_dir: PathBuf,
    stem: String,
}

impl OutputPlacer {
    pub fn new(output_dir: &Path, stem: &str) -> Self {
        Self {
            output_dir: output_dir.to_path_buf(),
            stem: stem.to_string(),
        }
    }

    /// Where the OCR tool writes, so a partial file never carries the final name.
    pub fn provisional(&self) -> PathBuf {
        self.output_dir
            .join(format!("{}.{}", self.stem, PROVISIONAL_EXT))
    }

    /// First free name among `<stem>.pdf`, `<stem>_1.pdf`, `<stem>_2.pdf`, ...
    pub fn free_target(&self) -> PathBuf {
        let first = self.output_dir.join(format!("{}.{}", self.stem, OUTPUT_EXT));
        if !exists(&first) {
            return first;
        }
        (1u64..)
            .map(|n| {
                self.output_dir
                    .join(format!("{}_{}.{}", self.stem, n, OUTPUT_EXT))
            })
            .find(|candidate| !exists(candidate))
            .unwrap_or(first)
    }

    /// Moves the provisional output to its final, collision free name.
    pub fn place(&self) -> WatchdogResult<PathBuf> {
        let provisional = self.provisional();
        let target = self.free_target();
        fs::rename(&provisional, &target).map_err(|e| WatchdogError::Placement {
            path: target.clone(),
            source: e,
        })?;
        info!("Placed {:?}", target);
        Ok(target)
    }

    /// Drops whatever a failed run left behind under the provisional name.
    pub fn discard(&self) {
        let provisional = self.provisional();
        match fs::remove_file(&provisional) {
            Ok(()) => info!("Discarded partial output {:?}", provisional),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => warn!("Cannot discard partial output {:?}: {}", provisional, e),
        }
    }
}

// symlink_metadata so a dangling link still counts as taken
fn exists(path: &Path) -> bool {
    fs::symlink_metadata(path).is_ok()
}
