use log::{debug, error, warn};
use std::fs;
use std::path::{Path, PathBuf};

use crate::constants::CLAIM_RAND_BYTES;
use crate::error::{WatchdogError, WatchdogResult};

/// Exclusive ownership of a document, held under a private sibling name.
///
/// While a `ClaimedFile` is alive the original path does not exist. Dropping
/// it removes the private file, so callers must either [`restore`] on failure
/// or let it drop once the converted output is safely placed.
///
/// [`restore`]: ClaimedFile::restore
#[derive(Debug)]
pub struct ClaimedFile {
    original: PathBuf,
    claimed: PathBuf,
    armed: bool,
}

impl ClaimedFile {
    /// Renames `path` to `<stem>.<random>.<ext>` in the same directory.
    ///
    /// The random name is reserved by creating and deleting an empty temp
    /// file first; the rename then fails if a writer still holds the path
    /// in a way the platform refuses, or if the file vanished.
    pub fn claim(path: &Path) -> WatchdogResult<Self> {
        let directory = path.parent().unwrap_or_else(|| Path::new("."));
        let stem = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        let suffix = path
            .extension()
            .map(|e| format!(".{}", e.to_string_lossy()))
            .unwrap_or_default();

        let reservation = tempfile::Builder::new()
            .prefix(&format!("{stem}."))
            .suffix(&suffix)
            .rand_bytes(CLAIM_RAND_BYTES)
            .tempfile_in(directory)
            .map_err(|e| WatchdogError::TempFile {
                path: path.to_path_buf(),
                source: e,
            })?;
        let claimed = reservation.path().to_path_buf();
        reservation.close().map_err(|e| WatchdogError::TempFile {
            path: path.to_path_buf(),
            source: e,
        })?;

        fs::rename(path, &claimed).map_err(|e| WatchdogError::Claim {
            path: path.to_path_buf(),
            source: e,
        })?;
        debug!("Claimed {:?} as {:?}", path, claimed);

        Ok(Self {
            original: path.to_path_buf(),
            claimed,
            armed: true,
        })
    }

    pub fn original(&self) -> &Path {
        &self.original
    }

    /// Private path the OCR step reads from.
    pub fn path(&self) -> &Path {
        &self.claimed
    }

    /// Puts the document back under its original name for the next pass.
    pub fn restore(mut self) -> WatchdogResult<()> {
        match fs::rename(&self.claimed, &self.original) {
            Ok(()) => {
                debug!("Restored {:?}", self.original);
                Ok(())
            }
            Err(e) => {
                // keep the only copy on disk
                self.armed = false;
                error!(
                    "Cannot restore {:?} from {:?}, leaving it in place: {}",
                    self.original, self.claimed, e
                );
                Err(WatchdogError::Claim {
                    path: self.original.clone(),
                    source: e,
                })
            }
        }
    }
}

impl Drop for ClaimedFile {
    fn drop(&mut self) {
        if !self.armed {
            return;
        }
        match fs::remove_file(&self.claimed) {
            Ok(()) => debug!("Removed claimed file {:?}", self.claimed),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => warn!("Cannot remove claimed file {:?}: {}", self.claimed, e),
        }
    }
}
