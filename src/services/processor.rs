use log::{error, info, warn};
use std::path::{Path, PathBuf};

use crate::config::Config;
use crate::error::WatchdogResult;
use crate::services::claim::ClaimedFile;
use crate::services::hooks::run_hook;
use crate::services::ocr::OcrCommand;
use crate::services::placer::OutputPlacer;

/// What happened to one candidate during a pass.
#[derive(Debug, PartialEq, Eq)]
pub enum DocumentOutcome {
    /// Converted and placed at the given output path.
    Converted(PathBuf),
    /// Conversion failed; the input is back under its original name.
    Restored,
    /// Conversion failed and the input could not be put back; it is left
    /// under the given claim path.
    Stranded(PathBuf),
    /// Could not be claimed this pass.
    Skipped,
}

/// Runs one document through pre-hook, claim, OCR, placement and post-hook.
/// Per-file errors are logged and folded into the outcome.
pub fn process_document(config: &Config, path: &Path) -> DocumentOutcome {
    run_hook(&config.input_dir, config.pre_hook.as_deref());
    info!("Processing file {:?}", path);

    let claim = match ClaimedFile::claim(path) {
        Ok(claim) => claim,
        Err(e) => {
            warn!("Cannot claim file, stopping here: {}", e);
            return DocumentOutcome::Skipped;
        }
    };

    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let placer = OutputPlacer::new(&config.output_dir, &stem);

    let outcome = match convert_and_place(config, &claim, &placer) {
        Ok(placed) => {
            // removes the private input copy
            drop(claim);
            DocumentOutcome::Converted(placed)
        }
        Err(e) => {
            error!("Processing {:?} failed: {}", claim.original(), e);
            placer.discard();
            let private = claim.path().to_path_buf();
            match claim.restore() {
                Ok(()) => DocumentOutcome::Restored,
                Err(e) => {
                    error!("{}", e);
                    DocumentOutcome::Stranded(private)
                }
            }
        }
    };

    run_hook(&config.output_dir, config.post_hook.as_deref());
    outcome
}

fn convert_and_place(
    config: &Config,
    claim: &ClaimedFile,
    placer: &OutputPlacer,
) -> WatchdogResult<PathBuf> {
    let provisional = placer.provisional();
    OcrCommand::new(config).convert(claim.path(), &provisional)?;
    placer.place()
}
