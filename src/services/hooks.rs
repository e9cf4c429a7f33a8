use log::{info, warn};
use std::path::{Path, PathBuf};
use std::process::Command;

use crate::constants::HOOK_SHELL;

/// Outcome of trying to run a configured hook script.
#[derive(Debug, PartialEq, Eq)]
pub enum HookOutcome {
    NotConfigured,
    Missing(PathBuf),
    Ran { success: bool },
    LaunchFailed,
}

/// Runs `<dir>/<script>` with no arguments. Never fails the caller:
/// a missing script is a warning, a failing one is only logged.
pub fn run_hook(dir: &Path, script: Option<&str>) -> HookOutcome {
    let Some(script) = script.filter(|s| !s.trim().is_empty()) else {
        return HookOutcome::NotConfigured;
    };

    let path = dir.join(script);
    if !path.is_file() {
        warn!("Could not find script {:?}", path);
        return HookOutcome::Missing(path);
    }

    info!("Run script {:?}", path);
    match Command::new(HOOK_SHELL).arg("-c").arg(&path).output() {
        Ok(output) => {
            let mut combined = String::from_utf8_lossy(&output.stdout).into_owned();
            combined.push_str(&String::from_utf8_lossy(&output.stderr));
            if !combined.trim().is_empty() {
                info!("{}", combined.trim_end());
            }
            info!("Script finished with result {}", output.status);
            HookOutcome::Ran {
                success: output.status.success(),
            }
        }
        Err(e) => {
            warn!("Failed to run script {:?}: {}", path, e);
            HookOutcome::LaunchFailed
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn unset_or_blank_hook_is_skipped() {
        let dir = TempDir::new().unwrap();
        assert_eq!(run_hook(dir.path(), None), HookOutcome::NotConfigured);
        assert_eq!(run_hook(dir.path(), Some("  ")), HookOutcome::NotConfigured);
    }

    #[test]
    fn missing_hook_is_reported_not_run() {
        let dir = TempDir::new().unwrap();
        assert_eq!(
            run_hook(dir.path(), Some("before.sh")),
            HookOutcome::Missing(dir.path().join("before.sh"))
        );
    }

    #[test]
    fn directory_is_not_a_hook() {
        let dir = TempDir::new().unwrap();
        std::fs::create_dir(dir.path().join("hooks")).unwrap();
        assert!(matches!(
            run_hook(dir.path(), Some("hooks")),
            HookOutcome::Missing(_)
        ));
    }
}
