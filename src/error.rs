use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum WatchdogError {
    #[error("cannot walk input directory {root:?}: {source}")]
    Walk {
        root: PathBuf,
        #[source]
        source: walkdir::Error,
    },

    #[error("unable to create claim file next to {path:?}: {source}")]
    TempFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot claim {path:?}: {source}")]
    Claim {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to launch {program}: {source}")]
    Launch {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("conversion of {path:?} failed with {status}")]
    ConversionFailed { path: PathBuf, status: String },

    #[error("cannot place output {path:?}: {source}")]
    Placement {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot read properties file {path:?}: {source}")]
    Properties {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub type WatchdogResult<T> = Result<T, WatchdogError>;
