use std::path::PathBuf;
use thiserror::Error;

use crate::state::TrackedKind;

/// Failures of the backup, import and restore operations
#[derive(Debug, Error)]
pub enum BackupError {
    #[error("Please load all files first! Missing: {}", names(.0))]
    NotLoaded(Vec<TrackedKind>),

    #[error("Please select a valid zip file! ({})", .0.display())]
    NotAnArchive(PathBuf),

    #[error("No backup files found to restore! ({} does not exist)", .0.display())]
    NoStaging(PathBuf),

    #[error("{} is not a valid directory!", .0.display())]
    NotADirectory(PathBuf),

    #[error("{}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Zip(#[from] zip::result::ZipError),
}

impl BackupError {
    pub(crate) fn io(path: impl Into<PathBuf>) -> impl FnOnce(std::io::Error) -> Self {
        let path = path.into();
        move |source| BackupError::Io { path, source }
    }
}

fn names(kinds: &[TrackedKind]) -> String {
    kinds
        .iter()
        .map(|kind| kind.file_name())
        .collect::<Vec<_>>()
        .join(", ")
}

pub type Result<T> = std::result::Result<T, BackupError>;
