/// Restorer
///
/// Moves staged control files into a destination folder and resets the
/// staging directory afterwards, whatever the outcome of the moves.

use std::fs;
use std::path::Path;

use super::error::{BackupError, Result};
use crate::state::{TrackedFiles, TrackedKind};

/// Outcome of a restore that got past its preconditions
#[derive(Debug, Default)]
pub struct RestoreReport {
    /// Kinds moved into the destination (their tracked path now points there)
    pub moved: Vec<TrackedKind>,
    /// Staged kinds that were still in staging when cleanup removed them
    pub discarded: Vec<TrackedKind>,
    /// The move failure that stopped the restore, if any
    pub error: Option<BackupError>,
}

impl RestoreReport {
    pub fn is_success(&self) -> bool {
        self.error.is_none()
    }
}

/// Fail unless the staging directory exists
pub fn check_staging(staging_dir: &Path) -> Result<()> {
    if staging_dir.exists() {
        Ok(())
    } else {
        Err(BackupError::NoStaging(staging_dir.to_path_buf()))
    }
}

/// Move every staged tracked file into `dest_dir`
///
/// Files absent from staging are skipped. Precondition failures (no staging
/// directory, destination not a directory) return `Err` without touching
/// anything; once moving starts the staging directory is always emptied.
pub fn restore_backup(
    staging_dir: &Path,
    dest_dir: &Path,
    files: &mut TrackedFiles,
) -> Result<RestoreReport> {
    check_staging(staging_dir)?;
    if !dest_dir.is_dir() {
        return Err(BackupError::NotADirectory(dest_dir.to_path_buf()));
    }

    let mut report = RestoreReport::default();

    for (position, kind) in TrackedKind::ALL.into_iter().enumerate() {
        let source = staging_dir.join(kind.file_name());
        if !source.exists() {
            continue;
        }

        let dest = dest_dir.join(kind.file_name());
        match move_file(&source, &dest) {
            Ok(()) => {
                files.get_mut(kind).path = Some(dest);
                report.moved.push(kind);
            }
            Err(e) => {
                report.discarded = TrackedKind::ALL[position..]
                    .iter()
                    .copied()
                    .filter(|k| staging_dir.join(k.file_name()).exists())
                    .collect();
                report.error = Some(e);
                break;
            }
        }
    }

    for kind in &report.discarded {
        log::warn!(
            "Discarding staged {} that could not be restored",
            kind.file_name()
        );
    }
    reset_staging(staging_dir);

    log::info!(
        "♻️  Restored {} file(s) into {}",
        report.moved.len(),
        dest_dir.display()
    );
    Ok(report)
}

/// Delete the staging directory and recreate it empty
pub fn reset_staging(staging_dir: &Path) {
    if let Err(e) = fs::remove_dir_all(staging_dir) {
        log::debug!("Could not remove {}: {}", staging_dir.display(), e);
    }
    if let Err(e) = fs::create_dir_all(staging_dir) {
        log::error!("Failed to recreate {}: {}", staging_dir.display(), e);
    }
}

/// Move a file, falling back to copy + delete when rename fails (e.g. across devices)
fn move_file(src: &Path, dst: &Path) -> Result<()> {
    match fs::rename(src, dst) {
        Ok(()) => Ok(()),
        Err(e) => {
            log::warn!(
                "rename from {} to {} failed: {}. Falling back to copy+delete",
                src.display(),
                dst.display(),
                e
            );
            fs::copy(src, dst).map_err(BackupError::io(dst))?;
            fs::remove_file(src).map_err(BackupError::io(src))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use tempfile::tempdir;

    fn staging_with(dir: &Path, kinds: &[TrackedKind]) -> PathBuf {
        let staging = dir.join("temp_backup");
        fs::create_dir_all(&staging).unwrap();
        for kind in kinds {
            fs::write(staging.join(kind.file_name()), kind.file_name()).unwrap();
        }
        staging
    }

    fn is_empty_dir(path: &Path) -> bool {
        path.is_dir() && fs::read_dir(path).unwrap().next().is_none()
    }

    #[test]
    fn test_restore_moves_only_staged_files() {
        let dir = tempdir().unwrap();
        let staging = staging_with(dir.path(), &[TrackedKind::ControlMap, TrackedKind::DeviceList]);
        let dest = dir.path().join("input");
        fs::create_dir_all(&dest).unwrap();

        let mut files = TrackedFiles::new();
        let report = restore_backup(&staging, &dest, &mut files).unwrap();

        assert!(report.is_success());
        assert_eq!(report.moved, vec![TrackedKind::ControlMap, TrackedKind::DeviceList]);
        assert_eq!(
            files.get(TrackedKind::ControlMap).path.as_deref(),
            Some(dest.join("current.map").as_path())
        );
        assert!(files.get(TrackedKind::GlobalActions).path.is_none());
        assert_eq!(fs::read_to_string(dest.join("devices.txt")).unwrap(), "devices.txt");
        assert!(!dest.join("global.actions").exists());
        assert!(is_empty_dir(&staging));
    }

    #[test]
    fn test_restore_empties_staging_even_with_nothing_to_move() {
        let dir = tempdir().unwrap();
        let staging = staging_with(dir.path(), &[]);
        fs::write(staging.join("unrelated.txt"), "leftover").unwrap();
        let dest = tempdir().unwrap();

        let mut files = TrackedFiles::new();
        let report = restore_backup(&staging, dest.path(), &mut files).unwrap();

        assert!(report.moved.is_empty());
        assert!(is_empty_dir(&staging));
        assert!(!dest.path().join("unrelated.txt").exists());
    }

    #[test]
    fn test_restore_without_staging_fails() {
        let dir = tempdir().unwrap();
        let staging = dir.path().join("temp_backup");

        let mut files = TrackedFiles::new();
        let result = restore_backup(&staging, dir.path(), &mut files);

        assert!(matches!(result, Err(BackupError::NoStaging(_))));
        assert!(!staging.exists());
    }

    #[test]
    fn test_restore_to_non_directory_keeps_staging() {
        let dir = tempdir().unwrap();
        let staging = staging_with(dir.path(), &[TrackedKind::ControlMap]);
        let not_a_dir = dir.path().join("file.txt");
        fs::write(&not_a_dir, "x").unwrap();

        let mut files = TrackedFiles::new();
        let result = restore_backup(&staging, &not_a_dir, &mut files);

        assert!(matches!(result, Err(BackupError::NotADirectory(_))));
        assert!(staging.join("current.map").exists());
    }

    #[test]
    fn test_failed_move_reports_discarded_files() {
        let dir = tempdir().unwrap();
        let staging = staging_with(
            dir.path(),
            &[TrackedKind::ControlMap, TrackedKind::DeviceList, TrackedKind::CurrentResponses],
        );
        let dest = dir.path().join("input");
        fs::create_dir_all(&dest).unwrap();
        // A directory in the way makes the move of devices.txt fail
        fs::create_dir_all(dest.join("devices.txt").join("blocker")).unwrap();

        let mut files = TrackedFiles::new();
        let report = restore_backup(&staging, &dest, &mut files).unwrap();

        assert!(!report.is_success());
        assert_eq!(report.moved, vec![TrackedKind::ControlMap]);
        assert_eq!(
            report.discarded,
            vec![TrackedKind::DeviceList, TrackedKind::CurrentResponses]
        );
        assert!(files.get(TrackedKind::DeviceList).path.is_none());
        assert!(is_empty_dir(&staging));
    }
}
