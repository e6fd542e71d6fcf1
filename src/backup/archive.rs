/// Backup archive writer and importer
///
/// Backups are plain zip files holding the four control files under their
/// base names. Importing extracts an archive into the staging directory.

use chrono::{Local, NaiveDateTime};
use std::fs::{self, File};
use std::io;
use std::path::{Path, PathBuf};
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipArchive, ZipWriter};

use super::error::{BackupError, Result};
use crate::state::TrackedFiles;

/// Suffix appended to the timestamp of every backup archive
pub const ARCHIVE_SUFFIX: &str = "_joystick_Backup.zip";

/// Archive file name for a backup taken at `timestamp`
pub fn archive_name(timestamp: NaiveDateTime) -> String {
    format!("{}{}", timestamp.format("%Y%m%d_%H%M%S"), ARCHIVE_SUFFIX)
}

/// Check whether `path` names a zip archive (by extension only)
pub fn is_archive_path(path: &Path) -> bool {
    path.extension()
        .map(|ext| ext.eq_ignore_ascii_case("zip"))
        .unwrap_or(false)
}

/// Bundle all four tracked files into a timestamped zip next to them
///
/// Returns the path of the written archive. Nothing is touched unless every
/// tracked file has a recorded path.
pub fn create_backup(files: &TrackedFiles) -> Result<PathBuf> {
    create_backup_at(files, Local::now().naive_local())
}

/// Same as [`create_backup`] with an explicit timestamp
pub fn create_backup_at(files: &TrackedFiles, timestamp: NaiveDateTime) -> Result<PathBuf> {
    let missing = files.missing();
    if !missing.is_empty() {
        return Err(BackupError::NotLoaded(missing));
    }

    let backup_dir = files
        .first_directory()
        .map(Path::to_path_buf)
        .unwrap_or_default();
    let zip_path = backup_dir.join(archive_name(timestamp));

    let file = File::create(&zip_path).map_err(BackupError::io(&zip_path))?;
    let mut writer = ZipWriter::new(file);
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

    for (_, entry) in files.iter() {
        let Some(source_path) = entry.path.as_deref() else {
            continue;
        };
        let name = source_path
            .file_name()
            .map(|name| name.to_string_lossy().to_string())
            .unwrap_or_default();

        writer.start_file(name, options)?;
        let mut source = File::open(source_path).map_err(BackupError::io(source_path))?;
        io::copy(&mut source, &mut writer).map_err(BackupError::io(source_path))?;
    }

    writer.finish()?;

    log::info!("💾 Backup written to {}", zip_path.display());
    Ok(zip_path)
}

/// Extract the archive at `zip_path` into `staging_dir`
///
/// Existing staged files with the same name are overwritten. Returns the
/// number of files extracted. Paths that are not given a `.zip` extension
/// are rejected before any filesystem access.
pub fn import_backup(zip_path: &Path, staging_dir: &Path) -> Result<usize> {
    if !is_archive_path(zip_path) {
        return Err(BackupError::NotAnArchive(zip_path.to_path_buf()));
    }

    let file = File::open(zip_path).map_err(BackupError::io(zip_path))?;
    let mut archive = ZipArchive::new(file)?;
    fs::create_dir_all(staging_dir).map_err(BackupError::io(staging_dir))?;

    let mut extracted = 0;
    for idx in 0..archive.len() {
        let mut entry = archive.by_index(idx)?;

        let Some(relative) = entry.enclosed_name() else {
            log::warn!("Skipping archive entry with unsafe path: {}", entry.name());
            continue;
        };
        let dest_path = staging_dir.join(relative);

        if entry.is_dir() {
            fs::create_dir_all(&dest_path).map_err(BackupError::io(&dest_path))?;
            continue;
        }

        if let Some(parent) = dest_path.parent() {
            fs::create_dir_all(parent).map_err(BackupError::io(parent))?;
        }
        let mut out = File::create(&dest_path).map_err(BackupError::io(&dest_path))?;
        io::copy(&mut entry, &mut out).map_err(BackupError::io(&dest_path))?;
        extracted += 1;
    }

    log::info!(
        "📦 Extracted {} file(s) from {} into {}",
        extracted,
        zip_path.display(),
        staging_dir.display()
    );
    Ok(extracted)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backup::loader::load_folder;
    use crate::state::TrackedKind;
    use chrono::NaiveDate;
    use std::io::{Read, Write};
    use tempfile::tempdir;

    fn sample_timestamp() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 3, 9)
            .unwrap()
            .and_hms_opt(7, 5, 42)
            .unwrap()
    }

    fn populated_folder() -> tempfile::TempDir {
        let dir = tempdir().unwrap();
        for kind in TrackedKind::ALL {
            let body = format!("{} contents\n", kind.file_name());
            fs::write(dir.path().join(kind.file_name()), body).unwrap();
        }
        dir
    }

    fn write_zip(path: &Path, entries: &[(&str, &str)]) {
        let mut writer = ZipWriter::new(File::create(path).unwrap());
        for (name, body) in entries {
            writer.start_file(*name, SimpleFileOptions::default()).unwrap();
            writer.write_all(body.as_bytes()).unwrap();
        }
        writer.finish().unwrap();
    }

    #[test]
    fn test_archive_name_format() {
        assert_eq!(
            archive_name(sample_timestamp()),
            "20240309_070542_joystick_Backup.zip"
        );
    }

    #[test]
    fn test_is_archive_path() {
        assert!(is_archive_path(Path::new("/tmp/backup.zip")));
        assert!(is_archive_path(Path::new("BACKUP.ZIP")));
        assert!(!is_archive_path(Path::new("/tmp/backup.rar")));
        assert!(!is_archive_path(Path::new("/tmp/zip")));
    }

    #[test]
    fn test_backup_requires_all_files() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("current.map"), "map").unwrap();

        let mut files = TrackedFiles::new();
        load_folder(dir.path(), &mut files);

        let result = create_backup_at(&files, sample_timestamp());
        match result {
            Err(BackupError::NotLoaded(missing)) => assert_eq!(missing.len(), 3),
            other => panic!("expected NotLoaded, got {:?}", other),
        }
        assert!(!dir.path().join(archive_name(sample_timestamp())).exists());
    }

    #[test]
    fn test_backup_contains_four_entries() {
        let dir = populated_folder();
        let mut files = TrackedFiles::new();
        load_folder(dir.path(), &mut files);

        let zip_path = create_backup_at(&files, sample_timestamp()).unwrap();
        assert_eq!(zip_path.parent().unwrap(), std::path::absolute(dir.path()).unwrap());

        let mut archive = ZipArchive::new(File::open(&zip_path).unwrap()).unwrap();
        let mut names: Vec<String> = archive.file_names().map(String::from).collect();
        names.sort();
        let mut expected: Vec<String> =
            TrackedKind::ALL.iter().map(|k| k.file_name().to_string()).collect();
        expected.sort();
        assert_eq!(names, expected);

        for kind in TrackedKind::ALL {
            let mut body = String::new();
            archive
                .by_name(kind.file_name())
                .unwrap()
                .read_to_string(&mut body)
                .unwrap();
            assert_eq!(body, format!("{} contents\n", kind.file_name()));
        }
    }

    #[test]
    fn test_import_rejects_non_zip_without_touching_staging() {
        let dir = tempdir().unwrap();
        let staging = dir.path().join("temp_backup");
        let bogus = dir.path().join("backup.txt");
        fs::write(&bogus, "not an archive").unwrap();

        let result = import_backup(&bogus, &staging);

        assert!(matches!(result, Err(BackupError::NotAnArchive(_))));
        assert!(!staging.exists());
    }

    #[test]
    fn test_import_overwrites_staged_files() {
        let dir = tempdir().unwrap();
        let staging = dir.path().join("temp_backup");
        fs::create_dir_all(&staging).unwrap();
        fs::write(staging.join("current.map"), "stale").unwrap();

        let zip_path = dir.path().join("backup.zip");
        write_zip(&zip_path, &[("current.map", "fresh"), ("extra.txt", "kept")]);

        let extracted = import_backup(&zip_path, &staging).unwrap();

        assert_eq!(extracted, 2);
        assert_eq!(fs::read_to_string(staging.join("current.map")).unwrap(), "fresh");
        assert_eq!(fs::read_to_string(staging.join("extra.txt")).unwrap(), "kept");
    }

    #[test]
    fn test_import_corrupt_archive_fails() {
        let dir = tempdir().unwrap();
        let zip_path = dir.path().join("broken.zip");
        fs::write(&zip_path, "definitely not a zip").unwrap();

        let result = import_backup(&zip_path, &dir.path().join("temp_backup"));
        assert!(matches!(result, Err(BackupError::Zip(_))));
    }
}
