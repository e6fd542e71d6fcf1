/// Folder loader
///
/// Reads the four control files from a folder into the tracked-file records.
/// A missing or unreadable file only affects its own entry.

use std::fs;
use std::path::Path;

use crate::state::{TrackedFiles, TrackedKind};

/// Outcome of loading a folder
#[derive(Debug, Default, Clone, PartialEq)]
pub struct LoadReport {
    /// Kinds whose file was read and recorded
    pub loaded: Vec<TrackedKind>,
    /// Kinds whose file does not exist in the folder
    pub missing: Vec<TrackedKind>,
    /// Kinds whose file exists but could not be read, with the error text
    pub failed: Vec<(TrackedKind, String)>,
}

/// Load every tracked file found in `folder`
///
/// Entries for missing or unreadable files are left untouched.
pub fn load_folder(folder: &Path, files: &mut TrackedFiles) -> LoadReport {
    let mut report = LoadReport::default();

    for kind in TrackedKind::ALL {
        let file_path = folder.join(kind.file_name());

        if !file_path.exists() {
            log::warn!("{} not found in {}", kind.file_name(), folder.display());
            report.missing.push(kind);
            continue;
        }

        match fs::read_to_string(&file_path) {
            Ok(content) => {
                let entry = files.get_mut(kind);
                entry.content = content;
                entry.path = Some(std::path::absolute(&file_path).unwrap_or(file_path));
                report.loaded.push(kind);
            }
            Err(e) => {
                log::error!("Failed to open {}: {}", file_path.display(), e);
                report.failed.push((kind, e.to_string()));
            }
        }
    }

    log::info!(
        "📂 Loaded {} of {} control files from {}",
        report.loaded.len(),
        TrackedKind::ALL.len(),
        folder.display()
    );

    report
}
