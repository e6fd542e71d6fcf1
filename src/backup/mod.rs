/// Control file backup module
///
/// This module handles:
/// - Loading the four control files from a folder (loader.rs)
/// - Writing and importing zip backups (archive.rs)
/// - Restoring staged files into a destination folder (restore.rs)
///
/// Every operation takes explicit paths; dialogs live in the UI layer.

pub mod archive;
pub mod error;
pub mod loader;
pub mod restore;

pub use archive::{create_backup, import_backup};
pub use error::BackupError;
pub use loader::load_folder;
pub use restore::{check_staging, restore_backup};
