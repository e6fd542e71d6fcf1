/// State management module
///
/// This module handles all application state, including:
/// - The four tracked control files (data.rs)
/// - Settings persisted between sessions (settings.rs)

pub mod data;
pub mod settings;

pub use data::{TrackedFiles, TrackedKind};
pub use settings::Settings;
