/// Shared data structures for the application state
///
/// These structs represent the four control files the tool manages
/// and the bookkeeping kept for each of them between operations.

use std::path::{Path, PathBuf};

/// One of the four fixed control files of IL-2 Sturmovik Great Battles
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TrackedKind {
    /// Axis and button bindings
    ControlMap,
    /// Connected input devices
    DeviceList,
    /// Action definitions shared by all profiles
    GlobalActions,
    /// Axis response curves
    CurrentResponses,
}

impl TrackedKind {
    /// All kinds, in the fixed order used everywhere (loading, archiving, restoring)
    pub const ALL: [TrackedKind; 4] = [
        TrackedKind::ControlMap,
        TrackedKind::DeviceList,
        TrackedKind::GlobalActions,
        TrackedKind::CurrentResponses,
    ];

    /// File name on disk (also the entry name inside a backup archive)
    pub fn file_name(self) -> &'static str {
        match self {
            TrackedKind::ControlMap => "current.map",
            TrackedKind::DeviceList => "devices.txt",
            TrackedKind::GlobalActions => "global.actions",
            TrackedKind::CurrentResponses => "current.responses",
        }
    }
}

/// In-memory record for a single tracked file
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TrackedFile {
    /// Text content read by the last folder load
    pub content: String,
    /// Where the file currently lives (None until loaded or restored)
    pub path: Option<PathBuf>,
}

/// The four tracked files, indexed by kind
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TrackedFiles {
    entries: [TrackedFile; 4],
}

impl TrackedFiles {
    pub fn new() -> Self {
        Self::default()
    }

    fn index(kind: TrackedKind) -> usize {
        match kind {
            TrackedKind::ControlMap => 0,
            TrackedKind::DeviceList => 1,
            TrackedKind::GlobalActions => 2,
            TrackedKind::CurrentResponses => 3,
        }
    }

    pub fn get(&self, kind: TrackedKind) -> &TrackedFile {
        &self.entries[Self::index(kind)]
    }

    pub fn get_mut(&mut self, kind: TrackedKind) -> &mut TrackedFile {
        &mut self.entries[Self::index(kind)]
    }

    /// Iterate over (kind, entry) pairs in the fixed order
    pub fn iter(&self) -> impl Iterator<Item = (TrackedKind, &TrackedFile)> {
        TrackedKind::ALL.into_iter().zip(self.entries.iter())
    }

    /// Kinds that have no recorded path yet
    pub fn missing(&self) -> Vec<TrackedKind> {
        self.iter()
            .filter(|(_, file)| file.path.is_none())
            .map(|(kind, _)| kind)
            .collect()
    }

    /// True when every entry has a recorded path
    pub fn all_loaded(&self) -> bool {
        self.entries.iter().all(|file| file.path.is_some())
    }

    /// Directory of the first entry that has a recorded path
    pub fn first_directory(&self) -> Option<&Path> {
        self.entries
            .iter()
            .filter_map(|file| file.path.as_deref())
            .find_map(Path::parent)
    }
}
