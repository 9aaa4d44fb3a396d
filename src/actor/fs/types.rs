use std::path::PathBuf;

/// What happened to a file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum ChangeKind {
    Created,
    Modified,
    Removed,
}

impl ChangeKind {
    pub(super) fn label(self) -> &'static str {
        match self {
            Self::Created => "created",
            Self::Modified => "modified",
            Self::Removed => "removed",
        }
    }
}

/// Debounced file events in arrival order
pub(super) struct DebouncedEvents(pub(super) Vec<(PathBuf, ChangeKind)>);

impl DebouncedEvents {
    /// Paths that still denote content to preview (removals are dropped;
    /// a vanished file surfaces as a read error downstream anyway).
    pub(super) fn into_live_paths(self) -> Vec<PathBuf> {
        self.0
            .into_iter()
            .filter(|(_, kind)| !matches!(kind, ChangeKind::Removed))
            .map(|(path, _)| path)
            .collect()
    }
}
