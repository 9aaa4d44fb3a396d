//! Shared mutable registers: current file and change tracker.
//!
//! There is exactly one "current document" and one "previous text" per
//! server instance, and both are touched by the watch-dispatch task, by
//! viewer-navigation request handlers, and by every new-connection sync.
//! A single mutex guards the pair; splitting them into two locks would
//! invite inconsistent lock ordering and a torn view of "current file
//! changed, tracker not yet updated".

use std::path::{Path, PathBuf};

use parking_lot::{Mutex, MutexGuard};

use super::delta::divergence_offset;

/// Single-slot memory of the last tracked document text.
#[derive(Debug, Default)]
pub struct ChangeTracker {
    last: Option<TrackedText>,
}

#[derive(Debug)]
struct TrackedText {
    file: String,
    text: String,
}

impl ChangeTracker {
    /// Compute the divergence offset for a new version of `file`, then
    /// record the new text as the tracked version.
    ///
    /// The offset is produced only when marking is requested, a previous
    /// text exists, it belongs to the same file (an edit, not a switch),
    /// and the text actually differs. The tracker is re-seeded in every
    /// case, so the next edit after a file switch diffs against the text
    /// recorded here. Compute-before-record ordering is load-bearing and
    /// kept inside this one method.
    pub fn track(&mut self, file: &str, text: &str, mark: bool) -> Option<usize> {
        let offset = match &self.last {
            Some(prev) if mark && prev.file == file && prev.text != text => {
                Some(divergence_offset(&prev.text, text))
            }
            _ => None,
        };

        self.last = Some(TrackedText {
            file: file.to_string(),
            text: text.to_string(),
        });

        offset
    }

    /// Basename of the tracked file, if any.
    #[allow(dead_code)] // Used by tests
    pub fn last_file(&self) -> Option<&str> {
        self.last.as_ref().map(|t| t.file.as_str())
    }
}

/// The register pair behind one lock.
#[derive(Debug)]
pub struct Registers {
    /// The document considered "active" for new-viewer synchronization.
    pub current: PathBuf,
    pub tracker: ChangeTracker,
}

/// Shared preview state, created once per server and handed out by `Arc`.
#[derive(Debug)]
pub struct PreviewState {
    inner: Mutex<Registers>,
}

impl PreviewState {
    /// Create state with the given initial current document.
    pub fn new(current: PathBuf) -> Self {
        Self {
            inner: Mutex::new(Registers {
                current,
                tracker: ChangeTracker::default(),
            }),
        }
    }

    /// Lock both registers for one read-modify-write sequence.
    pub fn registers(&self) -> MutexGuard<'_, Registers> {
        self.inner.lock()
    }

    /// Replace the current document (viewer navigation, watch dispatch).
    pub fn set_current(&self, path: &Path) {
        self.inner.lock().current = path.to_path_buf();
    }

    /// Snapshot of the current document path.
    pub fn current(&self) -> PathBuf {
        self.inner.lock().current.clone()
    }
}
