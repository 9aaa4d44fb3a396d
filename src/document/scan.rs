//! Startup scan for the initial current document.
//!
//! Before any watch event or navigation arrives, new viewers still need
//! something to look at. The most recently modified document in the
//! serving root is the best guess at what the user is working on.

use std::path::{Path, PathBuf};
use std::time::SystemTime;

use crate::config::FilterRules;

/// Most recently modified document directly under `root`.
///
/// Blacklisted names are skipped. When no document extension matches at
/// all, falls back to the first non-blacklisted file so the viewer is not
/// left empty.
pub fn most_recent_document(root: &Path, rules: &FilterRules) -> Option<PathBuf> {
    let entries = match std::fs::read_dir(root) {
        Ok(entries) => entries,
        Err(e) => {
            crate::log!("scan"; "cannot read {}: {}", root.display(), e);
            return None;
        }
    };

    let mut latest: Option<(SystemTime, PathBuf)> = None;
    let mut fallback: Option<PathBuf> = None;

    for entry in entries.flatten() {
        let path = entry.path();
        if !path.is_file() || rules.is_blacklisted(&path) {
            continue;
        }

        if fallback.is_none() {
            fallback = Some(path.clone());
        }
        if !rules.is_document(&path) {
            continue;
        }

        let modified = entry
            .metadata()
            .and_then(|m| m.modified())
            .unwrap_or(SystemTime::UNIX_EPOCH);
        if latest.as_ref().is_none_or(|(t, _)| modified > *t) {
            latest = Some((modified, path));
        }
    }

    latest.map(|(_, path)| path).or(fallback)
}
