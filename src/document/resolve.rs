//! Event/request path to on-disk document resolution.
//!
//! Watch events carry concrete paths, but viewer navigation may reference
//! a document without its extension (`/Home` for `Home.md`). Resolution
//! tries the path as given, then appends each document extension until a
//! file exists.

use std::path::{Path, PathBuf};

use crate::config::FilterRules;

/// Resolve a requested path to a concrete document path under `root`.
///
/// Absolute requests are tried as-is first; relative requests (and
/// absolute ones that resolve to nothing) are joined onto the root. When
/// nothing matches, the joined path is returned unchanged and the read
/// will surface the error.
pub fn resolve_document_path(root: &Path, requested: &Path, rules: &FilterRules) -> PathBuf {
    if requested.as_os_str().is_empty() {
        return root.to_path_buf();
    }

    if requested.is_absolute()
        && let Some(found) = existing_or_extended(requested, rules)
    {
        return found;
    }

    let relative: PathBuf = requested
        .components()
        .filter(|c| matches!(c, std::path::Component::Normal(_)))
        .collect();
    let joined = root.join(relative);
    existing_or_extended(&joined, rules).unwrap_or(joined)
}

/// The path itself if it is a file or already carries an extension,
/// otherwise the first document extension that yields an existing file.
fn existing_or_extended(path: &Path, rules: &FilterRules) -> Option<PathBuf> {
    if path.is_file() {
        return Some(path.to_path_buf());
    }
    if path.extension().is_some() {
        return Some(path.to_path_buf());
    }

    for ext in rules.document_exts {
        let mut os = path.as_os_str().to_owned();
        os.push(format!(".{ext}"));
        let candidate = PathBuf::from(os);
        if candidate.is_file() {
            return Some(candidate);
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn wiki() -> (TempDir, FilterRules) {
        let temp = TempDir::new().unwrap();
        std::fs::write(temp.path().join("Home.md"), "# Home").unwrap();
        std::fs::write(temp.path().join("notes.adoc"), "= Notes").unwrap();
        (temp, FilterRules::default())
    }

    #[test]
    fn test_existing_file_wins() {
        let (temp, rules) = wiki();
        let resolved = resolve_document_path(temp.path(), Path::new("Home.md"), &rules);
        assert_eq!(resolved, temp.path().join("Home.md"));
    }

    #[test]
    fn test_extensionless_reference_resolves() {
        let (temp, rules) = wiki();
        assert_eq!(
            resolve_document_path(temp.path(), Path::new("Home"), &rules),
            temp.path().join("Home.md")
        );
        assert_eq!(
            resolve_document_path(temp.path(), Path::new("notes"), &rules),
            temp.path().join("notes.adoc")
        );
    }

    #[test]
    fn test_missing_document_returns_joined_path() {
        let (temp, rules) = wiki();
        let resolved = resolve_document_path(temp.path(), Path::new("nope.md"), &rules);
        assert_eq!(resolved, temp.path().join("nope.md"));
    }

    #[test]
    fn test_parent_components_dropped() {
        let (temp, rules) = wiki();
        let resolved = resolve_document_path(temp.path(), Path::new("../Home.md"), &rules);
        assert_eq!(resolved, temp.path().join("Home.md"));
    }
}
