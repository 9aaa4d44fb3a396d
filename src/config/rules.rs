//! Filter rule sets for watch events and request routing.
//!
//! Matching is by exact extension or exact path segment. The upstream wiki
//! tooling this replaces matched raw substrings, which let a `.git`
//! exclusion swallow legitimate documents with "git" in the name; segment
//! equality keeps the rules predictable.

use std::path::Path;

use crate::utils::path::has_segment;

/// Immutable filter rule sets, fixed at startup.
#[derive(Debug, Clone)]
pub struct FilterRules {
    /// Extensions served as raw resources (images referenced by documents).
    pub resource_exts: &'static [&'static str],
    /// Extensions treated as renderable documents.
    pub document_exts: &'static [&'static str],
    /// Path segments that disqualify a path entirely (VCS and IDE noise).
    pub excluded_segments: &'static [&'static str],
    /// File names that are never documents (desktop metadata and the like).
    pub filename_blacklist: &'static [&'static str],
}

impl Default for FilterRules {
    fn default() -> Self {
        Self {
            resource_exts: &["png", "jpg", "jpeg", "svg", "tiff", "gif"],
            document_exts: &["md", "markdown", "mdown", "adoc", "txt"],
            excluded_segments: &[".git", ".idea", ".directory"],
            filename_blacklist: &[".directory"],
        }
    }
}

impl FilterRules {
    /// Does the path carry a renderable document extension?
    pub fn is_document(&self, path: &Path) -> bool {
        self.has_ext(path, self.document_exts)
    }

    /// Does the path carry a raw-resource extension?
    pub fn is_resource(&self, path: &Path) -> bool {
        self.has_ext(path, self.resource_exts)
    }

    /// Does any path segment match the exclusion list?
    pub fn is_excluded(&self, path: &Path) -> bool {
        has_segment(path, self.excluded_segments)
    }

    /// Is the file name itself blacklisted?
    pub fn is_blacklisted(&self, path: &Path) -> bool {
        path.file_name()
            .and_then(|n| n.to_str())
            .map(|name| self.filename_blacklist.contains(&name))
            .unwrap_or(false)
    }

    fn has_ext(&self, path: &Path, exts: &[&str]) -> bool {
        path.extension()
            .and_then(|e| e.to_str())
            .map(|ext| exts.iter().any(|e| ext.eq_ignore_ascii_case(e)))
            .unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_document_extensions() {
        let rules = FilterRules::default();
        assert!(rules.is_document(&PathBuf::from("/w/Home.md")));
        assert!(rules.is_document(&PathBuf::from("/w/notes.adoc")));
        assert!(rules.is_document(&PathBuf::from("/w/UPPER.MD")));
        assert!(!rules.is_document(&PathBuf::from("/w/photo.png")));
        assert!(!rules.is_document(&PathBuf::from("/w/no-extension")));
    }

    #[test]
    fn test_resource_extensions() {
        let rules = FilterRules::default();
        assert!(rules.is_resource(&PathBuf::from("/w/diagram.svg")));
        assert!(!rules.is_resource(&PathBuf::from("/w/Home.md")));
    }

    #[test]
    fn test_exclusion_is_segment_based() {
        let rules = FilterRules::default();
        assert!(rules.is_excluded(&PathBuf::from("/w/.git/config")));
        assert!(rules.is_excluded(&PathBuf::from("/w/.idea/workspace.xml")));
        // "git" inside a legitimate name must not match
        assert!(!rules.is_excluded(&PathBuf::from("/w/git-tips.md")));
        assert!(!rules.is_excluded(&PathBuf::from("/w/using.gitignore.md")));
    }

    #[test]
    fn test_blacklist_is_exact_filename() {
        let rules = FilterRules::default();
        assert!(rules.is_blacklisted(&PathBuf::from("/w/.directory")));
        assert!(!rules.is_blacklisted(&PathBuf::from("/w/directory-layout.md")));
    }
}
