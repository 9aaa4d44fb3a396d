//! URL to filesystem path resolution.

use std::path::{Path, PathBuf};

/// Resolve a resource URL to a file under the serving root.
///
/// Canonicalizes to defeat traversal via `..` or symlinked segments;
/// anything that escapes the root is rejected.
pub fn resolve_resource(url: &str, serve_root: &Path) -> Option<PathBuf> {
    if url.contains("..") {
        return None;
    }

    let local = serve_root.join(url);

    let canonical = local.canonicalize().ok()?;
    let root_canonical = serve_root.canonicalize().ok()?;

    if !canonical.starts_with(&root_canonical) {
        return None;
    }

    canonical.is_file().then_some(canonical)
}

/// Normalize URL: decode, strip query string, trim slashes
pub fn normalize_url(url: &str) -> String {
    use percent_encoding::percent_decode_str;
    let decoded = percent_decode_str(url)
        .decode_utf8()
        .map(std::borrow::Cow::into_owned)
        .unwrap_or_default();

    let path = decoded.split('?').next().unwrap_or(&decoded);
    path.trim_matches('/').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_normalize_url() {
        assert_eq!(normalize_url("/"), "");
        assert_eq!(normalize_url("/Home?x=1"), "Home");
        assert_eq!(normalize_url("/notes/My%20Page.md"), "notes/My Page.md");
    }

    #[test]
    fn test_resolve_resource_within_root() {
        let temp = TempDir::new().unwrap();
        std::fs::write(temp.path().join("img.png"), "png").unwrap();

        let found = resolve_resource("img.png", temp.path()).unwrap();
        assert!(found.ends_with("img.png"));
    }

    #[test]
    fn test_resolve_resource_rejects_traversal() {
        let temp = TempDir::new().unwrap();
        assert!(resolve_resource("../etc/passwd", temp.path()).is_none());
    }

    #[test]
    fn test_resolve_resource_missing_file() {
        let temp = TempDir::new().unwrap();
        assert!(resolve_resource("nope.png", temp.path()).is_none());
    }
}
