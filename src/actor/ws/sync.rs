//! New-connection synchronization.
//!
//! A viewer that connects mid-session must not wait for the next file
//! change to see content. It receives, in fixed order: the sidebar, the
//! footer, then the current document — the viewer lays its panels out in
//! that sequence. The current document is sent once more at the end, as
//! the fan-out path would deliver it; viewers render idempotently, so the
//! duplicate is harmless.

use crate::config::PreviewConfig;
use crate::document::Document;
use crate::document::loader::DocumentLoader;

/// Documents owed to a fresh connection, in send order.
///
/// A panel or current document that fails to load is skipped, not an
/// error: a wiki without `_Sidebar.md` is perfectly normal.
pub(super) fn connect_documents(loader: &DocumentLoader, config: &PreviewConfig) -> Vec<Document> {
    let mut docs = Vec::with_capacity(4);

    for path in [config.sidebar_path(), config.footer_path()] {
        match loader.load(&path) {
            Ok(doc) => docs.push(doc),
            Err(e) => crate::debug!("ws"; "sync skip: {:#}", e),
        }
    }

    let current = loader.state().current();
    match loader.load(&current) {
        Ok(doc) => {
            docs.push(doc.clone());
            docs.push(doc);
        }
        Err(e) => crate::log!("ws"; "sync: no current document: {:#}", e),
    }

    docs
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::state::PreviewState;
    use std::sync::Arc;
    use tempfile::TempDir;

    fn make_loader(temp: &TempDir, current: &std::path::Path) -> (DocumentLoader, Arc<PreviewConfig>) {
        let config = Arc::new(PreviewConfig {
            root: temp.path().to_path_buf(),
            ..Default::default()
        });
        let state = Arc::new(PreviewState::new(current.to_path_buf()));
        (DocumentLoader::new(Arc::clone(&config), state), config)
    }

    #[test]
    fn test_sync_order_sidebar_footer_current() {
        let temp = TempDir::new().unwrap();
        std::fs::write(temp.path().join("_Sidebar.md"), "S").unwrap();
        std::fs::write(temp.path().join("_Footer.md"), "F").unwrap();
        let current = temp.path().join("current.md");
        std::fs::write(&current, "C").unwrap();

        let (loader, config) = make_loader(&temp, &current);
        let docs = connect_documents(&loader, &config);

        let titles: Vec<_> = docs.iter().map(|d| d.title.as_str()).collect();
        assert_eq!(
            titles,
            ["_Sidebar.md", "_Footer.md", "current.md", "current.md"]
        );
        assert!(docs[0].body.contains("S"));
        assert!(docs[1].body.contains("F"));
        assert!(docs[2].body.contains("C"));
        // duplicate current deliveries are identical
        assert_eq!(docs[2], docs[3]);
    }

    #[test]
    fn test_missing_panels_skipped_silently() {
        let temp = TempDir::new().unwrap();
        let current = temp.path().join("current.md");
        std::fs::write(&current, "C").unwrap();

        let (loader, config) = make_loader(&temp, &current);
        let docs = connect_documents(&loader, &config);

        let titles: Vec<_> = docs.iter().map(|d| d.title.as_str()).collect();
        assert_eq!(titles, ["current.md", "current.md"]);
    }

    #[test]
    fn test_missing_current_yields_panels_only() {
        let temp = TempDir::new().unwrap();
        std::fs::write(temp.path().join("_Sidebar.md"), "S").unwrap();

        let (loader, config) = make_loader(&temp, &temp.path().join("gone.md"));
        let docs = connect_documents(&loader, &config);

        let titles: Vec<_> = docs.iter().map(|d| d.title.as_str()).collect();
        assert_eq!(titles, ["_Sidebar.md"]);
    }
}
