//! Dispatch Actor - watch events to viewer broadcasts
//!
//! Consumes debounced change events in order, filters them against the
//! configured rule sets, drives the document loader, and hands the
//! serialized result to the WsActor for fan-out. One bad file never
//! stalls the loop: read and encode failures are logged and the next
//! event is processed.

use std::path::Path;
use std::sync::Arc;

use tokio::sync::mpsc;

use super::messages::{DispatchMsg, WsMsg};
use crate::config::PreviewConfig;
use crate::document::loader::DocumentLoader;
use crate::document::resolve::resolve_document_path;
use crate::utils::path::normalize_path;

/// Dispatch Actor - the single consumer of watch events
pub struct DispatchActor {
    /// Channel to receive debounced events
    rx: mpsc::Receiver<DispatchMsg>,
    /// Channel to the websocket actor
    ws_tx: mpsc::Sender<WsMsg>,
    loader: DocumentLoader,
    config: Arc<PreviewConfig>,
}

impl DispatchActor {
    pub fn new(
        rx: mpsc::Receiver<DispatchMsg>,
        ws_tx: mpsc::Sender<WsMsg>,
        loader: DocumentLoader,
        config: Arc<PreviewConfig>,
    ) -> Self {
        Self {
            rx,
            ws_tx,
            loader,
            config,
        }
    }

    /// Run the actor event loop
    pub async fn run(mut self) {
        while let Some(msg) = self.rx.recv().await {
            match msg {
                DispatchMsg::Changed(paths) => {
                    for path in paths {
                        if self.handle_change(&path).await.is_err() {
                            crate::debug!("dispatch"; "ws actor gone, stopping");
                            return;
                        }
                    }
                }
                DispatchMsg::Shutdown => break,
            }
        }
    }

    /// Process one change event end to end.
    ///
    /// Returns `Err(())` only when the websocket actor has shut down.
    async fn handle_change(&self, path: &Path) -> Result<(), ()> {
        let path = normalize_path(path);
        if !passes_filters(&path, &self.config) {
            return Ok(());
        }

        // Extension-less references resolve to the first matching document
        let resolved = resolve_document_path(&self.config.root, &path, &self.config.filters);

        let doc = match self.loader.load_current(&resolved) {
            Ok(doc) => doc,
            Err(e) => {
                crate::logger::status_error(
                    &format!("load failed: {}", resolved.display()),
                    &format!("{e:#}"),
                );
                return Ok(());
            }
        };

        let json = match doc.to_json() {
            Ok(json) => json,
            Err(e) => {
                crate::log!("dispatch"; "cannot encode {}: {}", doc.title, e);
                return Ok(());
            }
        };

        crate::logger::status_success(&format!("cast {}", doc.title));
        self.ws_tx
            .send(WsMsg::Broadcast(json))
            .await
            .map_err(|_| ())
    }
}

/// Decide whether a changed path becomes a broadcast.
///
/// In order: the path must stat as a file, not sit under an excluded
/// segment, carry a document extension, and not be blacklisted by name.
pub fn passes_filters(path: &Path, config: &PreviewConfig) -> bool {
    let path = normalize_path(path);

    let Ok(meta) = std::fs::metadata(&path) else {
        crate::debug!("dispatch"; "skip (stat failed): {}", path.display());
        return false;
    };
    if meta.is_dir() {
        return false;
    }
    if config.filters.is_excluded(&path) {
        crate::debug!("dispatch"; "skip (excluded): {}", path.display());
        return false;
    }
    if !config.filters.is_document(&path) {
        crate::debug!("dispatch"; "skip (not a document): {}", path.display());
        return false;
    }
    if config.filters.is_blacklisted(&path) {
        crate::debug!("dispatch"; "skip (blacklisted): {}", path.display());
        return false;
    }

    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::state::PreviewState;
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn make_config(temp: &TempDir) -> Arc<PreviewConfig> {
        Arc::new(PreviewConfig {
            root: temp.path().to_path_buf(),
            ..Default::default()
        })
    }

    fn make_actor(
        config: Arc<PreviewConfig>,
    ) -> (
        DispatchActor,
        mpsc::Sender<DispatchMsg>,
        mpsc::Receiver<WsMsg>,
    ) {
        let (tx, rx) = mpsc::channel(8);
        let (ws_tx, ws_rx) = mpsc::channel(8);
        let state = Arc::new(PreviewState::new(PathBuf::new()));
        let loader = DocumentLoader::new(Arc::clone(&config), state);
        (DispatchActor::new(rx, ws_tx, loader, config), tx, ws_rx)
    }

    #[test]
    fn test_filters_reject_directory() {
        let temp = TempDir::new().unwrap();
        let config = make_config(&temp);
        assert!(!passes_filters(temp.path(), &config));
    }

    #[test]
    fn test_filters_reject_missing_file() {
        let temp = TempDir::new().unwrap();
        let config = make_config(&temp);
        assert!(!passes_filters(&temp.path().join("gone.md"), &config));
    }

    #[test]
    fn test_filters_reject_excluded_and_non_documents() {
        let temp = TempDir::new().unwrap();
        let config = make_config(&temp);

        let git_dir = temp.path().join(".git");
        std::fs::create_dir(&git_dir).unwrap();
        let in_git = git_dir.join("config.md");
        std::fs::write(&in_git, "not content").unwrap();
        assert!(!passes_filters(&in_git, &config));

        let image = temp.path().join("photo.png");
        std::fs::write(&image, "img").unwrap();
        assert!(!passes_filters(&image, &config));
    }

    #[test]
    fn test_filters_accept_document() {
        let temp = TempDir::new().unwrap();
        let config = make_config(&temp);
        let doc = temp.path().join("Home.md");
        std::fs::write(&doc, "# Home").unwrap();
        assert!(passes_filters(&doc, &config));
    }

    #[tokio::test]
    async fn test_filtered_event_broadcasts_nothing() {
        let temp = TempDir::new().unwrap();
        let config = make_config(&temp);
        let image = temp.path().join("photo.png");
        std::fs::write(&image, "img").unwrap();

        let (actor, _tx, mut ws_rx) = make_actor(config);
        actor.handle_change(&image).await.unwrap();

        assert!(ws_rx.try_recv().is_err(), "no broadcast for filtered path");
    }

    #[tokio::test]
    async fn test_change_event_broadcasts_document() {
        let temp = TempDir::new().unwrap();
        let config = make_config(&temp);
        let doc = temp.path().join("Home.md");
        std::fs::write(&doc, "# Home").unwrap();

        let (actor, _tx, mut ws_rx) = make_actor(Arc::clone(&config));
        actor.handle_change(&doc).await.unwrap();

        match ws_rx.try_recv() {
            Ok(WsMsg::Broadcast(json)) => {
                assert!(json.contains(r#""Title":"Home.md""#));
                assert!(json.contains("<h1>Home</h1>"));
            }
            _ => panic!("expected broadcast"),
        }
        // the change became the current file
        assert_eq!(actor.loader.state().current(), normalize_path(&doc));
    }

    #[tokio::test]
    async fn test_unreadable_file_does_not_stop_loop() {
        let temp = TempDir::new().unwrap();
        let config = make_config(&temp);

        // File passes filters, then vanishes before the load
        let doc = temp.path().join("flaky.md");
        std::fs::write(&doc, "content").unwrap();
        let canonical = normalize_path(&doc);
        std::fs::remove_file(&doc).unwrap();

        let (actor, _tx, mut ws_rx) = make_actor(config);
        // stat fails → filtered; call loader path directly via resolved name
        actor.handle_change(&canonical).await.unwrap();
        assert!(ws_rx.try_recv().is_err());

        // loop continues: a good file still broadcasts afterwards
        let good = temp.path().join("good.md");
        std::fs::write(&good, "fine").unwrap();
        actor.handle_change(&good).await.unwrap();
        assert!(matches!(ws_rx.try_recv(), Ok(WsMsg::Broadcast(_))));
    }
}
