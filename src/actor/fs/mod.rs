//! FileSystem Actor
//!
//! Watches the serving root recursively and sends debounced change events
//! to the DispatchActor. The watcher starts buffering immediately on
//! construction, so events raised while the server finishes starting up
//! are not lost.
//!
//! Architecture:
//! ```text
//! Watcher → Debouncer (pure timing) → DispatchMsg
//! ```

use std::path::PathBuf;

use notify::{RecommendedWatcher, RecursiveMode, Watcher};
use tokio::sync::mpsc;

use super::messages::DispatchMsg;

// Pure timing and deduplication.
mod debouncer;
// Shared fs event types.
mod types;

#[cfg(test)]
mod tests;

use debouncer::Debouncer;

/// FileSystem Actor - watches for file changes
pub struct FsActor {
    /// Channel to receive notify events (sync -> async bridge)
    notify_rx: std::sync::mpsc::Receiver<notify::Result<notify::Event>>,
    /// Watcher handle (must be kept alive)
    watcher: RecommendedWatcher,
    /// Recursively watched root
    root: PathBuf,
    /// Whether the root watch is currently attached
    attached: bool,
    /// Channel to send messages to DispatchActor
    dispatch_tx: mpsc::Sender<DispatchMsg>,
    /// Debouncer state
    debouncer: Debouncer,
}

impl FsActor {
    /// Create a new FsActor; the watch attaches immediately.
    ///
    /// A root that cannot be watched right now (unmounted, recreated by
    /// an editor) is retried from the run loop instead of failing the
    /// whole server.
    pub fn new(root: PathBuf, dispatch_tx: mpsc::Sender<DispatchMsg>) -> notify::Result<Self> {
        // notify delivers on its own thread; bridge through a sync channel
        let (notify_tx, notify_rx) = std::sync::mpsc::channel();

        let mut watcher = notify::recommended_watcher(move |res| {
            let _ = notify_tx.send(res);
        })?;

        let attached = match watcher.watch(&root, RecursiveMode::Recursive) {
            Ok(()) => true,
            Err(e) => {
                crate::log!("watch"; "cannot watch {}: {} (will retry)", root.display(), e);
                false
            }
        };

        Ok(Self {
            notify_rx,
            watcher,
            root,
            attached,
            dispatch_tx,
            debouncer: Debouncer::new(),
        })
    }

    /// Run the actor event loop
    pub async fn run(self) {
        let notify_rx = self.notify_rx;
        let dispatch_tx = self.dispatch_tx.clone();
        let mut debouncer = self.debouncer;
        let mut watcher = self.watcher;
        let root = self.root;
        let mut attached = self.attached;

        let (async_tx, mut async_rx) = tokio::sync::mpsc::channel::<notify::Event>(64);

        // Spawn a thread to poll notify events and send to async channel
        std::thread::spawn(move || {
            while let Ok(result) = notify_rx.recv() {
                match result {
                    Ok(event) => {
                        if async_tx.blocking_send(event).is_err() {
                            break; // Receiver dropped
                        }
                    }
                    Err(e) => crate::log!("watch"; "notify error: {}", e),
                }
            }
        });

        loop {
            tokio::select! {
                biased;
                Some(event) = async_rx.recv() => debouncer.add_event(&event),
                _ = tokio::time::sleep(debouncer.sleep_duration()) => {
                    // Re-attach the root if the watch never took or was torn down.
                    if !attached {
                        attached = watcher.watch(&root, RecursiveMode::Recursive).is_ok();
                        if attached {
                            crate::log!("watch"; "watching {}", root.display());
                        }
                    }
                    if forward_changes(&mut debouncer, &dispatch_tx).await.is_err() {
                        break;
                    }
                }
            }
        }
    }
}

/// Forward debounced file changes to the dispatch actor.
///
/// Returns `Err(())` if the DispatchActor shut down
async fn forward_changes(
    debouncer: &mut Debouncer,
    dispatch_tx: &mpsc::Sender<DispatchMsg>,
) -> Result<(), ()> {
    let Some(raw_events) = debouncer.take_if_ready() else {
        return Ok(());
    };

    let paths = types::DebouncedEvents(raw_events).into_live_paths();
    if paths.is_empty() {
        return Ok(());
    }

    dispatch_tx
        .send(DispatchMsg::Changed(paths))
        .await
        .map_err(|_| ())
}
