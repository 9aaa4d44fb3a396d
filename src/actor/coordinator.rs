//! Actor Coordinator - Wires up the Live Preview Actor System
//!
//! The Coordinator is a thin orchestrator that:
//! - Creates communication channels
//! - Wires up actors
//! - Runs them concurrently

use std::sync::Arc;

use anyhow::Result;
use crossbeam::channel::Receiver;
use tokio::sync::mpsc;

use super::dispatch::DispatchActor;
use super::fs::FsActor;
use super::messages::{DispatchMsg, WsMsg};
use super::ws::WsActor;
use crate::config::PreviewConfig;
use crate::document::loader::DocumentLoader;
use crate::document::state::PreviewState;

const CHANNEL_BUFFER: usize = 32;

/// Coordinator - wires up and runs the actor system.
pub struct Coordinator {
    config: Arc<PreviewConfig>,
    state: Arc<PreviewState>,
    ws_port: u16,
    shutdown_rx: Option<Receiver<()>>,
}

impl Coordinator {
    pub fn new(config: Arc<PreviewConfig>, state: Arc<PreviewState>, ws_port: u16) -> Self {
        Self {
            config,
            state,
            ws_port,
            shutdown_rx: None,
        }
    }

    /// Set shutdown signal receiver.
    pub fn with_shutdown_signal(mut self, rx: Receiver<()>) -> Self {
        self.shutdown_rx = Some(rx);
        self
    }

    /// Run the actor system.
    pub async fn run(mut self) -> Result<()> {
        let (dispatch_tx, dispatch_rx) = mpsc::channel::<DispatchMsg>(CHANNEL_BUFFER);
        let (ws_tx, ws_rx) = mpsc::channel::<WsMsg>(CHANNEL_BUFFER);

        match crate::reload::start_ws_server(self.ws_port, ws_tx.clone()) {
            Ok(actual_port) => {
                crate::cli::serve::set_actual_ws_port(actual_port);
            }
            Err(e) => {
                crate::log!("actor"; "websocket server failed: {}", e);
            }
        }

        let fs_actor = FsActor::new(self.config.root.clone(), dispatch_tx.clone())
            .map_err(|e| anyhow::anyhow!("watcher failed: {}", e))?;

        let dispatch_actor = DispatchActor::new(
            dispatch_rx,
            ws_tx.clone(),
            DocumentLoader::new(Arc::clone(&self.config), Arc::clone(&self.state)),
            Arc::clone(&self.config),
        );
        let ws_actor = WsActor::new(
            ws_rx,
            DocumentLoader::new(Arc::clone(&self.config), Arc::clone(&self.state)),
            Arc::clone(&self.config),
        );

        crate::debug!("actor"; "start");
        let shutdown_rx = self.shutdown_rx.take();
        run_actors(fs_actor, dispatch_actor, ws_actor, ws_tx, shutdown_rx).await;
        crate::debug!("actor"; "stopped");
        Ok(())
    }
}

/// Run all actors concurrently until shutdown or until one dies.
async fn run_actors(
    fs: FsActor,
    dispatch: DispatchActor,
    ws: WsActor,
    ws_tx: mpsc::Sender<WsMsg>,
    shutdown_rx: Option<Receiver<()>>,
) {
    let ws_handle = tokio::spawn(async move { ws.run().await });
    let fs_handle = tokio::spawn(async move { fs.run().await });
    let dispatch_handle = tokio::spawn(async move { dispatch.run().await });

    if let Some(rx) = shutdown_rx {
        loop {
            if rx.try_recv().is_ok() {
                crate::debug!("actor"; "shutdown signal received");
                break;
            }
            tokio::time::sleep(std::time::Duration::from_millis(100)).await;
        }
    } else {
        tokio::select! {
            _ = fs_handle => {}
            _ = dispatch_handle => {}
        }
    }

    crate::debug!("actor"; "sending shutdown to ws");
    let _ = ws_tx.send(WsMsg::Shutdown).await;
    let _ = tokio::time::timeout(std::time::Duration::from_millis(500), ws_handle).await;
}
