//! WebSocket Actor - Session Fan-out
//!
//! This actor is responsible for:
//! - Managing WebSocket viewer connections
//! - Broadcasting serialized documents to all connected viewers
//! - Synchronizing fresh connections (sidebar, footer, current document)
//!
//! # Architecture
//!
//! ```text
//! DispatchActor --[Broadcast]--> WsActor --[fan-out]--> viewers
//! acceptor thread --[AddClient]----^
//! ```

mod client_io;
mod delivery;
mod sync;

use std::net::TcpStream;
use std::sync::Arc;

use parking_lot::Mutex;
use tokio::sync::mpsc;
use tungstenite::WebSocket;
use tungstenite::protocol::Message;

use super::messages::WsMsg;
use crate::config::PreviewConfig;
use crate::document::loader::DocumentLoader;

/// A registered viewer connection
struct RegisteredClient {
    ws: WebSocket<TcpStream>,
}

/// WebSocket Actor - manages viewer connections and broadcasts
pub struct WsActor {
    /// Channel to receive messages
    rx: mpsc::Receiver<WsMsg>,
    /// Connected viewers (shared for broadcast + reader threads)
    clients: Arc<Mutex<Vec<RegisteredClient>>>,
    /// Loader for new-connection synchronization
    loader: DocumentLoader,
    config: Arc<PreviewConfig>,
}

impl WsActor {
    /// Create a new WsActor
    pub fn new(rx: mpsc::Receiver<WsMsg>, loader: DocumentLoader, config: Arc<PreviewConfig>) -> Self {
        Self {
            rx,
            clients: Arc::new(Mutex::new(Vec::new())),
            loader,
            config,
        }
    }

    /// Run the actor event loop
    pub async fn run(mut self) {
        // Background thread reaps viewers that hung up
        let clients_for_reader = Arc::clone(&self.clients);
        std::thread::spawn(move || {
            Self::client_reader_loop(clients_for_reader);
        });

        while let Some(msg) = self.rx.recv().await {
            match msg {
                WsMsg::Broadcast(json) => {
                    self.broadcast(Message::Text(json.into()));
                }

                WsMsg::AddClient(stream) => {
                    self.add_client(stream);
                }

                WsMsg::Shutdown => {
                    crate::debug!("ws"; "shutting down");
                    let mut clients = self.clients.lock();
                    for mut client in clients.drain(..) {
                        let _ = client.ws.close(None);
                    }
                    break;
                }
            }
        }
    }
}
