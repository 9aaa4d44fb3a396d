use std::net::TcpStream;
use std::sync::Arc;

use parking_lot::Mutex;
use tungstenite::protocol::Message;

use super::{RegisteredClient, WsActor};

impl WsActor {
    /// Accept a new viewer connection and bring it up to date.
    ///
    /// The handshake and the synchronization burst run in blocking mode;
    /// the socket switches to non-blocking afterwards so the reader loop
    /// can poll it.
    pub(super) fn add_client(&self, stream: TcpStream) {
        match tungstenite::accept(stream) {
            Ok(mut ws) => {
                // Sidebar, footer, current document — ordered, before the
                // viewer can receive any change broadcast
                for doc in super::sync::connect_documents(&self.loader, &self.config) {
                    let json = match doc.to_json() {
                        Ok(json) => json,
                        Err(e) => {
                            crate::log!("ws"; "cannot encode {}: {}", doc.title, e);
                            continue;
                        }
                    };
                    if let Err(e) = ws.send(Message::Text(json.into())) {
                        crate::log!("ws"; "sync send failed: {}", e);
                        return;
                    }
                }

                // Now set non-blocking for polling reads
                let _ = ws.get_ref().set_nonblocking(true);

                let mut clients = self.clients.lock();
                crate::debug!("ws"; "session connected (total: {})", clients.len() + 1);
                clients.push(RegisteredClient { ws });
            }
            Err(e) => {
                crate::log!("ws"; "handshake failed: {}", e);
            }
        }
    }

    /// Background thread to reap disconnected viewers (non-blocking poll).
    ///
    /// Viewers never send application messages; anything readable is
    /// either a close frame or noise to drain.
    pub(super) fn client_reader_loop(clients: Arc<Mutex<Vec<RegisteredClient>>>) {
        loop {
            std::thread::sleep(std::time::Duration::from_millis(100));

            let mut clients_guard = clients.lock();
            let mut disconnected = Vec::new();

            for (i, client) in clients_guard.iter_mut().enumerate() {
                match client.ws.read() {
                    Ok(Message::Close(_)) => {
                        disconnected.push(i);
                    }
                    Err(tungstenite::Error::Io(ref e))
                        if e.kind() == std::io::ErrorKind::WouldBlock =>
                    {
                        // No data available, continue
                    }
                    Err(_) => {
                        disconnected.push(i);
                    }
                    _ => {}
                }
            }

            for i in disconnected.into_iter().rev() {
                crate::debug!("ws"; "session disconnected");
                clients_guard.remove(i);
            }
        }
    }
}
