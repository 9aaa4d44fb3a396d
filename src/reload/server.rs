//! WebSocket listener for live preview.
//!
//! Accepts raw TCP connections and hands them to the WsActor, which owns
//! the handshake and the session registry.

use std::net::TcpListener;

use anyhow::Result;

use crate::actor::messages::WsMsg;

/// Maximum port retry attempts
const MAX_PORT_RETRIES: u16 = 10;

/// Start the WebSocket listener; connections are sent to WsActor
/// through the channel.
///
/// Returns the port actually bound, which may differ from `base_port`
/// when it was already in use.
pub fn start_ws_server(base_port: u16, ws_tx: tokio::sync::mpsc::Sender<WsMsg>) -> Result<u16> {
    let (listener, actual_port) = try_bind_port(base_port, MAX_PORT_RETRIES)?;

    // Acceptor thread: blocking accept, one send per connection
    std::thread::spawn(move || {
        loop {
            match listener.accept() {
                Ok((stream, addr)) => {
                    crate::debug!("ws"; "connection from {}", addr);
                    if ws_tx.blocking_send(WsMsg::AddClient(stream)).is_err() {
                        crate::log!("ws"; "actor gone, stopping acceptor");
                        break;
                    }
                }
                Err(e) => {
                    crate::log!("ws"; "accept error: {}", e);
                    std::thread::sleep(std::time::Duration::from_millis(100));
                }
            }
        }
    });

    Ok(actual_port)
}

/// Try binding to port, retry with incremented port if in use
fn try_bind_port(base_port: u16, max_retries: u16) -> Result<(TcpListener, u16)> {
    let mut last_error = None;

    for offset in 0..max_retries {
        let port = base_port.saturating_add(offset);
        match TcpListener::bind(format!("127.0.0.1:{}", port)) {
            Ok(listener) => {
                let actual_port = listener.local_addr()?.port();
                return Ok((listener, actual_port));
            }
            Err(e) => {
                last_error = Some(e);
                continue;
            }
        }
    }

    Err(anyhow::anyhow!(
        "Failed to bind WebSocket server after {} attempts: {}",
        max_retries,
        last_error.map(|e| e.to_string()).unwrap_or_default()
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bind_retries_past_busy_port() {
        let (first, first_port) = try_bind_port(0, 1).unwrap();
        // Binding the same concrete port again must fall through to a retry
        let result = try_bind_port(first_port, 5).unwrap();
        assert_ne!(result.1, first_port);
        drop(first);
    }
}
