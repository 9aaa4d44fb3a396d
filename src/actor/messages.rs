//! Actor Message Definitions
//!
//! Message types for inter-actor communication.
//!
//! ```text
//! FsActor --Changed--> DispatchActor --Broadcast--> WsActor
//! ```

use std::path::PathBuf;

/// Messages to the dispatch actor
#[derive(Debug)]
pub enum DispatchMsg {
    /// Debounced file modifications, in arrival order
    Changed(Vec<PathBuf>),
    /// Shutdown
    #[allow(dead_code)] // Reserved for graceful shutdown
    Shutdown,
}

/// Messages to the websocket actor
pub enum WsMsg {
    /// Send a serialized document to every connected session
    Broadcast(String),
    /// Register a freshly accepted connection
    AddClient(std::net::TcpStream),
    /// Shutdown
    Shutdown,
}
