//! Live-preview push transport.

mod server;

pub use server::start_ws_server;
