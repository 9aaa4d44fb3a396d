//! Actor system for watch-driven live preview.
//!
//! ```text
//! FsActor --Changed--> DispatchActor --Broadcast--> WsActor --> viewers
//! ```

mod coordinator;
pub mod dispatch;
pub mod fs;
pub mod messages;
pub mod ws;

pub use coordinator::Coordinator;
