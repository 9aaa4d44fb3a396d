//! Utility modules for the preview server.

pub mod exec;
pub mod mime;
pub mod path;
