//! Documents and the change-tracking pipeline.
//!
//! A [`Document`] is one renderable unit: the relative title, the rendered
//! HTML body, and the offset of the change marker (zero when no prior
//! version existed). Construction goes through [`loader::DocumentLoader`],
//! which owns the read → transform → mark → render pipeline.

pub mod breaks;
pub mod delta;
pub mod frontmatter;
pub mod loader;
pub mod resolve;
pub mod scan;
pub mod state;

use serde::{Deserialize, Serialize};

/// One rendered document, ready for broadcast.
///
/// Field names on the wire are fixed by the viewer protocol.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    /// Path of the source file, relative to the serving root.
    #[serde(rename = "Title")]
    pub title: String,
    /// Rendered HTML.
    #[serde(rename = "Body")]
    pub body: String,
    /// Where the change marker was spliced, 0 when none was.
    #[serde(rename = "ChangeI")]
    pub change_offset: usize,
}

impl Document {
    /// Serialize for the session bus.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}
