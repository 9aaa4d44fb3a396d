//! Document loading pipeline: read → transform → mark → render.
//!
//! Step order is load-bearing. The line-break expansion runs before
//! change tracking so the tracked text matches what gets rendered; the
//! marker is spliced before metadata stripping so offsets refer to the
//! tracked text; and the tracker consumes the previous text before being
//! overwritten with the new one.

use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};

use super::Document;
use super::breaks::expand_hard_breaks;
use super::frontmatter::strip_header_metadata;
use super::state::PreviewState;
use crate::config::PreviewConfig;
use crate::render;
use crate::utils::path::relative_display;

/// Inert element spliced at the divergence point. Viewers scroll to it;
/// it renders as nothing.
pub const CHANGE_MARKER: &str = r#"<span class="change-marker"></span>"#;

/// Loads files into renderable [`Document`]s, maintaining the shared
/// change-tracking registers along the way.
pub struct DocumentLoader {
    config: Arc<PreviewConfig>,
    state: Arc<PreviewState>,
}

impl DocumentLoader {
    pub fn new(config: Arc<PreviewConfig>, state: Arc<PreviewState>) -> Self {
        Self { config, state }
    }

    /// Shared state handle (for connection sync and navigation).
    pub fn state(&self) -> &Arc<PreviewState> {
        &self.state
    }

    /// Load a document without touching the current-file register.
    pub fn load(&self, path: &Path) -> Result<Document> {
        self.load_inner(path, false)
    }

    /// Load a document and make it the current file, atomically with the
    /// tracker update.
    pub fn load_current(&self, path: &Path) -> Result<Document> {
        self.load_inner(path, true)
    }

    fn load_inner(&self, path: &Path, make_current: bool) -> Result<Document> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("cannot read {}", path.display()))?;

        let mut text = if self.config.render.hard_line_breaks {
            expand_hard_breaks(&raw)
        } else {
            raw
        };

        let basename = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let mark = self.config.render.scroll_spy && !self.config.is_panel_file(path);

        // One critical section: divergence against the previous text,
        // tracker re-seed, and (for watch dispatch) the current-file
        // switch, invisible to concurrent loads and connection syncs.
        let marker_at = {
            let mut registers = self.state.registers();
            if make_current {
                registers.current = path.to_path_buf();
            }
            registers.tracker.track(&basename, &text, mark)
        };

        let change_offset = match marker_at {
            Some(at) => {
                text.insert_str(at, CHANGE_MARKER);
                at
            }
            None => 0,
        };

        if self.config.render.strip_header_metadata {
            text = strip_header_metadata(&text).into_owned();
        }

        let body = render::to_html(&text, self.config.render.mode);
        let title = relative_display(path, &self.config.root);

        Ok(Document {
            title,
            body,
            change_offset,
        })
    }
}
