//! Document-to-HTML rendering backends.
//!
//! Rendering is best-effort and never fails outward: malformed input
//! produces whatever HTML the backend makes of it, and a broken external
//! tool falls back to the raw text.

pub mod asciidoc;
pub mod markdown;

use crate::config::RenderMode;

/// Render document text to an HTML fragment.
pub fn to_html(text: &str, mode: RenderMode) -> String {
    match mode {
        RenderMode::Markdown => markdown::render(text),
        RenderMode::Asciidoc => asciidoc::render(text),
    }
}
