//! Asciidoc rendering via an external converter.
//!
//! `asciidoctor` (or the older `asciidoc`) is invoked with the document on
//! stdin and a hard deadline. Any failure — tool missing, non-zero exit,
//! hang — is logged and the raw text is returned unrendered, so a broken
//! toolchain degrades the preview instead of the server.

use std::time::Duration;

use thiserror::Error;

use crate::utils::exec::Cmd;

/// Hard deadline for one conversion; a hung converter is killed.
const RENDER_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Error)]
enum AsciidocError {
    #[error("asciidoctor / asciidoc not found in PATH")]
    ToolMissing,
    #[error("converter exited with {0}")]
    Failed(std::process::ExitStatus),
    #[error(transparent)]
    Exec(#[from] anyhow::Error),
}

/// Render asciidoc text, falling back to the raw text on any failure.
pub fn render(text: &str) -> String {
    match render_external(text) {
        Ok(html) => html,
        Err(e) => {
            crate::log!("render"; "asciidoc fallback to raw text: {}", e);
            text.to_string()
        }
    }
}

fn render_external(text: &str) -> Result<String, AsciidocError> {
    let tool = which::which("asciidoctor")
        .or_else(|_| which::which("asciidoc"))
        .map_err(|_| AsciidocError::ToolMissing)?;

    let output = Cmd::new(&tool)
        .args(["--safe", "-"])
        .stdin(text)
        .timeout(RENDER_TIMEOUT)
        .run()?;
    if !output.status.success() {
        return Err(AsciidocError::Failed(output.status));
    }

    Ok(extract_body(&String::from_utf8_lossy(&output.stdout)))
}

/// Reduce the converter's full HTML document to the body fragment.
///
/// Keeps the lines after the `<body...>` line, dropping the trailing
/// `</body></html>` scaffolding; output without a body tag is returned
/// whole.
fn extract_body(html: &str) -> String {
    let lines: Vec<&str> = html.split('\n').collect();
    for (i, line) in lines.iter().enumerate() {
        if line.starts_with("<body") {
            let end = lines.len().saturating_sub(3).max(i + 1);
            return lines[i + 1..end].join("\n");
        }
    }
    html.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_body_fragment() {
        let html = "<html>\n<head></head>\n<body class=\"article\">\n<h1>Hi</h1>\n<p>text</p>\n</body>\n</html>\n";
        assert_eq!(extract_body(html), "<h1>Hi</h1>\n<p>text</p>");
    }

    #[test]
    fn test_extract_without_body_tag() {
        let html = "<p>already a fragment</p>";
        assert_eq!(extract_body(html), html);
    }
}
