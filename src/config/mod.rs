//! Preview server configuration.
//!
//! Everything here is assembled once from CLI arguments at startup and is
//! immutable afterwards. The filter rule sets mirror the wiki conventions
//! the server understands: which extensions are documents, which are plain
//! resources, and which paths are tooling noise to ignore.

mod rules;

pub use rules::FilterRules;

use std::net::{IpAddr, Ipv4Addr};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};

use crate::cli::Cli;
use crate::utils::path::normalize_path;

/// Sidebar panel document, by wiki convention.
pub const SIDEBAR_FILE: &str = "_Sidebar.md";
/// Footer panel document, by wiki convention.
pub const FOOTER_FILE: &str = "_Footer.md";

/// Development server settings.
#[derive(Debug, Clone)]
pub struct ServeConfig {
    /// Network interface to bind.
    /// - `127.0.0.1` (default): localhost only
    /// - `0.0.0.0`: all interfaces (LAN accessible)
    pub interface: IpAddr,

    /// HTTP port number.
    pub port: u16,
}

impl Default for ServeConfig {
    fn default() -> Self {
        Self {
            interface: IpAddr::V4(Ipv4Addr::new(127, 0, 0, 1)),
            port: 3000,
        }
    }
}

/// How document text is transformed and rendered before broadcast.
#[derive(Debug, Clone)]
pub struct RenderConfig {
    /// Expand blank lines into explicit visual-break elements.
    pub hard_line_breaks: bool,
    /// Remove a leading `---`-delimited metadata block.
    pub strip_header_metadata: bool,
    /// Compute change markers so viewers can scroll to the edit point.
    pub scroll_spy: bool,
    /// Render markdown in-process or asciidoc via an external tool.
    pub mode: RenderMode,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            hard_line_breaks: false,
            strip_header_metadata: false,
            scroll_spy: true,
            mode: RenderMode::Markdown,
        }
    }
}

/// Document-to-HTML conversion backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderMode {
    Markdown,
    Asciidoc,
}

/// Root configuration for one preview server instance.
#[derive(Debug, Clone)]
pub struct PreviewConfig {
    /// Directory being previewed (absolute).
    pub root: PathBuf,
    pub serve: ServeConfig,
    pub render: RenderConfig,
    pub filters: FilterRules,
}

impl Default for PreviewConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::new(),
            serve: ServeConfig::default(),
            render: RenderConfig::default(),
            filters: FilterRules::default(),
        }
    }
}

impl PreviewConfig {
    /// Build configuration from parsed CLI arguments.
    ///
    /// The directory argument defaults to the current directory and must
    /// name an existing directory.
    pub fn from_cli(cli: &Cli) -> Result<Self> {
        let root = match &cli.dir {
            Some(dir) => normalize_path(dir),
            None => std::env::current_dir().context("cannot determine current directory")?,
        };
        if !root.is_dir() {
            bail!("not a directory: {}", root.display());
        }

        Ok(Self {
            root,
            serve: ServeConfig {
                interface: cli.interface,
                port: cli.port,
            },
            render: RenderConfig {
                hard_line_breaks: cli.hard_line_breaks,
                strip_header_metadata: cli.topless,
                scroll_spy: cli.scroll_spy,
                mode: if cli.adoc {
                    RenderMode::Asciidoc
                } else {
                    RenderMode::Markdown
                },
            },
            filters: FilterRules::default(),
        })
    }

    /// Absolute path of the sidebar panel document.
    pub fn sidebar_path(&self) -> PathBuf {
        self.root.join(SIDEBAR_FILE)
    }

    /// Absolute path of the footer panel document.
    pub fn footer_path(&self) -> PathBuf {
        self.root.join(FOOTER_FILE)
    }

    /// Whether this path is one of the panel documents that never carry
    /// a change marker.
    pub fn is_panel_file(&self, path: &Path) -> bool {
        path.file_name()
            .and_then(|n| n.to_str())
            .map(|name| name == SIDEBAR_FILE || name == FOOTER_FILE)
            .unwrap_or(false)
    }
}
