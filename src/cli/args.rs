//! Command-line interface definitions.

use clap::{ColorChoice, Parser};
use std::net::IpAddr;
use std::path::PathBuf;

/// mdcast live preview CLI
#[derive(Parser, Debug, Clone)]
#[command(about, long_about = None)]
pub struct Cli {
    /// Directory of documents to preview (default: current directory)
    #[arg(value_hint = clap::ValueHint::DirPath)]
    pub dir: Option<PathBuf>,

    /// Network interface to bind (e.g., 127.0.0.1, 0.0.0.0)
    #[arg(short, long, default_value = "127.0.0.1")]
    pub interface: IpAddr,

    /// Port number to listen on
    #[arg(short, long, default_value_t = 3000)]
    pub port: u16,

    /// Remove leading file header tags delimited by `---` lines, e.g.
    ///
    ///   ---
    ///   name: Home
    ///   category: documentation
    ///   ---
    #[arg(long, verbatim_doc_comment)]
    pub topless: bool,

    /// Enable hard line breaks
    #[arg(short = 'n', long)]
    pub hard_line_breaks: bool,

    /// Enable or disable automatic scrolling to the most recent change
    #[arg(short = 's', long, action = clap::ArgAction::Set, num_args = 0..=1, default_value_t = true, default_missing_value = "true", require_equals = false)]
    pub scroll_spy: bool,

    /// Render documents as asciidoc via asciidoctor/asciidoc
    #[arg(long)]
    pub adoc: bool,

    /// Enable verbose output for debugging
    #[arg(short = 'V', long)]
    pub verbose: bool,

    /// Control colored output (auto, always, never)
    #[arg(long, default_value = "auto")]
    pub color: ColorChoice,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cli = Cli::parse_from(["mdcast"]);
        assert_eq!(cli.port, 3000);
        assert!(cli.scroll_spy);
        assert!(!cli.topless);
        assert!(!cli.adoc);
        assert!(cli.dir.is_none());
    }

    #[test]
    fn test_scroll_spy_can_be_disabled() {
        let cli = Cli::parse_from(["mdcast", "-s", "false"]);
        assert!(!cli.scroll_spy);
    }

    #[test]
    fn test_directory_argument() {
        let cli = Cli::parse_from(["mdcast", "/srv/wiki"]);
        assert_eq!(cli.dir, Some(PathBuf::from("/srv/wiki")));
    }
}
