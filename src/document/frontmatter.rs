//! Leading metadata-header stripping.
//!
//! Wiki exports often carry a metadata block at the top of each file:
//!
//! ```text
//! ---
//! name: Home
//! category: documentation
//! ---
//! ```
//!
//! When stripping is enabled, everything from the start of the file
//! through the end of the second line that is exactly `---` is discarded.
//! Fewer than two delimiter lines leaves the text unchanged, so ordinary
//! horizontal rules deeper in a document are safe as long as the header
//! is absent.

use std::borrow::Cow;

/// Strip a leading `---`-delimited metadata block.
///
/// Re-prepending the removed block reproduces the input byte for byte.
pub fn strip_header_metadata(text: &str) -> Cow<'_, str> {
    let mut delimiters = 0;
    let mut consumed = 0;

    for line in text.split_inclusive('\n') {
        consumed += line.len();
        let content = line.strip_suffix('\n').unwrap_or(line);
        let content = content.strip_suffix('\r').unwrap_or(content);
        if content == "---" {
            delimiters += 1;
            if delimiters == 2 {
                return Cow::Borrowed(&text[consumed..]);
            }
        }
    }

    Cow::Borrowed(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strips_well_formed_header() {
        let text = "---\nname: Home\ncategory: docs\n---\n# Body\n";
        assert_eq!(strip_header_metadata(text), "# Body\n");
    }

    #[test]
    fn test_round_trip_is_byte_identical() {
        let header = "---\nname: Home\n---\n";
        let body = "# Body\n\nparagraph\n";
        let original = format!("{header}{body}");

        let stripped = strip_header_metadata(&original).into_owned();
        assert_eq!(stripped, body);
        assert_eq!(format!("{header}{stripped}"), original);
    }

    #[test]
    fn test_single_delimiter_unchanged() {
        let text = "---\nno closing delimiter\n";
        assert_eq!(strip_header_metadata(text), text);
    }

    #[test]
    fn test_no_delimiters_unchanged() {
        let text = "# Plain document\n";
        assert_eq!(strip_header_metadata(text), text);
    }

    #[test]
    fn test_dashes_must_be_exact() {
        // "----" or indented dashes are not delimiters
        let text = "----\nname: x\n ---\nbody\n";
        assert_eq!(strip_header_metadata(text), text);
    }

    #[test]
    fn test_header_without_trailing_newline() {
        let text = "---\nname: x\n---";
        assert_eq!(strip_header_metadata(text), "");
    }
}
