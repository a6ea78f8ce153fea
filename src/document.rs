//! Markdown document parsing and rendering.
//!
//! A task file is an optional YAML frontmatter block delimited by `---`
//! lines, followed by a free-text body. The grammar is strict: a malformed
//! delimiter is always an error, never demoted to body text. The only input
//! that falls back to a plain body is text with no delimiter line at all.

use crate::error::{Error, Result};
use crate::frontmatter::Frontmatter;

/// The frontmatter delimiter, exactly three dashes on its own line.
const MARKER: &str = "---";

/// A parsed markdown document.
///
/// `title` comes from the source filename, never from metadata.
/// `frontmatter` is empty when the document has no metadata block.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub title: String,
    pub frontmatter: Frontmatter,
    pub body: String,
}

impl Document {
    /// A document with no frontmatter and no body.
    pub fn empty(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            frontmatter: Frontmatter::new(),
            body: String::new(),
        }
    }
}

/// Parse raw text into a [`Document`].
///
/// Grammar, in decision order:
/// 1. Empty or whitespace-only input is a valid empty document.
/// 2. Leading whitespace with a delimiter line anywhere later is an error.
/// 3. The trimmed text starting with a dash run that is not exactly `---`
///    on its own line is an error.
/// 4. A delimiter line present without the text starting on one is an error.
/// 5. An opening delimiter without a closing delimiter line is an error.
/// 6. A second complete delimited block after the first is an error.
/// 7. The block interior must decode as a YAML mapping.
/// 8. With no delimiter line anywhere, the whole trimmed text is the body.
pub fn parse_document(title: impl Into<String>, source: &str) -> Result<Document> {
    let title = title.into();

    if source.trim().is_empty() {
        return Ok(Document::empty(title));
    }

    let has_delimiter_line = source.lines().any(|line| line == MARKER);

    if source != source.trim_start() {
        if has_delimiter_line {
            return Err(Error::WhitespaceBeforeFrontmatter);
        }
        // No delimiter anywhere: may still be a malformed dash run, which
        // the marker check below catches against the trimmed text.
    }

    let trimmed = source.trim();
    let lines: Vec<&str> = trimmed.lines().collect();

    if trimmed.starts_with("--") {
        if lines[0] != MARKER {
            return Err(Error::InvalidMarker);
        }
    } else if has_delimiter_line {
        return Err(Error::ContentBeforeFrontmatter);
    } else {
        return Ok(Document {
            title,
            frontmatter: Frontmatter::new(),
            body: trimmed.to_string(),
        });
    }

    let closing = match lines
        .iter()
        .skip(1)
        .position(|line| *line == MARKER)
        .map(|offset| offset + 1)
    {
        Some(index) => index,
        None => return Err(Error::UnclosedFrontmatter),
    };

    // Two further delimiter lines after the close form a second block.
    let extra_markers = lines[closing + 1..]
        .iter()
        .filter(|line| **line == MARKER)
        .count();
    if extra_markers >= 2 {
        return Err(Error::MultipleFrontmatterBlocks);
    }

    let interior = lines[1..closing].join("\n");
    let frontmatter: Frontmatter = if interior.trim().is_empty() {
        Frontmatter::new()
    } else {
        serde_yaml::from_str(&interior).map_err(Error::InvalidFrontmatter)?
    };

    let body = if closing + 1 < lines.len() {
        lines[closing + 1..].join("\n").trim().to_string()
    } else {
        String::new()
    };

    Ok(Document {
        title,
        frontmatter,
        body,
    })
}

/// Render a document back to its file form.
///
/// Frontmatter keys serialize in map order, so output is deterministic.
pub fn render_document(doc: &Document) -> Result<String> {
    if doc.frontmatter.is_empty() {
        if doc.body.is_empty() {
            return Ok(String::new());
        }
        return Ok(format!("{}\n", doc.body));
    }

    let yaml = serde_yaml::to_string(&doc.frontmatter)?;
    Ok(format!("{}\n{}{}\n\n{}", MARKER, yaml, MARKER, doc.body))
}

/// Derive a document title from a file path: the file stem, extension
/// stripped.
pub fn title_from_path(path: &std::path::Path) -> String {
    path.file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default()
}
