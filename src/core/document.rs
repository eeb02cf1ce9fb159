//! Splitting markdown documents around their front matter block
//!
//! A document opens with a `---` line (optionally preceded by whitespace),
//! carries its metadata up to the next line that is exactly `---`, and
//! continues with the body. Anything after the closing line is body text,
//! including further `---` lines.

use crate::config::ConvertConfig;
use crate::core::front_matter::{FrontMatterConverter, FRONT_MATTER_DELIMITER};
use crate::error::{H2hError, Result};

/// A document split into its front matter block and body
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SplitDocument<'a> {
    /// Text strictly between the two delimiter lines
    pub front_matter: &'a str,
    /// Text after the closing delimiter line and at most one blank line
    pub body: &'a str,
}

/// Split `content` into front matter and body.
///
/// Fails with [`H2hError::InvalidDocument`] when the document is empty, does
/// not open with a delimiter line, or never closes its front matter.
pub fn split_document(content: &str) -> Result<SplitDocument<'_>> {
    if content.trim().is_empty() {
        return Err(H2hError::invalid_document("empty document"));
    }

    let start = content.trim_start();
    let after_open = start
        .strip_prefix(FRONT_MATTER_DELIMITER)
        .and_then(strip_line_ending)
        .ok_or_else(|| H2hError::invalid_document("missing front matter delimiters"))?;

    let mut offset = 0;
    for line in after_open.split_inclusive('\n') {
        if is_delimiter_line(line) {
            let front_matter = &after_open[..offset];
            let rest = &after_open[offset + line.len()..];
            let body = strip_line_ending(rest).unwrap_or(rest);
            return Ok(SplitDocument { front_matter, body });
        }
        offset += line.len();
    }

    Err(H2hError::invalid_document(
        "missing closing front matter delimiter",
    ))
}

fn strip_line_ending(text: &str) -> Option<&str> {
    text.strip_prefix("\r\n").or_else(|| text.strip_prefix('\n'))
}

fn is_delimiter_line(line: &str) -> bool {
    line.trim_end_matches('\n').trim_end_matches('\r') == FRONT_MATTER_DELIMITER
}

/// Rewrites whole markdown documents: front matter transcoded, body untouched
#[derive(Debug, Clone)]
pub struct MarkdownConverter {
    front_matter: FrontMatterConverter,
}

impl MarkdownConverter {
    pub fn new(front_matter: FrontMatterConverter) -> Self {
        Self { front_matter }
    }

    pub fn from_config(config: &ConvertConfig) -> Self {
        Self::new(FrontMatterConverter::from_config(config))
    }

    pub fn front_matter_converter(&self) -> &FrontMatterConverter {
        &self.front_matter
    }

    /// Convert a full document; exactly one blank line separates the new
    /// front matter from the body
    pub fn convert(&self, content: &str) -> Result<String> {
        let split = split_document(content)?;
        let front_matter = self.front_matter.convert(split.front_matter)?;

        let mut output = String::with_capacity(front_matter.len() + split.body.len() + 2);
        output.push_str(&front_matter);
        output.push_str("\n\n");
        output.push_str(split.body);
        Ok(output)
    }
}
