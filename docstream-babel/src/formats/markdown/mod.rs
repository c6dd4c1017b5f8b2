//! Markdown input format
//!
//! # Library Choice
//!
//! We use the `comrak` crate for Markdown: CommonMark compliant, with the
//! GitHub extensions (tables, strikethrough, autolinks, task lists) that
//! real-world documents rely on.
//!
//! Markdown is not mapped onto the markup tree directly. comrak renders it to
//! HTML, which then goes through the HTML parser, so every construct Markdown
//! can express is handled by the same extraction code as hand-written HTML.

pub mod parser;

use crate::error::ConvertError;
use crate::format::Format;
use crate::ir::nodes::Document;

pub use parser::parse_markdown;

/// Markdown parsing format
#[derive(Debug, Default, Clone, Copy)]
pub struct MarkdownFormat;

impl Format for MarkdownFormat {
    fn name(&self) -> &str {
        "markdown"
    }

    fn description(&self) -> &str {
        "CommonMark with GitHub extensions"
    }

    fn file_extensions(&self) -> &[&str] {
        &["md", "markdown"]
    }

    fn supports_parsing(&self) -> bool {
        true
    }

    fn parse(&self, source: &str) -> Result<Document, ConvertError> {
        Ok(parse_markdown(source))
    }
}
