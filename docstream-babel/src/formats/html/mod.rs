//! HTML input format
//!
//! # Library Choice
//!
//! We use the `html5ever` + `markup5ever_rcdom` ecosystem for HTML parsing:
//! - `html5ever`: Browser-grade HTML5 parser from the Servo project
//! - `markup5ever_rcdom`: Reference-counted DOM tree implementation
//!
//! Parsing follows the WHATWG tree construction rules, which is exactly the
//! "tolerate malformed markup" behaviour the compiler needs: there is no input
//! this format rejects.

pub mod parser;

use crate::error::ConvertError;
use crate::format::Format;
use crate::ir::nodes::Document;

pub use parser::parse_html;

/// HTML parsing format
#[derive(Debug, Default, Clone, Copy)]
pub struct HtmlFormat;

impl Format for HtmlFormat {
    fn name(&self) -> &str {
        "html"
    }

    fn description(&self) -> &str {
        "HTML5 documents and fragments"
    }

    fn file_extensions(&self) -> &[&str] {
        &["html", "htm", "xhtml"]
    }

    fn supports_parsing(&self) -> bool {
        true
    }

    fn parse(&self, source: &str) -> Result<Document, ConvertError> {
        Ok(parse_html(source))
    }
}
