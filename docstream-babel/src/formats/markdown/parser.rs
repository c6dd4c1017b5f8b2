//! Markdown → markup tree
//!
//! Markdown is rendered to HTML with comrak and then parsed like any other
//! HTML input, so both syntaxes share one extraction path.

use crate::formats::html::parse_html;
use crate::ir::nodes::Document;
use comrak::{markdown_to_html, ComrakOptions};

pub fn parse_markdown(source: &str) -> Document {
    let html = markdown_to_html(source, &default_comrak_options());
    parse_html(&html)
}

fn default_comrak_options() -> ComrakOptions<'static> {
    let mut options = ComrakOptions::default();
    options.extension.table = true;
    options.extension.strikethrough = true;
    options.extension.autolink = true;
    options.extension.tasklist = true;
    options.extension.front_matter_delimiter = Some("---".to_string());
    // Raw HTML in the source is passed through to the HTML parser.
    options.render.unsafe_ = true;
    options
}
