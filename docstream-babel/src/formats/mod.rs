//! Format implementations
//!
//! Input formats (`html`, `markdown`) produce the markup tree; output formats
//! (`docs-json`, `requests`) render the compiled request sequence.

pub mod docs_json;
pub mod html;
pub mod markdown;
pub mod requests;

pub use docs_json::DocsJsonFormat;
pub use html::HtmlFormat;
pub use markdown::MarkdownFormat;
pub use requests::RequestsFormat;
