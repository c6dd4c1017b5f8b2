//! Compilation pipeline
//!
//! Ties the stages together: source text → markup tree (via a registered
//! input format) → blocks → requests → output text (via a registered output
//! format). Each call builds its own extractor and generator, so nothing is
//! shared between compiles.

use crate::common::flat_to_requests::{generate_requests, GenerateOptions};
use crate::common::nested_to_flat::extract_blocks;
use crate::common::style_map::StyleMapper;
use crate::error::ConvertError;
use crate::ir::blocks::Block;
use crate::ir::nodes::Document;
use crate::ir::requests::Request;
use crate::registry::FormatRegistry;
use std::collections::HashMap;
use tracing::{debug, debug_span};

/// Everything that shapes one compile.
#[derive(Debug, Clone, Default)]
pub struct CompileOptions {
    pub styles: StyleMapper,
    pub generate: GenerateOptions,
}

/// Compiles a markup tree into its ordered request sequence.
///
/// Fails only when the document has no content at all.
pub fn compile_document(
    doc: &Document,
    options: &CompileOptions,
) -> Result<Vec<Request>, ConvertError> {
    let blocks = document_blocks(doc, options)?;
    Ok(generate_requests(&blocks, &options.generate))
}

/// Extracts the block sequence of a markup tree.
pub fn document_blocks(
    doc: &Document,
    options: &CompileOptions,
) -> Result<Vec<Block>, ConvertError> {
    if doc.is_empty() {
        return Err(ConvertError::EmptyInput);
    }
    let _span = debug_span!("compile", nodes = doc.children.len()).entered();
    Ok(extract_blocks(doc, &options.styles))
}

/// Parses `source` with the named input format.
///
/// Whitespace-only input is rejected up front, before any parsing.
pub fn parse_source(
    registry: &FormatRegistry,
    source: &str,
    format: &str,
) -> Result<Document, ConvertError> {
    if source.trim().is_empty() {
        return Err(ConvertError::EmptyInput);
    }
    let doc = registry.parse(source, format)?;
    debug!(format, nodes = doc.children.len(), "parsed source");
    Ok(doc)
}

/// Parses and compiles `source` with the named input format.
pub fn compile_source(
    registry: &FormatRegistry,
    source: &str,
    format: &str,
    options: &CompileOptions,
) -> Result<Vec<Request>, ConvertError> {
    let doc = parse_source(registry, source, format)?;
    compile_document(&doc, options)
}

/// Compiles an HTML document or fragment.
pub fn compile_html(source: &str, options: &CompileOptions) -> Result<Vec<Request>, ConvertError> {
    compile_source(&FormatRegistry::default(), source, "html", options)
}

/// Compiles a Markdown document.
pub fn compile_markdown(
    source: &str,
    options: &CompileOptions,
) -> Result<Vec<Request>, ConvertError> {
    compile_source(&FormatRegistry::default(), source, "markdown", options)
}

/// Full conversion: parse with `from`, compile, serialize with `to`.
///
/// `format_options` are handed to the output format unchanged.
pub fn convert(
    registry: &FormatRegistry,
    source: &str,
    from: &str,
    to: &str,
    options: &CompileOptions,
    format_options: &HashMap<String, String>,
) -> Result<String, ConvertError> {
    // Fail on a bad target before doing any work.
    registry.get(to)?;
    let requests = compile_source(registry, source, from, options)?;
    registry.serialize_with_options(&requests, to, format_options)
}
