//! CLI-specific transforms
//!
//! This module defines the views `docstream inspect` can print. Each one stops
//! the pipeline at a different stage:
//!
//! 1. **Parsing** - Source text → markup tree
//!    - `tree`: indented outline of elements and text
//!
//! 2. **Extraction** - Markup tree → blocks
//!    - `blocks`: one line per block with its style, list and cell data
//!
//! 3. **Generation** - Blocks → requests
//!    - `requests`: the plain request listing
//!    - `requests-json`: the raw request values as JSON
//!
//! Example: `docstream inspect page.html blocks`

use docstream_babel::formats::requests::to_listing;
use docstream_babel::ir::blocks::Block;
use docstream_babel::ir::nodes::{Document, Element, MarkupNode};
use docstream_babel::transforms::{document_blocks, parse_source, CompileOptions};
use docstream_babel::{compile_document, FormatRegistry};
use std::fmt::Write;

/// All available CLI transforms
pub const AVAILABLE_TRANSFORMS: &[&str] = &["tree", "blocks", "requests", "requests-json"];

/// Execute a named transform on source text in the given input format
///
/// # Examples
///
/// ```ignore
/// let options = CompileOptions::default();
/// let output = execute_transform("<p>Hi</p>", "html", "blocks", &options)?;
/// ```
pub fn execute_transform(
    source: &str,
    format: &str,
    transform_name: &str,
    options: &CompileOptions,
) -> Result<String, String> {
    let registry = FormatRegistry::default();
    let doc = parse_source(&registry, source, format).map_err(|e| format!("Parse failed: {e}"))?;

    match transform_name {
        "tree" => Ok(render_tree(&doc)),
        "blocks" => {
            let blocks =
                document_blocks(&doc, options).map_err(|e| format!("Transform failed: {e}"))?;
            Ok(render_blocks(&blocks))
        }
        "requests" => {
            let requests =
                compile_document(&doc, options).map_err(|e| format!("Transform failed: {e}"))?;
            Ok(to_listing(&requests))
        }
        "requests-json" => {
            let requests =
                compile_document(&doc, options).map_err(|e| format!("Transform failed: {e}"))?;
            let json = serde_json::to_string_pretty(&requests)
                .map_err(|e| format!("JSON serialization failed: {e}"))?;
            Ok(json + "\n")
        }
        _ => Err(format!("Unknown transform: {transform_name}")),
    }
}

fn render_tree(doc: &Document) -> String {
    let mut output = String::from("document\n");
    let children = visible(&doc.children);
    for (i, child) in children.iter().enumerate() {
        render_node(child, "", i + 1 == children.len(), &mut output);
    }
    output
}

// Whitespace-only text between elements is noise in the outline.
fn visible(nodes: &[MarkupNode]) -> Vec<&MarkupNode> {
    nodes
        .iter()
        .filter(|node| !matches!(node, MarkupNode::Text(text) if text.trim().is_empty()))
        .collect()
}

fn render_node(node: &MarkupNode, prefix: &str, is_last: bool, output: &mut String) {
    let branch = if is_last { "└─ " } else { "├─ " };
    match node {
        MarkupNode::Text(text) => {
            let _ = writeln!(output, "{prefix}{branch}{text:?}");
        }
        MarkupNode::Element(element) => {
            let _ = writeln!(output, "{prefix}{branch}{}", element_label(element));
            let child_prefix = format!("{prefix}{}", if is_last { "   " } else { "│  " });
            let children = visible(&element.children);
            for (i, child) in children.iter().enumerate() {
                render_node(child, &child_prefix, i + 1 == children.len(), output);
            }
        }
    }
}

fn element_label(element: &Element) -> String {
    let mut label = element.tag.clone();
    for (name, value) in &element.attributes {
        let _ = write!(label, " {name}={value:?}");
    }
    label
}

fn render_blocks(blocks: &[Block]) -> String {
    let mut output = String::new();
    for (i, block) in blocks.iter().enumerate() {
        let _ = write!(
            output,
            "[{i}] {} {:?}",
            block.paragraph_style.as_str(),
            block.text
        );
        if let Some(list) = &block.list {
            let _ = write!(
                output,
                " list={} level={} position={}",
                if list.ordered { "ordered" } else { "unordered" },
                list.nesting_level,
                list.position
            );
        }
        if let Some(cell) = &block.table {
            let _ = write!(
                output,
                " cell=t{} row={} column={} span={}x{}",
                cell.table, cell.row_index, cell.column_index, cell.row_span, cell.column_span
            );
        }
        output.push('\n');
        for interval in &block.inline_styles {
            let _ = writeln!(
                output,
                "    [{}, {}) {}",
                interval.start,
                interval.end,
                interval.style.field_names().join(" ")
            );
        }
    }
    output
}
