//! HTML → markup tree
//!
//! html5ever repairs malformed input the way browsers do (implied `body`,
//! auto-closed paragraphs, misnested inline tags), so parsing never fails.
//! The repaired DOM is then copied into the owned tree: elements and text
//! survive, comments, doctypes and processing instructions are dropped.

use crate::ir::nodes::{Document, Element, MarkupNode};
use html5ever::parse_document;
use html5ever::tendril::TendrilSink;
use markup5ever_rcdom::{Handle, NodeData, RcDom};
use tracing::trace;

/// Parses an HTML document or fragment and returns the content of its body.
pub fn parse_html(source: &str) -> Document {
    let dom = parse_document(RcDom::default(), Default::default()).one(source);

    match find_element(&dom.document, "body") {
        Some(body) => Document::new(convert_children(&body)),
        None => {
            trace!("parsed document has no body");
            Document::default()
        }
    }
}

fn find_element(handle: &Handle, tag: &str) -> Option<Handle> {
    if let NodeData::Element { ref name, .. } = handle.data {
        if name.local.as_ref() == tag {
            return Some(handle.clone());
        }
    }
    handle
        .children
        .borrow()
        .iter()
        .find_map(|child| find_element(child, tag))
}

fn convert_children(handle: &Handle) -> Vec<MarkupNode> {
    handle
        .children
        .borrow()
        .iter()
        .filter_map(convert_node)
        .collect()
}

fn convert_node(handle: &Handle) -> Option<MarkupNode> {
    match handle.data {
        NodeData::Element {
            ref name,
            ref attrs,
            ..
        } => {
            let mut element = Element::new(name.local.as_ref());
            element.attributes = attrs
                .borrow()
                .iter()
                .map(|attr| {
                    (
                        attr.name.local.as_ref().to_ascii_lowercase(),
                        attr.value.to_string(),
                    )
                })
                .collect();
            element.children = convert_children(handle);
            Some(MarkupNode::Element(element))
        }
        NodeData::Text { ref contents } => Some(MarkupNode::Text(contents.borrow().to_string())),
        NodeData::Document
        | NodeData::Doctype { .. }
        | NodeData::Comment { .. }
        | NodeData::ProcessingInstruction { .. } => None,
    }
}
