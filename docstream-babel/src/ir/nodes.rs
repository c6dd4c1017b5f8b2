//! Owned markup tree consumed by the compiler.
//!
//! Concrete parsers (see `formats/`) convert their native DOM into this tree so
//! the extraction code never depends on a particular parser's node handles.

/// The root of a parsed document: the ordered top-level nodes of its body.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Document {
    pub children: Vec<MarkupNode>,
}

/// A single node in the markup tree.
#[derive(Debug, Clone, PartialEq)]
pub enum MarkupNode {
    Element(Element),
    Text(String),
}

/// An element with a lower-cased tag name, its attributes and ordered children.
#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    pub tag: String,
    pub attributes: Vec<(String, String)>,
    pub children: Vec<MarkupNode>,
}

impl Document {
    pub fn new(children: Vec<MarkupNode>) -> Self {
        Self { children }
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }
}

impl Element {
    pub fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_ascii_lowercase(),
            attributes: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Builder-style attribute setter, mostly useful in tests.
    pub fn with_attribute(mut self, name: &str, value: &str) -> Self {
        self.attributes
            .push((name.to_ascii_lowercase(), value.to_string()));
        self
    }

    pub fn with_child(mut self, child: MarkupNode) -> Self {
        self.children.push(child);
        self
    }

    pub fn with_text(self, text: &str) -> Self {
        self.with_child(MarkupNode::text(text))
    }

    /// Looks up an attribute by name, ignoring ASCII case.
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    /// Iterates over the direct element children, skipping text.
    pub fn child_elements(&self) -> impl Iterator<Item = &Element> {
        self.children.iter().filter_map(|child| match child {
            MarkupNode::Element(element) => Some(element),
            MarkupNode::Text(_) => None,
        })
    }
}

impl MarkupNode {
    pub fn text(text: &str) -> Self {
        MarkupNode::Text(text.to_string())
    }

    pub fn as_element(&self) -> Option<&Element> {
        match self {
            MarkupNode::Element(element) => Some(element),
            MarkupNode::Text(_) => None,
        }
    }

    /// True for text nodes that hold nothing but whitespace.
    pub fn is_blank_text(&self) -> bool {
        matches!(self, MarkupNode::Text(text) if text.trim().is_empty())
    }
}

impl From<Element> for MarkupNode {
    fn from(element: Element) -> Self {
        MarkupNode::Element(element)
    }
}
