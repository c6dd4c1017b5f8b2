//! Element categories used while walking markup.
//!
//! Every tag falls into exactly one category. Tags not listed anywhere are
//! [`TagKind::Transparent`]: their children are walked as if they belonged to
//! the parent, which is how unknown and sectioning elements are tolerated.

/// How the extractor and collector treat an element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagKind {
    /// Becomes one block (or a container, if it holds blocks).
    Block,
    /// `ul` / `ol`.
    List,
    /// `table`.
    Table,
    /// Contributes text and style to the surrounding block.
    Inline,
    /// Explicit line break.
    LineBreak,
    /// Contributes nothing at all.
    Skipped,
    /// Children are walked in place of the element.
    Transparent,
}

const BLOCK_TAGS: &[&str] = &[
    "p",
    "h1",
    "h2",
    "h3",
    "h4",
    "h5",
    "h6",
    "pre",
    "div",
    "blockquote",
    "address",
    "figcaption",
    "dt",
    "dd",
    "center",
];

const INLINE_TAGS: &[&str] = &[
    "a", "abbr", "b", "bdi", "bdo", "cite", "code", "data", "del", "dfn", "em", "font", "i", "ins",
    "kbd", "label", "mark", "q", "s", "samp", "small", "span", "strike", "strong", "sub", "sup",
    "time", "tt", "u", "var",
];

const SKIPPED_TAGS: &[&str] = &[
    "head", "script", "style", "template", "noscript", "title", "meta", "link", "img", "hr",
    "iframe", "object", "embed", "video", "audio", "canvas", "svg", "math", "input", "button",
    "select", "textarea",
];

/// Tags whose text content keeps its whitespace verbatim.
const PRESERVE_WHITESPACE_TAGS: &[&str] = &["pre", "listing", "xmp", "plaintext"];

pub fn classify(tag: &str) -> TagKind {
    match tag {
        "br" => TagKind::LineBreak,
        "ul" | "ol" => TagKind::List,
        "table" => TagKind::Table,
        _ if BLOCK_TAGS.contains(&tag) => TagKind::Block,
        _ if INLINE_TAGS.contains(&tag) => TagKind::Inline,
        _ if SKIPPED_TAGS.contains(&tag) => TagKind::Skipped,
        _ => TagKind::Transparent,
    }
}

/// True for elements that start a new line when found inside collected text.
pub fn breaks_flow(tag: &str) -> bool {
    matches!(
        classify(tag),
        TagKind::Block | TagKind::List | TagKind::Table
    ) || matches!(tag, "li" | "tr" | "td" | "th" | "caption" | "dl")
}

pub fn preserves_whitespace(tag: &str, style: Option<&str>) -> bool {
    if PRESERVE_WHITESPACE_TAGS.contains(&tag) {
        return true;
    }
    style.is_some_and(|style| {
        style
            .split(';')
            .filter_map(|declaration| declaration.split_once(':'))
            .any(|(property, value)| {
                property.trim().eq_ignore_ascii_case("white-space")
                    && matches!(value.trim(), "pre" | "pre-wrap" | "break-spaces")
            })
    })
}
