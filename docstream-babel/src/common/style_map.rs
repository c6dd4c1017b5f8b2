//! Tag to style lookup.
//!
//! Maps an element's tag name and attributes onto a [`TextStyle`] (character
//! level) or a [`NamedStyle`] (paragraph level). The lookup is pure: the same
//! tag and attributes always produce the same style, and unknown tags produce
//! an empty style rather than an error.
//!
//! | Markup                          | Style                    |
//! |---------------------------------|--------------------------|
//! | `strong`, `b`                   | bold                     |
//! | `em`, `i`                       | italic                   |
//! | `u`, `ins`                      | underline                |
//! | `s`, `strike`, `del`            | strikethrough            |
//! | `a[href]`                       | link                     |
//! | `style="color: #rrggbb"`        | foreground color         |
//! | `font[color]`                   | foreground color         |
//! | `h1`..`h6`                      | heading 1..6 (paragraph) |
//!
//! Callers can register per-tag overrides; they are merged over the computed
//! style with the override winning.

use crate::common::links::LinkResolver;
use crate::ir::nodes::Element;
use crate::ir::style::{NamedStyle, RgbColor, TextStyle};
use std::collections::HashMap;

/// Computes styles for elements, applying configured per-tag overrides.
#[derive(Debug, Clone, Default)]
pub struct StyleMapper {
    overrides: HashMap<String, TextStyle>,
    links: LinkResolver,
}

impl StyleMapper {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_links(mut self, links: LinkResolver) -> Self {
        self.links = links;
        self
    }

    /// Registers an override for `tag`, merged over the computed style.
    pub fn with_override(mut self, tag: &str, style: TextStyle) -> Self {
        self.set_override(tag, style);
        self
    }

    pub fn set_override(&mut self, tag: &str, style: TextStyle) {
        let tag = tag.to_ascii_lowercase();
        let merged = match self.overrides.remove(&tag) {
            Some(existing) => existing.merged_with(&style),
            None => style,
        };
        self.overrides.insert(tag, merged);
    }

    /// Character-level style for an element.
    pub fn text_style(&self, element: &Element) -> TextStyle {
        let computed = map_text_style(element, &self.links);
        match self.overrides.get(element.tag.as_str()) {
            Some(style) => computed.merged_with(style),
            None => computed,
        }
    }

    /// Paragraph-level style for a block element.
    pub fn paragraph_style(&self, element: &Element) -> NamedStyle {
        map_paragraph_style(&element.tag)
    }
}

/// Computes the character-level style of a single element, without overrides.
pub fn map_text_style(element: &Element, links: &LinkResolver) -> TextStyle {
    let mut style = match element.tag.as_str() {
        "strong" | "b" => TextStyle::bold(),
        "em" | "i" => TextStyle::italic(),
        "u" | "ins" => TextStyle::underline(),
        "s" | "strike" | "del" => TextStyle::strikethrough(),
        "a" => element
            .attribute("href")
            .and_then(|href| links.resolve(href))
            .map(TextStyle::link)
            .unwrap_or_default(),
        "font" => element
            .attribute("color")
            .and_then(RgbColor::from_hex)
            .map(TextStyle::foreground)
            .unwrap_or_default(),
        _ => TextStyle::default(),
    };

    if let Some(color) = element.attribute("style").and_then(inline_color) {
        style.foreground = Some(color);
    }

    style
}

/// Heading rank for `h1`..`h6`, normal text for everything else.
pub fn map_paragraph_style(tag: &str) -> NamedStyle {
    match tag.strip_prefix('h').and_then(|rank| rank.parse::<usize>().ok()) {
        Some(rank) if (1..=6).contains(&rank) => NamedStyle::heading(rank),
        _ => NamedStyle::NormalText,
    }
}

/// Extracts the `color` declaration of an inline `style` attribute.
fn inline_color(style: &str) -> Option<RgbColor> {
    style
        .split(';')
        .filter_map(|declaration| declaration.split_once(':'))
        .filter(|(property, _)| property.trim().eq_ignore_ascii_case("color"))
        .filter_map(|(_, value)| RgbColor::from_hex(value.trim().trim_end_matches("!important")))
        .last()
}
