use crate::common::{html_requests, lines_of};
use docstream_babel::common::links::LinkResolver;
use docstream_babel::ir::style::TextStyle;
use docstream_babel::{compile_html, CompileOptions, StyleMapper};

#[test]
fn nested_emphasis_keeps_both_extents() {
    let requests = html_requests("<p><b>bold <i>both</i></b></p>");
    assert_eq!(
        lines_of(&requests, "SetTextStyle"),
        vec!["SetTextStyle [1, 10) bold", "SetTextStyle [6, 10) italic"]
    );
}

#[test]
fn same_range_styles_fold_together() {
    let requests = html_requests("<p>x <b><i><u>all</u></i></b></p>");
    assert_eq!(
        lines_of(&requests, "SetTextStyle"),
        vec!["SetTextStyle [3, 6) bold italic underline"]
    );
}

#[test]
fn strikethrough_tags() {
    let requests = html_requests("<p><s>a</s> <del>b</del> <strike>c</strike></p>");
    assert_eq!(
        lines_of(&requests, "SetTextStyle"),
        vec![
            "SetTextStyle [1, 2) strikethrough",
            "SetTextStyle [3, 4) strikethrough",
            "SetTextStyle [5, 6) strikethrough",
        ]
    );
}

#[test]
fn colors_from_style_and_font() {
    let requests = html_requests(
        "<p><span style=\"color: #FF0000\">red</span> <font color=\"#00f\">blue</font> <span style=\"color: teal\">named</span></p>",
    );
    assert_eq!(
        lines_of(&requests, "SetTextStyle"),
        vec![
            "SetTextStyle [1, 4) color=#ff0000",
            "SetTextStyle [5, 9) color=#0000ff",
        ]
    );
}

#[test]
fn links_are_normalized() {
    let requests = html_requests(
        "<p><a href=\"HTTPS://Example.com\">site</a> <a href=\"javascript:void(0)\">js</a> <a>bare</a></p>",
    );
    assert_eq!(
        lines_of(&requests, "SetTextStyle"),
        vec!["SetTextStyle [1, 5) link=https://example.com/"]
    );
}

#[test]
fn relative_links_resolve_against_base() {
    let options = CompileOptions {
        styles: StyleMapper::new().with_links(LinkResolver::with_base("https://example.com/docs/")),
        ..CompileOptions::default()
    };
    let requests = compile_html("<p><a href=\"guide.html#intro\">Guide</a></p>", &options).unwrap();
    assert_eq!(
        lines_of(&requests, "SetTextStyle"),
        vec!["SetTextStyle [1, 6) link=https://example.com/docs/guide.html#intro"]
    );
}

#[test]
fn relative_links_without_base_are_kept() {
    let requests = html_requests("<p><a href=\"/about\">About</a></p>");
    assert_eq!(
        lines_of(&requests, "SetTextStyle"),
        vec!["SetTextStyle [1, 6) link=/about"]
    );
}

#[test]
fn overrides_merge_over_computed_styles() {
    let options = CompileOptions {
        styles: StyleMapper::new()
            .with_override(
                "b",
                TextStyle {
                    italic: Some(true),
                    ..TextStyle::default()
                },
            )
            .with_override("mark", TextStyle::underline()),
        ..CompileOptions::default()
    };
    let requests = compile_html("<p><b>x</b> <mark>y</mark></p>", &options).unwrap();
    assert_eq!(
        lines_of(&requests, "SetTextStyle"),
        vec![
            "SetTextStyle [1, 2) bold italic",
            "SetTextStyle [3, 4) underline",
        ]
    );
}

#[test]
fn styles_on_whitespace_only_are_dropped() {
    let requests = html_requests("<p>a<b>   </b>b <i></i></p>");
    assert!(lines_of(&requests, "SetTextStyle").is_empty());
}
