use crate::common::{html_listing, html_requests, lines_of};
use docstream_babel::ir::requests::inserted_text;
use insta::assert_snapshot;

#[test]
fn heading_and_styled_paragraph() {
    let listing = html_listing("<h1>Title</h1><p>Hello <b>World</b></p>");
    assert_snapshot!(listing.trim_end(), @r#"
    InsertText at=1 "Title\n"
    SetParagraphStyle [1, 7) HEADING_1
    InsertText at=7 "Hello World\n"
    SetParagraphStyle [7, 19) NORMAL_TEXT
    SetTextStyle [13, 18) bold
    "#);
}

#[test]
fn whitespace_collapses_before_offsets_are_taken() {
    let requests = html_requests("<p>  Hello\n   <i> big </i>  world  </p>");
    assert_eq!(inserted_text(&requests), "Hello big world\n");
    assert_eq!(
        lines_of(&requests, "SetTextStyle"),
        vec!["SetTextStyle [7, 10) italic"]
    );
}

#[test]
fn line_break_inside_paragraph() {
    let requests = html_requests("<p>line one<br>line two</p>");
    assert_eq!(inserted_text(&requests), "line one\nline two\n");
    assert_eq!(
        lines_of(&requests, "SetParagraphStyle"),
        vec!["SetParagraphStyle [1, 19) NORMAL_TEXT"]
    );
}

#[test]
fn line_break_between_blocks_extends_previous() {
    let requests = html_requests("<p>first</p><br>after");
    assert_eq!(inserted_text(&requests), "first\n\nafter\n");
}

#[test]
fn preformatted_text_is_kept() {
    let requests = html_requests("<pre>a  b\n  c</pre>");
    assert_eq!(inserted_text(&requests), "a  b\n  c\n");
}

#[test]
fn preformatted_indentation_survives() {
    let requests = html_requests("<pre>    indented\n  next</pre>");
    assert_eq!(inserted_text(&requests), "    indented\n  next\n");
    assert_eq!(
        lines_of(&requests, "SetParagraphStyle"),
        vec!["SetParagraphStyle [1, 21) NORMAL_TEXT"]
    );
}

#[test]
fn bare_text_and_unknown_elements() {
    let requests = html_requests(
        "loose text<section><custom-box>boxed <b>bold</b></custom-box><p>para</p></section>",
    );
    assert_eq!(inserted_text(&requests), "loose text\nboxed bold\npara\n");
    assert_eq!(
        lines_of(&requests, "SetTextStyle"),
        vec!["SetTextStyle [18, 22) bold"]
    );
}

#[test]
fn skipped_content_leaves_no_trace() {
    let requests = html_requests(
        "<p>keep</p><script>var x = 1;</script><style>p {}</style><p>also <img src=a.png>kept</p>",
    );
    assert_eq!(inserted_text(&requests), "keep\nalso kept\n");
}

#[test]
fn containers_split_around_nested_blocks() {
    let requests = html_requests("<blockquote>said<p>quoted</p>done</blockquote>");
    assert_eq!(inserted_text(&requests), "said\nquoted\ndone\n");
}

#[test]
fn headings_map_to_named_styles() {
    let requests = html_requests("<h2>Two</h2><h6>Six</h6><h3></h3>");
    assert_eq!(
        lines_of(&requests, "SetParagraphStyle"),
        vec![
            "SetParagraphStyle [1, 5) HEADING_2",
            "SetParagraphStyle [5, 9) HEADING_6",
        ]
    );
}

#[test]
fn offsets_are_utf16_units() {
    let requests = html_requests("<p>😀 <b>ok</b></p><p>next</p>");
    // The emoji takes two units: "😀 ok\n" spans [1, 7).
    assert_eq!(
        lines_of(&requests, "SetTextStyle"),
        vec!["SetTextStyle [4, 6) bold"]
    );
    assert_eq!(
        lines_of(&requests, "InsertText")[1],
        "InsertText at=7 \"next\\n\""
    );
}
