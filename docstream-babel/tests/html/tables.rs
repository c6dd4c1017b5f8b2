use crate::common::{html_listing, html_requests, lines_of};
use docstream_babel::ir::requests::inserted_text;
use docstream_babel::transforms::{document_blocks, parse_source};
use docstream_babel::{CompileOptions, FormatRegistry};
use insta::assert_snapshot;

#[test]
fn table_is_created_before_first_cell() {
    let listing = html_listing(
        "<table><tr><td>a</td><td colspan=\"2\">b</td></tr><tr><td>c</td></tr></table>",
    );
    assert_snapshot!(listing.trim_end(), @r#"
    CreateTable at=1 rows=2 columns=3
    InsertText at=1 "a\n"
    SetParagraphStyle [1, 3) NORMAL_TEXT
    InsertText at=3 "b\n"
    SetParagraphStyle [3, 5) NORMAL_TEXT
    InsertText at=5 "c\n"
    SetParagraphStyle [5, 7) NORMAL_TEXT
    "#);
}

#[test]
fn row_groups_and_header_cells() {
    let requests = html_requests(
        "<table><thead><tr><th>h1</th><th>h2</th></tr></thead>\
         <tbody><tr><td>1</td><td>2</td></tr></tbody>\
         <tfoot><tr><td>f</td><td>g</td></tr></tfoot></table>",
    );
    assert_eq!(
        lines_of(&requests, "CreateTable"),
        vec!["CreateTable at=1 rows=3 columns=2"]
    );
    assert_eq!(inserted_text(&requests), "h1\nh2\n1\n2\nf\ng\n");
}

#[test]
fn adjacent_tables_are_separate() {
    let requests = html_requests(
        "<table><tr><td>a</td></tr></table><table><tr><td>b</td><td>c</td></tr></table>",
    );
    assert_eq!(
        lines_of(&requests, "CreateTable"),
        vec![
            "CreateTable at=1 rows=1 columns=1",
            "CreateTable at=3 rows=1 columns=2",
        ]
    );
}

#[test]
fn caption_comes_before_the_table() {
    let requests = html_requests(
        "<table><caption>Totals</caption><tr><td>1</td></tr></table>",
    );
    let kinds: Vec<_> = requests.iter().map(|r| r.kind()).collect();
    assert_eq!(
        kinds,
        vec![
            "InsertText",
            "SetParagraphStyle",
            "CreateTable",
            "InsertText",
            "SetParagraphStyle",
        ]
    );
    assert_eq!(
        lines_of(&requests, "CreateTable"),
        vec!["CreateTable at=8 rows=1 columns=1"]
    );
}

#[test]
fn invalid_spans_default_to_one() {
    let requests = html_requests(
        "<table><tr><td colspan=\"0\">a</td><td colspan=\"wide\">b</td><td colspan=\" 3 \">c</td></tr></table>",
    );
    // Nominal columns 0, 1, 2; the last spans three: 2 + 3.
    assert_eq!(
        lines_of(&requests, "CreateTable"),
        vec!["CreateTable at=1 rows=1 columns=5"]
    );
}

#[test]
fn oversized_spans_are_capped() {
    for colspan in ["18446744073709551615", "4000000000"] {
        let source = format!(
            "<table><tr><td>a</td><td colspan=\"{colspan}\" rowspan=\"{colspan}\">b</td></tr></table>"
        );
        let requests = html_requests(&source);
        // Column 1 plus the largest colspan HTML accepts.
        assert_eq!(
            lines_of(&requests, "CreateTable"),
            vec!["CreateTable at=1 rows=1 columns=1001"]
        );

        let registry = FormatRegistry::default();
        let doc = parse_source(&registry, &source, "html").expect("html should parse");
        let blocks = document_blocks(&doc, &CompileOptions::default()).expect("blocks");
        let cell = blocks[1].table.expect("cell geometry");
        assert_eq!((cell.row_span, cell.column_span), (65534, 1000));
    }
}

#[test]
fn empty_cells_keep_their_slot() {
    let requests = html_requests("<table><tr><td></td><td>x</td></tr></table>");
    assert_eq!(inserted_text(&requests), "\nx\n");
    assert_eq!(
        lines_of(&requests, "CreateTable"),
        vec!["CreateTable at=1 rows=1 columns=2"]
    );
}

#[test]
fn styled_cell_content() {
    let requests = html_requests("<table><tr><td>plain</td><td><em>it</em></td></tr></table>");
    assert_eq!(
        lines_of(&requests, "SetTextStyle"),
        vec!["SetTextStyle [7, 9) italic"]
    );
}
