use crate::common::{html_listing, html_requests, lines_of};
use docstream_babel::common::nested_to_flat::extract_blocks;
use docstream_babel::formats::html::parse_html;
use docstream_babel::StyleMapper;
use insta::assert_snapshot;

#[test]
fn list_kind_change_closes_group() {
    let listing = html_listing("<ul><li>one</li><li>two</li></ul><ol><li>first</li></ol>");
    assert_snapshot!(listing.trim_end(), @r#"
    InsertText at=1 "one\n"
    SetParagraphStyle [1, 5) NORMAL_TEXT
    SetParagraphStyle [1, 5) indent=0pt
    InsertText at=5 "two\n"
    SetParagraphStyle [5, 9) NORMAL_TEXT
    SetParagraphStyle [5, 9) indent=0pt
    InsertText at=9 "first\n"
    SetParagraphStyle [9, 15) NORMAL_TEXT
    SetListBullet [1, 8) unordered
    SetParagraphStyle [9, 15) indent=0pt
    SetListBullet [9, 14) ordered
    "#);
}

#[test]
fn nested_list_follows_parent_item() {
    let requests =
        html_requests("<ol><li>parent<ul><li>child</li></ul></li><li>next</li></ol>");
    assert_eq!(
        lines_of(&requests, "SetListBullet"),
        vec![
            "SetListBullet [1, 7) ordered",
            "SetListBullet [8, 13) unordered",
            "SetListBullet [14, 18) ordered",
        ]
    );
    assert!(lines_of(&requests, "SetParagraphStyle")
        .contains(&"SetParagraphStyle [8, 14) indent=36pt".to_string()));
}

#[test]
fn paragraph_between_lists_splits_groups() {
    let requests = html_requests("<ul><li>a</li></ul><p>x</p><ul><li>b</li></ul>");
    assert_eq!(
        lines_of(&requests, "SetListBullet"),
        vec![
            "SetListBullet [1, 2) unordered",
            "SetListBullet [5, 6) unordered",
        ]
    );
}

#[test]
fn sibling_lists_restart_positions() {
    let doc = parse_html("<ol><li>a</li><li>b</li></ol><p>x</p><ol><li>c</li></ol>");
    let blocks = extract_blocks(&doc, &StyleMapper::new());
    let positions: Vec<_> = blocks
        .iter()
        .filter_map(|block| block.list.map(|list| list.position))
        .collect();
    assert_eq!(positions, vec![1, 2, 1]);
}

#[test]
fn list_item_styles_exclude_nested_lists() {
    let requests = html_requests("<ul><li><b>bold item</b><ul><li>inner</li></ul></li></ul>");
    assert_eq!(
        lines_of(&requests, "SetTextStyle"),
        vec!["SetTextStyle [1, 10) bold"]
    );
    assert_eq!(
        docstream_babel::ir::requests::inserted_text(&requests),
        "bold item\ninner\n"
    );
}

#[test]
fn paragraphs_inside_items_join_the_item_text() {
    let requests = html_requests("<ul><li><p>one</p><p>two</p></li></ul>");
    assert_eq!(
        docstream_babel::ir::requests::inserted_text(&requests),
        "one two\n"
    );
}
