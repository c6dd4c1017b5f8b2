use crate::common::{fixture, markdown_listing, markdown_requests, lines_of};
use crate::html::kitchensink::assert_ranges_follow_inserts;
use docstream_babel::ir::requests::inserted_text;
use insta::assert_snapshot;

#[test]
fn heading_and_emphasis() {
    let listing = markdown_listing("# Title\n\nSome **bold** text\n");
    assert_snapshot!(listing.trim_end(), @r#"
    InsertText at=1 "Title\n"
    SetParagraphStyle [1, 7) HEADING_1
    InsertText at=7 "Some bold text\n"
    SetParagraphStyle [7, 22) NORMAL_TEXT
    SetTextStyle [12, 16) bold
    "#);
}

#[test]
fn kitchensink_matches_html_rendition() {
    let requests = markdown_requests(&fixture("kitchensink.md"));
    assert_eq!(
        inserted_text(&requests),
        "Release notes\n\
         This release adds tables, nested lists and a changelog.\n\
         Highlights\n\
         Faster parse\n\
         Better lists\n\
         numbered\n\
         nested\n\
         Step\n\
         ms\n\
         parse\n\
         12\n\
         Removed old flag.\n"
    );
    assert_eq!(
        lines_of(&requests, "SetListBullet"),
        vec![
            "SetListBullet [82, 107) unordered",
            "SetListBullet [108, 123) ordered",
        ]
    );
    assert_eq!(
        lines_of(&requests, "CreateTable"),
        vec!["CreateTable at=124 rows=2 columns=2"]
    );
    assert_ranges_follow_inserts(&requests);
}

#[test]
fn strikethrough_and_autolinks() {
    let requests = markdown_requests("~~old~~ see https://example.com\n");
    assert_eq!(
        lines_of(&requests, "SetTextStyle"),
        vec![
            "SetTextStyle [1, 4) strikethrough",
            "SetTextStyle [9, 28) link=https://example.com/",
        ]
    );
}

#[test]
fn task_list_checkboxes_are_skipped() {
    let requests = markdown_requests("- [ ] todo\n- [x] done\n");
    assert_eq!(inserted_text(&requests), "todo\ndone\n");
}

#[test]
fn loose_list_items_keep_one_block_each() {
    let requests = markdown_requests("1. first\n\n2. second\n");
    assert_eq!(inserted_text(&requests), "first\nsecond\n");
    assert_eq!(
        lines_of(&requests, "SetListBullet"),
        vec!["SetListBullet [1, 13) ordered"]
    );
}

#[test]
fn code_blocks_keep_line_breaks() {
    let requests = markdown_requests("```\nfn main() {\n    run();\n}\n```\n");
    assert_eq!(inserted_text(&requests), "fn main() {\n    run();\n}\n");
}
