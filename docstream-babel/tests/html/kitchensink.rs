use crate::common::{fixture, html_requests, lines_of};
use docstream_babel::ir::requests::{inserted_text, Request};

/// Every range must address text that an earlier request already inserted.
pub fn assert_ranges_follow_inserts(requests: &[Request]) {
    let mut inserted_end = 1;
    for request in requests {
        match request {
            Request::InsertText { at, text } => {
                assert_eq!(*at, inserted_end, "insertions must be contiguous");
                inserted_end += text.encode_utf16().count();
            }
            Request::CreateTable { at, .. } => assert_eq!(*at, inserted_end),
            other => {
                let range = other.range().expect("range-based request");
                assert!(range.start_index < range.end_index, "{range} is empty");
                assert!(range.end_index <= inserted_end, "{range} is not inserted yet");
            }
        }
    }
}

#[test]
fn kitchensink_text() {
    let requests = html_requests(&fixture("kitchensink.html"));
    assert_eq!(
        inserted_text(&requests),
        "Release notes\n\
         This release adds tables, nested lists and a changelog.\n\
         Highlights\n\
         Faster parse\n\
         Better lists\n\
         numbered\n\
         nested\n\
         Timings\n\
         Step\n\
         ms\n\
         parse\n\
         12\n\
         Line one\nLine two\n"
    );
    assert_ranges_follow_inserts(&requests);
}

#[test]
fn kitchensink_structure() {
    let requests = html_requests(&fixture("kitchensink.html"));
    assert_eq!(
        lines_of(&requests, "SetTextStyle"),
        vec![
            "SetTextStyle [33, 39) bold",
            "SetTextStyle [41, 53) italic",
            "SetTextStyle [58, 69) link=https://example.com/changelog",
        ]
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
        vec!["CreateTable at=132 rows=2 columns=2"]
    );
}
