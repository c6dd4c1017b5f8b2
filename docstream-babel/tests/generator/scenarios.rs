//! The reference scenarios, each over a hand-built block sequence.

use docstream_babel::common::flat_to_requests::{generate_requests, GenerateOptions};
use docstream_babel::ir::blocks::{Block, CellGeometry, ListMembership};
use docstream_babel::ir::requests::{Range, Request};
use docstream_babel::ir::style::{NamedStyle, ParagraphStyle, TextStyle};

fn generate(blocks: &[Block]) -> Vec<Request> {
    generate_requests(blocks, &GenerateOptions::default())
}

#[test]
fn plain_block() {
    let requests = generate(&[Block::new("Hello")]);
    assert_eq!(
        requests,
        vec![
            Request::InsertText {
                at: 1,
                text: "Hello\n".to_string()
            },
            Request::SetParagraphStyle {
                range: Range::new(1, 7),
                style: ParagraphStyle::named(NamedStyle::NormalText)
            },
        ]
    );
}

#[test]
fn bold_interval() {
    let block = Block::new("Hello World").with_style(6, 11, TextStyle::bold());
    let requests = generate(&[block]);
    assert_eq!(requests.len(), 3);
    assert_eq!(
        requests[2],
        Request::SetTextStyle {
            range: Range::new(7, 12),
            style: TextStyle::bold()
        }
    );
}

#[test]
fn sequential_blocks() {
    let requests = generate(&[Block::new("Block A"), Block::new("Block B")]);
    let starts: Vec<_> = requests
        .iter()
        .filter_map(|request| match request {
            Request::InsertText { at, .. } => Some(*at),
            _ => None,
        })
        .collect();
    assert_eq!(starts, vec![1, 9]);
}

#[test]
fn single_list_item() {
    let block = Block::new("List item").with_list(ListMembership::new(false, 0, 1));
    let requests = generate(&[block]);
    assert!(requests.contains(&Request::SetListBullet {
        range: Range::new(1, 10),
        ordered: false
    }));
}

#[test]
fn clamped_interval() {
    let block = Block::new("Hello").with_style(1, 10, TextStyle::italic());
    let requests = generate(&[block]);
    assert_eq!(
        requests[2],
        Request::SetTextStyle {
            range: Range::new(2, 6),
            style: TextStyle::italic()
        }
    );
}

#[test]
fn spanning_cells() {
    let blocks = vec![
        Block::new("a").with_table(CellGeometry::new(0, 0)),
        Block::new("b").with_table(CellGeometry::new(0, 1).with_spans(1, 2)),
    ];
    let requests = generate(&blocks);
    assert_eq!(
        requests[0],
        Request::CreateTable {
            at: 1,
            rows: 1,
            columns: 3
        }
    );
}
