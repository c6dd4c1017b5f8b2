//! Properties that hold for any block sequence.

use docstream_babel::common::flat_to_requests::{
    generate_requests, table_regions, GenerateOptions,
};
use docstream_babel::common::intervals::insert_merged;
use docstream_babel::ir::blocks::{text_len, Block, CellGeometry, ListMembership, StyleInterval};
use docstream_babel::ir::requests::{inserted_text, Request};
use docstream_babel::ir::style::TextStyle;
use proptest::prelude::*;

#[derive(Debug, Clone)]
enum Kind {
    Plain,
    Item { ordered: bool, level: usize },
    Cell { table: usize, row: usize, column: usize, span: usize },
}

fn style() -> impl Strategy<Value = TextStyle> {
    prop_oneof![
        Just(TextStyle::bold()),
        Just(TextStyle::italic()),
        Just(TextStyle::underline()),
        Just(TextStyle::link("https://example.com/")),
    ]
}

fn kind() -> impl Strategy<Value = Kind> {
    prop_oneof![
        3 => Just(Kind::Plain),
        2 => (any::<bool>(), 0usize..3).prop_map(|(ordered, level)| Kind::Item { ordered, level }),
        2 => (0usize..2, 0usize..3, 0usize..3, 1usize..3).prop_map(|(table, row, column, span)| {
            Kind::Cell { table, row, column, span }
        }),
    ]
}

fn block() -> impl Strategy<Value = Block> {
    (
        "[a-zé😀 ]{0,12}",
        prop::collection::vec((0usize..16, 0usize..16, style()), 0..4),
        kind(),
    )
        .prop_map(|(text, intervals, kind)| {
            let mut block = Block::new(text);
            for (a, b, style) in intervals {
                block = block.with_style(a.min(b), a.max(b), style);
            }
            match kind {
                Kind::Plain => block,
                Kind::Item { ordered, level } => {
                    block.with_list(ListMembership::new(ordered, level, 1))
                }
                Kind::Cell {
                    table,
                    row,
                    column,
                    span,
                } => block.with_table(
                    CellGeometry::new(row, column)
                        .in_table(table)
                        .with_spans(1, span),
                ),
            }
        })
}

fn blocks() -> impl Strategy<Value = Vec<Block>> {
    prop::collection::vec(block(), 0..12)
}

fn block_starts(blocks: &[Block]) -> Vec<usize> {
    let mut start = 1;
    blocks
        .iter()
        .map(|block| {
            let current = start;
            start += block.len() + 1;
            current
        })
        .collect()
}

proptest! {
    #[test]
    fn insertions_partition_the_stream(blocks in blocks()) {
        let requests = generate_requests(&blocks, &GenerateOptions::default());
        let expected: String = blocks.iter().map(|b| format!("{}\n", b.text)).collect();
        prop_assert_eq!(inserted_text(&requests), expected);

        let inserts: Vec<usize> = requests
            .iter()
            .filter_map(|request| match request {
                Request::InsertText { at, .. } => Some(*at),
                _ => None,
            })
            .collect();
        prop_assert_eq!(inserts, block_starts(&blocks));
    }

    #[test]
    fn text_styles_never_cover_separators(blocks in blocks()) {
        let requests = generate_requests(&blocks, &GenerateOptions::default());
        let spans: Vec<(usize, usize)> = block_starts(&blocks)
            .into_iter()
            .zip(&blocks)
            .map(|(start, block)| (start, start + block.len()))
            .collect();

        for request in &requests {
            if let Request::SetTextStyle { range, .. } = request {
                prop_assert!(range.start_index < range.end_index);
                prop_assert!(
                    spans
                        .iter()
                        .any(|(start, end)| *start <= range.start_index && range.end_index <= *end),
                    "{} leaves its block",
                    range
                );
            }
        }
    }

    #[test]
    fn ranges_address_inserted_text(blocks in blocks(), coalesce in any::<bool>()) {
        let options = GenerateOptions { coalesce_inserts: coalesce, ..GenerateOptions::default() };
        let requests = generate_requests(&blocks, &options);

        let mut inserted_end = 1;
        for request in &requests {
            match request {
                Request::InsertText { at, text } => {
                    prop_assert_eq!(*at, inserted_end);
                    inserted_end += text_len(text);
                }
                Request::CreateTable { at, .. } => prop_assert_eq!(*at, inserted_end),
                other => {
                    let range = other.range().unwrap();
                    prop_assert!(range.end_index <= inserted_end);
                }
            }
        }
    }

    #[test]
    fn coalescing_keeps_text_and_cursor(blocks in blocks()) {
        let plain = generate_requests(&blocks, &GenerateOptions::default());
        let coalesced = generate_requests(
            &blocks,
            &GenerateOptions { coalesce_inserts: true, ..GenerateOptions::default() },
        );
        prop_assert_eq!(inserted_text(&plain), inserted_text(&coalesced));

        let count = |requests: &[Request], kind: &str| {
            requests.iter().filter(|r| r.kind() == kind).count()
        };
        prop_assert_eq!(count(&plain, "SetParagraphStyle"), count(&coalesced, "SetParagraphStyle"));
        prop_assert_eq!(count(&plain, "SetListBullet"), count(&coalesced, "SetListBullet"));
        prop_assert_eq!(count(&plain, "CreateTable"), count(&coalesced, "CreateTable"));
    }

    #[test]
    fn one_table_per_region(blocks in blocks()) {
        let requests = generate_requests(&blocks, &GenerateOptions::default());
        let regions = table_regions(&blocks);
        let creates: Vec<(usize, usize)> = requests
            .iter()
            .filter_map(|request| match request {
                Request::CreateTable { rows, columns, .. } => Some((*rows, *columns)),
                _ => None,
            })
            .collect();
        prop_assert_eq!(creates.len(), regions.len());

        for (region, (rows, columns)) in regions.iter().zip(creates) {
            let table = blocks[region.first_block].table.unwrap().table;
            let cells: Vec<_> = blocks[region.first_block..]
                .iter()
                .map_while(|block| block.table.filter(|cell| cell.table == table))
                .collect();
            let widest = cells.iter().map(|c| c.column_index + c.column_span).max().unwrap();
            prop_assert_eq!(columns, widest);
            prop_assert!(rows >= 1 && rows <= cells.len());
        }
    }

    #[test]
    fn bullet_groups_never_overlap(blocks in blocks()) {
        let requests = generate_requests(&blocks, &GenerateOptions::default());
        let mut groups: Vec<(usize, usize)> = requests
            .iter()
            .filter_map(|request| match request {
                Request::SetListBullet { range, .. } => Some((range.start_index, range.end_index)),
                _ => None,
            })
            .collect();
        groups.sort();
        for pair in groups.windows(2) {
            prop_assert!(pair[0].1 <= pair[1].0);
        }
    }

    #[test]
    fn merged_intervals_stay_sorted_and_disjoint(
        inserts in prop::collection::vec((0usize..30, 0usize..30, style()), 0..10)
    ) {
        let mut list = Vec::new();
        for (a, b, style) in inserts {
            insert_merged(&mut list, StyleInterval::new(a.min(b), a.max(b), style));
        }
        for interval in &list {
            prop_assert!(interval.start < interval.end);
        }
        for pair in list.windows(2) {
            prop_assert!(pair[0].end <= pair[1].start);
        }
    }
}
