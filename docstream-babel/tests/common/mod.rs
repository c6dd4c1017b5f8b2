//! Shared helpers for the integration tests

use docstream_babel::formats::requests::to_listing;
use docstream_babel::ir::requests::Request;
use docstream_babel::{compile_html, compile_markdown, CompileOptions};
use std::path::PathBuf;

pub fn html_requests(source: &str) -> Vec<Request> {
    compile_html(source, &CompileOptions::default()).expect("html should compile")
}

pub fn html_listing(source: &str) -> String {
    to_listing(&html_requests(source))
}

pub fn markdown_requests(source: &str) -> Vec<Request> {
    compile_markdown(source, &CompileOptions::default()).expect("markdown should compile")
}

pub fn markdown_listing(source: &str) -> String {
    to_listing(&markdown_requests(source))
}

pub fn fixture(name: &str) -> String {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name);
    std::fs::read_to_string(&path).unwrap_or_else(|e| panic!("Failed to read {path:?}: {e}"))
}

/// Requests of the given kind, rendered as listing lines.
pub fn lines_of(requests: &[Request], kind: &str) -> Vec<String> {
    requests
        .iter()
        .filter(|request| request.kind() == kind)
        .map(docstream_babel::formats::requests::describe)
        .collect()
}
