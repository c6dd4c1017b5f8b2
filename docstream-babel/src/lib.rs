//! Markup to range-addressed document requests
//!
//!     This crate compiles semi-structured markup (HTML, or Markdown through HTML) into the
//!     ordered edit requests a rich-text editing API applies to a document. That API models a
//!     document as one continuous character stream: text is inserted first, and every paragraph
//!     style, character style, list bullet and table is applied afterwards through an integer
//!     range into the stream.
//!
//!     TLDR:
//!         - Parsers never leak into the core: every input format produces the owned markup tree
//!           in ./ir/nodes.rs.
//!         - The core is two passes, tree → blocks (./common/nested_to_flat.rs) and blocks →
//!           requests (./common/flat_to_requests.rs). Both are pure and scoped to one call.
//!         - Output formats only render the request sequence; they never look at the markup.
//!
//!     This is a pure lib, that is, it powers docstream-cli but is shell agnostic: no code should
//!     suppose a shell environment, be it printing to std streams, reading env vars etc.
//!
//!     The file structure :
//!     .
//!     ├── error.rs
//!     ├── format.rs               # Format trait definition
//!     ├── registry.rs             # FormatRegistry for discovery and selection
//!     ├── transforms.rs           # Parse → compile → serialize pipeline
//!     ├── formats
//!     │   ├── html                # html5ever → markup tree
//!     │   ├── markdown            # comrak → HTML → markup tree
//!     │   ├── docs_json           # requests → batch body JSON
//!     │   └── requests            # requests → plain listing
//!     ├── ir                      # Markup tree, blocks, requests, styles
//!     └── common                  # The compiler core
//!
//! Testing
//!     tests
//!     ├── html                    # HTML → requests, end to end
//!     ├── markdown                # Markdown → requests, end to end
//!     └── generator               # Generator properties (proptest)
//!
//!     Rust does not discover tests in subdirectories by default, so tests/lib.rs includes them.
//!
//! Core Algorithms
//!
//!     Two coordinate systems have to be reconciled: a nested, whitespace-rich source tree and a
//!     flat target stream addressed in UTF-16 code units starting at 1.
//!
//!     The Text Collector (./common/text_collector.rs) flattens one block-level subtree, and
//!     records style intervals against the *normalized* text as it produces it. The Block
//!     Extractor (./common/nested_to_flat.rs) walks the whole tree and decides which subtrees are
//!     blocks, tracking list nesting and table geometry alongside. The Request Generator
//!     (./common/flat_to_requests.rs) replays the blocks against a cursor. The Aggregator
//!     (./common/aggregator.rs) is the coalescing variant, merging several fragments into one
//!     insertion without losing track of their styles.
//!
//!     Malformed markup is never an error. Empty input is the only thing the pipeline rejects.
//!
//! Library Choices
//!
//!     Parsing is offloaded to specialized crates: html5ever for HTML (browser-grade error
//!     recovery) and comrak for Markdown. JSON output is built with serde_json.
//!
pub mod common;
pub mod error;
pub mod format;
pub mod formats;
pub mod ir;
pub mod registry;
pub mod transforms;

pub use common::flat_to_requests::GenerateOptions;
pub use common::style_map::StyleMapper;
pub use error::ConvertError;
pub use format::Format;
pub use registry::FormatRegistry;
pub use transforms::{compile_document, compile_html, compile_markdown, CompileOptions};
