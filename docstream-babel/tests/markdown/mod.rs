//! Markdown → requests, end to end

mod import;
