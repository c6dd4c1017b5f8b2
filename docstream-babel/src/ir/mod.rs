//! Intermediate representations
//!
//! - `nodes`: the owned markup tree every input format produces.
//! - `blocks`: the flat block sequence the extractor produces.
//! - `requests`: the range-addressed edit operations the generator produces.
//! - `style`: character and paragraph style attributes shared by all three.

pub mod blocks;
pub mod nodes;
pub mod requests;
pub mod style;
