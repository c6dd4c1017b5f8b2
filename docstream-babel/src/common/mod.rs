//! Contains the compiler core: markup tree to blocks, blocks to requests.

pub mod aggregator;
pub mod flat_to_requests;
pub mod intervals;
pub mod links;
pub mod nested_to_flat;
pub mod style_map;
pub mod tags;
pub mod text_collector;
