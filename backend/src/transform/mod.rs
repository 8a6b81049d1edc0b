//! Chest transformation.
//!
//! - Filter: which rows become chests
//! - Fields: column table and row mapping
//! - Base chest: template stat inheritance
//! - Arena: reward derivation and arena scaling
//! - Pipeline: the full run, ordering and output

pub mod arena;
pub mod base_chest;
pub mod fields;
pub mod filter;
pub mod pipeline;

pub use arena::{card_count_by_arena, card_count_by_type};
pub use base_chest::get_base_chest_stats;
pub use fields::{fields_description, map_row, COLUMNS};
pub use filter::include_name;
pub use pipeline::*;
