//! Contains logic for mapping between the block tree and the content-item representation.

pub mod flat_to_nested;
pub mod formatting;
pub mod nested_to_flat;
pub mod text;
