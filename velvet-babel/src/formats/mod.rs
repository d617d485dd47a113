//! Format implementations
//!
//! This module contains the format implementations that convert between a
//! content-item post and its text representations.

pub mod blocks;
pub mod npf;

pub use blocks::BlocksFormat;
pub use npf::NpfFormat;
