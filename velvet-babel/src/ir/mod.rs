//! The content-item post every format converts through.

pub mod nodes;
