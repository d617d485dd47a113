//! Conversion between block editor markup and flat content-item posts
//!
//!     This crate converts posts between two representations:
//!         - block markup: HTML annotated with comment delimiters (`<!-- wp:name {attrs} -->`)
//!           that nest into a tree of typed blocks.
//!         - content items: a flat JSON list of typed items (text, image, audio) wrapped in
//!           the `{content, layout, trail, version}` envelope, with inline styling carried as
//!           offset ranges rather than tags.
//!
//!     TLDR: the two boundary functions are [`blocks_to_items`] and [`items_to_blocks`]. Everything
//!     else is there to make those two testable in pieces.
//!
//! Architecture
//!
//!     Every conversion goes through the content-item [`ir::nodes::Post`]. Block markup is parsed to
//!     a block tree (./formats/blocks/parser.rs), the tree is flattened into a post
//!     (./common/nested_to_flat.rs), and the reverse rebuilds the tree from runs of items
//!     (./common/flat_to_nested.rs) before serializing it (./formats/blocks/serializer.rs).
//!     Inline styling moves between tags and ranges through the style range codec
//!     (./common/formatting.rs).
//!
//!     This is a pure lib, that is, it powers the velvet cli but is shell agnostic: no code
//!     here prints, reads the environment or touches files. Diagnostics go through `log`.
//!
//!     The file structure :
//!     .
//!     ├── error.rs
//!     ├── format.rs               # Format trait definition
//!     ├── registry.rs             # FormatRegistry for discovery and selection
//!     ├── formats
//!     │   ├── blocks              # block tree, its parser and serializer
//!     │   └── npf                 # content-item JSON
//!     ├── lib.rs
//!     ├── ir                      # The content-item post
//!     ├── common                  # Tree/flat mapping, style ranges, text helpers
//!
//! Testing
//!     tests
//!     └── <concern>
//!         ├── mod.rs
//!     └── fixtures
//!
//!     Note that rust does not by default discover tests in subdirectories, so we need to include these
//!     in the mod.
//!
//! Failure Model
//!
//!     Block markup is arbitrary legacy content, so reading it never fails: unmatched delimiters
//!     are recovered, bad attribute JSON becomes an empty attribute set, unknown blocks keep their
//!     text. Content-item JSON is a caller contract, so a malformed document is an error
//!     ([`FormatError::InvalidInput`] or [`FormatError::UnsupportedItemType`]).
//!
pub mod error;
pub mod format;
pub mod formats;
pub mod registry;

pub mod common;
pub mod ir;

pub use common::flat_to_nested::{post_to_blocks, NestingOptions};
pub use common::nested_to_flat::blocks_to_post;
pub use error::FormatError;
pub use format::Format;
pub use formats::blocks::parser::parse_blocks;
pub use formats::blocks::serializer::{
    serialize_block, serialize_block_attributes, serialize_blocks, strip_core_namespace,
};
pub use formats::blocks::tree::{Attributes, Block, Chunk};
pub use formats::{BlocksFormat, NpfFormat};
pub use ir::nodes::Post;
pub use registry::FormatRegistry;

/// Converts block markup to content-item JSON.
///
/// Never fails on markup; the `Result` only carries encoder failures.
pub fn blocks_to_items(markup: &str) -> Result<String, FormatError> {
    let post = blocks_to_post(&parse_blocks(markup));
    NpfFormat::default().serialize(&post)
}

/// Converts content-item JSON to block markup.
pub fn items_to_blocks(document: &str) -> Result<String, FormatError> {
    let post = NpfFormat::default().parse(document)?;
    BlocksFormat::default().serialize(&post)
}
