//! Block markup format
//!
//! Comment-delimited block markup as written by the block editor:
//!
//! ```text
//! <!-- wp:heading {"level":1} --><h1 class="wp-block-heading">Title</h1><!-- /wp:heading -->
//! <!-- wp:tumblr/image {"media":[…]} /-->
//! ```
//!
//! # Element Mapping Table
//!
//! | Block                          | Content item                                   |
//! |--------------------------------|------------------------------------------------|
//! | `core/paragraph`               | text, no subtype                               |
//! | `core/heading`                 | text, `heading1` for level 1, else `heading2`  |
//! | `core/quote` (+ `className`)   | text, `quote` or the class name                |
//! | `core/pullquote`               | text, `indented`                               |
//! | `core/list` / `core/list-item` | one text per entry, `(un)ordered-list-item`    |
//! | `tumblr/image-set`             | one image per media descriptor                 |
//! | `core/image`                   | image                                          |
//! | `core/audio`                   | audio                                          |
//! | anything else                  | text of its stripped markup                    |
//!
//! # Lossy Conversions
//!
//! - Attributes without a content-item counterpart are dropped.
//! - Unknown blocks keep only their text.
//! - Inline markup other than bold and italic is flattened.
//! - Leading and trailing whitespace of text items is trimmed when the markup is read back.
//! - Overlapping style ranges are rendered as nested pieces and read back split at every
//!   boundary; ranges are never merged.

pub mod parser;
pub mod serializer;
pub mod tree;

use crate::common::flat_to_nested::{post_to_blocks, NestingOptions};
use crate::common::nested_to_flat::blocks_to_post;
use crate::error::FormatError;
use crate::format::{check_option_keys, Format};
use crate::ir::nodes::Post;
use std::collections::HashMap;

/// Option key for [`NestingOptions::gallery_min_images`].
pub const GALLERY_MIN_IMAGES: &str = "gallery-min-images";

/// Format implementation for block markup
#[derive(Default)]
pub struct BlocksFormat {
    nesting: NestingOptions,
}

impl BlocksFormat {
    pub fn new(nesting: NestingOptions) -> Self {
        Self { nesting }
    }

    fn render(&self, post: &Post, nesting: &NestingOptions) -> String {
        let blocks = post_to_blocks(post, nesting);
        log::debug!(
            "rebuilt {} top-level blocks from {} items",
            blocks.len(),
            post.content.len()
        );
        serializer::serialize_blocks(&blocks)
    }
}

impl Format for BlocksFormat {
    fn name(&self) -> &str {
        "blocks"
    }

    fn description(&self) -> &str {
        "Comment-delimited block editor markup"
    }

    fn file_extensions(&self) -> &[&str] {
        &["html", "htm", "blocks"]
    }

    fn supports_parsing(&self) -> bool {
        true
    }

    fn supports_serialization(&self) -> bool {
        true
    }

    fn parse(&self, source: &str) -> Result<Post, FormatError> {
        let blocks = parser::parse_blocks(source);
        log::debug!("parsed {} top-level blocks", blocks.len());
        Ok(blocks_to_post(&blocks))
    }

    fn serialize(&self, post: &Post) -> Result<String, FormatError> {
        Ok(self.render(post, &self.nesting))
    }

    fn serialize_with_options(
        &self,
        post: &Post,
        options: &HashMap<String, String>,
    ) -> Result<String, FormatError> {
        check_option_keys(self.name(), options, &[GALLERY_MIN_IMAGES])?;

        let mut nesting = self.nesting.clone();
        if let Some(value) = options.get(GALLERY_MIN_IMAGES) {
            nesting.gallery_min_images = value
                .trim()
                .parse::<usize>()
                .ok()
                .filter(|n| *n >= 1)
                .ok_or_else(|| {
                    FormatError::NotSupported(format!(
                        "Format 'blocks' expects a positive integer for '{GALLERY_MIN_IMAGES}', got '{value}'"
                    ))
                })?;
        }
        Ok(self.render(post, &nesting))
    }
}
