//! Converts a nested block tree into a flat content-item sequence.
//!
//! # The High-Level Concept
//!
//! Block markup nests list entries inside lists and images inside galleries, while the
//! content-item format is flat: a list becomes a run of list-item texts and a gallery a run
//! of images. The walk keeps a small state machine over the top-level blocks. List-like
//! blocks do not emit directly; they extend a pending run, and the run is flushed into the
//! output as soon as any other block is mapped, or at the end of input.
//!
//! # The Algorithm
//!
//! 1. **Initialization:**
//!    - Start `Idle` with an empty output and an empty pending run
//!
//! 2. **List-like Blocks (`core/list`, `tumblr/image-set`):**
//!    - Append one item per list entry or media descriptor to the pending run
//!    - Move to `List(kind)` or `Gallery`
//!
//! 3. **Any Other Block:**
//!    - Flush the pending run into the output and return to `Idle`
//!    - Map the block itself to at most one content item
//!
//! 4. **Completion:**
//!    - Flush whatever run is still pending
//!    - Wrap the items in the post envelope
//!
//! Unknown block types are never an error: their literal markup is reduced to text.

use super::formatting::extract_text_and_formatting;
use super::text::strip_all_tags;
use crate::formats::blocks::tree::{value_as_dimension, Block};
use crate::ir::nodes::{
    AudioItem, ContentItem, ImageItem, ListKind, MediaRef, Post, StyleRange, Subtype, TextItem,
};
use serde_json::Value;

/// Converts top-level blocks to a post.
pub fn blocks_to_post(blocks: &[Block]) -> Post {
    let mut flattener = Flattener::default();
    for block in blocks {
        flattener.visit(block);
    }
    Post::new(flattener.finish())
}

/// What the pending run was last extended with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum RunState {
    #[default]
    Idle,
    List(ListKind),
    Gallery,
}

#[derive(Debug, Default)]
struct Flattener {
    content: Vec<ContentItem>,
    state: RunState,
    pending: Vec<ContentItem>,
}

impl Flattener {
    fn visit(&mut self, block: &Block) {
        match block.name.as_deref() {
            Some("core/list") => self.extend_list(block),
            Some("tumblr/image-set") => self.extend_gallery(block),
            None if block.inner_html.trim().is_empty() => {
                log::trace!("skipping blank freeform block");
            }
            _ => {
                self.flush();
                self.content.push(map_block(block));
            }
        }
    }

    fn extend_list(&mut self, block: &Block) {
        let kind = if block.attr("ordered").and_then(Value::as_bool) == Some(true) {
            ListKind::Ordered
        } else {
            ListKind::Unordered
        };
        for entry in block.inner_blocks_named("core/list-item") {
            let (text, formatting) = extract_text_and_formatting(&entry.inner_html);
            self.pending.push(
                TextItem::new(text)
                    .with_subtype(kind.subtype())
                    .with_formatting(formatting)
                    .into(),
            );
        }
        log::trace!("{:?} -> List({kind:?})", self.state);
        self.state = RunState::List(kind);
    }

    fn extend_gallery(&mut self, block: &Block) {
        for member in block.inner_blocks_named("tumblr/image") {
            let media = member.attr("media").and_then(Value::as_array);
            for descriptor in media.into_iter().flatten() {
                self.pending.push(image_from_descriptor(descriptor).into());
            }
        }
        log::trace!("{:?} -> Gallery", self.state);
        self.state = RunState::Gallery;
    }

    fn flush(&mut self) {
        if self.state == RunState::Idle {
            return;
        }
        log::trace!("flushing {} run items from {:?}", self.pending.len(), self.state);
        self.content.append(&mut self.pending);
        self.state = RunState::Idle;
    }

    fn finish(mut self) -> Vec<ContentItem> {
        self.flush();
        self.content
    }
}

/// Maps a block outside any run to its content item.
fn map_block(block: &Block) -> ContentItem {
    match block.name.as_deref() {
        Some("core/paragraph") => styled_text(&block.inner_html).into(),
        Some("core/heading") => map_heading(block).into(),
        Some("core/quote") => map_quote(block).into(),
        Some("core/pullquote") => styled_text(&block.inner_html)
            .with_subtype(Subtype::Indented)
            .into(),
        Some("core/image") => ImageItem::new(
            block.attr_str("url").unwrap_or_default(),
            dimension(block.attr("width")),
            dimension(block.attr("height")),
        )
        .into(),
        Some("core/audio") => map_audio(block).into(),
        name => {
            log::debug!(
                "unmapped block {}, keeping its text",
                name.unwrap_or("(freeform)")
            );
            TextItem::new(strip_all_tags(&block.inner_html, false)).into()
        }
    }
}

fn styled_text(html: &str) -> TextItem {
    let (text, formatting) = extract_text_and_formatting(html);
    TextItem::new(text).with_formatting(formatting)
}

fn map_heading(block: &Block) -> TextItem {
    let level = block.attr("level").and_then(Value::as_u64).unwrap_or(2);
    let subtype = if level == 1 {
        Subtype::Heading1
    } else {
        Subtype::Heading2
    };
    styled_text(&block.inner_html).with_subtype(subtype)
}

/// Joins the quote's paragraphs with newlines, shifting each paragraph's ranges by the text
/// before it.
fn map_quote(block: &Block) -> TextItem {
    let mut text = String::new();
    let mut formatting = Vec::new();

    for paragraph in block.inner_blocks_named("core/paragraph") {
        let (paragraph_text, ranges) = extract_text_and_formatting(&paragraph.inner_html);
        let trimmed = paragraph_text.trim();
        let leading = paragraph_text.chars().count() - paragraph_text.trim_start().chars().count();
        let offset = text.chars().count();

        formatting.extend(ranges.into_iter().map(|r| shift(r, offset, leading)));
        text.push_str(trimmed);
        text.push('\n');
    }

    let leading = text.chars().count() - text.trim_start().chars().count();
    let formatting = formatting
        .into_iter()
        .map(|r| shift(r, 0, leading))
        .collect();

    let subtype = block
        .attr_str("className")
        .map_or(Subtype::Quote, Subtype::from);
    TextItem::new(text.trim())
        .with_subtype(subtype)
        .with_formatting(formatting)
}

fn shift(range: StyleRange, by: usize, less: usize) -> StyleRange {
    StyleRange {
        start: (range.start + by).saturating_sub(less),
        end: (range.end + by).saturating_sub(less),
        ..range
    }
}

fn map_audio(block: &Block) -> AudioItem {
    let poster = block
        .attr("poster")
        .and_then(|p| p.get("url"))
        .and_then(Value::as_str)
        .unwrap_or_default();
    AudioItem {
        url: block.attr_str("mediaURL").unwrap_or_default().to_string(),
        title: block.attr_str("mediaTitle").unwrap_or_default().to_string(),
        artist: block.attr_str("mediaArtist").unwrap_or_default().to_string(),
        album: block.attr_str("mediaAlbum").unwrap_or_default().to_string(),
        poster: vec![MediaRef {
            url: poster.to_string(),
        }],
    }
}

fn image_from_descriptor(descriptor: &Value) -> ImageItem {
    ImageItem::new(
        descriptor.get("url").and_then(Value::as_str).unwrap_or_default(),
        dimension(descriptor.get("width")),
        dimension(descriptor.get("height")),
    )
}

fn dimension(value: Option<&Value>) -> u32 {
    value.and_then(value_as_dimension).unwrap_or(0)
}
