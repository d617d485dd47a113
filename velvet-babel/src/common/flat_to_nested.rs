//! Converts a flat content-item sequence back to a nested block tree.
//!
//! # The High-Level Concept
//!
//! The content-item format has no containers, yet list entries and gallery images must end
//! up inside a parent block. The converter therefore groups contiguous runs: consecutive
//! list-item texts of the same kind collapse into one list block, consecutive images into
//! one gallery block. Every other item maps to exactly one block.
//!
//! # The Algorithm
//!
//! The walk is an explicit state machine over the items:
//!
//! ```text
//!                 list item (kind k)            image
//!   Idle ───────────────────────────▶ List(k)   Idle ──────▶ Gallery
//!   List(k) + list item (kind k)  ─▶ List(k)    Gallery + image ─▶ Gallery
//!   any state + anything else     ─▶ flush, then Idle / List / Gallery
//! ```
//!
//! 1. **List items:** extend the current list run if it has the same kind, otherwise flush
//!    and start a new one
//! 2. **Images:** extend the current gallery run, otherwise flush and start one
//! 3. **Anything else:** flush, then emit the item's own block
//! 4. **Completion:** flush whatever run is still open
//!
//! A gallery run shorter than [`NestingOptions::gallery_min_images`] is emitted as single
//! image blocks instead.

use std::mem;

use serde_json::{json, Value};

use super::formatting::{render_formatting, unrenderable_kinds};
use crate::formats::blocks::tree::Block;
use crate::ir::nodes::{AudioItem, ContentItem, ImageItem, ListKind, Post, Subtype, TextItem};

/// Knobs for rebuilding nested blocks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NestingOptions {
    /// Shortest image run that becomes a gallery.
    pub gallery_min_images: usize,
}

impl Default for NestingOptions {
    fn default() -> Self {
        NestingOptions {
            gallery_min_images: 2,
        }
    }
}

/// Converts a post to top-level blocks.
pub fn post_to_blocks(post: &Post, options: &NestingOptions) -> Vec<Block> {
    let mut nester = Nester {
        options,
        blocks: Vec::new(),
        state: RunState::Idle,
    };
    for item in &post.content {
        nester.visit(item);
    }
    nester.finish()
}

/// An open run and the items collected for it so far.
#[derive(Debug)]
enum RunState<'a> {
    Idle,
    AccumulatingList(ListKind, Vec<&'a TextItem>),
    AccumulatingGallery(Vec<&'a ImageItem>),
}

struct Nester<'a, 'o> {
    options: &'o NestingOptions,
    blocks: Vec<Block>,
    state: RunState<'a>,
}

impl<'a> Nester<'a, '_> {
    fn visit(&mut self, item: &'a ContentItem) {
        match item {
            ContentItem::Text(text) => match text.subtype.as_ref().and_then(Subtype::list_kind) {
                Some(kind) => self.push_list_item(kind, text),
                None => {
                    self.flush();
                    self.blocks.push(text_block(text));
                }
            },
            ContentItem::Image(image) => self.push_image(image),
            ContentItem::Audio(audio) => {
                self.flush();
                self.blocks.push(audio_block(audio));
            }
        }
    }

    fn push_list_item(&mut self, kind: ListKind, item: &'a TextItem) {
        if let RunState::AccumulatingList(open, items) = &mut self.state {
            if *open == kind {
                items.push(item);
                return;
            }
        }
        self.flush();
        self.state = RunState::AccumulatingList(kind, vec![item]);
    }

    fn push_image(&mut self, image: &'a ImageItem) {
        if let RunState::AccumulatingGallery(images) = &mut self.state {
            images.push(image);
            return;
        }
        self.flush();
        self.state = RunState::AccumulatingGallery(vec![image]);
    }

    /// Emits the open run, if any, and returns to `Idle`.
    fn flush(&mut self) {
        match mem::replace(&mut self.state, RunState::Idle) {
            RunState::Idle => {}
            RunState::AccumulatingList(kind, items) => {
                log::trace!("closing {kind:?} list of {} items", items.len());
                self.blocks.push(list_block(kind, &items));
            }
            RunState::AccumulatingGallery(images) => {
                if images.len() >= self.options.gallery_min_images {
                    log::trace!("closing gallery of {} images", images.len());
                    self.blocks.push(gallery_block(&images));
                } else {
                    self.blocks.extend(images.into_iter().map(image_block));
                }
            }
        }
    }

    fn finish(mut self) -> Vec<Block> {
        self.flush();
        self.blocks
    }
}

/// Block for a text item outside a list run.
fn text_block(item: &TextItem) -> Block {
    match &item.subtype {
        None => paragraph_block(item),
        Some(Subtype::Heading1) => heading_block(1, item),
        Some(Subtype::Heading2) => heading_block(2, item),
        Some(Subtype::Indented) => pullquote_block(item),
        Some(Subtype::Quote) => quote_block(None, item),
        Some(Subtype::Custom(class)) => quote_block(Some(class.as_str()), item),
        Some(list @ (Subtype::OrderedListItem | Subtype::UnorderedListItem)) => {
            // Grouped by the run walk before reaching here.
            let kind = list.list_kind().unwrap_or(ListKind::Unordered);
            list_block(kind, &[item])
        }
    }
}

fn styled_html(item: &TextItem) -> String {
    let unknown = unrenderable_kinds(&item.formatting);
    if !unknown.is_empty() {
        log::debug!("rendering style kinds {unknown:?} as plain text");
    }
    render_formatting(&item.text, &item.formatting)
}

pub fn paragraph_block(item: &TextItem) -> Block {
    Block::new("core/paragraph").with_html(format!("<p>{}</p>", styled_html(item)))
}

/// Heading block. Level 2 is the unmarked default and carries no attribute.
pub fn heading_block(level: u8, item: &TextItem) -> Block {
    let block = Block::new("core/heading");
    let block = if level == 2 {
        block
    } else {
        block.with_attr("level", level)
    };
    block.with_html(format!(
        r#"<h{level} class="wp-block-heading">{}</h{level}>"#,
        styled_html(item)
    ))
}

/// Quote block wrapping a single paragraph. A class name is recorded only for custom styles.
pub fn quote_block(class_name: Option<&str>, item: &TextItem) -> Block {
    let block = Block::new("core/quote");
    let block = match class_name {
        Some(class) => block.with_attr("className", class),
        None => block,
    };
    block
        .with_html(r#"<blockquote class="wp-block-quote">"#)
        .with_inner_block(paragraph_block(item))
        .with_html("</blockquote>")
}

pub fn pullquote_block(item: &TextItem) -> Block {
    Block::new("core/pullquote").with_html(format!(
        r#"<figure class="wp-block-pullquote"><blockquote><p>{}</p></blockquote></figure>"#,
        styled_html(item)
    ))
}

pub fn list_block(kind: ListKind, items: &[&TextItem]) -> Block {
    let (block, tag) = match kind {
        ListKind::Ordered => (Block::new("core/list").with_attr("ordered", true), "ol"),
        ListKind::Unordered => (Block::new("core/list"), "ul"),
    };
    let block = block.with_html(format!(r#"<{tag} class="wp-block-list">"#));
    items
        .iter()
        .fold(block, |block, item| {
            block.with_inner_block(
                Block::new("core/list-item").with_html(format!("<li>{}</li>", styled_html(item))),
            )
        })
        .with_html(format!("</{tag}>"))
}

/// Gallery of self-closed image members, one per image.
pub fn gallery_block(images: &[&ImageItem]) -> Block {
    images
        .iter()
        .fold(Block::new("tumblr/image-set"), |gallery, image| {
            gallery.with_inner_block(gallery_member_block(image))
        })
}

fn gallery_member_block(image: &ImageItem) -> Block {
    Block::new("tumblr/image")
        .with_attr(
            "media",
            json!([{
                "type": "image",
                "url": image.url,
                "width": image.width,
                "height": image.height,
            }]),
        )
        .with_attr("attribution", json!([{"type": "", "url": ""}]))
        .with_attr("altText", "")
        .with_attr("file", json!([]))
        .with_attr("colWidth", column_width(image.width))
        .with_attr("displayWidth", image.width)
        .with_attr("displayHeight", image.height)
}

/// Column width of a gallery member: half the image width, integral when it divides evenly.
pub fn column_width(width: u32) -> Value {
    if width % 2 == 0 {
        Value::from(width / 2)
    } else {
        Value::from(f64::from(width) / 2.0)
    }
}

pub fn image_block(image: &ImageItem) -> Block {
    Block::new("core/image")
        .with_attr("url", image.url.as_str())
        .with_attr("width", image.width)
        .with_attr("height", image.height)
        .with_html(format!(
            r#"<figure class="wp-block-image"><img src="{}" alt=""/></figure>"#,
            html_escape::encode_double_quoted_attribute(&image.url)
        ))
}

pub fn audio_block(audio: &AudioItem) -> Block {
    Block::new("core/audio")
        .with_attr("mediaURL", audio.url.as_str())
        .with_attr("mediaTitle", audio.title.as_str())
        .with_attr("mediaArtist", audio.artist.as_str())
        .with_attr("mediaAlbum", audio.album.as_str())
        .with_attr("poster", json!({ "url": audio.poster_url() }))
        .with_html(format!(
            r#"<figure class="wp-block-audio"><audio controls src="{}"></audio></figure>"#,
            html_escape::encode_double_quoted_attribute(&audio.url)
        ))
}
