//! Round trips through both directions
//!
//! Items rendered as blocks and read back must come out unchanged for every item type and
//! subtype. Style ranges survive only when they are disjoint and their text occurs once in the
//! item: overlapping ranges come back split at every boundary, since extraction never merges.
//! The generated posts below therefore carry no formatting; the styled cases are covered by the
//! fixtures.

use crate::common::fixture;
use proptest::prelude::*;
use velvet_babel::common::flat_to_nested::{post_to_blocks, NestingOptions};
use velvet_babel::common::nested_to_flat::blocks_to_post;
use velvet_babel::ir::nodes::{
    AudioItem, ContentItem, ImageItem, MediaRef, Post, StyleRange, TextItem,
};
use velvet_babel::{blocks_to_items, items_to_blocks, parse_blocks, serialize_blocks};

fn round_trip(post: &Post, options: &NestingOptions) -> Post {
    let markup = serialize_blocks(&post_to_blocks(post, options));
    blocks_to_post(&parse_blocks(&markup))
}

#[test]
fn test_kitchensink_items_survive() {
    let items = fixture("kitchensink.json");
    assert_eq!(blocks_to_items(&items_to_blocks(&items).unwrap()).unwrap(), items);
}

#[test]
fn test_gallery_items_survive() {
    let items = fixture("gallery.json");
    assert_eq!(blocks_to_items(&items_to_blocks(&items).unwrap()).unwrap(), items);
}

#[test]
fn test_single_image_survives_any_gallery_threshold() {
    let post = Post::new(vec![
        TextItem::new("before").into(),
        ImageItem::new("https://example.com/one.png", 75, 50).into(),
        TextItem::new("after").into(),
    ]);
    for gallery_min_images in [1, 2, 5] {
        let options = NestingOptions { gallery_min_images };
        assert_eq!(round_trip(&post, &options), post);
    }
}

#[test]
fn test_text_needing_escapes_survives() {
    let post = Post::new(vec![
        TextItem::new("a < b && c > d").into(),
        TextItem::new("\"quoted\" -- dashed")
            .with_subtype("quote".into())
            .into(),
    ]);
    assert_eq!(round_trip(&post, &NestingOptions::default()), post);
}

#[test]
fn test_disjoint_ranges_survive() {
    let post = Post::new(vec![TextItem::new("abcdefghij")
        .with_formatting(vec![StyleRange::bold(0, 3), StyleRange::italic(5, 8)])
        .into()]);
    assert_eq!(round_trip(&post, &NestingOptions::default()), post);
}

#[test]
fn test_overlapping_ranges_come_back_split() {
    let post = Post::new(vec![TextItem::new("abcdefghij")
        .with_formatting(vec![StyleRange::bold(0, 5), StyleRange::italic(2, 8)])
        .into()]);
    let expected = Post::new(vec![TextItem::new("abcdefghij")
        .with_formatting(vec![
            StyleRange::bold(0, 2),
            StyleRange::bold(2, 5),
            StyleRange::italic(2, 5),
            StyleRange::italic(5, 8),
        ])
        .into()]);
    assert_eq!(round_trip(&post, &NestingOptions::default()), expected);
}

#[test]
fn test_surrounding_whitespace_is_trimmed() {
    let post = Post::new(vec![TextItem::new("  padded ").into()]);
    let expected = Post::new(vec![TextItem::new("padded").into()]);
    assert_eq!(round_trip(&post, &NestingOptions::default()), expected);
}

fn line() -> impl Strategy<Value = String> {
    "[a-z]{1,8}( [a-z]{1,8}){0,3}"
}

fn lines() -> impl Strategy<Value = String> {
    prop::collection::vec(line(), 1..4).prop_map(|lines| lines.join("\n"))
}

fn text_item() -> impl Strategy<Value = ContentItem> {
    let single_line = prop_oneof![
        Just("heading1"),
        Just("heading2"),
        Just("unordered-list-item"),
        Just("ordered-list-item"),
    ];
    let multi_line = prop_oneof![
        Just("quote"),
        Just("chat"),
        Just("quirky"),
        Just("indented"),
    ];
    prop_oneof![
        lines().prop_map(|text| TextItem::new(text).into()),
        (line(), single_line)
            .prop_map(|(text, subtype)| TextItem::new(text).with_subtype(subtype.into()).into()),
        (lines(), multi_line)
            .prop_map(|(text, subtype)| TextItem::new(text).with_subtype(subtype.into()).into()),
    ]
}

fn image_item() -> impl Strategy<Value = ContentItem> {
    ("[a-z]{1,8}", 0u32..2000, 0u32..2000).prop_map(|(name, width, height)| {
        ImageItem::new(format!("https://example.com/{name}.png"), width, height).into()
    })
}

fn audio_item() -> impl Strategy<Value = ContentItem> {
    ("[a-z]{1,8}", line(), line(), line()).prop_map(|(name, title, artist, album)| {
        ContentItem::Audio(AudioItem {
            url: format!("https://example.com/{name}.mp3"),
            title,
            artist,
            album,
            poster: vec![MediaRef {
                url: format!("https://example.com/{name}.jpg"),
            }],
        })
    })
}

fn post() -> impl Strategy<Value = Post> {
    prop::collection::vec(
        prop_oneof![4 => text_item(), 2 => image_item(), 1 => audio_item()],
        0..12,
    )
    .prop_map(Post::new)
}

proptest! {
    #[test]
    fn items_survive_blocks(post in post(), gallery_min_images in 1usize..4) {
        let options = NestingOptions { gallery_min_images };
        prop_assert_eq!(round_trip(&post, &options), post);
    }
}
