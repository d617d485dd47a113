//! Block tree tests
//!
//! Parsing and serializing comment-delimited markup without going through content items.

use crate::common::fixture;
use insta::assert_snapshot;
use serde_json::json;
use velvet_babel::{
    parse_blocks, serialize_block, serialize_block_attributes, serialize_blocks, Attributes, Block,
    Chunk,
};

fn attrs(value: serde_json::Value) -> Attributes {
    value.as_object().cloned().expect("object")
}

#[test]
fn test_kitchensink_tree_shape() {
    let blocks = parse_blocks(&fixture("kitchensink.html"));

    let names: Vec<_> = blocks.iter().map(|b| b.name.as_deref().unwrap()).collect();
    assert_eq!(
        names,
        vec![
            "core/heading",
            "core/paragraph",
            "core/heading",
            "core/heading",
            "core/quote",
            "core/quote",
            "core/quote",
            "core/pullquote",
            "core/list",
            "core/list",
        ]
    );

    let chat = &blocks[6];
    assert_eq!(chat.attr_str("className"), Some("chat"));
    assert_eq!(chat.inner_html, r#"<blockquote class="wp-block-quote"></blockquote>"#);
    assert_eq!(
        chat.inner_content,
        vec![
            Chunk::Html(r#"<blockquote class="wp-block-quote">"#.to_string()),
            Chunk::InnerBlock,
            Chunk::Html("</blockquote>".to_string()),
        ]
    );

    let ordered = &blocks[9];
    assert_eq!(ordered.attr("ordered"), Some(&json!(true)));
    assert_eq!(ordered.inner_blocks.len(), 2);
    assert_eq!(ordered.inner_blocks[1].inner_html, "<li>ordered bullet 2</li>");
}

#[test]
fn test_kitchensink_serializes_back_verbatim() {
    let source = fixture("kitchensink.html");
    assert_eq!(serialize_blocks(&parse_blocks(&source)), source);
}

#[test]
fn test_gallery_member_with_explicit_closer() {
    let blocks = parse_blocks(&fixture("gallery.html"));
    assert_eq!(blocks.len(), 1);

    let gallery = &blocks[0];
    assert!(gallery.is_named("tumblr/image-set"));
    assert_eq!(gallery.inner_blocks.len(), 1);

    let member = &gallery.inner_blocks[0];
    assert!(member.is_named("tumblr/image"));
    assert_eq!(member.attr("colWidth"), Some(&json!(540)));
    assert_eq!(member.attr("media").and_then(|m| m.as_array()).map(Vec::len), Some(9));
    assert!(member.inner_content.is_empty());
}

#[test]
fn test_reparse_is_stable_for_messy_input() {
    let source = concat!(
        "leading text\n",
        "<!-- wp:group --><div><!-- wp:paragraph --><p>one</p>",
        "<!-- /wp:group -->",
        "<!-- /wp:missing -->",
        r#"<!-- wp:image {"url": broken} /-->"#,
        "<!-- wp:quote --><blockquote>unclosed",
    );
    let parsed = parse_blocks(source);
    let once = serialize_blocks(&parsed);
    let reparsed = parse_blocks(&once);
    assert_eq!(reparsed, parsed);
    assert_eq!(serialize_blocks(&reparsed), once);
}

#[test]
fn test_built_tree_serialization() {
    let list = Block::new("core/list")
        .with_attr("ordered", true)
        .with_html(r#"<ol class="wp-block-list">"#)
        .with_inner_block(Block::new("core/list-item").with_html("<li>a</li>"))
        .with_inner_block(Block::new("core/list-item").with_html("<li>b</li>"))
        .with_html("</ol>");

    assert_snapshot!(serialize_block(&list), @r#"<!-- wp:list {"ordered":true} --><ol class="wp-block-list"><!-- wp:list-item --><li>a</li><!-- /wp:list-item --><!-- wp:list-item --><li>b</li><!-- /wp:list-item --></ol><!-- /wp:list -->"#);
}

#[test]
fn test_third_party_namespace_is_kept() {
    let block = Block::new("tumblr/image").with_attrs(attrs(json!({"altText": ""})));
    assert_snapshot!(serialize_block(&block), @r#"<!-- wp:tumblr/image {"altText":""} /-->"#);
}

#[test]
fn test_attribute_escaping_matches_editor_output() {
    let escaped = serialize_block_attributes(&attrs(json!({
        "content": "<!-- a & b --> \"quoted\"",
        "url": "https://example.com/a/b",
        "caption": "naïve café",
    })));
    assert_eq!(
        escaped,
        r#"{"content":"\u003c!\u002d\u002d a \u0026 b \u002d\u002d\u003e \u0022quoted\u0022","url":"https://example.com/a/b","caption":"naïve café"}"#
    );

    // The escaped form reads back as the original values.
    let markup = format!("<!-- wp:paragraph {escaped} --><p>x</p><!-- /wp:paragraph -->");
    let parsed = parse_blocks(&markup);
    assert_eq!(
        parsed[0].attr_str("content"),
        Some("<!-- a & b --> \"quoted\"")
    );
}
