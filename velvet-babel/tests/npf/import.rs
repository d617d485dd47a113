//! Content items → block markup

use crate::common::fixture;
use velvet_babel::{items_to_blocks, FormatError};

/// Item documents and the exact markup they must produce.
const CASES: &[(&str, &str, &str)] = &[
    (
        "paragraph",
        r#"{"content":[{"type":"text","text":"this is a paragraph"}],"layout":[],"trail":[],"version":2}"#,
        r#"<!-- wp:paragraph --><p>this is a paragraph</p><!-- /wp:paragraph -->"#,
    ),
    (
        "formatted_paragraph",
        r#"{"content":[{"type":"text","text":"supercalifragilisticexpialidocious","formatting":[{"type":"bold","start":0,"end":9},{"type":"italic","start":9,"end":34},{"type":"bold","start":9,"end":20}]}],"layout":[],"trail":[],"version":2}"#,
        r#"<!-- wp:paragraph --><p><strong>supercali</strong><strong><em>fragilistic</em></strong><em>expialidocious</em></p><!-- /wp:paragraph -->"#,
    ),
    (
        "blockquote",
        r#"{"content":[{"type":"text","text":"this is a quote","subtype":"quote"}],"layout":[],"trail":[],"version":2}"#,
        r#"<!-- wp:quote --><blockquote class="wp-block-quote"><!-- wp:paragraph --><p>this is a quote</p><!-- /wp:paragraph --></blockquote><!-- /wp:quote -->"#,
    ),
    (
        "chat",
        r#"{"content":[{"type":"text","text":"John: How are you?\nJane: Good and you?","subtype":"chat","formatting":[{"type":"bold","start":0,"end":5},{"type":"bold","start":19,"end":24}]}],"layout":[],"trail":[],"version":2}"#,
        r#"<!-- wp:quote {"className":"chat"} --><blockquote class="wp-block-quote"><!-- wp:paragraph --><p><strong>John:</strong> How are you?<br><strong>Jane:</strong> Good and you?</p><!-- /wp:paragraph --></blockquote><!-- /wp:quote -->"#,
    ),
    (
        "quirky",
        r#"{"content":[{"type":"text","text":"this is quirky","subtype":"quirky"}],"layout":[],"trail":[],"version":2}"#,
        r#"<!-- wp:quote {"className":"quirky"} --><blockquote class="wp-block-quote"><!-- wp:paragraph --><p>this is quirky</p><!-- /wp:paragraph --></blockquote><!-- /wp:quote -->"#,
    ),
    (
        "heading1",
        r#"{"content":[{"type":"text","text":"this is a heading level 1","subtype":"heading1"}],"layout":[],"trail":[],"version":2}"#,
        r#"<!-- wp:heading {"level":1} --><h1 class="wp-block-heading">this is a heading level 1</h1><!-- /wp:heading -->"#,
    ),
    (
        "heading2",
        r#"{"content":[{"type":"text","text":"this is a heading level 2","subtype":"heading2"}],"layout":[],"trail":[],"version":2}"#,
        r#"<!-- wp:heading --><h2 class="wp-block-heading">this is a heading level 2</h2><!-- /wp:heading -->"#,
    ),
    (
        "indented",
        r#"{"content":[{"type":"text","text":"this is indented\nthis is a second line indented","subtype":"indented"}],"layout":[],"trail":[],"version":2}"#,
        r#"<!-- wp:pullquote --><figure class="wp-block-pullquote"><blockquote><p>this is indented<br>this is a second line indented</p></blockquote></figure><!-- /wp:pullquote -->"#,
    ),
    (
        "bulleted-list",
        r#"{"content":[{"type":"text","text":"first bullet","subtype":"unordered-list-item"},{"type":"text","text":"second bullet","subtype":"unordered-list-item"},{"type":"text","text":"third bullet","subtype":"unordered-list-item"}],"layout":[],"trail":[],"version":2}"#,
        r#"<!-- wp:list --><ul class="wp-block-list"><!-- wp:list-item --><li>first bullet</li><!-- /wp:list-item --><!-- wp:list-item --><li>second bullet</li><!-- /wp:list-item --><!-- wp:list-item --><li>third bullet</li><!-- /wp:list-item --></ul><!-- /wp:list -->"#,
    ),
    (
        "ordered-list",
        r#"{"content":[{"type":"text","text":"first ordered bullet","subtype":"ordered-list-item"},{"type":"text","text":"second ordered bullet","subtype":"ordered-list-item"},{"type":"text","text":"third ordered bullet","subtype":"ordered-list-item"}],"layout":[],"trail":[],"version":2}"#,
        r#"<!-- wp:list {"ordered":true} --><ol class="wp-block-list"><!-- wp:list-item --><li>first ordered bullet</li><!-- /wp:list-item --><!-- wp:list-item --><li>second ordered bullet</li><!-- /wp:list-item --><!-- wp:list-item --><li>third ordered bullet</li><!-- /wp:list-item --></ol><!-- /wp:list -->"#,
    ),
    (
        "audio",
        r#"{"content":[{"type":"audio","url":"https://example.com/audio.mp3","title":"Song Title","artist":"Artist Name","album":"Album Name","poster":[{"url":"https://example.com/cover.jpg"}]}],"layout":[],"trail":[],"version":2}"#,
        r#"<!-- wp:audio {"mediaURL":"https://example.com/audio.mp3","mediaTitle":"Song Title","mediaArtist":"Artist Name","mediaAlbum":"Album Name","poster":{"url":"https://example.com/cover.jpg"}} --><figure class="wp-block-audio"><audio controls src="https://example.com/audio.mp3"></audio></figure><!-- /wp:audio -->"#,
    ),
];

#[test]
fn test_reference_cases() {
    for (name, items, expected) in CASES {
        let markup = items_to_blocks(items).unwrap_or_else(|e| panic!("{name}: {e}"));
        assert_eq!(&markup, expected, "case {name}");
    }
}

#[test]
fn test_kitchensink_rebuilds_source_markup() {
    assert_eq!(
        items_to_blocks(&fixture("kitchensink.json")).unwrap(),
        fixture("kitchensink.html")
    );
}

#[test]
fn test_image_run_becomes_gallery() {
    assert_eq!(
        items_to_blocks(&fixture("gallery.json")).unwrap(),
        fixture("gallery.blocks")
    );
}

#[test]
fn test_single_image_is_a_plain_image_block() {
    let items = r#"{"content":[{"type":"image","url":"https://example.com/a.png","width":75,"height":50}],"layout":[],"trail":[],"version":2}"#;
    assert_eq!(
        items_to_blocks(items).unwrap(),
        r#"<!-- wp:image {"url":"https://example.com/a.png","width":75,"height":50} --><figure class="wp-block-image"><img src="https://example.com/a.png" alt=""/></figure><!-- /wp:image -->"#
    );
}

#[test]
fn test_mixed_post_order_is_kept() {
    let items = r#"{"content":[{"type":"text","text":"Intro"},{"type":"text","text":"a","subtype":"unordered-list-item"},{"type":"text","text":"b","subtype":"unordered-list-item"},{"type":"text","text":"Outro","subtype":"heading2"}]}"#;
    assert_eq!(
        items_to_blocks(items).unwrap(),
        concat!(
            "<!-- wp:paragraph --><p>Intro</p><!-- /wp:paragraph -->",
            r#"<!-- wp:list --><ul class="wp-block-list"><!-- wp:list-item --><li>a</li><!-- /wp:list-item --><!-- wp:list-item --><li>b</li><!-- /wp:list-item --></ul><!-- /wp:list -->"#,
            r#"<!-- wp:heading --><h2 class="wp-block-heading">Outro</h2><!-- /wp:heading -->"#,
        )
    );
}

#[test]
fn test_unknown_style_kinds_render_as_text() {
    let items = r#"{"content":[{"type":"text","text":"small print","formatting":[{"type":"small","start":0,"end":5},{"type":"bold","start":6,"end":11}]}]}"#;
    assert_eq!(
        items_to_blocks(items).unwrap(),
        "<!-- wp:paragraph --><p>small <strong>print</strong></p><!-- /wp:paragraph -->"
    );
}

#[test]
fn test_empty_post_has_no_blocks() {
    assert_eq!(items_to_blocks(r#"{"content":[]}"#).unwrap(), "");
}

#[test]
fn test_invalid_documents() {
    assert!(matches!(
        items_to_blocks("{\"content\": [").unwrap_err(),
        FormatError::InvalidInput { index: None, .. }
    ));
    assert!(matches!(
        items_to_blocks(r#"{"layout":[],"trail":[],"version":2}"#).unwrap_err(),
        FormatError::InvalidInput { index: None, .. }
    ));
    assert!(matches!(
        items_to_blocks(r#"{"content":[{"type":"text"}]}"#).unwrap_err(),
        FormatError::InvalidInput { index: Some(0), .. }
    ));
}

#[test]
fn test_unknown_item_type_is_not_dropped() {
    let err = items_to_blocks(
        r#"{"content":[{"type":"text","text":"ok"},{"type":"link","url":"https://example.com"}]}"#,
    )
    .unwrap_err();
    assert_eq!(
        err,
        FormatError::UnsupportedItemType {
            index: 1,
            item_type: "link".to_string()
        }
    );
    assert_eq!(
        err.to_string(),
        "Unsupported content item type 'link' at content item 1"
    );
}
