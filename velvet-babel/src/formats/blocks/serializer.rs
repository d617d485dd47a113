//! Block markup serialization
//!
//! Renders a block tree back to comment-delimited markup. The attribute encoding must stay
//! byte-for-byte in sync with the block editor's own attribute serializer, so it is written
//! as a fixed list of substitutions over the JSON encoder's output rather than relying on
//! encoder escaping defaults.

use super::tree::{Attributes, Block, Chunk, CORE_NAMESPACE};

/// Substitutions applied, in this order, to the encoded attribute JSON.
const ATTRIBUTE_SUBSTITUTIONS: &[(&str, &str)] = &[
    ("--", "\\u002d\\u002d"),
    ("<", "\\u003c"),
    (">", "\\u003e"),
    ("&", "\\u0026"),
    ("\\\"", "\\u0022"),
];

/// Serialize a sequence of blocks, concatenated.
pub fn serialize_blocks(blocks: &[Block]) -> String {
    blocks.iter().map(serialize_block).collect()
}

/// Serialize one block, recursing into its nested blocks.
pub fn serialize_block(block: &Block) -> String {
    let mut content = String::new();
    let mut inner_blocks = block.inner_blocks.iter();
    for chunk in &block.inner_content {
        match chunk {
            Chunk::Html(html) => content.push_str(html),
            Chunk::InnerBlock => match inner_blocks.next() {
                Some(inner) => content.push_str(&serialize_block(inner)),
                None => log::debug!("placeholder without a matching inner block"),
            },
        }
    }

    comment_delimited_block_content(block.name.as_deref(), &block.attrs, &content)
}

/// Wrap block content in its delimiters.
///
/// Freeform content (no name) is returned unchanged; empty content self-closes.
pub fn comment_delimited_block_content(
    name: Option<&str>,
    attrs: &Attributes,
    content: &str,
) -> String {
    let Some(name) = name else {
        return content.to_string();
    };

    let name = strip_core_namespace(name);
    let attrs = if attrs.is_empty() {
        String::new()
    } else {
        format!("{} ", serialize_block_attributes(attrs))
    };

    if content.is_empty() {
        return format!("<!-- wp:{name} {attrs}/-->");
    }
    format!("<!-- wp:{name} {attrs}-->{content}<!-- /wp:{name} -->")
}

/// Drop the implicit `core/` namespace; other namespaces are kept.
pub fn strip_core_namespace(name: &str) -> &str {
    name.strip_prefix(CORE_NAMESPACE).unwrap_or(name)
}

/// Encode attributes as JSON safe to embed in an HTML comment.
///
/// Slashes and non-ASCII characters are left unescaped.
pub fn serialize_block_attributes(attrs: &Attributes) -> String {
    let encoded = serde_json::to_string(attrs).unwrap_or_else(|err| {
        log::debug!("block attributes failed to encode: {err}");
        String::from("{}")
    });
    ATTRIBUTE_SUBSTITUTIONS
        .iter()
        .fold(encoded, |acc, (from, to)| acc.replace(from, to))
}
