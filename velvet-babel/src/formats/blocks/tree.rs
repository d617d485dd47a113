//! Block tree nodes for the comment-delimited markup.
//!
//! A [`Block`] keeps its inner markup twice: `inner_html` is the literal markup with nested
//! blocks cut out, and `inner_content` interleaves the same literal fragments with
//! [`Chunk::InnerBlock`] placeholders, one per entry of `inner_blocks`, in order. Resolving
//! the placeholders against `inner_blocks` reproduces the block's full inner markup.

use serde_json::{Map, Value};

/// Attribute bag of a block: an ordered JSON object.
pub type Attributes = Map<String, Value>;

/// Namespace assumed for block names written without one.
pub const CORE_NAMESPACE: &str = "core/";

#[derive(Debug, Clone, PartialEq)]
pub enum Chunk {
    /// Literal markup between delimiters
    Html(String),
    /// Stands for the next entry of `inner_blocks`
    InnerBlock,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Block {
    /// Fully qualified name (`core/paragraph`), or `None` for freeform content.
    pub name: Option<String>,
    pub attrs: Attributes,
    pub inner_blocks: Vec<Block>,
    pub inner_html: String,
    pub inner_content: Vec<Chunk>,
}

impl Block {
    pub fn new(name: impl Into<String>) -> Self {
        Block {
            name: Some(name.into()),
            ..Default::default()
        }
    }

    /// An untyped block holding literal markup only.
    pub fn freeform(html: impl Into<String>) -> Self {
        let mut block = Block::default();
        block.push_html(&html.into());
        block
    }

    pub fn with_attrs(mut self, attrs: Attributes) -> Self {
        self.attrs = attrs;
        self
    }

    pub fn with_attr(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.attrs.insert(key.into(), value.into());
        self
    }

    pub fn with_html(mut self, html: impl AsRef<str>) -> Self {
        self.push_html(html.as_ref());
        self
    }

    pub fn with_inner_block(mut self, block: Block) -> Self {
        self.push_inner_block(block);
        self
    }

    /// Append literal markup. Empty fragments are not recorded.
    pub fn push_html(&mut self, html: &str) {
        if html.is_empty() {
            return;
        }
        self.inner_html.push_str(html);
        self.inner_content.push(Chunk::Html(html.to_string()));
    }

    pub fn push_inner_block(&mut self, block: Block) {
        self.inner_blocks.push(block);
        self.inner_content.push(Chunk::InnerBlock);
    }

    pub fn is_named(&self, name: &str) -> bool {
        self.name.as_deref() == Some(name)
    }

    pub fn attr(&self, key: &str) -> Option<&Value> {
        self.attrs.get(key)
    }

    pub fn attr_str(&self, key: &str) -> Option<&str> {
        self.attr(key).and_then(Value::as_str)
    }

    /// Nested blocks with the given name, in order.
    pub fn inner_blocks_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Block> {
        self.inner_blocks.iter().filter(move |b| b.is_named(name))
    }
}

/// Reads a JSON number as a non-negative integer dimension.
///
/// Fractional values are truncated; anything else yields `None`.
pub fn value_as_dimension(value: &Value) -> Option<u32> {
    value
        .as_u64()
        .or_else(|| value.as_f64().filter(|f| *f >= 0.0).map(|f| f as u64))
        .and_then(|n| u32::try_from(n).ok())
}
