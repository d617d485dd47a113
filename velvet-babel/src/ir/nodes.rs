//! Core data structures for the content-item representation.
//!
//! A [`Post`] is the flat target document: an ordered list of [`ContentItem`]s wrapped in a
//! fixed envelope. Field order in the structs below is the serialized key order.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// Envelope version written on every post.
pub const POST_VERSION: u32 = 2;

/// The content-item envelope: `{content, layout, trail, version}`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Post {
    pub content: Vec<ContentItem>,
    /// Reserved; always empty in documents this crate produces.
    pub layout: Vec<Value>,
    /// Reserved; always empty in documents this crate produces.
    pub trail: Vec<Value>,
    pub version: u32,
}

impl Post {
    pub fn new(content: Vec<ContentItem>) -> Self {
        Post {
            content,
            layout: Vec::new(),
            trail: Vec::new(),
            version: POST_VERSION,
        }
    }
}

impl Default for Post {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

/// One element of a post's `content` sequence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ContentItem {
    Text(TextItem),
    Image(ImageItem),
    Audio(AudioItem),
}

impl ContentItem {
    /// The item types this crate knows how to map, as they appear in `type`.
    pub const KNOWN_TYPES: &'static [&'static str] = &["text", "image", "audio"];
}

impl From<TextItem> for ContentItem {
    fn from(item: TextItem) -> Self {
        ContentItem::Text(item)
    }
}

impl From<ImageItem> for ContentItem {
    fn from(item: ImageItem) -> Self {
        ContentItem::Image(item)
    }
}

impl From<AudioItem> for ContentItem {
    fn from(item: AudioItem) -> Self {
        ContentItem::Audio(item)
    }
}

/// A run of plain text, optionally typed by a subtype and styled by ranges.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextItem {
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subtype: Option<Subtype>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub formatting: Vec<StyleRange>,
}

impl TextItem {
    pub fn new(text: impl Into<String>) -> Self {
        TextItem {
            text: text.into(),
            subtype: None,
            formatting: Vec::new(),
        }
    }

    pub fn with_subtype(mut self, subtype: Subtype) -> Self {
        self.subtype = Some(subtype);
        self
    }

    pub fn with_formatting(mut self, formatting: Vec<StyleRange>) -> Self {
        self.formatting = formatting;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageItem {
    pub url: String,
    #[serde(default)]
    pub width: u32,
    #[serde(default)]
    pub height: u32,
}

impl ImageItem {
    pub fn new(url: impl Into<String>, width: u32, height: u32) -> Self {
        ImageItem {
            url: url.into(),
            width,
            height,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AudioItem {
    pub url: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub artist: String,
    #[serde(default)]
    pub album: String,
    #[serde(default)]
    pub poster: Vec<MediaRef>,
}

impl AudioItem {
    /// URL of the first poster entry, or the empty string.
    pub fn poster_url(&self) -> &str {
        self.poster.first().map(|p| p.url.as_str()).unwrap_or("")
    }
}

/// A bare `{url}` media reference.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MediaRef {
    pub url: String,
}

/// Kind of list a list-item subtype belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListKind {
    Ordered,
    Unordered,
}

impl ListKind {
    pub fn subtype(self) -> Subtype {
        match self {
            ListKind::Ordered => Subtype::OrderedListItem,
            ListKind::Unordered => Subtype::UnorderedListItem,
        }
    }
}

/// Text item subtype. Anything not recognised is a custom quote class.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Subtype {
    Heading1,
    Heading2,
    Quote,
    Indented,
    UnorderedListItem,
    OrderedListItem,
    Custom(String),
}

impl Subtype {
    pub fn as_str(&self) -> &str {
        match self {
            Subtype::Heading1 => "heading1",
            Subtype::Heading2 => "heading2",
            Subtype::Quote => "quote",
            Subtype::Indented => "indented",
            Subtype::UnorderedListItem => "unordered-list-item",
            Subtype::OrderedListItem => "ordered-list-item",
            Subtype::Custom(class) => class,
        }
    }

    pub fn list_kind(&self) -> Option<ListKind> {
        match self {
            Subtype::OrderedListItem => Some(ListKind::Ordered),
            Subtype::UnorderedListItem => Some(ListKind::Unordered),
            _ => None,
        }
    }
}

impl From<String> for Subtype {
    fn from(value: String) -> Self {
        match value.as_str() {
            "heading1" => Subtype::Heading1,
            "heading2" => Subtype::Heading2,
            "quote" => Subtype::Quote,
            "indented" => Subtype::Indented,
            "unordered-list-item" => Subtype::UnorderedListItem,
            "ordered-list-item" => Subtype::OrderedListItem,
            _ => Subtype::Custom(value),
        }
    }
}

impl From<&str> for Subtype {
    fn from(value: &str) -> Self {
        Subtype::from(value.to_string())
    }
}

impl From<Subtype> for String {
    fn from(value: Subtype) -> Self {
        match value {
            Subtype::Custom(class) => class,
            other => other.as_str().to_string(),
        }
    }
}

impl fmt::Display for Subtype {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A half-open `[start, end)` char range over an item's plain text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StyleRange {
    #[serde(rename = "type")]
    pub kind: StyleKind,
    pub start: usize,
    pub end: usize,
}

impl StyleRange {
    pub fn new(kind: StyleKind, start: usize, end: usize) -> Self {
        StyleRange { kind, start, end }
    }

    pub fn bold(start: usize, end: usize) -> Self {
        Self::new(StyleKind::Bold, start, end)
    }

    pub fn italic(start: usize, end: usize) -> Self {
        Self::new(StyleKind::Italic, start, end)
    }
}

/// Inline style kind. Declaration order is nesting precedence: earlier kinds wrap later ones.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum StyleKind {
    Bold,
    Italic,
    /// Kept so documents round-trip through JSON; never rendered as a tag.
    Other(String),
}

impl StyleKind {
    pub fn as_str(&self) -> &str {
        match self {
            StyleKind::Bold => "bold",
            StyleKind::Italic => "italic",
            StyleKind::Other(name) => name,
        }
    }
}

impl From<String> for StyleKind {
    fn from(value: String) -> Self {
        match value.as_str() {
            "bold" => StyleKind::Bold,
            "italic" => StyleKind::Italic,
            _ => StyleKind::Other(value),
        }
    }
}

impl From<StyleKind> for String {
    fn from(value: StyleKind) -> Self {
        match value {
            StyleKind::Other(name) => name,
            other => other.as_str().to_string(),
        }
    }
}
