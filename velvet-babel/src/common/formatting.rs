//! Style range codec
//!
//! Converts between inline markup (`<strong>`, `<em>` and their legacy spellings) and the
//! offset ranges carried by text items.
//!
//! Extraction parses the fragment with html5ever and visits formatting elements in document
//! order. Each element's range starts at the first occurrence of its trimmed text in the
//! plain-text rendering of the whole fragment, so repeated identical phrases all point at the
//! first occurrence.
//!
//! Rendering cuts the text at every range boundary and wraps each piece in one tag per
//! active style, outermost first in [`StyleKind`] order. Pieces are never merged, so tag
//! boundaries follow range boundaries exactly.

use std::collections::{BTreeSet, HashSet};
use std::rc::Rc;

use html5ever::parse_document;
use html5ever::tendril::TendrilSink;
use markup5ever_rcdom::{Handle, NodeData, RcDom};

use super::text::{byte_offset, html_to_text};
use crate::ir::nodes::{StyleKind, StyleRange};

/// Style kind of a formatting element, if it is one.
fn style_for_tag(tag: &str) -> Option<StyleKind> {
    match tag {
        "strong" | "b" => Some(StyleKind::Bold),
        "em" | "i" => Some(StyleKind::Italic),
        _ => None,
    }
}

/// Tag rendered for a style kind. Unknown kinds have none.
fn tag_for_style(kind: &StyleKind) -> Option<&'static str> {
    match kind {
        StyleKind::Bold => Some("strong"),
        StyleKind::Italic => Some("em"),
        StyleKind::Other(_) => None,
    }
}

/// Leaf text of a fragment together with the style ranges over it.
pub fn extract_text_and_formatting(html: &str) -> (String, Vec<StyleRange>) {
    let text = html_to_text(html, true);
    let formatting = formatting_against(html, &text);
    (text, formatting)
}

/// Style ranges of a fragment, measured against its own plain-text rendering.
pub fn extract_formatting(html: &str) -> Vec<StyleRange> {
    formatting_against(html, &html_to_text(html, true))
}

fn formatting_against(html: &str, plain: &str) -> Vec<StyleRange> {
    let dom = parse_document(RcDom::default(), Default::default()).one(html);

    let mut elements = Vec::new();
    collect_styled(&dom.document, &mut elements);

    elements
        .into_iter()
        .map(|(kind, node)| {
            let content = node_text(&node);
            let start = plain
                .find(content.trim())
                .map_or(0, |byte| plain[..byte].chars().count());
            let end = start + content.chars().count();
            log::trace!("{} range {start}..{end}", kind.as_str());
            StyleRange::new(kind, start, end)
        })
        .collect()
}

/// Formatting elements in pre-order.
fn collect_styled(node: &Handle, out: &mut Vec<(StyleKind, Handle)>) {
    if let NodeData::Element { ref name, .. } = node.data {
        let tag = name.local.as_ref();
        if is_opaque(tag) {
            return;
        }
        if let Some(kind) = style_for_tag(tag) {
            out.push((kind, Rc::clone(node)));
        }
    }
    for child in node.children.borrow().iter() {
        collect_styled(child, out);
    }
}

fn node_text(node: &Handle) -> String {
    let mut text = String::new();
    push_text(node, &mut text);
    text
}

fn push_text(node: &Handle, out: &mut String) {
    match node.data {
        NodeData::Text { ref contents } => out.push_str(&contents.borrow()),
        NodeData::Element { ref name, .. } => {
            let tag = name.local.as_ref();
            if tag == "br" {
                out.push('\n');
            } else if !is_opaque(tag) {
                for child in node.children.borrow().iter() {
                    push_text(child, out);
                }
            }
        }
        _ => {
            for child in node.children.borrow().iter() {
                push_text(child, out);
            }
        }
    }
}

/// Elements whose content never reaches the plain text.
fn is_opaque(tag: &str) -> bool {
    matches!(tag, "script" | "style")
}

/// Render text with style ranges as nested inline markup.
///
/// The text is escaped and newlines become `<br>`. Ranges may overlap and need not be
/// sorted; offsets past the end of the text are clamped.
pub fn render_formatting(text: &str, ranges: &[StyleRange]) -> String {
    let len = text.chars().count();

    let mut cuts = BTreeSet::from([0, len]);
    for range in ranges {
        cuts.insert(range.start.min(len));
        cuts.insert(range.end.min(len));
    }
    let cuts: Vec<usize> = cuts.into_iter().collect();

    let mut html = String::new();
    for window in cuts.windows(2) {
        let (from, to) = (window[0], window[1]);
        let piece = &text[byte_offset(text, from)..byte_offset(text, to)];

        let active: BTreeSet<&StyleKind> = ranges
            .iter()
            .filter(|r| r.start <= from && to <= r.end)
            .map(|r| &r.kind)
            .collect();
        let tags: Vec<&str> = active.into_iter().filter_map(tag_for_style).collect();

        for tag in &tags {
            html.push('<');
            html.push_str(tag);
            html.push('>');
        }
        html.push_str(&render_text(piece));
        for tag in tags.iter().rev() {
            html.push_str("</");
            html.push_str(tag);
            html.push('>');
        }
    }
    html
}

/// Escape text for markup, with newlines as line breaks.
pub fn render_text(text: &str) -> String {
    html_escape::encode_text(text).replace('\n', "<br>")
}

/// Style kinds this codec cannot render, for diagnostics.
pub(crate) fn unrenderable_kinds(ranges: &[StyleRange]) -> HashSet<&str> {
    ranges
        .iter()
        .filter(|r| tag_for_style(&r.kind).is_none())
        .map(|r| r.kind.as_str())
        .collect()
}
