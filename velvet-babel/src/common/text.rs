//! Plain-text helpers over markup fragments.

use html_escape::decode_html_entities;
use once_cell::sync::Lazy;
use regex::Regex;
use std::borrow::Cow;

/// `<script>` and `<style>` elements, content included.
static SCRIPT_OR_STYLE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?is)<script[^>]*?>.*?</script>|<style[^>]*?>.*?</style>").unwrap()
});

/// Comments and anything tag-shaped.
static TAG: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?s)<!--.*?-->|</?[a-zA-Z!?][^>]*>").unwrap());

static LINE_BREAK: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)<br\s*/?>").unwrap());

static WHITESPACE_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"[\r\n\t ]+").unwrap());

/// Remove all markup, including script and style contents, and trim the result.
///
/// With `remove_breaks`, runs of whitespace collapse to a single space.
pub fn strip_all_tags(text: &str, remove_breaks: bool) -> String {
    let text = SCRIPT_OR_STYLE.replace_all(text, "");
    let text = TAG.replace_all(&text, "");
    let text = if remove_breaks {
        WHITESPACE_RUN.replace_all(&text, " ")
    } else {
        text
    };
    text.trim().to_string()
}

/// The plain text a reader sees for a markup fragment.
///
/// With `line_breaks`, `<br>` tags become newlines first. Entities are decoded.
pub fn html_to_text(html: &str, line_breaks: bool) -> String {
    let html = if line_breaks {
        LINE_BREAK.replace_all(html, "\n")
    } else {
        Cow::Borrowed(html)
    };
    let stripped = strip_all_tags(&html, false);
    decode_html_entities(&stripped).into_owned()
}

/// Byte offset of a char offset, clamped to the end of `text`.
pub(crate) fn byte_offset(text: &str, chars: usize) -> usize {
    text.char_indices()
        .nth(chars)
        .map_or(text.len(), |(index, _)| index)
}
