//! Block markup parser
//!
//! # The Grammar
//!
//! A block is introduced by an HTML comment of the form
//!
//! ```text
//! <!-- wp:namespace/name {"json":"attrs"} -->   opener
//! <!-- /wp:namespace/name -->                   closer
//! <!-- wp:namespace/name {"json":"attrs"} /-->  void (self-closed)
//! ```
//!
//! The namespace is optional and defaults to `core/`. The attribute JSON extends to the
//! first `}` that is followed by whitespace, an optional `/` and `-->`. Comments that do not
//! fit this shape are ordinary markup.
//!
//! # The Algorithm
//!
//! A single left-to-right scan over delimiter tokens with a stack of open blocks:
//!
//! 1. **Openers** push a frame. Markup before a top-level opener becomes a freeform block.
//! 2. **Void blocks** are emitted directly (top level) or attached to the open parent.
//! 3. **Closers** pop the frame with the same name, implicitly closing frames opened after
//!    it. A closer that matches nothing stays in the markup as literal text.
//! 4. Markup between tokens is appended to the innermost open block, interleaved with
//!    placeholders for nested blocks.
//! 5. At end of input, frames still open are closed innermost-first and attached to their
//!    parents, the outermost taking the rest of the input. Only when nothing is left open does
//!    trailing top-level markup become a freeform block.
//!
//! Nothing in here fails: malformed input degrades to literal markup.

use super::tree::{Attributes, Block, CORE_NAMESPACE};
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;

/// Everything of a delimiter up to (and including) the whitespace after the block name.
static DELIMITER_HEAD: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"<!--\s+(?P<closer>/)?wp:(?P<namespace>[a-z][a-z0-9_-]*/)?(?P<name>[a-z][a-z0-9_-]*)\s+",
    )
    .unwrap()
});

/// End of an attribute object and of the delimiter comment.
static ATTRS_TAIL: Lazy<Regex> = Lazy::new(|| Regex::new(r"\}\s+(?P<void>/)?-->").unwrap());

/// Parse block markup into a sequence of top-level blocks.
pub fn parse_blocks(document: &str) -> Vec<Block> {
    let mut parser = BlockParser::new(document);
    parser.run();
    log::debug!(
        "parsed {} top-level blocks from {} bytes",
        parser.output.len(),
        document.len()
    );
    parser.output
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TokenKind {
    Opener,
    Closer,
    Void,
}

#[derive(Debug)]
struct Token {
    kind: TokenKind,
    name: String,
    attrs: Attributes,
    start: usize,
    end: usize,
}

/// An open block waiting for its closer.
#[derive(Debug)]
struct Frame {
    block: Block,
    token_start: usize,
    /// Where markup not yet attached to `block` begins
    prev_offset: usize,
    /// Start of freeform markup preceding a top-level opener
    leading_html_start: Option<usize>,
}

struct BlockParser<'a> {
    document: &'a str,
    /// End of the top-level markup already assigned to some block
    offset: usize,
    /// Where the next delimiter search starts
    cursor: usize,
    output: Vec<Block>,
    stack: Vec<Frame>,
}

impl<'a> BlockParser<'a> {
    fn new(document: &'a str) -> Self {
        BlockParser {
            document,
            offset: 0,
            cursor: 0,
            output: Vec::new(),
            stack: Vec::new(),
        }
    }

    fn run(&mut self) {
        while let Some(token) = self.next_token() {
            log::trace!(
                "{:?} token '{}' at {}..{}",
                token.kind,
                token.name,
                token.start,
                token.end
            );
            match token.kind {
                TokenKind::Void => self.on_void(token),
                TokenKind::Opener => self.on_opener(token),
                TokenKind::Closer => self.on_closer(token),
            }
        }
        self.finish();
    }

    fn on_void(&mut self, token: Token) {
        let block = Block::new(token.name).with_attrs(token.attrs);
        if self.stack.is_empty() {
            self.push_freeform(self.offset, token.start);
            self.output.push(block);
            self.offset = token.end;
        } else {
            self.attach_to_parent(block, token.start, token.end);
        }
    }

    fn on_opener(&mut self, token: Token) {
        let leading_html_start =
            (self.stack.is_empty() && token.start > self.offset).then_some(self.offset);
        self.stack.push(Frame {
            block: Block::new(token.name).with_attrs(token.attrs),
            token_start: token.start,
            prev_offset: token.end,
            leading_html_start,
        });
    }

    fn on_closer(&mut self, token: Token) {
        let Some(depth) = self
            .stack
            .iter()
            .rposition(|frame| frame.block.is_named(&token.name))
        else {
            log::debug!(
                "closer for '{}' at {} matches no open block; keeping it as markup",
                token.name,
                token.start
            );
            return;
        };

        while self.stack.len() > depth + 1 {
            log::debug!("implicitly closing block before closer at {}", token.start);
            self.close_top(token.start, token.start);
        }
        self.close_top(token.start, token.end);
        if self.stack.is_empty() {
            self.offset = token.end;
        }
    }

    /// Pop the innermost frame, giving it the markup up to `content_end`.
    ///
    /// `token_end` is where the parent's unattached markup resumes.
    fn close_top(&mut self, content_end: usize, token_end: usize) {
        let Some(frame) = self.stack.pop() else {
            return;
        };
        let mut block = frame.block;
        block.push_html(&self.document[frame.prev_offset..content_end]);

        if self.stack.is_empty() {
            if let Some(start) = frame.leading_html_start {
                self.push_freeform(start, frame.token_start);
            }
            self.output.push(block);
        } else {
            self.attach_to_parent(block, frame.token_start, token_end);
        }
    }

    fn attach_to_parent(&mut self, block: Block, token_start: usize, last_offset: usize) {
        let document = self.document;
        if let Some(parent) = self.stack.last_mut() {
            parent
                .block
                .push_html(&document[parent.prev_offset..token_start]);
            parent.block.push_inner_block(block);
            parent.prev_offset = last_offset;
        }
    }

    fn push_freeform(&mut self, start: usize, end: usize) {
        if start < end {
            self.output
                .push(Block::freeform(&self.document[start..end]));
        }
    }

    fn finish(&mut self) {
        let end = self.document.len();
        if !self.stack.is_empty() {
            log::debug!(
                "{} block(s) left open at end of input; closing them",
                self.stack.len()
            );
        }
        if self.stack.is_empty() {
            self.push_freeform(self.offset, end);
        } else {
            while !self.stack.is_empty() {
                self.close_top(end, end);
            }
        }
        self.offset = end;
    }

    /// Find the next well-formed delimiter at or after the cursor.
    fn next_token(&mut self) -> Option<Token> {
        let document = self.document;
        while let Some(head) = DELIMITER_HEAD.captures_at(document, self.cursor) {
            let whole = head.get(0)?;
            let start = whole.start();
            let Some((attrs_json, is_void, end)) = self.delimiter_tail(whole.end()) else {
                self.cursor = start + "<!--".len();
                continue;
            };
            self.cursor = end;

            let namespace = head
                .name("namespace")
                .map_or(CORE_NAMESPACE, |m| m.as_str());
            let name = format!("{namespace}{}", &head["name"]);
            let attrs = attrs_json.map(parse_attributes).unwrap_or_default();
            let kind = if is_void {
                TokenKind::Void
            } else if head.name("closer").is_some() {
                TokenKind::Closer
            } else {
                TokenKind::Opener
            };

            return Some(Token {
                kind,
                name,
                attrs,
                start,
                end,
            });
        }
        None
    }

    /// Parse the optional attribute object and the closing `/-->` or `-->`.
    ///
    /// Returns the raw attribute JSON, whether the block is void and the token end.
    fn delimiter_tail(&self, from: usize) -> Option<(Option<&'a str>, bool, usize)> {
        let document = self.document;
        let rest = &document[from..];

        if rest.starts_with('{') {
            let tail = ATTRS_TAIL.captures_at(document, from)?;
            let whole = tail.get(0)?;
            let json = &document[from..=whole.start()];
            return Some((Some(json), tail.name("void").is_some(), whole.end()));
        }
        if rest.starts_with("/-->") {
            return Some((None, true, from + "/-->".len()));
        }
        if rest.starts_with("-->") {
            return Some((None, false, from + "-->".len()));
        }
        None
    }
}

/// Decode delimiter attributes. Anything but a JSON object yields an empty mapping.
fn parse_attributes(json: &str) -> Attributes {
    match serde_json::from_str::<Value>(json) {
        Ok(Value::Object(attrs)) => attrs,
        Ok(other) => {
            log::debug!("block attributes are not an object: {other}");
            Attributes::new()
        }
        Err(err) => {
            log::debug!("malformed block attributes {json:?}: {err}");
            Attributes::new()
        }
    }
}
