//! Content-item JSON format
//!
//! The flat post format: `{"content":[…],"layout":[],"trail":[],"version":2}`.
//! Parsing validates the envelope and every item; serialization writes the envelope with a
//! stable key order, compact by default or pretty-printed with the `pretty` option.

pub mod parser;

use crate::error::FormatError;
use crate::format::{bool_option, check_option_keys, Format};
use crate::ir::nodes::Post;
use std::collections::HashMap;

/// Option key enabling pretty-printed output.
pub const PRETTY: &str = "pretty";

/// Format implementation for content-item JSON
#[derive(Default)]
pub struct NpfFormat {
    pretty: bool,
}

impl NpfFormat {
    pub fn new(pretty: bool) -> Self {
        Self { pretty }
    }

    fn encode(post: &Post, pretty: bool) -> Result<String, FormatError> {
        let encoded = if pretty {
            serde_json::to_string_pretty(post)
        } else {
            serde_json::to_string(post)
        };
        encoded.map_err(|err| FormatError::SerializationError(err.to_string()))
    }
}

impl Format for NpfFormat {
    fn name(&self) -> &str {
        "npf"
    }

    fn description(&self) -> &str {
        "Flat content-item JSON"
    }

    fn file_extensions(&self) -> &[&str] {
        &["json", "npf"]
    }

    fn supports_parsing(&self) -> bool {
        true
    }

    fn supports_serialization(&self) -> bool {
        true
    }

    fn parse(&self, source: &str) -> Result<Post, FormatError> {
        parser::parse_post(source)
    }

    fn serialize(&self, post: &Post) -> Result<String, FormatError> {
        Self::encode(post, self.pretty)
    }

    fn serialize_with_options(
        &self,
        post: &Post,
        options: &HashMap<String, String>,
    ) -> Result<String, FormatError> {
        check_option_keys(self.name(), options, &[PRETTY])?;
        let pretty = match options.get(PRETTY) {
            Some(value) => bool_option(self.name(), PRETTY, value)?,
            None => self.pretty,
        };
        Self::encode(post, pretty)
    }
}
