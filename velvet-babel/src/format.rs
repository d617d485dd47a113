//! Format trait definition
//!
//! This module defines the core Format trait that all format implementations must implement.
//! The trait provides a uniform interface for parsing and serializing posts, with the
//! content-item [`Post`] as the hub every conversion passes through.

use crate::error::FormatError;
use crate::ir::nodes::Post;
use std::collections::HashMap;

/// Trait for post formats
///
/// Implementors provide conversion between a string representation and a [`Post`].
/// Formats can support parsing, serialization, or both.
///
/// # Examples
///
/// ```ignore
/// struct MyFormat;
///
/// impl Format for MyFormat {
///     fn name(&self) -> &str {
///         "my-format"
///     }
///
///     fn supports_parsing(&self) -> bool {
///         true
///     }
///
///     fn parse(&self, source: &str) -> Result<Post, FormatError> {
///         // Parse source to Post
///         todo!()
///     }
/// }
/// ```
pub trait Format: Send + Sync {
    /// The name of this format (e.g., "blocks", "npf")
    fn name(&self) -> &str;

    /// Optional description of this format
    fn description(&self) -> &str {
        ""
    }

    /// File extensions associated with this format (e.g., ["json", "npf"])
    ///
    /// Returns a slice of file extensions without the leading dot.
    /// Used for automatic format detection from filenames.
    fn file_extensions(&self) -> &[&str] {
        &[]
    }

    /// Whether this format supports parsing (source → Post)
    fn supports_parsing(&self) -> bool {
        false
    }

    /// Whether this format supports serialization (Post → source)
    fn supports_serialization(&self) -> bool {
        false
    }

    /// Parse source text into a Post
    ///
    /// Default implementation returns NotSupported error.
    fn parse(&self, _source: &str) -> Result<Post, FormatError> {
        Err(FormatError::NotSupported(format!(
            "Format '{}' does not support parsing",
            self.name()
        )))
    }

    /// Serialize a Post into source text
    ///
    /// Default implementation returns NotSupported error.
    fn serialize(&self, _post: &Post) -> Result<String, FormatError> {
        Err(FormatError::NotSupported(format!(
            "Format '{}' does not support serialization",
            self.name()
        )))
    }

    /// Serialize a Post, optionally using extra parameters.
    ///
    /// The default implementation accepts no options and delegates to [`Format::serialize`].
    /// Formats with tunable output override it and reject keys they do not know.
    fn serialize_with_options(
        &self,
        post: &Post,
        options: &HashMap<String, String>,
    ) -> Result<String, FormatError> {
        if options.is_empty() {
            self.serialize(post)
        } else {
            Err(FormatError::NotSupported(format!(
                "Format '{}' does not support extra parameters",
                self.name()
            )))
        }
    }
}

/// Reads a boolean option, accepting `true`/`false`, `yes`/`no`, `1`/`0` and `on`/`off`.
pub(crate) fn bool_option(
    format: &str,
    key: &str,
    value: &str,
) -> Result<bool, FormatError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "yes" | "1" | "on" | "" => Ok(true),
        "false" | "no" | "0" | "off" => Ok(false),
        other => Err(FormatError::NotSupported(format!(
            "Format '{format}' expects a boolean for '{key}', got '{other}'"
        ))),
    }
}

/// Rejects any option key outside `known`.
pub(crate) fn check_option_keys(
    format: &str,
    options: &HashMap<String, String>,
    known: &[&str],
) -> Result<(), FormatError> {
    match options.keys().find(|key| !known.contains(&key.as_str())) {
        Some(key) => Err(FormatError::NotSupported(format!(
            "Format '{format}' does not support option '{key}'"
        ))),
        None => Ok(()),
    }
}
