//! Content-item document decoding
//!
//! Decoding goes through an untyped [`Value`] first so each failure can be reported with the
//! offending item index and so unknown item types are told apart from malformed known ones.

use crate::error::FormatError;
use crate::ir::nodes::{ContentItem, Post, POST_VERSION};
use serde_json::{Map, Value};

/// Decode a content-item document.
pub fn parse_post(source: &str) -> Result<Post, FormatError> {
    let root: Value = serde_json::from_str(source)
        .map_err(|err| FormatError::invalid_input(format!("malformed JSON: {err}")))?;
    let Value::Object(mut root) = root else {
        return Err(FormatError::invalid_input(
            "document must be a JSON object",
        ));
    };

    let content = match root.remove("content") {
        Some(Value::Array(items)) => items,
        Some(_) => return Err(FormatError::invalid_input("'content' must be an array")),
        None => {
            return Err(FormatError::invalid_input(
                "missing required field 'content'",
            ))
        }
    };

    let content = content
        .into_iter()
        .enumerate()
        .map(|(index, item)| parse_item(index, item))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Post {
        content,
        layout: optional_array(&mut root, "layout")?,
        trail: optional_array(&mut root, "trail")?,
        version: version(&root)?,
    })
}

fn parse_item(index: usize, item: Value) -> Result<ContentItem, FormatError> {
    let item_type = match item.get("type") {
        Some(Value::String(item_type)) => item_type.clone(),
        Some(_) => return Err(FormatError::invalid_item(index, "'type' must be a string")),
        None if item.is_object() => {
            return Err(FormatError::invalid_item(index, "missing field 'type'"))
        }
        None => return Err(FormatError::invalid_item(index, "item must be an object")),
    };

    if !ContentItem::KNOWN_TYPES.contains(&item_type.as_str()) {
        return Err(FormatError::UnsupportedItemType { index, item_type });
    }

    log::trace!("decoding {item_type} item {index}");
    serde_json::from_value(item).map_err(|err| FormatError::invalid_item(index, err.to_string()))
}

fn optional_array(root: &mut Map<String, Value>, key: &str) -> Result<Vec<Value>, FormatError> {
    match root.remove(key) {
        None | Some(Value::Null) => Ok(Vec::new()),
        Some(Value::Array(values)) => Ok(values),
        Some(_) => Err(FormatError::invalid_input(format!(
            "'{key}' must be an array"
        ))),
    }
}

fn version(root: &Map<String, Value>) -> Result<u32, FormatError> {
    match root.get("version") {
        None => Ok(POST_VERSION),
        Some(value) => value
            .as_u64()
            .and_then(|v| u32::try_from(v).ok())
            .ok_or_else(|| FormatError::invalid_input("'version' must be a non-negative integer")),
    }
}
