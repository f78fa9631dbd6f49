//! XML decoding and collection normalization.
//!
//! The upstream renders most payloads as XML with two awkward properties:
//! a collection of exactly one element arrives as a bare object, and some
//! endpoints switch to a different top-level tag entirely when there is
//! exactly one result. This module decodes XML into `serde_json::Value`
//! trees and flattens both shapes behind a uniform sequence interface, so
//! no caller ever branches on cardinality.

mod normalize;

pub use normalize::{normalize, project_link, CollectionShape, Normalized, LINK_FIELDS};

pub(crate) use normalize::get_path;

use crate::Error;
use serde_json::{Map, Value};

/// Decode an XML document into a JSON-shaped tree.
///
/// Shaping rules: an element with child elements becomes an object keyed
/// by child tag name; repeated sibling tags collect into an array in
/// document order; `xsi:nil="true"` and empty elements become null;
/// text-only elements become strings (so numeric wire values surface as
/// numeric strings). Attributes other than the nil marker are dropped.
/// The document element wraps the result as a single-key object.
pub fn xml_to_value(text: &str) -> Result<Value, Error> {
    let doc = roxmltree::Document::parse(text).map_err(|e| Error::Xml(e.to_string()))?;
    let root = doc.root_element();
    let mut tree = Map::new();
    tree.insert(root.tag_name().name().to_string(), element_to_value(root));
    Ok(Value::Object(tree))
}

fn element_to_value(node: roxmltree::Node<'_, '_>) -> Value {
    if is_nil(node) {
        return Value::Null;
    }

    let children: Vec<_> = node.children().filter(|c| c.is_element()).collect();
    if children.is_empty() {
        return match node.text().map(str::trim) {
            Some(text) if !text.is_empty() => Value::String(text.to_string()),
            _ => Value::Null,
        };
    }

    let mut map = Map::new();
    for child in children {
        let key = child.tag_name().name().to_string();
        let value = element_to_value(child);
        match map.get_mut(&key) {
            None => {
                map.insert(key, value);
            }
            Some(Value::Array(items)) => items.push(value),
            Some(existing) => {
                let first = existing.take();
                *existing = Value::Array(vec![first, value]);
            }
        }
    }
    Value::Object(map)
}

fn is_nil(node: roxmltree::Node<'_, '_>) -> bool {
    node.attributes().any(|a| a.name() == "nil" && a.value() == "true")
}
