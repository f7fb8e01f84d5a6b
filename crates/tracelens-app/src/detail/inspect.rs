//! Generic object inspector.
//!
//! Renders an arbitrary JSON value one line per key. Values shaped like a
//! located element collapse to an "Element" badge, so geometry and locator
//! data never reach the screen through this path.

use serde_json::{Map, Value};
use tracelens_core::{pretty_json, LocatedElement};

use super::node::DisplayNode;

/// Classification of a record value before rendering.
#[derive(Debug, Clone, PartialEq)]
pub enum InspectedValue<'a> {
    /// Anything that is not element-shaped.
    Plain(&'a Value),
    /// A single located element.
    Element,
    /// An array containing at least one located element; one badge per entry.
    ElementList(usize),
}

impl<'a> InspectedValue<'a> {
    pub fn classify(value: &'a Value) -> Self {
        if LocatedElement::detect(value).is_some() {
            return Self::Element;
        }
        if let Value::Array(items) = value {
            if items.iter().any(|item| LocatedElement::detect(item).is_some()) {
                return Self::ElementList(items.len());
            }
        }
        Self::Plain(value)
    }

    fn into_nodes(self) -> Vec<DisplayNode> {
        match self {
            Self::Element => vec![DisplayNode::element_tag()],
            Self::ElementList(count) => (0..count).map(|_| DisplayNode::element_tag()).collect(),
            Self::Plain(Value::String(s)) => vec![DisplayNode::text(s.as_str())],
            Self::Plain(other) => vec![DisplayNode::code(pretty_json(other))],
        }
    }
}

/// Inspect a value: arrays and scalars become one serialised block, objects
/// become one `key value` row per entry in enumeration order.
pub fn inspect(value: &Value) -> Vec<DisplayNode> {
    let Value::Object(map) = value else {
        return vec![DisplayNode::code(pretty_json(value))];
    };
    inspect_map(map)
}

/// Row-per-key rendering of an object.
pub fn inspect_map(map: &Map<String, Value>) -> Vec<DisplayNode> {
    map.iter()
        .map(|(key, value)| {
            let mut row = vec![DisplayNode::Bold(key.clone())];
            row.extend(InspectedValue::classify(value).into_nodes());
            DisplayNode::Row(row)
        })
        .collect()
}

/// Copy of `obj` without `keys`, order preserved.
pub fn object_without_keys(obj: &Map<String, Value>, keys: &[&str]) -> Map<String, Value> {
    obj.iter()
        .filter(|(key, _)| !keys.contains(&key.as_str()))
        .map(|(key, value)| (key.clone(), value.clone()))
        .collect()
}
