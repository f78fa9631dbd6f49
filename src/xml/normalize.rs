//! Singleton-vs-collection flattening and field projection.

use serde_json::{Map, Value};

/// Where a collection lives in a decoded payload.
///
/// `collection_path` is the dot-separated path to the repeated element
/// (e.g. `domains.domain`). `singleton_tag`, when set, names the
/// alternate top-level tag some endpoints use for an exactly-one result;
/// its presence short-circuits the collection path entirely.
#[derive(Debug, Clone, Copy)]
pub struct CollectionShape<'a> {
    pub collection_path: &'a str,
    pub singleton_tag: Option<&'a str>,
}

/// A wire collection flattened to a uniform ordered sequence.
#[derive(Debug, Clone, PartialEq)]
pub struct Normalized {
    pub items: Vec<Value>,
    pub count: usize,
}

impl Normalized {
    fn empty() -> Self {
        Self {
            items: Vec::new(),
            count: 0,
        }
    }
}

/// Flatten the wire's cardinality ambiguity.
///
/// A bare object at the collection path is a one-element sequence; an
/// array keeps its order and length; an absent or null path is an empty
/// sequence. When the alternate singleton top-level tag is present the
/// payload is exactly one record and the collection path is not read.
pub fn normalize(tree: &Value, shape: CollectionShape<'_>) -> Normalized {
    if let Some(tag) = shape.singleton_tag {
        if let Some(record) = tree.get(tag) {
            return Normalized {
                items: vec![record.clone()],
                count: 1,
            };
        }
    }

    match get_path(tree, shape.collection_path) {
        None | Some(Value::Null) => Normalized::empty(),
        Some(Value::Array(items)) => Normalized {
            count: items.len(),
            items: items.clone(),
        },
        Some(single) => Normalized {
            items: vec![single.clone()],
            count: 1,
        },
    }
}

/// Walk a dot-separated path through nested objects.
pub(crate) fn get_path<'a>(tree: &'a Value, path: &str) -> Option<&'a Value> {
    let mut current = tree;
    for part in path.split('.') {
        current = current.as_object()?.get(part)?;
    }
    Some(current)
}

/// The fixed key set of a projected promotion link.
pub const LINK_FIELDS: [&str; 6] = [
    "AdvertiserId",
    "AdvertiserName",
    "LinkName",
    "LinkDescription",
    "PromotionalTypes",
    "LinkUrl",
];

/// Project a raw link record down to the six published fields.
///
/// Absent fields are kept as explicit nulls so consumers always see the
/// full key set regardless of what the upstream record carried.
pub fn project_link(record: &Value) -> Value {
    let mut out = Map::new();
    for field in LINK_FIELDS {
        out.insert(
            field.to_string(),
            record.get(field).cloned().unwrap_or(Value::Null),
        );
    }
    Value::Object(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const DOMAINS: CollectionShape<'static> = CollectionShape {
        collection_path: "domains.domain",
        singleton_tag: Some("DomainDto"),
    };

    #[test]
    fn test_collection_keeps_order_and_count() {
        let tree = json!({"domains": {"domain": [{"name": "a"}, {"name": "b"}, {"name": "c"}]}});
        let normalized = normalize(&tree, DOMAINS);

        assert_eq!(normalized.count, 3);
        assert_eq!(normalized.items[0], json!({"name": "a"}));
        assert_eq!(normalized.items[2], json!({"name": "c"}));
    }

    #[test]
    fn test_bare_object_collapses_to_one_element_sequence() {
        let tree = json!({"domains": {"domain": {"name": "only"}}});
        let normalized = normalize(&tree, DOMAINS);

        assert_eq!(normalized.count, 1);
        assert_eq!(normalized.items, vec![json!({"name": "only"})]);
    }

    #[test]
    fn test_absent_path_is_empty() {
        assert_eq!(normalize(&json!({"domains": {}}), DOMAINS), Normalized { items: vec![], count: 0 });
        assert_eq!(normalize(&json!({}), DOMAINS), Normalized { items: vec![], count: 0 });
    }

    #[test]
    fn test_singleton_top_level_tag_wins() {
        // The alternate shape carries no `domains` element at all; the
        // normalizer must not go looking for one.
        let tree = json!({"DomainDto": {"name": "only"}});
        let normalized = normalize(&tree, DOMAINS);

        assert_eq!(normalized.count, 1);
        assert_eq!(normalized.items, vec![json!({"name": "only"})]);
    }

    #[test]
    fn test_project_link_fixed_key_set() {
        let record = json!({
            "AdvertiserId": "168490",
            "AdvertiserName": "NIKE",
            "LinkName": "Shoes",
            "LinkUrl": "https://example.com/track",
            "HtmlCode": "<a>ad</a>",
            "Categories": "Footwear"
        });
        let projected = project_link(&record);
        let keys: Vec<&str> = projected.as_object().unwrap().keys().map(String::as_str).collect();

        let mut expected: Vec<&str> = LINK_FIELDS.to_vec();
        expected.sort_unstable();
        let mut actual = keys.clone();
        actual.sort_unstable();
        assert_eq!(actual, expected);

        assert_eq!(projected["AdvertiserName"], "NIKE");
        assert_eq!(projected["LinkDescription"], Value::Null);
        assert_eq!(projected["PromotionalTypes"], Value::Null);
        assert!(projected.get("HtmlCode").is_none());
    }
}
