//! Element reference insertion and extraction.
//!
//! An element reference is embedded in a response map by writing its
//! identifier under every key of an [`ElementKeySet`]:
//!
//! ```json
//! {
//!   "element-6066-11e4-a52e-4f735466cecf": "E1",
//!   "ELEMENT": "E1"
//! }
//! ```
//!
//! Insertion never mutates the caller's map; it returns a new one.
//! Extraction never fails; a map without any recognized key simply has no
//! element.
//!
//! # Example
//!
//! ```
//! use serde_json::{Map, json};
//! use webdriver_element_codec::{extract_element, insert_element};
//!
//! let response = insert_element(&Map::new(), "E1").unwrap();
//! assert_eq!(extract_element(&response), Some(&json!("E1")));
//! assert_eq!(extract_element(&Map::new()), None);
//! ```

// ============================================================================
// Imports
// ============================================================================

use serde_json::{Map, Value};
use tracing::{debug, trace, warn};

use crate::element::ElementRef;
use crate::error::{Error, Result};
use crate::identifiers::ElementId;

use super::keys::{ElementKeySet, KeyMatching};

// ============================================================================
// Constants
// ============================================================================

/// Codec used by the free functions of this module.
static STANDARD_CODEC: ElementCodec = ElementCodec::standard();

// ============================================================================
// ElementCodec
// ============================================================================

/// Translates between element references and response map entries.
///
/// The codec holds only its configuration, so one instance can be shared
/// freely between threads.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ElementCodec {
    /// Keys written on insert and read on extract, in priority order.
    keys: ElementKeySet,

    /// How map keys are compared against `keys`.
    matching: KeyMatching,
}

// ============================================================================
// ElementCodec - Constructors
// ============================================================================

impl ElementCodec {
    /// Codec over [`ElementKeySet::standard`] with case-insensitive matching.
    #[inline]
    #[must_use]
    pub const fn standard() -> Self {
        Self::new(ElementKeySet::standard())
    }

    /// Codec over a custom key set with case-insensitive matching.
    #[inline]
    #[must_use]
    pub const fn new(keys: ElementKeySet) -> Self {
        Self {
            keys,
            matching: KeyMatching::CaseInsensitive,
        }
    }

    /// Sets the key matching mode.
    #[inline]
    #[must_use]
    pub fn with_matching(mut self, matching: KeyMatching) -> Self {
        self.matching = matching;
        self
    }
}

// ============================================================================
// ElementCodec - Accessors
// ============================================================================

impl ElementCodec {
    /// Returns the key set.
    #[inline]
    #[must_use]
    pub fn keys(&self) -> &ElementKeySet {
        &self.keys
    }

    /// Returns the key matching mode.
    #[inline]
    #[must_use]
    pub fn matching(&self) -> KeyMatching {
        self.matching
    }
}

// ============================================================================
// ElementCodec - Insert
// ============================================================================

impl ElementCodec {
    /// Returns a copy of `dst` referencing `element` under every key.
    ///
    /// Entries already stored under recognized keys are replaced, so the
    /// result never carries two different element references.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidElementKind`] if no identifier can be
    /// derived from `element`.
    pub fn insert<'a>(
        &self,
        dst: &Map<String, Value>,
        element: impl Into<ElementRef<'a>>,
    ) -> Result<Map<String, Value>> {
        let element = element.into();
        let id = element.resolve().inspect_err(|err| {
            debug!(?element, %err, "Rejected element reference");
        })?;

        let mut result = self.remove(dst);
        for key in self.keys.iter() {
            result.insert(key.to_string(), Value::String(id.to_string()));
        }

        trace!(element_id = %id, keys = self.keys.len(), "Inserted element reference");
        Ok(result)
    }

    /// Like [`insert`](Self::insert), for an element given as a JSON value.
    ///
    /// A string is a plain identifier. An object is an element object whose
    /// identifier is read with [`extract_id`](Self::extract_id).
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidElementKind`] for any other value, or for
    /// an object that references no element.
    pub fn insert_value(
        &self,
        dst: &Map<String, Value>,
        element: &Value,
    ) -> Result<Map<String, Value>> {
        match element {
            Value::String(id) => self.insert(dst, id),
            Value::Object(object) => {
                let id = self.extract_id(object).ok_or_else(|| {
                    debug!(keys = ?object.keys().collect::<Vec<_>>(), "Object has no element key");
                    Error::invalid_element_kind("object without element identifier")
                })?;
                self.insert(dst, &id)
            }
            other => {
                let kind = json_kind(other);
                debug!(kind, "Rejected element value");
                Err(Error::invalid_element_kind(kind))
            }
        }
    }

    /// Builds the array payload of a multi-element response.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidElementKind`] for the first element without
    /// an identifier.
    pub fn insert_all<'a, I>(&self, elements: I) -> Result<Vec<Value>>
    where
        I: IntoIterator,
        I::Item: Into<ElementRef<'a>>,
    {
        let empty = Map::new();
        elements
            .into_iter()
            .map(|element| self.insert(&empty, element).map(Value::Object))
            .collect()
    }
}

// ============================================================================
// ElementCodec - Extract
// ============================================================================

impl ElementCodec {
    /// Returns the element identifier value referenced by `src`.
    ///
    /// Keys are tried in priority order and the first match wins. If lower
    /// priority keys hold a different value a warning is logged.
    #[must_use]
    pub fn extract<'m>(&self, src: &'m Map<String, Value>) -> Option<&'m Value> {
        let mut found: Option<(&str, &'m Value)> = None;

        for key in self.keys.iter() {
            let Some(value) = self.lookup(src, key) else {
                continue;
            };

            match found {
                None => found = Some((key, value)),
                Some((winner, expected)) if expected != value => {
                    warn!(
                        element_key = winner,
                        conflicting_key = key,
                        "Element keys reference different elements"
                    );
                }
                Some(_) => {}
            }
        }

        trace!(element_key = found.map(|(key, _)| key), "Extracted element reference");
        found.map(|(_, value)| value)
    }

    /// Returns the element identifier referenced by `src` as an [`ElementId`].
    ///
    /// Non-string or empty identifier values yield `None`.
    #[must_use]
    pub fn extract_id(&self, src: &Map<String, Value>) -> Option<ElementId> {
        match self.extract(src)? {
            Value::String(id) if !id.is_empty() => Some(ElementId::new(id.as_str())),
            other => {
                debug!(kind = json_kind(other), "Element key holds no usable identifier");
                None
            }
        }
    }

    /// Returns `true` if `src` references an element.
    #[inline]
    #[must_use]
    pub fn contains(&self, src: &Map<String, Value>) -> bool {
        self.extract(src).is_some()
    }

    /// Returns a copy of `src` without any recognized element key.
    ///
    /// Remaining entries keep their order.
    #[must_use]
    pub fn remove(&self, src: &Map<String, Value>) -> Map<String, Value> {
        src.iter()
            .filter(|(key, _)| !self.keys.recognizes(key, self.matching))
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect()
    }

    fn lookup<'m>(&self, src: &'m Map<String, Value>, key: &str) -> Option<&'m Value> {
        src.get(key).or_else(|| match self.matching {
            KeyMatching::CaseInsensitive => src
                .iter()
                .find(|(candidate, _)| candidate.eq_ignore_ascii_case(key))
                .map(|(_, value)| value),
            KeyMatching::Exact => None,
        })
    }
}

// ============================================================================
// Free Functions
// ============================================================================

/// Returns the codec over the standard key set.
#[inline]
#[must_use]
pub fn standard_codec() -> &'static ElementCodec {
    &STANDARD_CODEC
}

/// Inserts `element` into a copy of `dst` using the standard codec.
///
/// # Errors
///
/// Returns [`Error::InvalidElementKind`] if no identifier can be derived.
#[inline]
pub fn insert_element<'a>(
    dst: &Map<String, Value>,
    element: impl Into<ElementRef<'a>>,
) -> Result<Map<String, Value>> {
    STANDARD_CODEC.insert(dst, element)
}

/// Inserts a JSON-valued element into a copy of `dst` using the standard codec.
///
/// # Errors
///
/// Returns [`Error::InvalidElementKind`] if the value is neither a string
/// nor an element object.
#[inline]
pub fn insert_element_value(
    dst: &Map<String, Value>,
    element: &Value,
) -> Result<Map<String, Value>> {
    STANDARD_CODEC.insert_value(dst, element)
}

/// Extracts the element identifier value using the standard codec.
#[inline]
#[must_use]
pub fn extract_element(src: &Map<String, Value>) -> Option<&Value> {
    STANDARD_CODEC.extract(src)
}

/// Extracts the element identifier using the standard codec.
#[inline]
#[must_use]
pub fn extract_element_id(src: &Map<String, Value>) -> Option<ElementId> {
    STANDARD_CODEC.extract_id(src)
}

// ============================================================================
// Helpers
// ============================================================================

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    use proptest::prelude::*;
    use serde_json::json;

    use crate::element::{Element, HasElementId};
    use crate::protocol::keys::{JSONWP_ELEMENT_KEY, W3C_ELEMENT_KEY};

    fn object(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            other => panic!("expected object, got {other}"),
        }
    }

    fn init_tracing() {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    }

    // ------------------------------------------------------------------------
    // Insert
    // ------------------------------------------------------------------------

    #[test]
    fn test_insert_plain_id_into_empty_map() {
        let result = insert_element(&Map::new(), "E1").expect("insert");
        assert_eq!(
            Value::Object(result),
            json!({ W3C_ELEMENT_KEY: "E1", JSONWP_ELEMENT_KEY: "E1" })
        );
    }

    #[test]
    fn test_insert_element_object() {
        let element = Element::new("E2").with_type("XCUIElementTypeButton");
        let result = insert_element(&Map::new(), &element).expect("insert");
        assert_eq!(
            Value::Object(result),
            json!({ W3C_ELEMENT_KEY: "E2", JSONWP_ELEMENT_KEY: "E2" })
        );
    }

    #[test]
    fn test_insert_number_is_invalid_kind() {
        let err = insert_element_value(&Map::new(), &json!(42)).unwrap_err();
        assert!(matches!(err, Error::InvalidElementKind { ref kind } if kind == "number"));
    }

    #[test]
    fn test_insert_detached_element_fails() {
        let err = insert_element(&Map::new(), &Element::detached()).unwrap_err();
        assert!(err.is_element_error());
    }

    #[test]
    fn test_insert_keeps_existing_entries() {
        let dst = object(json!({ "status": 0, "sessionId": "S1" }));
        let result = insert_element(&dst, "E1").expect("insert");

        assert_eq!(result.get("status"), Some(&json!(0)));
        assert_eq!(result.get("sessionId"), Some(&json!("S1")));
        assert_eq!(result.len(), 4);
        assert_eq!(dst.len(), 2);
    }

    #[test]
    fn test_insert_replaces_stale_reference() {
        let dst = object(json!({ "element": "OLD", "value": true }));
        let result = insert_element(&dst, "NEW").expect("insert");

        assert!(!result.contains_key("element"));
        assert_eq!(result.get(JSONWP_ELEMENT_KEY), Some(&json!("NEW")));
        assert_eq!(dst.get("element"), Some(&json!("OLD")));
    }

    #[test]
    fn test_insert_value_string_and_object() {
        let by_string = insert_element_value(&Map::new(), &json!("E5")).expect("insert");
        let reference = json!({ JSONWP_ELEMENT_KEY: "E5" });
        let by_object = insert_element_value(&Map::new(), &reference).expect("insert");
        assert_eq!(by_string, by_object);
    }

    #[test]
    fn test_insert_value_rejects_other_kinds() {
        for value in [json!(null), json!(true), json!([1, 2]), json!({ "id": "E1" })] {
            let err = insert_element_value(&Map::new(), &value).unwrap_err();
            assert!(matches!(err, Error::InvalidElementKind { .. }), "{value}");
        }
    }

    #[test]
    fn test_insert_all() {
        let elements = [Element::new("A"), Element::new("B")];
        let values = standard_codec().insert_all(&elements).expect("insert");
        assert_eq!(values.len(), 2);
        assert_eq!(values[1][W3C_ELEMENT_KEY], json!("B"));
        assert_eq!(values[0][JSONWP_ELEMENT_KEY], json!("A"));
    }

    #[test]
    fn test_insert_all_fails_on_detached() {
        let elements = [Element::new("A"), Element::detached()];
        assert!(standard_codec().insert_all(&elements).is_err());
    }

    #[test]
    fn test_custom_key_set_insert() {
        let codec = ElementCodec::new(ElementKeySet::w3c());
        let result = codec.insert(&Map::new(), "E1").expect("insert");
        assert_eq!(Value::Object(result), json!({ W3C_ELEMENT_KEY: "E1" }));
    }

    // ------------------------------------------------------------------------
    // Extract
    // ------------------------------------------------------------------------

    #[test]
    fn test_extract_current_key() {
        let src = object(json!({ W3C_ELEMENT_KEY: "E1" }));
        assert_eq!(extract_element(&src), Some(&json!("E1")));
        assert_eq!(extract_element_id(&src), Some(ElementId::new("E1")));
    }

    #[test]
    fn test_extract_legacy_key() {
        let src = object(json!({ JSONWP_ELEMENT_KEY: "E1" }));
        assert_eq!(extract_element_id(&src), Some(ElementId::new("E1")));
    }

    #[test]
    fn test_extract_empty_map() {
        assert_eq!(extract_element(&Map::new()), None);
        assert!(!standard_codec().contains(&Map::new()));
    }

    #[test]
    fn test_extract_unrecognized_keys_only() {
        let src = object(json!({ "value": "E1", "elementId": "E1", "status": 0 }));
        assert_eq!(extract_element(&src), None);
    }

    #[test]
    fn test_extract_case_insensitive() {
        let src = object(json!({ "element": "E1" }));
        assert_eq!(extract_element_id(&src), Some(ElementId::new("E1")));

        let exact = ElementCodec::standard().with_matching(KeyMatching::Exact);
        assert_eq!(exact.matching(), KeyMatching::Exact);
        assert_eq!(standard_codec().matching(), KeyMatching::CaseInsensitive);
        assert_eq!(exact.extract(&src), None);
    }

    #[test]
    fn test_extract_priority_on_disagreement() {
        init_tracing();
        let src = object(json!({ JSONWP_ELEMENT_KEY: "LEGACY", W3C_ELEMENT_KEY: "CURRENT" }));
        assert_eq!(extract_element(&src), Some(&json!("CURRENT")));

        let legacy_first =
            ElementCodec::new(ElementKeySet::legacy().with_key(W3C_ELEMENT_KEY).expect("valid"));
        assert_eq!(legacy_first.extract(&src), Some(&json!("LEGACY")));
    }

    #[test]
    fn test_extract_returns_raw_value() {
        let src = object(json!({ W3C_ELEMENT_KEY: 7 }));
        assert_eq!(extract_element(&src), Some(&json!(7)));
        assert_eq!(extract_element_id(&src), None);
        assert!(standard_codec().contains(&src));
    }

    #[test]
    fn test_extract_id_ignores_empty_identifier() {
        let src = object(json!({ W3C_ELEMENT_KEY: "" }));
        assert_eq!(extract_element_id(&src), None);
    }

    // ------------------------------------------------------------------------
    // Remove
    // ------------------------------------------------------------------------

    #[test]
    fn test_remove_keeps_order_of_other_entries() {
        let src = object(json!({
            "a": 1,
            W3C_ELEMENT_KEY: "E1",
            "b": 2,
            "Element": "E1",
            "c": 3
        }));
        let result = standard_codec().remove(&src);

        assert_eq!(result.keys().collect::<Vec<_>>(), vec!["a", "b", "c"]);
        assert_eq!(src.len(), 5);
    }

    #[test]
    fn test_remove_exact_keeps_case_variants() {
        let src = object(json!({ "Element": "E1", JSONWP_ELEMENT_KEY: "E1" }));
        let codec = ElementCodec::standard().with_matching(KeyMatching::Exact);
        let result = codec.remove(&src);
        assert_eq!(result.keys().collect::<Vec<_>>(), vec!["Element"]);
    }

    // ------------------------------------------------------------------------
    // Concurrency
    // ------------------------------------------------------------------------

    #[test]
    fn test_shared_across_threads() {
        let codec = ElementCodec::standard();
        let base = object(json!({ "status": 0 }));

        std::thread::scope(|scope| {
            for index in 0..8 {
                let codec = &codec;
                let base = &base;
                scope.spawn(move || {
                    let id = format!("E{index}");
                    let result = codec.insert(base, &id).expect("insert");
                    assert_eq!(codec.extract_id(&result), Some(ElementId::new(id)));
                });
            }
        });
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_shared_across_tasks() {
        let handles: Vec<_> = (0..32)
            .map(|_| {
                tokio::spawn(async move {
                    let element = Element::new(ElementId::generate());
                    let result = insert_element(&Map::new(), &element).expect("insert");
                    (element.element_id(), extract_element_id(&result))
                })
            })
            .collect();

        for handle in handles {
            let (expected, actual) = handle.await.expect("task");
            assert_eq!(expected, actual);
        }
    }

    // ------------------------------------------------------------------------
    // Properties
    // ------------------------------------------------------------------------

    fn response_map() -> impl Strategy<Value = Map<String, Value>> {
        let value = prop_oneof![
            Just(Value::Null),
            any::<bool>().prop_map(Value::from),
            any::<i64>().prop_map(Value::from),
            "[a-zA-Z0-9 ]{0,12}".prop_map(Value::from),
        ];
        prop::collection::vec(("[a-zA-Z]{1,10}", value), 0..8)
            .prop_map(|entries| entries.into_iter().collect())
    }

    proptest! {
        #[test]
        fn prop_round_trip(dst in response_map(), id in "[A-Za-z0-9-]{1,36}") {
            let result = insert_element(&dst, id.as_str()).expect("insert");
            prop_assert_eq!(extract_element_id(&result), Some(ElementId::new(id)));
        }

        #[test]
        fn prop_insert_does_not_mutate(dst in response_map(), id in "[A-Za-z0-9-]{1,36}") {
            let before = dst.clone();
            let _ = insert_element(&dst, id.as_str()).expect("insert");
            prop_assert_eq!(dst, before);
        }

        #[test]
        fn prop_all_keys_agree(dst in response_map(), id in "[A-Za-z0-9-]{1,36}") {
            let result = insert_element(&dst, id.as_str()).expect("insert");
            for key in standard_codec().keys().iter() {
                prop_assert_eq!(result.get(key), Some(&Value::String(id.clone())));
            }
        }

        #[test]
        fn prop_unrecognized_maps_have_no_element(dst in response_map()) {
            let keys = standard_codec().keys();
            prop_assume!(!dst.keys().any(|key| keys.recognizes(key, KeyMatching::CaseInsensitive)));
            prop_assert_eq!(extract_element(&dst), None);
        }
    }
}
