//! Typed element reference for serde payloads.
//!
//! [`WebElement`] serializes to the standard element reference object and
//! deserializes from an object carrying either standard key.
//!
//! # Format
//!
//! ```json
//! {
//!   "element-6066-11e4-a52e-4f735466cecf": "uuid",
//!   "ELEMENT": "uuid"
//! }
//! ```

// ============================================================================
// Imports
// ============================================================================

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::warn;

use crate::element::HasElementId;
use crate::error::{Error, Result};
use crate::identifiers::ElementId;

use super::codec::standard_codec;
use super::keys::{JSONWP_ELEMENT_KEY, W3C_ELEMENT_KEY};

// ============================================================================
// WebElement
// ============================================================================

/// Element reference as it appears in protocol payloads.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawWebElement", into = "RawWebElement")]
pub struct WebElement {
    /// Referenced element.
    pub id: ElementId,
}

impl WebElement {
    /// Creates a reference to the given element.
    #[inline]
    #[must_use]
    pub fn new(id: impl Into<ElementId>) -> Self {
        Self { id: id.into() }
    }

    /// Reads a reference from a response map.
    ///
    /// Matches keys case-insensitively, unlike deserialization.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingElementKey`] if the map references no element.
    pub fn from_map(map: &Map<String, Value>) -> Result<Self> {
        standard_codec()
            .extract_id(map)
            .map(Self::new)
            .ok_or_else(|| Error::missing_element_key(map.keys()))
    }

    /// Deserializes a reference from a JSON value.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Json`] if the value is not an element reference.
    pub fn from_value(value: Value) -> Result<Self> {
        Ok(serde_json::from_value(value)?)
    }

    /// Returns the reference as a response map.
    #[must_use]
    pub fn to_map(&self) -> Map<String, Value> {
        let mut map = Map::new();
        for key in standard_codec().keys().iter() {
            map.insert(key.to_string(), Value::String(self.id.to_string()));
        }
        map
    }
}

impl HasElementId for WebElement {
    fn element_id(&self) -> Option<ElementId> {
        Some(self.id.clone())
    }
}

impl From<ElementId> for WebElement {
    fn from(id: ElementId) -> Self {
        Self { id }
    }
}

// ============================================================================
// RawWebElement
// ============================================================================

/// Wire shape of [`WebElement`].
#[derive(Serialize, Deserialize)]
struct RawWebElement {
    #[serde(
        rename = "element-6066-11e4-a52e-4f735466cecf",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    w3c: Option<ElementId>,

    #[serde(rename = "ELEMENT", default, skip_serializing_if = "Option::is_none")]
    legacy: Option<ElementId>,

    #[serde(flatten)]
    rest: Map<String, Value>,
}

impl TryFrom<RawWebElement> for WebElement {
    type Error = Error;

    fn try_from(raw: RawWebElement) -> Result<Self> {
        let mut present: Vec<String> = Vec::new();
        if raw.w3c.is_some() {
            present.push(W3C_ELEMENT_KEY.to_string());
        }
        if raw.legacy.is_some() {
            present.push(JSONWP_ELEMENT_KEY.to_string());
        }
        present.extend(raw.rest.keys().cloned());

        let w3c = raw.w3c.filter(|id| !id.is_empty());
        let legacy = raw.legacy.filter(|id| !id.is_empty());

        match (w3c, legacy) {
            (Some(w3c), Some(legacy)) => {
                if w3c != legacy {
                    warn!(%w3c, %legacy, "Element keys reference different elements");
                }
                Ok(Self::new(w3c))
            }
            (Some(id), None) | (None, Some(id)) => Ok(Self::new(id)),
            (None, None) => Err(Error::missing_element_key(&present)),
        }
    }
}

impl From<WebElement> for RawWebElement {
    fn from(element: WebElement) -> Self {
        Self {
            w3c: Some(element.id.clone()),
            legacy: Some(element.id),
            rest: Map::new(),
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
