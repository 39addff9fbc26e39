//! Element references accepted by the codec.
//!
//! An element can be referenced either by its plain identifier or by an
//! element object that exposes one through [`HasElementId`].
//!
//! # Example
//!
//! ```
//! use webdriver_element_codec::{Element, ElementId, ElementRef};
//!
//! let by_id = ElementRef::from("E1");
//! assert_eq!(by_id.resolve().unwrap(), ElementId::new("E1"));
//!
//! let button = Element::new("E2").with_type("XCUIElementTypeButton");
//! assert_eq!(ElementRef::from(&button).resolve().unwrap(), ElementId::new("E2"));
//! ```

// ============================================================================
// Imports
// ============================================================================

use std::fmt;

use crate::error::{Error, Result};
use crate::identifiers::ElementId;

// ============================================================================
// HasElementId
// ============================================================================

/// Capability of objects that can expose an element identifier.
pub trait HasElementId {
    /// Returns the element identifier, or `None` if none is assigned.
    fn element_id(&self) -> Option<ElementId>;
}

// ============================================================================
// ElementRef
// ============================================================================

/// Either a plain element identifier or an element object.
#[derive(Clone, Copy)]
pub enum ElementRef<'a> {
    /// Plain identifier.
    Id(&'a str),
    /// Object exposing an identifier.
    Object(&'a dyn HasElementId),
}

impl<'a> ElementRef<'a> {
    /// Wraps an element object.
    #[inline]
    #[must_use]
    pub fn object(element: &'a dyn HasElementId) -> Self {
        Self::Object(element)
    }

    /// Derives the identifier this reference points at.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidElementKind`] if the identifier is empty or
    /// the object has none.
    pub fn resolve(&self) -> Result<ElementId> {
        match self {
            Self::Id("") => Err(Error::invalid_element_kind("empty identifier")),
            Self::Id(id) => Ok(ElementId::new(*id)),
            Self::Object(element) => match element.element_id() {
                Some(id) if !id.is_empty() => Ok(id),
                Some(_) => Err(Error::invalid_element_kind(
                    "element object with empty identifier",
                )),
                None => Err(Error::invalid_element_kind(
                    "element object without identifier",
                )),
            },
        }
    }
}

impl fmt::Debug for ElementRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Id(id) => f.debug_tuple("Id").field(id).finish(),
            Self::Object(element) => f
                .debug_tuple("Object")
                .field(&element.element_id())
                .finish(),
        }
    }
}

impl<'a> From<&'a str> for ElementRef<'a> {
    fn from(id: &'a str) -> Self {
        Self::Id(id)
    }
}

impl<'a> From<&'a String> for ElementRef<'a> {
    fn from(id: &'a String) -> Self {
        Self::Id(id.as_str())
    }
}

impl<'a> From<&'a ElementId> for ElementRef<'a> {
    fn from(id: &'a ElementId) -> Self {
        Self::Id(id.as_str())
    }
}

impl<'a> From<&'a Element> for ElementRef<'a> {
    fn from(element: &'a Element) -> Self {
        Self::Object(element)
    }
}

impl<'a> From<&'a dyn HasElementId> for ElementRef<'a> {
    fn from(element: &'a dyn HasElementId) -> Self {
        Self::Object(element)
    }
}

// ============================================================================
// Element
// ============================================================================

/// A UI element snapshot as produced by the element registry.
///
/// Elements that have not been registered yet carry no identifier and are
/// rejected by the codec.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Element {
    /// Registry identifier, if assigned.
    pub id: Option<ElementId>,

    /// Platform element type, e.g. `XCUIElementTypeButton`.
    pub element_type: Option<String>,
}

impl Element {
    /// Creates a registered element with the given identifier.
    #[inline]
    #[must_use]
    pub fn new(id: impl Into<ElementId>) -> Self {
        Self {
            id: Some(id.into()),
            element_type: None,
        }
    }

    /// Creates an element that has no identifier yet.
    #[inline]
    #[must_use]
    pub fn detached() -> Self {
        Self::default()
    }

    /// Sets the platform element type.
    #[inline]
    #[must_use]
    pub fn with_type(mut self, element_type: impl Into<String>) -> Self {
        self.element_type = Some(element_type.into());
        self
    }
}

impl HasElementId for Element {
    fn element_id(&self) -> Option<ElementId> {
        self.id.clone()
    }
}

// ============================================================================
// Tests
// ============================================================================
