//! WebDriver element reference codec.
//!
//! Helpers for the protocol layer of a UI-automation WebDriver server:
//! embedding an element reference in a response map and recovering it
//! from a request or response map.
//!
//! # Design
//!
//! - Insertion is copy-on-write: the caller's map is never mutated
//! - Extraction never fails: no recognized key means no element
//! - Every recognized key (W3C and legacy JSON Wire Protocol) is written,
//!   so clients of either protocol generation can read the reference
//! - The codec is stateless apart from its key configuration
//!
//! # Quick Start
//!
//! ```
//! use serde_json::{Map, json};
//! use webdriver_element_codec::{Element, ElementId, Result, extract_element_id, insert_element};
//!
//! fn main() -> Result<()> {
//!     let mut response = Map::new();
//!     response.insert("status".into(), json!(0));
//!
//!     let button = Element::new("E1").with_type("XCUIElementTypeButton");
//!     let response = insert_element(&response, &button)?;
//!
//!     assert_eq!(extract_element_id(&response), Some(ElementId::new("E1")));
//!     Ok(())
//! }
//! ```
//!
//! # Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`element`] | [`Element`], [`ElementRef`], [`HasElementId`] |
//! | [`error`] | Error types and [`Result`] alias |
//! | [`identifiers`] | Type-safe ID wrappers |
//! | [`protocol`] | Codec, element keys, [`WebElement`] |

// ============================================================================
// Modules
// ============================================================================

/// Element references accepted by the codec.
pub mod element;

/// Error types and result aliases.
///
/// All fallible operations return [`Result<T>`] which uses [`Error`].
pub mod error;

/// Type-safe identifiers.
pub mod identifiers;

/// Element references in protocol payloads.
pub mod protocol;

// ============================================================================
// Re-exports
// ============================================================================

// Element types
pub use element::{Element, ElementRef, HasElementId};

// Error types
pub use error::{Error, Result};

// Identifier types
pub use identifiers::ElementId;

// Protocol types
pub use protocol::{
    ElementCodec, ElementKeySet, JSONWP_ELEMENT_KEY, KeyMatching, W3C_ELEMENT_KEY, WebElement,
    extract_element, extract_element_id, insert_element, insert_element_value, standard_codec,
};
