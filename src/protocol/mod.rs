//! Element references in protocol payloads.
//!
//! This module converts between element references and the JSON objects
//! that carry them in WebDriver requests and responses.
//!
//! # Protocol Overview
//!
//! | Operation | Direction | Purpose |
//! |-----------|-----------|---------|
//! | Insert | Element → Map | Embed an element in a response |
//! | Extract | Map → Element | Find the element a payload refers to |
//! | Remove | Map → Map | Drop element keys from a payload |
//!
//! # Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | `codec` | [`ElementCodec`] and free functions over the standard keys |
//! | `keys` | Recognized element keys and matching rules |
//! | `reference` | [`WebElement`] serde type |

// ============================================================================
// Submodules
// ============================================================================

/// Element reference insertion and extraction.
pub mod codec;

/// Recognized element keys.
pub mod keys;

/// Typed element reference.
pub mod reference;

// ============================================================================
// Re-exports
// ============================================================================

pub use codec::{
    ElementCodec, extract_element, extract_element_id, insert_element, insert_element_value,
    standard_codec,
};
pub use keys::{ElementKeySet, JSONWP_ELEMENT_KEY, KeyMatching, W3C_ELEMENT_KEY};
pub use reference::WebElement;
