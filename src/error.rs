//! Error types for the element reference codec.
//!
//! This module defines all error types used throughout the crate.
//!
//! # Usage
//!
//! All fallible operations return [`Result<T>`] which uses [`Error`]:
//!
//! ```
//! use serde_json::{Map, json};
//! use webdriver_element_codec::{Error, insert_element_value};
//!
//! let err = insert_element_value(&Map::new(), &json!(42)).unwrap_err();
//! assert!(matches!(err, Error::InvalidElementKind { .. }));
//! ```
//!
//! # Error Categories
//!
//! | Category | Variants |
//! |----------|----------|
//! | Configuration | [`Error::Config`] |
//! | Element | [`Error::InvalidElementKind`], [`Error::MissingElementKey`] |
//! | External | [`Error::Json`] |

// ============================================================================
// Imports
// ============================================================================

use std::result::Result as StdResult;

use thiserror::Error;

// ============================================================================
// Result Alias
// ============================================================================

/// Result type alias using crate [`enum@Error`].
///
/// All fallible operations in this crate return this type.
pub type Result<T> = StdResult<T, Error>;

// ============================================================================
// Error Enum
// ============================================================================

/// Main error type for the crate.
///
/// Each variant includes relevant context for debugging.
#[derive(Error, Debug)]
pub enum Error {
    // ========================================================================
    // Configuration Errors
    // ========================================================================
    /// Configuration error.
    ///
    /// Returned when an element key set is empty, holds an empty key name,
    /// or lists the same key twice.
    #[error("Configuration error: {message}")]
    Config {
        /// Description of the configuration error.
        message: String,
    },

    // ========================================================================
    // Element Errors
    // ========================================================================
    /// Element reference has no derivable identifier.
    ///
    /// Returned when inserting a value that is neither a plain identifier
    /// nor an element object exposing one.
    #[error("Invalid element kind: {kind}")]
    InvalidElementKind {
        /// Short description of the rejected value.
        kind: String,
    },

    /// Map carries no usable element identifier.
    ///
    /// Returned by typed conversions that require an element reference,
    /// when no recognized key is present or every one holds an empty or
    /// non-string value.
    #[error("No usable element identifier in map with keys [{keys}]")]
    MissingElementKey {
        /// Comma separated keys present in the inspected map.
        keys: String,
    },

    // ========================================================================
    // External Errors
    // ========================================================================
    /// JSON serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

// ============================================================================
// Error Constructors
// ============================================================================

impl Error {
    /// Creates a configuration error.
    #[inline]
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Creates an invalid element kind error.
    #[inline]
    pub fn invalid_element_kind(kind: impl Into<String>) -> Self {
        Self::InvalidElementKind { kind: kind.into() }
    }

    /// Creates a missing element key error from the keys that were present.
    #[inline]
    pub fn missing_element_key<'a>(keys: impl IntoIterator<Item = &'a String>) -> Self {
        Self::MissingElementKey {
            keys: keys
                .into_iter()
                .map(String::as_str)
                .collect::<Vec<_>>()
                .join(", "),
        }
    }
}

// ============================================================================
// Error Predicates
// ============================================================================

impl Error {
    /// Returns `true` if this is an element error.
    #[inline]
    #[must_use]
    pub fn is_element_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidElementKind { .. } | Self::MissingElementKey { .. }
        )
    }

    /// Returns `true` if this is a configuration error.
    #[inline]
    #[must_use]
    pub fn is_config_error(&self) -> bool {
        matches!(self, Self::Config { .. })
    }
}

// ============================================================================
// Tests
// ============================================================================
