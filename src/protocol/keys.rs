//! Element key names recognized in protocol payloads.
//!
//! WebDriver servers have used two conventions for embedding an element
//! reference in a JSON object:
//!
//! | Key | Protocol |
//! |-----|----------|
//! | `element-6066-11e4-a52e-4f735466cecf` | W3C WebDriver |
//! | `ELEMENT` | JSON Wire Protocol (legacy) |
//!
//! [`ElementKeySet`] holds the keys a codec writes and reads, in
//! extraction priority order.

// ============================================================================
// Imports
// ============================================================================

use std::borrow::Cow;

use rustc_hash::FxHashSet;

use crate::error::{Error, Result};

// ============================================================================
// Constants
// ============================================================================

/// Element key defined by the W3C WebDriver specification.
pub const W3C_ELEMENT_KEY: &str = "element-6066-11e4-a52e-4f735466cecf";

/// Element key used by the legacy JSON Wire Protocol.
pub const JSONWP_ELEMENT_KEY: &str = "ELEMENT";

const STANDARD_KEYS: &[Cow<'static, str>] = &[
    Cow::Borrowed(W3C_ELEMENT_KEY),
    Cow::Borrowed(JSONWP_ELEMENT_KEY),
];

const W3C_KEYS: &[Cow<'static, str>] = &[Cow::Borrowed(W3C_ELEMENT_KEY)];

const JSONWP_KEYS: &[Cow<'static, str>] = &[Cow::Borrowed(JSONWP_ELEMENT_KEY)];

// ============================================================================
// KeyMatching
// ============================================================================

/// How map keys are compared against the element key set.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum KeyMatching {
    /// Keys match when equal ignoring ASCII case.
    ///
    /// Clients in the wild send `element` as well as `ELEMENT`.
    #[default]
    CaseInsensitive,

    /// Keys match only when byte-for-byte equal.
    Exact,
}

impl KeyMatching {
    /// Returns `true` if `candidate` matches the recognized `key`.
    #[inline]
    #[must_use]
    pub fn matches(self, candidate: &str, key: &str) -> bool {
        match self {
            Self::CaseInsensitive => candidate.eq_ignore_ascii_case(key),
            Self::Exact => candidate == key,
        }
    }
}

// ============================================================================
// ElementKeySet
// ============================================================================

/// Ordered, non-empty set of recognized element keys.
///
/// The order is the extraction priority: the first key present in a map
/// wins. Insertion writes every key in this order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElementKeySet {
    keys: Cow<'static, [Cow<'static, str>]>,
}

// ============================================================================
// ElementKeySet - Constructors
// ============================================================================

impl ElementKeySet {
    /// W3C key followed by the legacy JSON Wire Protocol key.
    #[inline]
    #[must_use]
    pub const fn standard() -> Self {
        Self {
            keys: Cow::Borrowed(STANDARD_KEYS),
        }
    }

    /// Only the W3C key.
    #[inline]
    #[must_use]
    pub const fn w3c() -> Self {
        Self {
            keys: Cow::Borrowed(W3C_KEYS),
        }
    }

    /// Only the legacy JSON Wire Protocol key.
    #[inline]
    #[must_use]
    pub const fn legacy() -> Self {
        Self {
            keys: Cow::Borrowed(JSONWP_KEYS),
        }
    }

    /// Builds a key set from custom keys, in priority order.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if no keys are given, a key is empty, or
    /// two keys are equal ignoring ASCII case.
    pub fn try_from_keys<I, K>(keys: I) -> Result<Self>
    where
        I: IntoIterator<Item = K>,
        K: Into<Cow<'static, str>>,
    {
        let keys: Vec<Cow<'static, str>> = keys.into_iter().map(Into::into).collect();
        if keys.is_empty() {
            return Err(Error::config("element key set is empty"));
        }

        let mut seen = FxHashSet::default();
        for key in &keys {
            if key.is_empty() {
                return Err(Error::config("element key must not be empty"));
            }
            if !seen.insert(key.to_ascii_lowercase()) {
                return Err(Error::config(format!("duplicate element key: {key}")));
            }
        }

        Ok(Self {
            keys: Cow::Owned(keys),
        })
    }
}

impl Default for ElementKeySet {
    fn default() -> Self {
        Self::standard()
    }
}

// ============================================================================
// ElementKeySet - Builder Methods
// ============================================================================

impl ElementKeySet {
    /// Appends a key with the lowest priority.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if the key is empty or already present.
    pub fn with_key(self, key: impl Into<Cow<'static, str>>) -> Result<Self> {
        let mut keys = self.keys.into_owned();
        keys.push(key.into());
        Self::try_from_keys(keys)
    }
}

// ============================================================================
// ElementKeySet - Accessors
// ============================================================================

impl ElementKeySet {
    /// Iterates the keys in priority order.
    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.keys.iter().map(|key| &**key)
    }

    /// Returns the number of keys.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    /// Always `false`; key sets cannot be empty.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Returns `true` if `candidate` matches any key in the set.
    #[must_use]
    pub fn recognizes(&self, candidate: &str, matching: KeyMatching) -> bool {
        self.iter().any(|key| matching.matches(candidate, key))
    }
}

// ============================================================================
// Tests
// ============================================================================
