//! Parameter sets and their canonical signing string

use crate::types::constants::{fields, is_signed_key};
use crate::{OnePayError, Result};
use percent_encoding::percent_decode_str;
use url::form_urlencoded;

/// Query parameters with unique keys, kept in insertion order
///
/// Only keys carrying the `vpc_` prefix take part in signing, and the reserved
/// `vpc_SecureHash` key never does.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SignedParams {
    pairs: Vec<(String, String)>,
}

impl SignedParams {
    /// Create an empty parameter set
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a raw `application/x-www-form-urlencoded` query string
    ///
    /// When a key repeats, the first value wins.
    pub fn from_query(query: &str) -> Self {
        let query = query.strip_prefix('?').unwrap_or(query);
        form_urlencoded::parse(query.as_bytes())
            .map(|(key, value)| (key.into_owned(), value.into_owned()))
            .collect()
    }

    /// Set a value, replacing any previous value for the same key in place
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        match self.pairs.iter_mut().find(|(existing, _)| *existing == key) {
            Some(slot) => slot.1 = value,
            None => self.pairs.push((key, value)),
        }
    }

    /// Builder-style [`insert`](Self::insert)
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(key, value);
        self
    }

    /// Get the value for a key
    pub fn get(&self, key: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(existing, _)| existing == key)
            .map(|(_, value)| value.as_str())
    }

    /// Remove a key, returning its value
    pub fn remove(&mut self, key: &str) -> Option<String> {
        let index = self.pairs.iter().position(|(existing, _)| existing == key)?;
        Some(self.pairs.remove(index).1)
    }

    /// The signature carried by this set, if any
    pub fn secure_hash(&self) -> Option<&str> {
        self.get(fields::SECURE_HASH)
    }

    /// Iterate over all pairs in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.pairs.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Iterate over the pairs that take part in signing
    pub fn signed_pairs(&self) -> impl Iterator<Item = (&str, &str)> {
        self.iter().filter(|(key, _)| is_signed_key(key))
    }

    /// Number of parameters
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    /// Whether the set is empty
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Serialize every pair as a form-encoded query string
    pub fn to_query_string(&self) -> String {
        form_urlencoded::Serializer::new(String::new())
            .extend_pairs(self.iter())
            .finish()
    }

    /// Build the canonical string for this set
    pub fn canonicalize(&self) -> Result<String> {
        canonicalize(self)
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for SignedParams {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut params = Self::new();
        for (key, value) in iter {
            let key = key.into();
            if params.get(&key).is_none() {
                params.pairs.push((key, value.into()));
            }
        }
        params
    }
}

/// Produce the exact string the gateway signs
///
/// Signed pairs are sorted by key, form-encoded, joined with `&`, and the joined
/// string is unescaped exactly once. Empty values are kept.
pub fn canonicalize(params: &SignedParams) -> Result<String> {
    let mut signed: Vec<(&str, &str)> = params.signed_pairs().collect();
    signed.sort_unstable_by(|a, b| a.0.cmp(b.0));

    let encoded = form_urlencoded::Serializer::new(String::new())
        .extend_pairs(signed)
        .finish();

    unescape(&encoded)
}

fn unescape(encoded: &str) -> Result<String> {
    let spaced = encoded.replace('+', " ");
    percent_decode_str(&spaced)
        .decode_utf8()
        .map(|decoded| decoded.into_owned())
        .map_err(|e| OnePayError::decode(format!("Canonical string is not valid UTF-8: {}", e)))
}
