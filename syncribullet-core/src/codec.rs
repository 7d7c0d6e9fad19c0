//! Config segment codec
//!
//! Every per-provider credential and setting travels in one URL path
//! segment. Wire grammar, before percent-encoding:
//!
//! ```text
//! segment  = [ pair *( "|" pair ) ]
//! pair     = provider "_" setting "-=-" value
//! provider = 1*( any char except "_" / "|" )      ; and no "-=-"
//! setting  = 1*( any char except "_" / "|" )      ; and no "-=-"
//! value    = *( any char except "|" )
//! ```
//!
//! Decoding is more lenient: the key splits on its first `_`, so a setting
//! name that carries further underscores is kept as is.
//!
//! The whole string is percent-encoded with the `encodeURI` character set,
//! minus `/`, `?` and `#` so the result stays a single path segment. Links
//! built with plain `encodeURI` decode the same way.

use std::fmt;

use indexmap::IndexMap;
use percent_encoding::{percent_decode_str, utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use serde::{Deserialize, Serialize};

/// Separates pairs
pub const PAIR_SEPARATOR: &str = "|";
/// Separates a key from its value (first occurrence wins)
pub const VALUE_SEPARATOR: &str = "-=-";
/// Separates the provider id from the setting key
pub const KEY_SEPARATOR: &str = "_";

/// Characters `encodeURI` leaves untouched, except the path/query/fragment
/// delimiters
const SEGMENT_ENCODE_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b';')
    .remove(b',')
    .remove(b':')
    .remove(b'@')
    .remove(b'&')
    .remove(b'=')
    .remove(b'+')
    .remove(b'$')
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Settings of one provider, keyed by setting name
pub type ProviderSettings = IndexMap<String, String>;

/// Decoded config segment: provider id -> setting key -> value.
///
/// Insertion order is kept so encoding is stable; equality ignores it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConfigBlob(IndexMap<String, ProviderSettings>);

impl ConfigBlob {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Settings for a provider, if any were supplied
    #[must_use]
    pub fn provider(&self, provider_id: &str) -> Option<&ProviderSettings> {
        self.0.get(provider_id)
    }

    /// Single setting lookup
    #[must_use]
    pub fn setting(&self, provider_id: &str, key: &str) -> Option<&str> {
        self.0
            .get(provider_id)
            .and_then(|settings| settings.get(key))
            .map(String::as_str)
    }

    /// Insert or overwrite a setting, creating the provider entry on demand
    pub fn set(
        &mut self,
        provider_id: impl Into<String>,
        key: impl Into<String>,
        value: impl Into<String>,
    ) {
        self.0
            .entry(provider_id.into())
            .or_default()
            .insert(key.into(), value.into());
    }

    /// Builder-style [`ConfigBlob::set`]
    #[must_use]
    pub fn with(
        mut self,
        provider_id: impl Into<String>,
        key: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        self.set(provider_id, key, value);
        self
    }

    #[must_use]
    pub fn contains_provider(&self, provider_id: &str) -> bool {
        self.0.contains_key(provider_id)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ProviderSettings)> {
        self.0.iter().map(|(id, settings)| (id.as_str(), settings))
    }
}

/// Which part of a pair was rejected
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    ProviderId,
    SettingKey,
    Value,
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::ProviderId => "provider id",
            Self::SettingKey => "setting key",
            Self::Value => "value",
        })
    }
}

/// Encode-time validation failures
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CodecError {
    #[error("{field} {text:?} contains reserved delimiter {delimiter:?}")]
    ReservedDelimiter {
        field: Field,
        text: String,
        delimiter: &'static str,
    },

    #[error("empty {0}")]
    Empty(Field),
}

fn check_field(field: Field, text: &str) -> Result<(), CodecError> {
    let reserved: &[&'static str] = match field {
        Field::ProviderId | Field::SettingKey => {
            if text.is_empty() {
                return Err(CodecError::Empty(field));
            }
            &[PAIR_SEPARATOR, VALUE_SEPARATOR, KEY_SEPARATOR]
        }
        Field::Value => &[PAIR_SEPARATOR],
    };

    match reserved.iter().find(|d| text.contains(**d)) {
        Some(delimiter) => Err(CodecError::ReservedDelimiter {
            field,
            text: text.to_string(),
            delimiter: *delimiter,
        }),
        None => Ok(()),
    }
}

/// Encode a blob into a URL-safe config segment.
///
/// Pairs are emitted in insertion order, so encoding an unchanged blob twice
/// yields identical output. A provider with no settings emits nothing.
pub fn encode(blob: &ConfigBlob) -> Result<String, CodecError> {
    let mut pairs = Vec::new();
    for (provider_id, settings) in blob.iter() {
        check_field(Field::ProviderId, provider_id)?;
        for (key, value) in settings {
            check_field(Field::SettingKey, key)?;
            check_field(Field::Value, value)?;
            pairs.push(format!(
                "{provider_id}{KEY_SEPARATOR}{key}{VALUE_SEPARATOR}{value}"
            ));
        }
    }

    let raw = pairs.join(PAIR_SEPARATOR);
    Ok(utf8_percent_encode(&raw, SEGMENT_ENCODE_SET).to_string())
}

/// Decode a config segment. Never fails: malformed pairs are skipped.
#[must_use]
pub fn decode(segment: &str) -> ConfigBlob {
    let raw = percent_decode_str(segment).decode_utf8_lossy();
    let mut blob = ConfigBlob::new();

    for pair in raw.split(PAIR_SEPARATOR) {
        match parse_pair(pair) {
            Some((provider_id, key, value)) => blob.set(provider_id, key, value),
            None if pair.is_empty() => {}
            None => tracing::debug!(pair, "skipping malformed config pair"),
        }
    }

    blob
}

fn parse_pair(pair: &str) -> Option<(&str, &str, &str)> {
    let (key, value) = pair.split_once(VALUE_SEPARATOR)?;
    let (provider_id, setting) = key.split_once(KEY_SEPARATOR)?;
    if provider_id.is_empty() || setting.is_empty() {
        return None;
    }
    Some((provider_id, setting, value))
}
