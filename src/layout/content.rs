//! Content keys: the semantic data source a placed element renders.
//!
//! A text field or barcode area never stores the final printed value.
//! Instead it names where that value comes from: a fixed column of the
//! host's data set ("event_name"), a dynamic metadata reference
//! (`meta:seat`, `itemmeta:color`), or the sentinel `other`, which is the
//! only variant backed by literal free text typed into the editor.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Prefix for dynamic metadata keys.
const META_PREFIX: &str = "meta:";

/// Prefix for dynamic per-item metadata keys.
const ITEM_META_PREFIX: &str = "itemmeta:";

/// Sentinel key for literal free text.
const OTHER: &str = "other";

/// The data source of an element's content.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ContentKey {
    /// A fixed key from the host's variable registry, e.g. "event_name".
    Fixed(String),
    /// A `meta:`-prefixed dynamic key referencing external metadata.
    Meta(String),
    /// An `itemmeta:`-prefixed dynamic key referencing per-item metadata.
    ItemMeta(String),
    /// Literal free text, stored separately on the element.
    Other,
}

impl ContentKey {
    /// Parse the serialized form. Never fails: anything that is not
    /// `other` and carries no recognized prefix is a fixed key.
    pub fn parse(s: &str) -> Self {
        if s == OTHER {
            ContentKey::Other
        } else if let Some(name) = s.strip_prefix(ITEM_META_PREFIX) {
            ContentKey::ItemMeta(name.to_string())
        } else if let Some(name) = s.strip_prefix(META_PREFIX) {
            ContentKey::Meta(name.to_string())
        } else {
            ContentKey::Fixed(s.to_string())
        }
    }

    /// Whether this is the free-text sentinel.
    pub fn is_other(&self) -> bool {
        matches!(self, ContentKey::Other)
    }

    /// Fixed key constructor, mostly for tests and defaults.
    pub fn fixed(name: impl Into<String>) -> Self {
        ContentKey::Fixed(name.into())
    }
}

impl Default for ContentKey {
    fn default() -> Self {
        ContentKey::Other
    }
}

impl fmt::Display for ContentKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ContentKey::Fixed(name) => f.write_str(name),
            ContentKey::Meta(name) => write!(f, "{}{}", META_PREFIX, name),
            ContentKey::ItemMeta(name) => write!(f, "{}{}", ITEM_META_PREFIX, name),
            ContentKey::Other => f.write_str(OTHER),
        }
    }
}

impl Serialize for ContentKey {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for ContentKey {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Ok(ContentKey::parse(&s))
    }
}
