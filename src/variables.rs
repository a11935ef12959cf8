//! Host-supplied placeholder variables and editor sample text.
//!
//! The hosting application knows which data columns exist for a document
//! (e.g. the headers of an uploaded attendee sheet) and provides them as
//! ordered variables: a display label for the toolbox dropdown and a
//! sample value rendered on canvas so the designer sees realistic text.
//! The editor core never hardcodes this set.

use crate::layout::ContentKey;

/// One placeholder variable the host exposes to the editor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Variable {
    /// Human-readable label for the toolbox dropdown.
    pub label: String,
    /// Sample value shown on canvas while editing.
    pub sample: String,
}

/// Ordered registry of fixed content keys.
///
/// Insertion order is preserved so the toolbox lists variables the way
/// the host data defines them.
#[derive(Debug, Clone, Default)]
pub struct VariableRegistry {
    entries: Vec<(String, Variable)>,
}

impl VariableRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert. Re-inserting a key replaces its variable.
    pub fn with(mut self, key: impl Into<String>, label: impl Into<String>, sample: impl Into<String>) -> Self {
        self.insert(key, label, sample);
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, label: impl Into<String>, sample: impl Into<String>) {
        let key = key.into();
        let variable = Variable {
            label: label.into(),
            sample: sample.into(),
        };
        if let Some(entry) = self.entries.iter_mut().find(|(k, _)| *k == key) {
            entry.1 = variable;
        } else {
            self.entries.push((key, variable));
        }
    }

    pub fn get(&self, key: &str) -> Option<&Variable> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Keys in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    /// The text shown on canvas for a content key.
    ///
    /// Dynamic `meta:`/`itemmeta:` keys echo their suffix (there is no
    /// sample data for them), fixed keys resolve through the registry
    /// (empty string when unknown), and `other` resolves to nothing —
    /// the element's own literal text is used instead.
    pub fn sample_text(&self, key: &ContentKey) -> String {
        match key {
            ContentKey::ItemMeta(name) | ContentKey::Meta(name) => name.clone(),
            ContentKey::Fixed(name) => self
                .get(name)
                .map(|v| v.sample.clone())
                .unwrap_or_default(),
            ContentKey::Other => String::new(),
        }
    }
}
