//! Ordered mapping with unique keys.

use super::Element;

/// Ordered list of `(key, element)` entries with unique keys.
///
/// Insertion order is preserved so trees read from disk keep the order the
/// author wrote, and generated trees keep the declared order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Mapping {
    entries: Vec<(String, Element)>,
}

impl Mapping {
    /// Create an empty mapping.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Look up the element stored under `key`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Element> {
        self.entries
            .iter()
            .find_map(|(name, value)| (name == key).then_some(value))
    }

    /// Returns `true` when `key` is present.
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.iter().any(|(name, _)| name == key)
    }

    /// Insert `value` under `key`.
    ///
    /// An existing entry keeps its position and has its value replaced; a new
    /// key is appended.
    pub fn insert(&mut self, key: impl Into<String>, value: Element) {
        let owned = key.into();
        match self.entries.iter_mut().find(|(name, _)| *name == owned) {
            Some((_, existing)) => *existing = value,
            None => self.entries.push((owned, value)),
        }
    }

    /// Iterate over entries in order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Element)> {
        self.entries.iter().map(entry_ref)
    }

    /// Iterate over keys in order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(key, _)| key.as_str())
    }

    /// Number of entries.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` when the mapping has no entries.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<(String, Element)> for Mapping {
    fn from_iter<I: IntoIterator<Item = (String, Element)>>(iter: I) -> Self {
        let mut mapping = Self::new();
        for (key, value) in iter {
            mapping.insert(key, value);
        }
        mapping
    }
}

impl IntoIterator for Mapping {
    type Item = (String, Element);
    type IntoIter = std::vec::IntoIter<(String, Element)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl<'a> IntoIterator for &'a Mapping {
    type Item = (&'a str, &'a Element);
    type IntoIter = std::iter::Map<
        std::slice::Iter<'a, (String, Element)>,
        fn(&'a (String, Element)) -> (&'a str, &'a Element),
    >;

    fn into_iter(self) -> Self::IntoIter {
        self.entries
            .iter()
            .map(entry_ref as fn(&'a (String, Element)) -> (&'a str, &'a Element))
    }
}

fn entry_ref((key, value): &(String, Element)) -> (&str, &Element) {
    (key.as_str(), value)
}
