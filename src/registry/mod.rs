//! Ordered, symbol-indexed registries
//!
//! A [`Registry`] is what the menu layer consumes: entries in author order,
//! plus a `symbol -> index` map for dispatch code. It is built in one shot
//! from a finished entry list and exposes no mutation; reloading means
//! building a new registry and dropping the old one.

use std::collections::HashMap;

use tracing::warn;

/// An entry that can be addressed by symbol.
pub trait RegistryEntry {
    /// The dispatch key of this entry.
    fn symbol(&self) -> &str;
}

/// Insertion-ordered entries with an O(1) symbol lookup.
///
/// Iteration is never deduplicated. When two entries share a symbol, both
/// stay in the sequence and the lookup points at the later one.
///
/// # Example
///
/// ```rust
/// use titlekit::registry::{Registry, RegistryEntry};
///
/// struct Item(&'static str);
/// impl RegistryEntry for Item {
///     fn symbol(&self) -> &str {
///         self.0
///     }
/// }
///
/// let registry = Registry::from_entries(vec![Item("a"), Item("b"), Item("a")]);
/// assert_eq!(registry.count(), 3);
/// assert_eq!(registry.index_for_symbol("a"), Some(2));
/// assert_eq!(registry.index_for_symbol("b"), Some(1));
/// ```
#[derive(Debug, Clone)]
pub struct Registry<E> {
    /// Entries in source order.
    entries: Vec<E>,

    /// Symbol to position in `entries`.
    index: HashMap<String, usize>,
}

impl<E: RegistryEntry> Registry<E> {
    /// Build a registry, deriving the lookup after all entries are known.
    pub fn from_entries(entries: Vec<E>) -> Self {
        let mut index = HashMap::with_capacity(entries.len());
        for (position, entry) in entries.iter().enumerate() {
            if let Some(previous) = index.insert(entry.symbol().to_string(), position) {
                warn!(
                    symbol = %entry.symbol(),
                    shadowed = previous,
                    index = position,
                    "Duplicate symbol, lookup resolves to the later entry"
                );
            }
        }
        Self { entries, index }
    }

    /// Entry registered under `symbol`, if any.
    pub fn get(&self, symbol: &str) -> Option<&E> {
        self.index_for_symbol(symbol)
            .and_then(|position| self.entries.get(position))
    }
}

impl<E> Registry<E> {
    /// A registry with no entries.
    pub fn empty() -> Self {
        Self {
            entries: Vec::new(),
            index: HashMap::new(),
        }
    }

    /// Number of entries, duplicates included.
    pub fn count(&self) -> usize {
        self.entries.len()
    }

    /// Whether the registry has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entry at `index` in source order.
    pub fn entry_at(&self, index: usize) -> Option<&E> {
        self.entries.get(index)
    }

    /// Position of the entry dispatching on `symbol`.
    pub fn index_for_symbol(&self, symbol: &str) -> Option<usize> {
        self.index.get(symbol).copied()
    }

    /// Whether some entry uses `symbol`.
    pub fn contains_symbol(&self, symbol: &str) -> bool {
        self.index.contains_key(symbol)
    }

    /// Entries in source order.
    pub fn iter(&self) -> std::slice::Iter<'_, E> {
        self.entries.iter()
    }

    /// Entries as a slice.
    pub fn as_slice(&self) -> &[E] {
        &self.entries
    }
}

impl<E> Default for Registry<E> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<'a, E> IntoIterator for &'a Registry<E> {
    type Item = &'a E;
    type IntoIter = std::slice::Iter<'a, E>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
