#![forbid(unsafe_code)]

//! The breadcrumb trail: an ordered, never-empty list of named locations.
//!
//! ```text
//! push(ch3)          [home, novel7, ch3]
//! replace_top(ch4)   [home, novel7, ch4]
//! truncate_to(1)     [home, novel7]
//! reset(home)        [home]
//! ```
//!
//! Every transition returns a new snapshot; a published stack is never
//! mutated in place.

use std::ops::Index;

use super::location::NamedLocation;

/// Ordered navigation trail, root first and current page last.
///
/// # Invariants
///
/// 1. Never empty.
/// 2. Index 0 is the home entry; only [`reset`](Self::reset) replaces it
///    (and [`replace_top`](Self::replace_top) when home is the only entry).
/// 3. [`current`](Self::current) is always the last entry.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NavigationStack {
    entries: Vec<NamedLocation>,
}

impl NavigationStack {
    /// A stack holding only `home`.
    #[must_use]
    pub fn new(home: NamedLocation) -> Self {
        Self {
            entries: vec![home],
        }
    }

    #[must_use]
    pub fn home(&self) -> &NamedLocation {
        &self.entries[0]
    }

    /// The currently displayed location (the tail).
    #[must_use]
    pub fn current(&self) -> &NamedLocation {
        let last = self.entries.len() - 1;
        &self.entries[last]
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Always `false`; provided for API symmetry with `len`.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        false
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&NamedLocation> {
        self.entries.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, NamedLocation> {
        self.entries.iter()
    }

    #[must_use]
    pub fn as_slice(&self) -> &[NamedLocation] {
        &self.entries
    }

    /// Append `entry` as the new tail.
    #[must_use]
    pub fn pushed(&self, entry: NamedLocation) -> Self {
        let mut entries = Vec::with_capacity(self.entries.len() + 1);
        entries.extend_from_slice(&self.entries);
        entries.push(entry);
        Self { entries }
    }

    /// Replace the tail with `entry`, keeping every earlier entry.
    #[must_use]
    pub fn replace_top(&self, entry: NamedLocation) -> Self {
        let mut entries = self.entries.clone();
        let last = entries.len() - 1;
        entries[last] = entry;
        Self { entries }
    }

    /// Keep `[0, index]`. Returns `None` when `index` is out of range.
    #[must_use]
    pub fn truncated(&self, index: usize) -> Option<Self> {
        (index < self.entries.len()).then(|| Self {
            entries: self.entries[..=index].to_vec(),
        })
    }

    /// A fresh single-entry stack.
    #[must_use]
    pub fn reset(home: NamedLocation) -> Self {
        Self::new(home)
    }
}

impl Index<usize> for NavigationStack {
    type Output = NamedLocation;

    fn index(&self, index: usize) -> &Self::Output {
        &self.entries[index]
    }
}

impl<'a> IntoIterator for &'a NavigationStack {
    type Item = &'a NamedLocation;
    type IntoIter = std::slice::Iter<'a, NamedLocation>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
