use std::collections::HashSet;

use super::Entry;

/// An intermediate representation of a bibliography which is not tied to a specific end format.
///
/// A [`Biblio`] keeps its entries in the order they were inserted, which for a loaded file is the
/// order they appear in the source. Citation keys are expected to be unique but this is only
/// guaranteed after calling [`Biblio::dedupe`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Biblio(Vec<Entry>);

impl Biblio {
    /// Create a new [`Biblio`] from a list of bibliography entries.
    #[must_use]
    pub fn new(entries: Vec<Entry>) -> Self {
        Self(entries)
    }

    /// Insert a new [`Entry`].
    pub fn insert(&mut self, entry: Entry) {
        self.0.push(entry);
    }

    /// Return a reference to a slice of entries.
    #[must_use]
    pub fn entries(&self) -> &[Entry] {
        &self.0
    }

    /// The number of entries, duplicates included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// `true` when there is no entry.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Moves all the entries of `other` to the end of this [`Biblio`], keeping duplicates.
    pub fn merge(&mut self, other: Biblio) {
        self.0.extend(other.0);
    }

    /// The number of distinct citation keys.
    #[must_use]
    pub fn distinct_cites(&self) -> usize {
        self.0.iter().map(Entry::cite).collect::<HashSet<_>>().len()
    }

    /// Collapses entries sharing a citation key so that only one entry per key is kept.
    ///
    /// The first entry seen for a key wins and the surviving entries keep their relative order.
    /// Returns the number of entries removed.
    pub fn dedupe(&mut self) -> usize {
        let before = self.0.len();
        let mut seen = HashSet::new();
        self.0.retain(|e| seen.insert(e.cite().to_owned()));
        before - self.0.len()
    }
}

impl IntoIterator for Biblio {
    type Item = Entry;

    type IntoIter = <Vec<Entry> as IntoIterator>::IntoIter;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl FromIterator<Entry> for Biblio {
    fn from_iter<T: IntoIterator<Item = Entry>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}
