//! Document handles and per-document match collections.

use std::fmt;

/// Opaque handle to a named, mutable text resource (typically a path or URI).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DocumentId(String);

impl DocumentId {
    /// Create a handle from a path or URI.
    pub fn new(path: impl Into<String>) -> Self {
        Self(path.into())
    }

    /// The underlying path/URI.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DocumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for DocumentId {
    fn from(path: &str) -> Self {
        Self::new(path)
    }
}

impl From<String> for DocumentId {
    fn from(path: String) -> Self {
        Self(path)
    }
}

/// A half-open character range `[start, end)` into a document's current text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MatchRange {
    /// Inclusive start character offset.
    pub start: usize,
    /// Exclusive end character offset.
    pub end: usize,
}

impl MatchRange {
    /// Create a range. `start <= end` is expected but not enforced.
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// Length in characters.
    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    /// Returns `true` if the range covers no characters.
    pub fn is_empty(&self) -> bool {
        self.start >= self.end
    }
}

impl From<(usize, usize)> for MatchRange {
    fn from((start, end): (usize, usize)) -> Self {
        Self { start, end }
    }
}

impl From<[usize; 2]> for MatchRange {
    fn from([start, end]: [usize; 2]) -> Self {
        Self { start, end }
    }
}

/// The ranges located in one document, in the order the match source produced them.
///
/// Ranges are assumed disjoint; nothing here deduplicates or sorts them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MatchSet {
    ranges: Vec<MatchRange>,
}

impl MatchSet {
    /// Create an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a set from the `[[start, end], ...]` shape search indexes emit.
    pub fn from_pairs(pairs: &[[usize; 2]]) -> Self {
        Self {
            ranges: pairs.iter().copied().map(MatchRange::from).collect(),
        }
    }

    /// Append a range.
    pub fn push(&mut self, range: MatchRange) {
        self.ranges.push(range);
    }

    /// All ranges, in source order.
    pub fn ranges(&self) -> &[MatchRange] {
        &self.ranges
    }

    /// Number of ranges.
    pub fn len(&self) -> usize {
        self.ranges.len()
    }

    /// Returns `true` if there are no ranges.
    pub fn is_empty(&self) -> bool {
        self.ranges.is_empty()
    }
}

impl FromIterator<MatchRange> for MatchSet {
    fn from_iter<I: IntoIterator<Item = MatchRange>>(iter: I) -> Self {
        Self {
            ranges: iter.into_iter().collect(),
        }
    }
}

/// Insertion-ordered mapping from document to its matches.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MatchesByDocument {
    entries: Vec<(DocumentId, MatchSet)>,
}

impl MatchesByDocument {
    /// Create an empty mapping.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert the matches for `document`.
    ///
    /// If the document is already present its set is replaced in place, keeping its position.
    pub fn insert(&mut self, document: DocumentId, matches: MatchSet) {
        if let Some((_, existing)) = self.entries.iter_mut().find(|(id, _)| *id == document) {
            *existing = matches;
        } else {
            self.entries.push((document, matches));
        }
    }

    /// Matches for `document`, if present.
    pub fn get(&self, document: &DocumentId) -> Option<&MatchSet> {
        self.entries
            .iter()
            .find(|(id, _)| id == document)
            .map(|(_, set)| set)
    }

    /// Iterate in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&DocumentId, &MatchSet)> {
        self.entries.iter().map(|(id, set)| (id, set))
    }

    /// Number of documents.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if no documents are present.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Total number of ranges across all documents.
    pub fn total_matches(&self) -> usize {
        self.entries.iter().map(|(_, set)| set.len()).sum()
    }
}

impl FromIterator<(DocumentId, MatchSet)> for MatchesByDocument {
    fn from_iter<I: IntoIterator<Item = (DocumentId, MatchSet)>>(iter: I) -> Self {
        let mut out = Self::new();
        for (document, matches) in iter {
            out.insert(document, matches);
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_keeps_first_position() {
        let mut map = MatchesByDocument::new();
        map.insert("b.md".into(), MatchSet::from_pairs(&[[0, 1]]));
        map.insert("a.md".into(), MatchSet::from_pairs(&[[2, 3]]));
        map.insert("b.md".into(), MatchSet::from_pairs(&[[4, 5], [6, 7]]));

        let order: Vec<&str> = map.iter().map(|(id, _)| id.as_str()).collect();
        assert_eq!(order, vec!["b.md", "a.md"]);
        assert_eq!(map.get(&"b.md".into()).map(MatchSet::len), Some(2));
        assert_eq!(map.total_matches(), 3);
    }

    #[test]
    fn test_from_pairs() {
        let set = MatchSet::from_pairs(&[[0, 3], [5, 5]]);
        assert_eq!(set.ranges()[0], MatchRange::new(0, 3));
        assert!(set.ranges()[1].is_empty());
    }
}
