//!
//! Owned Byte Node Records
//!
//! `ByteArrayIndexes` and `ByteCandidates` own their elements. There is no
//! separately stored count: `count()` is the length of the backing vector.
//! Neither record imposes ordering or uniqueness on its elements, and a
//! `ByteNode` does not relate the two counts to each other.
//!

/// Ordered stroke indexes covered by a recognizer leaf
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct ByteArrayIndexes {
    indexes: Vec<i32>,
}

impl ByteArrayIndexes {
    pub fn new(indexes: Vec<i32>) -> Self {
        Self { indexes }
    }

    /// Number of valid indexes
    pub fn count(&self) -> usize {
        self.indexes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indexes.is_empty()
    }

    pub fn as_slice(&self) -> &[i32] {
        &self.indexes
    }

    /// Index at `position`, `None` past the end
    pub fn get(&self, position: usize) -> Option<i32> {
        self.indexes.get(position).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = i32> + '_ {
        self.indexes.iter().copied()
    }

    pub fn into_vec(self) -> Vec<i32> {
        self.indexes
    }
}

impl From<Vec<i32>> for ByteArrayIndexes {
    fn from(indexes: Vec<i32>) -> Self {
        Self::new(indexes)
    }
}

impl From<&[i32]> for ByteArrayIndexes {
    fn from(indexes: &[i32]) -> Self {
        Self::new(indexes.to_vec())
    }
}

impl FromIterator<i32> for ByteArrayIndexes {
    fn from_iter<I: IntoIterator<Item = i32>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

/// Candidate byte values for a recognizer leaf (not NUL-terminated)
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct ByteCandidates {
    bytes: Vec<u8>,
}

impl ByteCandidates {
    pub fn new(bytes: Vec<u8>) -> Self {
        Self { bytes }
    }

    /// Number of valid candidate bytes
    pub fn count(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Candidate at `position`, `None` past the end
    pub fn get(&self, position: usize) -> Option<u8> {
        self.bytes.get(position).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = u8> + '_ {
        self.bytes.iter().copied()
    }

    pub fn into_vec(self) -> Vec<u8> {
        self.bytes
    }
}

impl From<Vec<u8>> for ByteCandidates {
    fn from(bytes: Vec<u8>) -> Self {
        Self::new(bytes)
    }
}

impl From<&[u8]> for ByteCandidates {
    fn from(bytes: &[u8]) -> Self {
        Self::new(bytes.to_vec())
    }
}

impl From<&str> for ByteCandidates {
    fn from(s: &str) -> Self {
        Self::new(s.as_bytes().to_vec())
    }
}

impl FromIterator<u8> for ByteCandidates {
    fn from_iter<I: IntoIterator<Item = u8>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

/// A recognizer leaf: the strokes it covers and what they might read as
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct ByteNode {
    indexes: ByteArrayIndexes,
    candidates: ByteCandidates,
}

impl ByteNode {
    pub fn new(indexes: ByteArrayIndexes, candidates: ByteCandidates) -> Self {
        Self { indexes, candidates }
    }

    pub fn indexes(&self) -> &ByteArrayIndexes {
        &self.indexes
    }

    pub fn candidates(&self) -> &ByteCandidates {
        &self.candidates
    }

    pub fn into_parts(self) -> (ByteArrayIndexes, ByteCandidates) {
        (self.indexes, self.candidates)
    }
}
