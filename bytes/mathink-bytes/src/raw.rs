//!
//! C Layout of the Byte Node Records
//!
//! `RawByteArrayIndexes`, `RawByteCandidates` and `RawByteNode` have the same
//! layout as the recognizer's C structs: a data pointer followed by a
//! `size_t` element count. A raw record carries no ownership of its own.
//! Either this crate allocated the buffers (`RawByteNode::from_node`), in
//! which case `RawByteNode::into_node` reclaims them, or a foreign caller
//! owns them and Rust only borrows them through a `ByteNodeView`.
//!
//! A null data pointer is read as an empty buffer whatever its count.
//!

use std::ffi::{c_char, c_int};
use std::ptr;
use std::slice;

use crate::node::{ByteArrayIndexes, ByteCandidates, ByteNode};

/// C layout of `ByteArrayIndexes`
#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct RawByteArrayIndexes {
    pub bytes: *mut c_int,
    pub byte_count: usize,
}

/// C layout of `ByteCandidates`
#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct RawByteCandidates {
    pub bytes: *mut c_char,
    pub byte_count: usize,
}

/// C layout of `ByteNode`
#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct RawByteNode {
    pub indexes: RawByteArrayIndexes,
    pub candidates: RawByteCandidates,
}

impl RawByteNode {
    /// Move an owned node into library-allocated C buffers.
    ///
    /// The result must be released with `into_node` (or
    /// `mathink_byte_node_free` when boxed by the C ABI), never by `free(3)`.
    pub fn from_node(node: ByteNode) -> Self {
        let (indexes, candidates) = node.into_parts();
        let (index_data, index_count) = leak_vec(indexes.into_vec());
        let (candidate_data, candidate_count) = leak_vec(
            candidates.into_vec().into_iter().map(|b| b as c_char).collect(),
        );

        Self {
            indexes: RawByteArrayIndexes { bytes: index_data, byte_count: index_count },
            candidates: RawByteCandidates { bytes: candidate_data, byte_count: candidate_count },
        }
    }

    /// Reclaim buffers allocated by `from_node`.
    ///
    /// # Safety
    ///
    /// `self` must come from `RawByteNode::from_node` and its
    /// buffers must not have been reclaimed before. Copies of `self` become
    /// dangling.
    pub unsafe fn into_node(self) -> ByteNode {
        unsafe {
            let indexes = reclaim_vec(self.indexes.bytes, self.indexes.byte_count);
            let candidates = reclaim_vec(self.candidates.bytes, self.candidates.byte_count);

            ByteNode::new(
                ByteArrayIndexes::new(indexes),
                candidates.into_iter().map(|c| c as u8).collect(),
            )
        }
    }
}

/// A borrowed view over the buffers of a raw node
///
/// The lifetime ties the view to whoever owns the buffers; `to_node` copies
/// them into an owned `ByteNode` that outlives the source.
#[derive(Debug, Clone, Copy)]
pub struct ByteNodeView<'a> {
    indexes: &'a [c_int],
    candidates: &'a [c_char],
}

impl<'a> ByteNodeView<'a> {
    /// # Safety
    ///
    /// Each non-null pointer in `raw` must be valid for reads of its count
    /// for as long as `'a`, and the memory must not be mutated meanwhile.
    pub unsafe fn from_raw(raw: &'a RawByteNode) -> Self {
        unsafe {
            Self::from_parts(
                raw.indexes.bytes,
                raw.indexes.byte_count,
                raw.candidates.bytes,
                raw.candidates.byte_count,
            )
        }
    }

    /// # Safety
    ///
    /// Same contract as `from_raw`, for each pointer and count pair.
    pub unsafe fn from_parts(
        indexes: *const c_int,
        index_count: usize,
        candidates: *const c_char,
        candidate_count: usize,
    ) -> Self {
        unsafe {
            Self {
                indexes: borrow_slice(indexes, index_count),
                candidates: borrow_slice(candidates, candidate_count),
            }
        }
    }

    pub fn index_count(&self) -> usize {
        self.indexes.len()
    }

    pub fn candidate_count(&self) -> usize {
        self.candidates.len()
    }

    pub fn indexes(&self) -> &'a [c_int] {
        self.indexes
    }

    pub fn candidate(&self, position: usize) -> Option<u8> {
        self.candidates.get(position).map(|&c| c as u8)
    }

    pub fn candidates(&self) -> impl Iterator<Item = u8> + 'a {
        self.candidates.iter().map(|&c| c as u8)
    }

    pub fn to_node(&self) -> ByteNode {
        ByteNode::new(
            ByteArrayIndexes::from(self.indexes),
            self.candidates().collect::<ByteCandidates>(),
        )
    }
}

unsafe fn borrow_slice<'a, T>(data: *const T, len: usize) -> &'a [T] {
    if data.is_null() || len == 0 {
        &[]
    } else {
        unsafe { slice::from_raw_parts(data, len) }
    }
}

fn leak_vec<T>(values: Vec<T>) -> (*mut T, usize) {
    if values.is_empty() {
        return (ptr::null_mut(), 0);
    }
    let len = values.len();
    (Box::into_raw(values.into_boxed_slice()) as *mut T, len)
}

unsafe fn reclaim_vec<T>(data: *mut T, len: usize) -> Vec<T> {
    if data.is_null() || len == 0 {
        return Vec::new();
    }
    unsafe { Box::from_raw(ptr::slice_from_raw_parts_mut(data, len)).into_vec() }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_raw_layout_matches_header() {
        use std::mem::{align_of, size_of};

        assert_eq!(size_of::<RawByteArrayIndexes>(), size_of::<*mut c_int>() + size_of::<usize>());
        assert_eq!(size_of::<RawByteCandidates>(), size_of::<*mut c_char>() + size_of::<usize>());
        assert_eq!(size_of::<RawByteNode>(), 2 * size_of::<RawByteArrayIndexes>());
        assert_eq!(align_of::<RawByteNode>(), align_of::<usize>());
    }

    #[test]
    fn test_from_node_into_node() {
        let node = ByteNode::new(ByteArrayIndexes::from(vec![4, 0, 9]), ByteCandidates::from("xX"));
        let raw = RawByteNode::from_node(node.clone());

        assert_eq!(raw.indexes.byte_count, 3);
        assert_eq!(raw.candidates.byte_count, 2);

        let back = unsafe { raw.into_node() };
        assert_eq!(back, node);
    }

    #[test]
    fn test_empty_node_uses_null_buffers() {
        let raw = RawByteNode::from_node(ByteNode::default());
        assert!(raw.indexes.bytes.is_null());
        assert!(raw.candidates.bytes.is_null());

        let back = unsafe { raw.into_node() };
        assert_eq!(back, ByteNode::default());
    }

    #[test]
    fn test_view_borrows_foreign_buffers() {
        let mut indexes: Vec<c_int> = vec![2, 5];
        let mut candidates: Vec<c_char> = vec![b'a' as c_char, b'9' as c_char, b'+' as c_char];
        let raw = RawByteNode {
            indexes: RawByteArrayIndexes { bytes: indexes.as_mut_ptr(), byte_count: indexes.len() },
            candidates: RawByteCandidates { bytes: candidates.as_mut_ptr(), byte_count: candidates.len() },
        };

        let view = unsafe { ByteNodeView::from_raw(&raw) };
        assert_eq!(view.index_count(), 2);
        assert_eq!(view.candidate_count(), 3);
        assert_eq!(view.indexes(), &[2, 5]);
        assert_eq!(view.candidate(2), Some(b'+'));
        assert_eq!(view.candidate(3), None);

        let owned = view.to_node();
        assert_eq!(owned.indexes().as_slice(), &[2, 5]);
        assert_eq!(owned.candidates().as_bytes(), b"a9+");
    }

    #[test]
    fn test_view_treats_null_as_empty() {
        let raw = RawByteNode {
            indexes: RawByteArrayIndexes { bytes: ptr::null_mut(), byte_count: 12 },
            candidates: RawByteCandidates { bytes: ptr::null_mut(), byte_count: 3 },
        };
        let view = unsafe { ByteNodeView::from_raw(&raw) };
        assert_eq!(view.index_count(), 0);
        assert_eq!(view.candidate_count(), 0);
        assert_eq!(view.to_node(), ByteNode::default());
    }

    #[test]
    fn test_high_bytes_survive_c_char() {
        let node = ByteNode::new(ByteArrayIndexes::default(), ByteCandidates::from(vec![0xB2, 0x7F]));
        let raw = RawByteNode::from_node(node.clone());
        let view = unsafe { ByteNodeView::from_raw(&raw) };
        assert_eq!(view.candidate(0), Some(0xB2));
        assert_eq!(unsafe { raw.into_node() }, node);
    }
}
