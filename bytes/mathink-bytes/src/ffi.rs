//!
//! C ABI for Byte Nodes
//!
//! Nodes created by `mathink_byte_node_new` are boxed by this library and
//! must be released with `mathink_byte_node_free`. Every function accepts a
//! null node: counts read as 0 and element reads report failure.
//!

use std::ffi::{c_char, c_int};

use crate::raw::{ByteNodeView, RawByteNode};

/// Create a node by copying `index_count` indexes and `candidate_count`
/// candidate bytes. Null buffers are read as empty.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn mathink_byte_node_new(
    indexes: *const c_int,
    index_count: usize,
    candidates: *const c_char,
    candidate_count: usize,
) -> *mut RawByteNode {
    let node = unsafe { ByteNodeView::from_parts(indexes, index_count, candidates, candidate_count) }
        .to_node();
    Box::into_raw(Box::new(RawByteNode::from_node(node)))
}

/// Free a node created by `mathink_byte_node_new`
#[unsafe(no_mangle)]
pub unsafe extern "C" fn mathink_byte_node_free(node: *mut RawByteNode) {
    if node.is_null() {
        return;
    }
    unsafe {
        let raw = Box::from_raw(node);
        drop(raw.into_node());
    }
}

#[unsafe(no_mangle)]
pub unsafe extern "C" fn mathink_byte_node_index_count(node: *const RawByteNode) -> usize {
    if node.is_null() {
        0
    } else {
        unsafe { ByteNodeView::from_raw(&*node).index_count() }
    }
}

#[unsafe(no_mangle)]
pub unsafe extern "C" fn mathink_byte_node_candidate_count(node: *const RawByteNode) -> usize {
    if node.is_null() {
        0
    } else {
        unsafe { ByteNodeView::from_raw(&*node).candidate_count() }
    }
}

/// Write the index at `position` to `out`; false if out of range
#[unsafe(no_mangle)]
pub unsafe extern "C" fn mathink_byte_node_index_at(
    node: *const RawByteNode,
    position: usize,
    out: *mut c_int,
) -> bool {
    if node.is_null() || out.is_null() {
        return false;
    }
    unsafe {
        match ByteNodeView::from_raw(&*node).indexes().get(position) {
            Some(&index) => {
                *out = index;
                true
            }
            None => false,
        }
    }
}

/// Write the candidate byte at `position` to `out`; false if out of range
#[unsafe(no_mangle)]
pub unsafe extern "C" fn mathink_byte_node_candidate_at(
    node: *const RawByteNode,
    position: usize,
    out: *mut c_char,
) -> bool {
    if node.is_null() || out.is_null() {
        return false;
    }
    unsafe {
        match ByteNodeView::from_raw(&*node).candidate(position) {
            Some(byte) => {
                *out = byte as c_char;
                true
            }
            None => false,
        }
    }
}
