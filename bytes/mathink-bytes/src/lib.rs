//!
//! mathink-bytes - Recognizer Leaf Records
//!
//! This crate provides the records a handwriting recognizer emits for each
//! leaf of its parse tree:
//!
//! - `ByteArrayIndexes` for the stroke indexes a leaf covers
//! - `ByteCandidates` for the candidate characters of a leaf
//! - `ByteNode` pairing the two
//!
//! The owned records keep their elements in `Vec`s, so every count is the
//! length of the backing sequence. The `raw` module mirrors the C layout of the
//! same records for the recognizer boundary, and `ffi` exports the functions a
//! C caller uses to create, read and free them.
//!

pub mod node;
pub mod raw;
pub mod ffi;

pub use node::*;
pub use raw::*;
pub use ffi::*;
