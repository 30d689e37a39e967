///
/// # Recognizer Seam
///
/// The ink manager hands the current ink to a `MathInkParser` and asks it to
/// parse. A parser answers with the LaTeX it extracted and the leaf records
/// of its parse tree, or with an error. Leaf stroke indexes refer to
/// positions in the ink it was given.
///
/// A parser that recognizes a scratch-out gesture lists the erased strokes
/// in `removed_strokes`; the manager records an erasure over them.
///

use mathink_bytes::{ByteArrayIndexes, ByteNode};

use crate::errors::InkError;
use crate::ink::InkPayload;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedInk {
    pub latex: String,
    pub leaf_nodes: Vec<ByteNode>,
    pub removed_strokes: ByteArrayIndexes,
}

pub trait MathInkParser {
    /// Replace the ink the next `parse` will read
    fn add_ink(&mut self, ink: Vec<InkPayload>);

    fn parse(&mut self) -> Result<ParsedInk, InkError>;
}
