///
/// # Terminal Nodes
///
/// A terminal node is a leaf of the recognized expression: the ink entries it
/// covers (by index into the ink history) and the characters it may read as,
/// most likely first. `Ink` nodes come from the recognizer; `Character`
/// nodes replace a leaf the user retyped by hand.
///
/// ## From Recognizer Leaves
///
/// A `ByteNode` becomes an `Ink` node. Every stroke index must be
/// non-negative and every candidate byte must be ASCII; each byte becomes one
/// single-character candidate for the whole index set. The two counts of the
/// leaf are not required to match.
///

use std::fmt;

use mathink_bytes::ByteNode;
use serde::{Deserialize, Serialize};

use crate::errors::InkError;
use crate::geometry::Rect;
use crate::ink::Ink;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeKind {
    #[default]
    Ink,
    Character,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TerminalNode {
    #[serde(default)]
    pub kind: NodeKind,
    pub indexes: Vec<usize>,
    pub candidates: Vec<String>,
}

impl TerminalNode {
    pub fn ink(indexes: Vec<usize>, candidates: Vec<String>) -> Self {
        Self {
            kind: NodeKind::Ink,
            indexes,
            candidates,
        }
    }

    pub fn character(indexes: Vec<usize>, character: impl Into<String>) -> Self {
        Self {
            kind: NodeKind::Character,
            indexes,
            candidates: vec![character.into()],
        }
    }
}

impl fmt::Display for TerminalNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            NodeKind::Ink => write!(
                f,
                "<InkNode: stroke indexes={:?}; candidates={:?}>",
                self.indexes, self.candidates
            ),
            NodeKind::Character => write!(
                f,
                "<CharacterNode: index={:?}; character={:?}>",
                self.indexes, self.candidates
            ),
        }
    }
}

impl TryFrom<&ByteNode> for TerminalNode {
    type Error = InkError;

    fn try_from(leaf: &ByteNode) -> Result<Self, Self::Error> {
        let indexes = leaf
            .indexes()
            .iter()
            .map(|index| usize::try_from(index).map_err(|_| InkError::NegativeIndex { index }))
            .collect::<Result<Vec<_>, _>>()?;

        let candidates = leaf
            .candidates()
            .iter()
            .map(|byte| {
                if byte.is_ascii() {
                    Ok(char::from(byte).to_string())
                } else {
                    Err(InkError::InvalidCandidate { byte })
                }
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(TerminalNode::ink(indexes, candidates))
    }
}

/// One line per node, prefixed with its position
pub fn format_nodes(nodes: &[TerminalNode]) -> String {
    nodes
        .iter()
        .enumerate()
        .map(|(i, node)| format!("{}: {}\n", i, node))
        .collect()
}

/// A node picked on the canvas, with the ink it covers
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    pub ink: Vec<Ink>,
    pub frame: Rect,
    pub candidates: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use mathink_bytes::{ByteArrayIndexes, ByteCandidates};

    #[test]
    fn test_display_formats() {
        let node = TerminalNode::ink(vec![0, 1], vec!["x".to_string(), "X".to_string()]);
        assert_eq!(
            node.to_string(),
            r#"<InkNode: stroke indexes=[0, 1]; candidates=["x", "X"]>"#
        );

        let node = TerminalNode::character(vec![2], "7");
        assert_eq!(node.to_string(), r#"<CharacterNode: index=[2]; character=["7"]>"#);
    }

    #[test]
    fn test_from_byte_node() {
        let leaf = ByteNode::new(ByteArrayIndexes::from(vec![3, 4]), ByteCandidates::from("1l|"));
        let node = TerminalNode::try_from(&leaf).expect("Leaf should convert");

        assert_eq!(node.kind, NodeKind::Ink);
        assert_eq!(node.indexes, vec![3, 4]);
        assert_eq!(node.candidates, vec!["1", "l", "|"]);
    }

    #[test]
    fn test_from_byte_node_rejects_negative_index() {
        let leaf = ByteNode::new(ByteArrayIndexes::from(vec![0, -2]), ByteCandidates::from("a"));
        match TerminalNode::try_from(&leaf) {
            Err(InkError::NegativeIndex { index }) => assert_eq!(index, -2),
            other => panic!("Expected NegativeIndex error, got {:?}", other),
        }
    }

    #[test]
    fn test_from_byte_node_rejects_non_ascii() {
        let leaf = ByteNode::new(ByteArrayIndexes::from(vec![0]), ByteCandidates::from(vec![b'a', 0xE2]));
        match TerminalNode::try_from(&leaf) {
            Err(InkError::InvalidCandidate { byte }) => assert_eq!(byte, 0xE2),
            other => panic!("Expected InvalidCandidate error, got {:?}", other),
        }
    }

    #[test]
    fn test_session_json_defaults_kind() {
        let node: TerminalNode = serde_json::from_str(r#"{"indexes":[1],"candidates":["2"]}"#)
            .expect("Failed to parse node");
        assert_eq!(node, TerminalNode::ink(vec![1], vec!["2".to_string()]));
    }
}
