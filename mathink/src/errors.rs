///
/// Ink model error types.
///
/// All errors that can occur while loading sessions and config, talking to a
/// recognizer, interpreting its leaf records and editing nodes.
///

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum InkError {
    #[error("No parser is attached to the ink manager")]
    ParserMissing,

    #[error("Parser failed: {reason}")]
    ParseFailed { reason: String },

    #[error("Negative stroke index {index} in recognizer leaf")]
    NegativeIndex { index: i32 },

    #[error("Stroke index {index} is out of range for {len} ink entries")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("Candidate byte 0x{byte:02X} is not an ASCII character")]
    InvalidCandidate { byte: u8 },

    #[error("Replacement must be a single character, got {input:?}")]
    InvalidReplacement { input: String },

    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    #[error("Failed to read {path}: {reason}")]
    ReadFailed { path: PathBuf, reason: String },

    #[error("Failed to write {path}: {reason}")]
    WriteFailed { path: PathBuf, reason: String },

    #[error("Session JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
