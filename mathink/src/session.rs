///
/// # Sessions
///
/// A session file is a JSON snapshot of a canvas: the strokes as point lists
/// and the terminal nodes over them.
///
/// ```json
/// {
///   "strokes": [[{"x": 0, "y": 0}, {"x": 100, "y": 100}]],
///   "nodes": [{"kind": "character", "indexes": [0], "candidates": ["1"]}]
/// }
/// ```
///
/// Strokes are restored as polylines. Node `kind` defaults to `ink`.
///

use serde::Deserialize;
use std::path::Path;

use crate::errors::InkError;
use crate::geometry::Point;
use crate::ink::Ink;
use crate::manager::MathInkManager;
use crate::node::TerminalNode;
use crate::path::InkPath;

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Session {
    #[serde(default)]
    pub strokes: Vec<Vec<Point>>,
    #[serde(default)]
    pub nodes: Vec<TerminalNode>,
}

impl Session {
    /// Load the session into `manager`, replacing its history and nodes
    pub fn restore(self, manager: &mut MathInkManager) -> Result<(), InkError> {
        let line_width = manager.line_width();
        let ink = self
            .strokes
            .iter()
            .map(|points| Ink::stroke(InkPath::polyline(points, line_width)))
            .collect();
        manager.load(ink, self.nodes)
    }
}

pub fn load_session(path: &Path) -> Result<Session, InkError> {
    let content = std::fs::read_to_string(path).map_err(|e| InkError::ReadFailed {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    parse_session_str(&content)
}

pub fn parse_session_str(content: &str) -> Result<Session, InkError> {
    Ok(serde_json::from_str(content)?)
}
