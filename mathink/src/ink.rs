///
/// # Ink
///
/// One entry of the ink history. A `Stroke` is raw handwriting. `Character`
/// and `Removed` are edits layered on top of earlier strokes: each records
/// the stroke indexes it covers, so the strokes stay in history (and undo
/// keeps working) while the edit stands in for them.
///
/// `payload()` is the serializable shape handed to a recognizer.
///

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::geometry::{Point, Rect};
use crate::path::InkPath;

#[derive(Debug, Clone, PartialEq)]
pub struct StrokeInk {
    pub path: InkPath,
}

/// Strokes replaced by a typed character
#[derive(Debug, Clone, PartialEq)]
pub struct CharacterInk {
    pub character: String,
    pub path: InkPath,
    pub indexes: BTreeSet<usize>,
}

/// Strokes erased from the canvas
#[derive(Debug, Clone, PartialEq)]
pub struct RemovedInk {
    pub indexes: BTreeSet<usize>,
    pub path: InkPath,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Ink {
    Stroke(StrokeInk),
    Character(CharacterInk),
    Removed(RemovedInk),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum InkPayload {
    Stroke { points: Vec<Point> },
    Character { character: String, frame: Rect },
    Removed { indexes: Vec<usize> },
}

impl Ink {
    pub fn stroke(path: InkPath) -> Self {
        Ink::Stroke(StrokeInk { path })
    }

    pub fn path(&self) -> &InkPath {
        match self {
            Ink::Stroke(ink) => &ink.path,
            Ink::Character(ink) => &ink.path,
            Ink::Removed(ink) => &ink.path,
        }
    }

    pub fn frame(&self) -> Rect {
        self.path().bounds()
    }

    /// Stroke indexes this entry stands in for, `None` for plain strokes
    pub fn removed_indexes(&self) -> Option<&BTreeSet<usize>> {
        match self {
            Ink::Stroke(_) => None,
            Ink::Character(ink) => Some(&ink.indexes),
            Ink::Removed(ink) => Some(&ink.indexes),
        }
    }

    pub fn payload(&self) -> InkPayload {
        match self {
            Ink::Stroke(ink) => InkPayload::Stroke {
                points: ink.path.points(),
            },
            Ink::Character(ink) => InkPayload::Character {
                character: ink.character.clone(),
                frame: ink.path.bounds(),
            },
            Ink::Removed(ink) => InkPayload::Removed {
                indexes: ink.indexes.iter().copied().collect(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(from: (f64, f64), to: (f64, f64)) -> InkPath {
        InkPath::polyline(&[Point::new(from.0, from.1), Point::new(to.0, to.1)], 3.0)
    }

    #[test]
    fn test_stroke_frame_and_payload() {
        let ink = Ink::stroke(line((0.0, 0.0), (100.0, 100.0)));
        assert_eq!(ink.frame(), Rect::new(0.0, 0.0, 100.0, 100.0));
        assert_eq!(ink.removed_indexes(), None);
        assert_eq!(
            ink.payload(),
            InkPayload::Stroke {
                points: vec![Point::new(0.0, 0.0), Point::new(100.0, 100.0)]
            }
        );
    }

    #[test]
    fn test_character_payload_uses_frame() {
        let ink = Ink::Character(CharacterInk {
            character: "x".to_string(),
            path: line((10.0, 10.0), (20.0, 30.0)),
            indexes: BTreeSet::from([0, 2]),
        });

        assert_eq!(ink.removed_indexes(), Some(&BTreeSet::from([0, 2])));
        assert_eq!(
            ink.payload(),
            InkPayload::Character {
                character: "x".to_string(),
                frame: Rect::new(10.0, 10.0, 10.0, 20.0),
            }
        );
    }

    #[test]
    fn test_payload_json_is_tagged() {
        let payload = Ink::Removed(RemovedInk {
            indexes: BTreeSet::from([3, 1]),
            path: InkPath::default(),
        })
        .payload();

        let json = serde_json::to_string(&payload).expect("Failed to serialize payload");
        assert_eq!(json, r#"{"kind":"removed","indexes":[1,3]}"#);
    }
}
