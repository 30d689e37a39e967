///
/// # mathink — Ink model for handwritten math input
///
/// This crate keeps the ink of a handwriting canvas: it captures strokes,
/// tracks undo/redo history, sends the ink to a recognizer and keeps the
/// terminal nodes the recognizer reports so they can be selected, retyped or
/// erased. Recognizer leaves arrive as `mathink_bytes::ByteNode` records.
///
/// ## Library Usage
///
/// ```rust,ignore
/// use mathink::{MathInkManager, ManagerConfig, Point};
///
/// let mut manager = MathInkManager::new(ManagerConfig::default());
/// manager.set_parser(Box::new(my_recognizer));
/// manager.input_stream(Point::new(10.0, 10.0), Point::new(0.0, 0.0), true);
/// let latex = manager.process()?;
/// let node = manager.select_node(Some(Point::new(5.0, 5.0)));
/// ```
///
/// ## CLI
///
/// ```sh
/// mathink nodes session.json                  # List terminal nodes
/// mathink select session.json --x 50 --y 50   # Tap a point and show the selection
/// ```
///

pub mod config;
pub mod errors;
pub mod geometry;
pub mod ink;
pub mod manager;
pub mod node;
pub mod parser;
pub mod path;
pub mod session;

pub use config::{init_config, load_config, parse_config_str, Config, ManagerConfig};
pub use errors::InkError;
pub use geometry::{Point, Rect, Size};
pub use ink::{CharacterInk, Ink, InkPayload, RemovedInk, StrokeInk};
pub use manager::{InkManagerObserver, MathInkManager};
pub use node::{format_nodes, Node, NodeKind, TerminalNode};
pub use parser::{MathInkParser, ParsedInk};
pub use path::{InkPath, PathElement};
pub use session::{load_session, Session};

pub use mathink_bytes::{ByteArrayIndexes, ByteCandidates, ByteNode};
