///
/// # Ink Manager
///
/// `MathInkManager` owns the ink history of one canvas. It captures strokes
/// from touch input, keeps an undo/redo cursor over the history, hands the
/// ink to a recognizer and keeps the terminal nodes the recognizer reports.
/// Users can then select, retype or erase those nodes.
///
/// ## History
///
/// `ink()` is the history up to the cursor. Undo and redo move the cursor.
/// Recording new ink (a stroke, a retyped character, an erased node, a
/// scratch-out) discards everything past the cursor first, together with
/// the nodes that covered the discarded ink.
///
/// ## Selection
///
/// Tapping selects the node whose ink frame contains the point. When several
/// frames overlap the point, repeated taps rotate through them in node
/// order.
///
/// ## Notifications
///
/// An optional `InkManagerObserver` hears about history changes, loads,
/// extracted LaTeX, scratched-out strokes and failures. `process` also
/// returns its outcome directly.
///

use std::collections::BTreeSet;

use smallvec::SmallVec;
use tracing::{debug, trace, warn};

use crate::config::ManagerConfig;
use crate::errors::InkError;
use crate::geometry::{Point, Rect};
use crate::ink::{CharacterInk, Ink, InkPayload, RemovedInk};
use crate::node::{Node, TerminalNode};
use crate::parser::MathInkParser;
use crate::path::InkPath;

pub trait InkManagerObserver {
    fn did_extract_latex(&mut self, _latex: &str) {}

    fn did_fail(&mut self, _error: &InkError) {}

    fn did_update_history(&mut self, _can_undo: bool, _can_redo: bool) {}

    /// The recognizer erased strokes; `frame` needs redrawing
    fn did_scratch_out(&mut self, _frame: Rect) {}

    fn did_load(&mut self, _ink: &[Ink]) {}
}

pub struct MathInkManager {
    line_width: f64,
    buffer: Option<InkPath>,
    cache: Vec<Ink>,
    ink_index: usize,
    nodes: Vec<TerminalNode>,
    selected: Option<usize>,
    parser: Option<Box<dyn MathInkParser>>,
    observer: Option<Box<dyn InkManagerObserver>>,
}

impl Default for MathInkManager {
    fn default() -> Self {
        Self::new(ManagerConfig::default())
    }
}

impl MathInkManager {
    pub fn new(config: ManagerConfig) -> Self {
        Self {
            line_width: config.line_width,
            buffer: None,
            cache: Vec::new(),
            ink_index: 0,
            nodes: Vec::new(),
            selected: None,
            parser: None,
            observer: None,
        }
    }

    pub fn set_parser(&mut self, parser: Box<dyn MathInkParser>) {
        self.parser = Some(parser);
    }

    pub fn set_observer(&mut self, observer: Box<dyn InkManagerObserver>) {
        self.observer = Some(observer);
    }

    pub fn line_width(&self) -> f64 {
        self.line_width
    }

    /// The stroke currently being drawn
    pub fn buffer(&self) -> Option<&InkPath> {
        self.buffer.as_ref()
    }

    pub fn ink(&self) -> &[Ink] {
        &self.cache[..self.ink_index]
    }

    /// Active ink that is drawn: erasures and the entries a later edit
    /// stands in for are left out
    pub fn visible_ink(&self) -> Vec<&Ink> {
        let ink = self.ink();
        let hidden: BTreeSet<usize> = ink
            .iter()
            .filter_map(Ink::removed_indexes)
            .flatten()
            .copied()
            .collect();

        ink.iter()
            .enumerate()
            .filter(|(i, entry)| !hidden.contains(i) && !matches!(entry, Ink::Removed(_)))
            .map(|(_, entry)| entry)
            .collect()
    }

    pub fn can_undo(&self) -> bool {
        self.ink_index > 0
    }

    pub fn can_redo(&self) -> bool {
        self.ink_index < self.cache.len()
    }

    pub fn nodes(&self) -> &[TerminalNode] {
        &self.nodes
    }

    pub fn selected_index(&self) -> Option<usize> {
        self.selected
    }

    /// Single-character candidates of the selected node
    pub fn selected_candidates(&self) -> Option<Vec<&str>> {
        let node = self.nodes.get(self.selected?)?;
        Some(
            node.candidates
                .iter()
                .map(String::as_str)
                .filter(|candidate| candidate.chars().count() == 1)
                .collect(),
        )
    }

    /// Replace history and nodes wholesale, e.g. when restoring a session
    pub fn load(&mut self, ink: Vec<Ink>, nodes: Vec<TerminalNode>) -> Result<(), InkError> {
        validate_nodes(&nodes, ink.len())?;

        debug!(ink = ink.len(), nodes = nodes.len(), "Loaded ink");
        self.buffer = None;
        self.ink_index = ink.len();
        self.cache = ink;
        self.nodes = nodes;
        self.selected = None;
        if let Some(observer) = self.observer.as_mut() {
            observer.did_load(&self.cache);
        }
        self.notify_history();
        Ok(())
    }

    // Stroke input

    /// Feed one touch sample; returns the rect that needs redrawing.
    ///
    /// The first sample of a stroke opens the buffer at `previous`. Each
    /// sample curves to the midpoint of `previous` and `point`; the last one
    /// curves all the way to `point` and commits the stroke to history.
    pub fn input_stream(&mut self, point: Point, previous: Point, is_last: bool) -> Rect {
        let line_width = self.line_width;
        let buffer = self.buffer.get_or_insert_with(|| {
            trace!(x = previous.x, y = previous.y, "Stroke started");
            let mut path = InkPath::new(line_width);
            path.move_to(previous);
            path
        });

        let buffer_point = buffer.current_point().unwrap_or(previous);

        if is_last {
            buffer.quad_curve_to(point, previous);
            if let Some(path) = self.buffer.take() {
                debug!(index = self.ink_index, "Stroke committed");
                self.push_ink(Ink::stroke(path));
            }
        } else {
            buffer.quad_curve_to(Point::midpoint(point, previous), previous);
        }

        self.notify_history();

        Rect::from_min_max(
            Point::new(
                point.x.min(buffer_point.x) - line_width * 2.0,
                point.y.min(buffer_point.y) - line_width * 2.0,
            ),
            Point::new(
                point.x.max(buffer_point.x) + line_width * 4.0,
                point.y.max(buffer_point.y) + line_width * 4.0,
            ),
        )
    }

    pub fn undo(&mut self) -> Option<Rect> {
        if !self.can_undo() {
            return None;
        }
        self.ink_index -= 1;
        self.selected = None;
        debug!(index = self.ink_index, "Undo");
        self.notify_history();

        Some(self.cache[self.ink_index].frame().outset(self.line_width * 2.0))
    }

    pub fn redo(&mut self) -> Option<Rect> {
        if !self.can_redo() {
            return None;
        }
        self.ink_index += 1;
        self.selected = None;
        debug!(index = self.ink_index, "Redo");
        self.notify_history();

        Some(self.cache[self.ink_index - 1].frame().outset(self.line_width * 2.0))
    }

    // Recognition

    /// Send the current ink to the parser and adopt its leaf nodes.
    ///
    /// Returns the extracted LaTeX. Failures leave the nodes untouched and
    /// are reported to the observer as well as returned.
    pub fn process(&mut self) -> Result<String, InkError> {
        let result = self.run_parser();

        match &result {
            Ok(latex) => {
                debug!(nodes = self.nodes.len(), latex = %latex, "Parsed ink");
                if let Some(observer) = self.observer.as_mut() {
                    observer.did_extract_latex(latex);
                }
            }
            Err(error) => {
                warn!(%error, "Failed to parse ink");
                if let Some(observer) = self.observer.as_mut() {
                    observer.did_fail(error);
                }
            }
        }

        result
    }

    fn run_parser(&mut self) -> Result<String, InkError> {
        let payload: Vec<InkPayload> = self.ink().iter().map(Ink::payload).collect();
        let ink_len = payload.len();

        let parser = self.parser.as_mut().ok_or(InkError::ParserMissing)?;
        parser.add_ink(payload);
        let parsed = parser.parse()?;

        let nodes = parsed
            .leaf_nodes
            .iter()
            .map(TerminalNode::try_from)
            .collect::<Result<Vec<_>, _>>()?;
        validate_nodes(&nodes, ink_len)?;

        let scratched = parsed
            .removed_strokes
            .iter()
            .map(|index| usize::try_from(index).map_err(|_| InkError::NegativeIndex { index }))
            .collect::<Result<BTreeSet<_>, _>>()?;
        if let Some(&index) = scratched.iter().find(|&&i| i >= ink_len) {
            return Err(InkError::IndexOutOfRange { index, len: ink_len });
        }

        self.nodes = nodes;
        self.selected = None;

        if !scratched.is_empty() {
            self.scratch_out(scratched);
        }

        Ok(parsed.latex)
    }

    fn scratch_out(&mut self, indexes: BTreeSet<usize>) {
        let covered: Vec<usize> = indexes.iter().copied().collect();
        let path = self.combined_path(&covered);
        let frame = path.bounds().outset(self.line_width * 2.0);

        debug!(strokes = ?covered, "Scratched out");
        self.push_ink(Ink::Removed(RemovedInk { indexes, path }));

        if let Some(observer) = self.observer.as_mut() {
            observer.did_scratch_out(frame);
        }
        self.notify_history();
    }

    // Node selection and editing

    /// Select the node under `point`, or clear the selection for `None`
    pub fn select_node(&mut self, point: Option<Point>) -> Option<Node> {
        let Some(point) = point else {
            self.selected = None;
            return None;
        };

        let hits: SmallVec<[usize; 4]> = (0..self.nodes.len())
            .filter(|&i| self.node_frame(i).is_some_and(|frame| frame.contains(point)))
            .collect();

        self.selected = match hits.len() {
            0 => None,
            1 => Some(hits[0]),
            _ => match self.selected.and_then(|current| hits.iter().position(|&h| h == current)) {
                Some(i) if i + 1 < hits.len() => Some(hits[i + 1]),
                _ => Some(hits[0]),
            },
        };

        trace!(x = point.x, y = point.y, hits = hits.len(), selected = ?self.selected, "Select node");
        self.node_at(self.selected?)
    }

    /// Erase the selected node's ink and drop the node
    pub fn remove_selected_node(&mut self) -> Option<Node> {
        let node = self.node_at(self.selected?)?;

        // Positions shift when redo history goes; read the selection after
        self.discard_redo();
        let index = self.selected?;

        let removed = self.nodes.remove(index);
        let path = self.combined_path(&removed.indexes);
        self.push_ink(Ink::Removed(RemovedInk {
            indexes: removed.indexes.iter().copied().collect(),
            path,
        }));
        self.selected = None;
        debug!(node = %removed, "Removed node");
        self.notify_history();

        Some(node)
    }

    /// Retype the selected node as `character`; returns the old and new node
    pub fn replace_selected_node(&mut self, character: &str) -> Result<Option<(Node, Node)>, InkError> {
        if character.chars().count() != 1 {
            return Err(InkError::InvalidReplacement {
                input: character.to_string(),
            });
        }

        let Some(old) = self.selected.and_then(|index| self.node_at(index)) else {
            return Ok(None);
        };

        self.discard_redo();
        let Some(index) = self.selected else {
            return Ok(None);
        };

        let indexes = self.nodes[index].indexes.clone();
        let path = self.combined_path(&indexes);
        self.push_ink(Ink::Character(CharacterInk {
            character: character.to_string(),
            path,
            indexes: indexes.iter().copied().collect(),
        }));
        self.nodes[index] = TerminalNode::character(vec![self.ink_index - 1], character);
        self.selected = None;
        debug!(node = %self.nodes[index], "Replaced node");
        self.notify_history();

        Ok(self.node_at(index).map(|new| (old, new)))
    }

    fn node_frame(&self, index: usize) -> Option<Rect> {
        let node = self.nodes.get(index)?;
        let ink = self.ink();
        let mut frames = node.indexes.iter().map(|&i| ink.get(i).map(Ink::frame));

        let first = frames.next()??;
        frames.try_fold(first, |acc, frame| frame.map(|f| acc.union(&f)))
    }

    fn node_at(&self, index: usize) -> Option<Node> {
        let frame = self.node_frame(index)?;
        let node = &self.nodes[index];

        Some(Node {
            ink: node.indexes.iter().map(|&i| self.cache[i].clone()).collect(),
            frame,
            candidates: node.candidates.clone(),
        })
    }

    fn combined_path(&self, indexes: &[usize]) -> InkPath {
        let mut path = InkPath::new(self.line_width);
        for entry in indexes.iter().filter_map(|&i| self.ink().get(i)) {
            path.append(entry.path());
        }
        path
    }

    fn push_ink(&mut self, ink: Ink) {
        self.discard_redo();
        self.cache.push(ink);
        self.ink_index += 1;
    }

    /// Drop history past the cursor and every node that covers it. A
    /// surviving selection follows its node to its new position.
    fn discard_redo(&mut self) {
        if !self.can_redo() {
            return;
        }

        let cursor = self.ink_index;
        let mut kept = Vec::with_capacity(self.nodes.len());
        let mut selected = None;

        for (i, node) in std::mem::take(&mut self.nodes).into_iter().enumerate() {
            if node.indexes.iter().all(|&index| index < cursor) {
                if self.selected == Some(i) {
                    selected = Some(kept.len());
                }
                kept.push(node);
            }
        }

        debug!(
            discarded = self.cache.len() - cursor,
            kept = kept.len(),
            "Discarded redo history"
        );
        self.cache.truncate(cursor);
        self.nodes = kept;
        self.selected = selected;
    }

    fn notify_history(&mut self) {
        let (can_undo, can_redo) = (self.can_undo(), self.can_redo());
        if let Some(observer) = self.observer.as_mut() {
            observer.did_update_history(can_undo, can_redo);
        }
    }
}

fn validate_nodes(nodes: &[TerminalNode], len: usize) -> Result<(), InkError> {
    for node in nodes {
        if let Some(&index) = node.indexes.iter().find(|&&i| i >= len) {
            return Err(InkError::IndexOutOfRange { index, len });
        }
    }
    Ok(())
}
