///
/// # Ink Paths
///
/// A stroke is recorded as a list of path elements. Bounds are taken over
/// every element point, control points included, so a curve's frame may be
/// larger than the curve itself.
///

use crate::geometry::{Point, Rect};

pub const DEFAULT_LINE_WIDTH: f64 = 3.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PathElement {
    MoveTo(Point),
    LineTo(Point),
    QuadCurveTo { to: Point, control: Point },
}

impl PathElement {
    pub fn end_point(&self) -> Point {
        match *self {
            PathElement::MoveTo(p) | PathElement::LineTo(p) => p,
            PathElement::QuadCurveTo { to, .. } => to,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct InkPath {
    elements: Vec<PathElement>,
    pub line_width: f64,
}

impl Default for InkPath {
    fn default() -> Self {
        Self::new(DEFAULT_LINE_WIDTH)
    }
}

impl InkPath {
    pub fn new(line_width: f64) -> Self {
        Self {
            elements: Vec::new(),
            line_width,
        }
    }

    /// A polyline through `points`
    pub fn polyline(points: &[Point], line_width: f64) -> Self {
        let mut path = Self::new(line_width);
        if let Some((first, rest)) = points.split_first() {
            path.move_to(*first);
            for p in rest {
                path.line_to(*p);
            }
        }
        path
    }

    pub fn move_to(&mut self, point: Point) {
        self.elements.push(PathElement::MoveTo(point));
    }

    pub fn line_to(&mut self, point: Point) {
        self.elements.push(PathElement::LineTo(point));
    }

    pub fn quad_curve_to(&mut self, to: Point, control: Point) {
        self.elements.push(PathElement::QuadCurveTo { to, control });
    }

    pub fn elements(&self) -> &[PathElement] {
        &self.elements
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// End point of the last element
    pub fn current_point(&self) -> Option<Point> {
        self.elements.last().map(PathElement::end_point)
    }

    /// Every element point in drawing order, control point before end point
    pub fn points(&self) -> Vec<Point> {
        let mut points = Vec::with_capacity(self.elements.len() * 2);
        for element in &self.elements {
            match *element {
                PathElement::MoveTo(p) | PathElement::LineTo(p) => points.push(p),
                PathElement::QuadCurveTo { to, control } => {
                    points.push(control);
                    points.push(to);
                }
            }
        }
        points
    }

    /// Bounding box of `points()`, zero rect for an empty path
    pub fn bounds(&self) -> Rect {
        Rect::from_points(self.points()).unwrap_or(Rect::ZERO)
    }

    pub fn append(&mut self, other: &InkPath) {
        self.elements.extend_from_slice(&other.elements);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_bounds() {
        let path = InkPath::polyline(&[Point::new(25.0, 25.0), Point::new(125.0, 125.0)], 3.0);
        assert_eq!(path.bounds(), Rect::new(25.0, 25.0, 100.0, 100.0));
        assert_eq!(path.current_point(), Some(Point::new(125.0, 125.0)));
    }

    #[test]
    fn test_points_include_control_points() {
        let mut path = InkPath::default();
        path.move_to(Point::new(0.0, 0.0));
        path.quad_curve_to(Point::new(10.0, 0.0), Point::new(5.0, -8.0));

        assert_eq!(
            path.points(),
            vec![Point::new(0.0, 0.0), Point::new(5.0, -8.0), Point::new(10.0, 0.0)]
        );
        assert_eq!(path.bounds(), Rect::new(0.0, -8.0, 10.0, 8.0));
    }

    #[test]
    fn test_empty_path() {
        let path = InkPath::default();
        assert!(path.is_empty());
        assert_eq!(path.current_point(), None);
        assert_eq!(path.bounds(), Rect::ZERO);
        assert_eq!(path.line_width, DEFAULT_LINE_WIDTH);
    }

    #[test]
    fn test_append() {
        let mut a = InkPath::polyline(&[Point::new(0.0, 0.0), Point::new(1.0, 1.0)], 3.0);
        let b = InkPath::polyline(&[Point::new(5.0, 5.0), Point::new(6.0, 9.0)], 3.0);
        a.append(&b);

        assert_eq!(a.elements().len(), 4);
        assert_eq!(a.bounds(), Rect::new(0.0, 0.0, 6.0, 9.0));
    }
}
