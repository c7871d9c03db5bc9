//! # Geometry Module
//!
//! Scalar geometry shared by the grid and actor engines: world-pixel points
//! and rectangles, the diamond shape inscribed in a cell's bounding box, and
//! the ray/line intersection used to clip a travel path to exact click and
//! feet coordinates.
//!
//! Coordinates are screen-style: x grows rightward, y grows downward.

use crate::config::GEOMETRY_EPSILON;
use serde::{Deserialize, Serialize};

/// A 2D point in world-pixel coordinates.
///
/// # Examples
///
/// ```
/// use duskhold::Point;
///
/// let a = Point::new(0.0, 0.0);
/// let b = Point::new(3.0, 4.0);
/// assert_eq!(a.distance_to(b), 5.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    /// Creates a new point with the given coordinates.
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another point.
    pub fn distance_to(self, other: Point) -> f64 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        (dx * dx + dy * dy).sqrt()
    }

    /// Returns this point translated by the given deltas.
    pub fn translated(self, dx: f64, dy: f64) -> Point {
        Point::new(self.x + dx, self.y + dy)
    }

    /// Whether another point coincides with this one within the geometric
    /// tolerance.
    pub fn approx_eq(self, other: Point) -> bool {
        (self.x - other.x).abs() < GEOMETRY_EPSILON && (self.y - other.y).abs() < GEOMETRY_EPSILON
    }
}

/// An axis-aligned rectangle in world-pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    /// Creates a rectangle from its top-left corner and extents.
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn left(&self) -> f64 {
        self.x
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn top(&self) -> f64 {
        self.y
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    /// Center of the rectangle.
    pub fn center(&self) -> Point {
        Point::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// Whether the point lies inside the rectangle (boundary inclusive).
    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.x && p.x <= self.right() && p.y >= self.y && p.y <= self.bottom()
    }
}

/// The diamond inscribed in a cell's bounding rectangle: its vertices are the
/// midpoints of the rectangle's four edges.
///
/// Cells hit-test against this shape rather than their bounding box, so that
/// clicks in a rectangle's corners fall through to the diagonal neighbor
/// whose diamond actually covers them.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Diamond {
    center: Point,
    half_width: f64,
    half_height: f64,
}

impl Diamond {
    /// The diamond inscribed in the given bounding rectangle.
    pub fn inscribed(rect: Rect) -> Self {
        Self {
            center: rect.center(),
            half_width: rect.width / 2.0,
            half_height: rect.height / 2.0,
        }
    }

    pub fn center(&self) -> Point {
        self.center
    }

    /// Point-in-diamond test, boundary inclusive.
    ///
    /// The diamond is the L1 ball `|dx|/hw + |dy|/hh <= 1` around the cell
    /// center, which is exactly the midpoint polygon of the bounding box.
    pub fn contains(&self, p: Point) -> bool {
        if self.half_width <= 0.0 || self.half_height <= 0.0 {
            return false;
        }
        let dx = (p.x - self.center.x).abs() / self.half_width;
        let dy = (p.y - self.center.y).abs() / self.half_height;
        dx + dy <= 1.0 + GEOMETRY_EPSILON
    }

    /// The four vertices in top, right, bottom, left order.
    pub fn vertices(&self) -> [Point; 4] {
        let c = self.center;
        [
            Point::new(c.x, c.y - self.half_height),
            Point::new(c.x + self.half_width, c.y),
            Point::new(c.x, c.y + self.half_height),
            Point::new(c.x - self.half_width, c.y),
        ]
    }
}

/// Intersection of the ray `origin + t * dir` (`t >= 0`) with the infinite
/// line through `a` and `b`, solved with the line's slope/intercept form.
///
/// Returns `None` when the ray is parallel to the line, when the segment is
/// degenerate, or when the intersection lies behind the ray origin. The
/// collinear case also returns `None`: an infinite overlap has no single
/// intersection point.
pub fn ray_line_intersection(origin: Point, dir: (f64, f64), a: Point, b: Point) -> Option<Point> {
    let (dx, dy) = dir;
    if a.approx_eq(b) {
        return None;
    }
    if (b.x - a.x).abs() < GEOMETRY_EPSILON {
        // Vertical line: x is fixed at a.x.
        if dx.abs() < GEOMETRY_EPSILON {
            return None;
        }
        let t = (a.x - origin.x) / dx;
        if t < -GEOMETRY_EPSILON {
            return None;
        }
        return Some(Point::new(a.x, origin.y + t * dy));
    }
    let m = (b.y - a.y) / (b.x - a.x);
    let c = a.y - m * a.x;
    let denom = dy - m * dx;
    if denom.abs() < GEOMETRY_EPSILON {
        return None;
    }
    let t = (m * origin.x + c - origin.y) / denom;
    if t < -GEOMETRY_EPSILON {
        return None;
    }
    Some(Point::new(origin.x + t * dx, origin.y + t * dy))
}

/// Whether `p` lies within the axis-aligned span of the segment `a`..`b`,
/// with tolerance. Used to confirm that a line intersection actually falls on
/// the segment.
pub fn within_segment_span(p: Point, a: Point, b: Point) -> bool {
    let (min_x, max_x) = if a.x <= b.x { (a.x, b.x) } else { (b.x, a.x) };
    let (min_y, max_y) = if a.y <= b.y { (a.y, b.y) } else { (b.y, a.y) };
    p.x >= min_x - GEOMETRY_EPSILON
        && p.x <= max_x + GEOMETRY_EPSILON
        && p.y >= min_y - GEOMETRY_EPSILON
        && p.y <= max_y + GEOMETRY_EPSILON
}
