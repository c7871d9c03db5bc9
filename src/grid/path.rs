//! # Travel Path Module
//!
//! The output of a path query: an ordered sequence of scene points together
//! with the derived (direction, distance) steps an actor consumes tick by
//! tick, plus the start-side clipping that splices the mover's exact feet
//! coordinate into the path.

use crate::config::GEOMETRY_EPSILON;
use crate::direction::{Compass8, Direction, DirectionMode};
use crate::geometry::{ray_line_intersection, within_segment_span, Point};
use serde::{Deserialize, Serialize};

/// One step of a travel path: face `direction`, move `distance` pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PathStep {
    pub direction: Direction,
    pub distance: f64,
}

/// An ordered travel path through the grid.
///
/// An empty path is the "no movement" answer: the endpoints could not be
/// resolved, or no passable route exists. Callers treat it as a no-op, never
/// as an error.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TravelPath {
    points: Vec<Point>,
    steps: Vec<PathStep>,
}

impl TravelPath {
    /// The empty "no movement" path.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Builds a path from a point sequence, deriving one step per
    /// consecutive pair. Coincident consecutive points are dropped rather
    /// than producing zero-length steps.
    pub fn from_points(points: Vec<Point>) -> Self {
        let mut deduped: Vec<Point> = Vec::with_capacity(points.len());
        for p in points {
            if deduped.last().is_some_and(|last| last.approx_eq(p)) {
                continue;
            }
            deduped.push(p);
        }
        if deduped.len() < 2 {
            return Self::empty();
        }
        let steps = deduped
            .windows(2)
            .map(|pair| PathStep {
                direction: Direction::nearest(pair[0], pair[1], DirectionMode::Sixteen),
                distance: pair[0].distance_to(pair[1]),
            })
            .collect();
        Self {
            points: deduped,
            steps,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// The point sequence, starting at the mover's feet coordinate.
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    /// The (direction, distance) steps, one per consecutive point pair.
    pub fn steps(&self) -> &[PathStep] {
        &self.steps
    }

    /// Total walk distance in pixels.
    pub fn total_distance(&self) -> f64 {
        self.steps.iter().map(|s| s.distance).sum()
    }

    /// The final point of the path, if any.
    pub fn destination(&self) -> Option<Point> {
        self.points.last().copied()
    }
}

/// Clips the start of a cell-center point sequence to the mover's exact feet
/// coordinate.
///
/// The straight line through the first segment is intersected with each of
/// the 8 canonical direction rays cast from the feet; the nearest
/// intersection that lands on the segment a nonzero distance away is spliced
/// in, so the path runs feet -> intersection -> second center. When no such
/// intersection exists (degenerate, collinear, or single-point sequences)
/// the feet coordinate simply becomes the first point.
pub(crate) fn clip_start(feet: Point, points: &mut Vec<Point>) {
    if points.is_empty() {
        return;
    }
    if points.len() == 1 {
        if !feet.approx_eq(points[0]) {
            points.insert(0, feet);
        }
        return;
    }

    let first = points[0];
    let second = points[1];
    let mut best: Option<(Point, f64)> = None;
    for compass in Compass8::ALL {
        let ray = compass.to_direction().vector();
        if let Some(hit) = ray_line_intersection(feet, ray, first, second) {
            if !within_segment_span(hit, first, second) {
                continue;
            }
            let distance = feet.distance_to(hit);
            if distance <= GEOMETRY_EPSILON {
                continue;
            }
            if best.is_none_or(|(_, d)| distance < d) {
                best = Some((hit, distance));
            }
        }
    }

    match best {
        Some((hit, _)) => {
            points[0] = feet;
            if !hit.approx_eq(second) && !hit.approx_eq(feet) {
                points.insert(1, hit);
            }
        }
        None => {
            points[0] = feet;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_points_derives_steps() {
        let path = TravelPath::from_points(vec![
            Point::new(0.0, 0.0),
            Point::new(0.0, 10.0),
            Point::new(10.0, 10.0),
        ]);
        assert_eq!(path.steps().len(), 2);
        assert_eq!(path.steps()[0].direction, Direction::South);
        assert_eq!(path.steps()[0].distance, 10.0);
        assert_eq!(path.steps()[1].direction, Direction::East);
        assert_eq!(path.total_distance(), 20.0);
    }

    #[test]
    fn test_from_points_drops_duplicates() {
        let path = TravelPath::from_points(vec![
            Point::new(0.0, 0.0),
            Point::new(0.0, 0.0),
            Point::new(5.0, 0.0),
        ]);
        assert_eq!(path.points().len(), 2);
        assert_eq!(path.steps().len(), 1);
    }

    #[test]
    fn test_single_point_is_empty_path() {
        let path = TravelPath::from_points(vec![Point::new(1.0, 1.0)]);
        assert!(path.is_empty());
        assert!(path.destination().is_none());
    }

    #[test]
    fn test_clip_splices_intersection() {
        // First segment runs straight east along y = 0; feet sit south of
        // the line, so the northeast/northwest rays strike it.
        let feet = Point::new(10.0, 10.0);
        let mut points = vec![
            Point::new(0.0, 0.0),
            Point::new(40.0, 0.0),
            Point::new(80.0, 0.0),
        ];
        clip_start(feet, &mut points);
        assert_eq!(points[0], feet);
        assert_eq!(points.len(), 4);
        // The nearest canonical ray to hit within the segment is North
        // (straight up from the feet).
        assert!(points[1].approx_eq(Point::new(10.0, 0.0)));
    }

    #[test]
    fn test_clip_replaces_first_point_when_degenerate() {
        // Feet on the segment line itself: every canonical ray is either
        // collinear or leaves immediately, so no splice happens.
        let feet = Point::new(20.0, 0.0);
        let mut points = vec![Point::new(0.0, 0.0), Point::new(40.0, 0.0)];
        clip_start(feet, &mut points);
        assert_eq!(points, vec![feet, Point::new(40.0, 0.0)]);
    }

    #[test]
    fn test_clip_single_point_prepends_feet() {
        let feet = Point::new(5.0, 5.0);
        let mut points = vec![Point::new(32.0, 16.0)];
        clip_start(feet, &mut points);
        assert_eq!(points, vec![feet, Point::new(32.0, 16.0)]);
    }
}
