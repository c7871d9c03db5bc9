//! # Grid Element Module
//!
//! One diamond-shaped cell of the world grid: its spatial identity (bounding
//! box, diamond hit shape, draw order), its 8-way adjacency, the terrain
//! pillar bound to it, and the set of objects currently blocking it.
//!
//! Elements live in an arena owned by [`crate::Grid`] and are referred to by
//! [`ElementId`] indices; adjacency is an index array, so neighbor and
//! visited checks are integer comparisons rather than pointer identity.

use crate::direction::Compass8;
use crate::geometry::{Diamond, Point, Rect};
use crate::scene::PillarId;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use uuid::Uuid;

/// Stable index of a [`GridElement`] in its grid's arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ElementId(pub usize);

/// One cell of the isometric grid.
///
/// All elements for a level are allocated once when the grid is built and
/// live for the lifetime of the grid.
#[derive(Debug, Clone)]
pub struct GridElement {
    bounding_box: Rect,
    diamond: Diamond,
    z: i32,
    pillar: Option<PillarId>,
    adjacent: [Option<ElementId>; 8],
    blocking_objects: HashSet<Uuid>,
}

impl GridElement {
    /// Creates an element from its bounding box and draw-order value. The
    /// diamond hit shape is derived from the box at the same time.
    pub fn new(bounding_box: Rect, z: i32) -> Self {
        Self {
            bounding_box,
            diamond: Diamond::inscribed(bounding_box),
            z,
            pillar: None,
            adjacent: [None; 8],
            blocking_objects: HashSet::new(),
        }
    }

    /// Redefines the cell's rectangle, re-deriving the diamond hit shape.
    pub fn set_bounding_box(&mut self, bounding_box: Rect) {
        self.bounding_box = bounding_box;
        self.diamond = Diamond::inscribed(bounding_box);
    }

    pub fn bounding_box(&self) -> Rect {
        self.bounding_box
    }

    /// The cell's center, which doubles as the diamond's center.
    pub fn center(&self) -> Point {
        self.diamond.center()
    }

    /// The cell's draw-order value, derived from its grid position.
    pub fn z(&self) -> i32 {
        self.z
    }

    /// Point-in-cell test against the diamond shape, not the bounding box,
    /// so clicks in the box's corners fall through to a diagonal neighbor.
    pub fn contains_point(&self, p: Point) -> bool {
        self.diamond.contains(p)
    }

    /// Records the neighboring element in the given direction. Absence
    /// signals a grid boundary.
    pub fn set_adjacent(&mut self, direction: Compass8, element: Option<ElementId>) {
        self.adjacent[direction.index()] = element;
    }

    /// The neighboring element in the given direction, if any.
    pub fn adjacent(&self, direction: Compass8) -> Option<ElementId> {
        self.adjacent[direction.index()]
    }

    /// Binds the terrain pillar occupying this cell.
    pub fn set_pillar(&mut self, pillar: PillarId) {
        self.pillar = Some(pillar);
    }

    /// The terrain pillar occupying this cell. `None` marks open area with
    /// no terrain, which the pathfinder treats as impassable.
    pub fn pillar(&self) -> Option<PillarId> {
        self.pillar
    }

    /// Registers an object as blocking this cell. Maintained by the scene
    /// layer on enter/leave.
    pub fn add_blocking_object(&mut self, object: Uuid) {
        self.blocking_objects.insert(object);
    }

    /// Removes an object from the blocking set.
    pub fn remove_blocking_object(&mut self, object: &Uuid) {
        self.blocking_objects.remove(object);
    }

    /// Whether the given object is currently blocking this cell.
    pub fn contains_blocking_object(&self, object: &Uuid) -> bool {
        self.blocking_objects.contains(object)
    }

    /// Whether any object is currently blocking this cell.
    pub fn is_blocked(&self) -> bool {
        !self.blocking_objects.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn element() -> GridElement {
        GridElement::new(Rect::new(0.0, 0.0, 64.0, 32.0), 3)
    }

    #[test]
    fn test_contains_uses_diamond_not_box() {
        let e = element();
        assert!(e.contains_point(Point::new(32.0, 16.0)));
        // Bounding-box corner, outside the diamond.
        assert!(!e.contains_point(Point::new(2.0, 2.0)));
        assert!(e.bounding_box().contains(Point::new(2.0, 2.0)));
    }

    #[test]
    fn test_adjacency_defaults_to_boundary() {
        let mut e = element();
        for dir in Compass8::ALL {
            assert_eq!(e.adjacent(dir), None);
        }
        e.set_adjacent(Compass8::Southeast, Some(ElementId(7)));
        assert_eq!(e.adjacent(Compass8::Southeast), Some(ElementId(7)));
        assert_eq!(e.adjacent(Compass8::Northwest), None);
    }

    #[test]
    fn test_blocking_object_tracking() {
        let mut e = element();
        let id = Uuid::new_v4();
        assert!(!e.contains_blocking_object(&id));
        e.add_blocking_object(id);
        assert!(e.contains_blocking_object(&id));
        assert!(e.is_blocked());
        e.remove_blocking_object(&id);
        assert!(!e.is_blocked());
    }
}
