//! # Scene Module
//!
//! Interfaces to the excluded collaborators: the rendering/scene layer that
//! owns clickable level objects, and the terrain layer that owns pillar
//! visuals. The grid and actor engines only ever see these narrow
//! capabilities, never the scene graph itself.

use crate::config::FEET_OFFSET;
use crate::geometry::{Point, Rect};
use serde::{Deserialize, Serialize};

/// Stable handle for a terrain pillar registered with a [`crate::Grid`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PillarId(pub usize);

/// Construction-time description of one terrain pillar.
///
/// The bounding box is in scene coordinates; the grid matches it against
/// cell boxes by left/right/bottom edges, so a pillar taller than a cell
/// still lands on the cell whose floor it stands on.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PillarSeed {
    pub bounding_box: Rect,
    pub passable: bool,
}

impl PillarSeed {
    pub fn new(bounding_box: Rect, passable: bool) -> Self {
        Self {
            bounding_box,
            passable,
        }
    }
}

/// A clickable object in the scene: a character, monster, item, or pillar.
///
/// Implemented by the scene layer; the engines use it to resolve click
/// targets into grid endpoints and to decide whether reaching a target
/// should start an attack.
pub trait LevelObject {
    /// The object's bounding rectangle in its local coordinates.
    fn bounding_rect(&self) -> Rect;

    /// Maps a point from the object's local coordinates to scene
    /// coordinates.
    fn map_to_scene(&self, p: Point) -> Point;

    /// The pillar this object is, if it is one. Pillar targets resolve to
    /// grid cells directly instead of through point lookup.
    fn pillar_id(&self) -> Option<PillarId> {
        None
    }

    /// Whether walking up to this object should transition the mover into
    /// its attacking state.
    fn can_be_attacked(&self) -> bool {
        false
    }

    /// The object's approximate foot position in scene coordinates: the
    /// horizontal center of its bounding rect, [`FEET_OFFSET`] pixels above
    /// the bottom edge.
    fn feet_scene_point(&self) -> Point {
        let r = self.bounding_rect();
        self.map_to_scene(Point::new(r.center().x, r.bottom() - FEET_OFFSET))
    }
}

/// Side-effect sink for grid-driven scene updates.
///
/// The grid highlights the pillars along the most recent path (a visual
/// debug aid) and assigns draw order to pillars from their cell position;
/// both effects land here so the engine never touches the scene graph.
pub trait SceneHooks {
    /// A pillar's highlight state changed.
    fn pillar_highlighted(&mut self, pillar: PillarId, highlighted: bool);

    /// A pillar was bound to a cell and assigned its draw-order value.
    fn pillar_z_assigned(&mut self, pillar: PillarId, z: i32);
}

/// Hook sink that ignores every notification. Useful headless and in tests.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopSceneHooks;

impl SceneHooks for NoopSceneHooks {
    fn pillar_highlighted(&mut self, _pillar: PillarId, _highlighted: bool) {}

    fn pillar_z_assigned(&mut self, _pillar: PillarId, _z: i32) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    struct StaticObject {
        rect: Rect,
        offset: Point,
    }

    impl LevelObject for StaticObject {
        fn bounding_rect(&self) -> Rect {
            self.rect
        }

        fn map_to_scene(&self, p: Point) -> Point {
            p.translated(self.offset.x, self.offset.y)
        }
    }

    #[test]
    fn test_feet_point_sits_above_bottom_center() {
        let obj = StaticObject {
            rect: Rect::new(0.0, 0.0, 40.0, 100.0),
            offset: Point::new(10.0, 5.0),
        };
        let feet = obj.feet_scene_point();
        assert_eq!(feet, Point::new(30.0, 100.0 - FEET_OFFSET + 5.0));
    }
}
