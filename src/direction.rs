//! # Direction Module
//!
//! The discrete direction model: a 16-way compass used for sprite facing and
//! path steps, and the 8-way compass used for grid adjacency.
//!
//! Directions are ordered clockwise from South in 22.5-degree increments,
//! matching the sprite sheets of the original client (`South = 0` through
//! `SouthSoutheast = 15`). Screen coordinates have an inverted y axis, which
//! the angle classifier compensates for.

use crate::geometry::Point;
use crate::{DuskholdError, DuskholdResult};
use serde::{Deserialize, Serialize};

/// Whether the classifier snaps to all 16 directions or only the 8 primary
/// ones (cardinals and intercardinals).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DirectionMode {
    Eight,
    Sixteen,
}

/// One of 16 discrete facing directions, clockwise from South.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum Direction {
    South = 0,
    SouthSouthwest = 1,
    Southwest = 2,
    WestSouthwest = 3,
    West = 4,
    WestNorthwest = 5,
    Northwest = 6,
    NorthNorthwest = 7,
    North = 8,
    NorthNortheast = 9,
    Northeast = 10,
    EastNortheast = 11,
    East = 12,
    EastSoutheast = 13,
    Southeast = 14,
    SouthSoutheast = 15,
}

/// Degrees between adjacent discrete directions.
const STEP_DEGREES: f64 = 22.5;

/// Nudge applied before rounding so that exact half-step ties round up
/// (toward the next clockwise direction).
const TIE_EPSILON: f64 = 1e-9;

impl Direction {
    /// All 16 directions in enum order.
    pub const ALL: [Direction; 16] = [
        Direction::South,
        Direction::SouthSouthwest,
        Direction::Southwest,
        Direction::WestSouthwest,
        Direction::West,
        Direction::WestNorthwest,
        Direction::Northwest,
        Direction::NorthNorthwest,
        Direction::North,
        Direction::NorthNortheast,
        Direction::Northeast,
        Direction::EastNortheast,
        Direction::East,
        Direction::EastSoutheast,
        Direction::Southeast,
        Direction::SouthSoutheast,
    ];

    /// The direction's integer value, usable as an array index.
    pub fn index(self) -> usize {
        self as usize
    }

    /// The unit vector for this direction in screen coordinates (y down).
    ///
    /// Inverse of [`Direction::nearest`]: a point displaced along this
    /// vector classifies back to the same direction.
    pub fn vector(self) -> (f64, f64) {
        let theta = (-90.0 - self.index() as f64 * STEP_DEGREES).to_radians();
        (theta.cos(), -theta.sin())
    }

    /// Classifies the displacement `from -> to` to the nearest discrete
    /// direction.
    ///
    /// The continuous angle comes from `atan2` of the screen-space deltas
    /// with the inverted y axis compensated; exact ties between two
    /// directions round up (clockwise). A zero displacement classifies as
    /// South.
    ///
    /// # Examples
    ///
    /// ```
    /// use duskhold::{Direction, DirectionMode, Point};
    ///
    /// let origin = Point::new(0.0, 0.0);
    /// let below = Point::new(0.0, 10.0);
    /// assert_eq!(
    ///     Direction::nearest(origin, below, DirectionMode::Sixteen),
    ///     Direction::South
    /// );
    /// ```
    pub fn nearest(from: Point, to: Point, mode: DirectionMode) -> Direction {
        let dx = to.x - from.x;
        let dy = to.y - from.y;
        // Math-convention angle with the screen's inverted y folded in.
        let theta = (-dy).atan2(dx).to_degrees();
        let slot = (-90.0 - theta) / STEP_DEGREES;
        let index = match mode {
            DirectionMode::Sixteen => (slot + TIE_EPSILON).round().rem_euclid(16.0) as usize,
            DirectionMode::Eight => {
                let octant = (slot / 2.0 + TIE_EPSILON).round().rem_euclid(8.0) as usize;
                octant * 2
            }
        };
        Direction::ALL[index]
    }

    /// The display name of the direction.
    pub fn name(self) -> &'static str {
        match self {
            Direction::South => "South",
            Direction::SouthSouthwest => "SouthSouthwest",
            Direction::Southwest => "Southwest",
            Direction::WestSouthwest => "WestSouthwest",
            Direction::West => "West",
            Direction::WestNorthwest => "WestNorthwest",
            Direction::Northwest => "Northwest",
            Direction::NorthNorthwest => "NorthNorthwest",
            Direction::North => "North",
            Direction::NorthNortheast => "NorthNortheast",
            Direction::Northeast => "Northeast",
            Direction::EastNortheast => "EastNortheast",
            Direction::East => "East",
            Direction::EastSoutheast => "EastSoutheast",
            Direction::Southeast => "Southeast",
            Direction::SouthSoutheast => "SouthSoutheast",
        }
    }
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl TryFrom<u8> for Direction {
    type Error = DuskholdError;

    /// Converts a raw value to a direction, rejecting out-of-range input
    /// instead of aborting.
    fn try_from(value: u8) -> DuskholdResult<Self> {
        Direction::ALL
            .get(value as usize)
            .copied()
            .ok_or(DuskholdError::InvalidDirection(value))
    }
}

/// One of the 8 adjacency directions between grid cells.
///
/// Named for the screen-space direction of travel. Because the grid is
/// diamond-tessellated, grid-axis neighbors appear screen-diagonally: moving
/// to the next column is screen Southeast, the next row screen Southwest,
/// and both together screen South.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum Compass8 {
    North = 0,
    Northeast = 1,
    East = 2,
    Southeast = 3,
    South = 4,
    Southwest = 5,
    West = 6,
    Northwest = 7,
}

impl Compass8 {
    /// All 8 directions in enum order.
    pub const ALL: [Compass8; 8] = [
        Compass8::North,
        Compass8::Northeast,
        Compass8::East,
        Compass8::Southeast,
        Compass8::South,
        Compass8::Southwest,
        Compass8::West,
        Compass8::Northwest,
    ];

    /// The fixed order in which neighbors are examined during greedy path
    /// reconstruction; the first lowest-weight neighbor encountered in this
    /// order wins ties.
    pub const SCAN_ORDER: [Compass8; 8] = [
        Compass8::North,
        Compass8::Northwest,
        Compass8::Northeast,
        Compass8::West,
        Compass8::East,
        Compass8::Southwest,
        Compass8::Southeast,
        Compass8::South,
    ];

    /// The direction's integer value, usable as an array index.
    pub fn index(self) -> usize {
        self as usize
    }

    /// The opposite direction. Used to keep adjacency symmetric when the
    /// grid builder wires both ends of an edge.
    pub fn opposite(self) -> Compass8 {
        Compass8::ALL[(self.index() + 4) % 8]
    }

    /// The (row, column) delta this direction represents on the diamond
    /// grid.
    pub fn grid_delta(self) -> (i32, i32) {
        match self {
            Compass8::North => (-1, -1),
            Compass8::Northeast => (-1, 0),
            Compass8::East => (-1, 1),
            Compass8::Southeast => (0, 1),
            Compass8::South => (1, 1),
            Compass8::Southwest => (1, 0),
            Compass8::West => (1, -1),
            Compass8::Northwest => (0, -1),
        }
    }

    /// The equivalent 16-way facing direction.
    pub fn to_direction(self) -> Direction {
        match self {
            Compass8::North => Direction::North,
            Compass8::Northeast => Direction::Northeast,
            Compass8::East => Direction::East,
            Compass8::Southeast => Direction::Southeast,
            Compass8::South => Direction::South,
            Compass8::Southwest => Direction::Southwest,
            Compass8::West => Direction::West,
            Compass8::Northwest => Direction::Northwest,
        }
    }
}
