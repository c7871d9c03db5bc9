//! End-to-end pathfinding scenarios on small handcrafted grids.

use duskhold::{
    Direction, Grid, GridConfig, LevelObject, PathEndpoint, PillarSeed, Point, Rect,
};

/// A rows x columns grid with a passable pillar on every cell except the
/// listed (row, column) positions, which get impassable pillars.
fn walled_grid(rows: usize, columns: usize, walls: &[(usize, usize)]) -> Grid {
    let config = GridConfig::new(rows, columns);
    let half_w = config.cell_width / 2.0;
    let half_h = config.cell_height / 2.0;
    let mut seeds = Vec::new();
    for row in 0..rows {
        for column in 0..columns {
            let center = config.cell_center(row, column);
            let bbox = Rect::new(
                center.x - half_w,
                center.y - half_h - 96.0,
                config.cell_width,
                config.cell_height + 96.0,
            );
            seeds.push(PillarSeed::new(bbox, !walls.contains(&(row, column))));
        }
    }
    Grid::headless(config, &seeds).expect("grid construction failed")
}

fn center(grid: &Grid, row: usize, column: usize) -> Point {
    grid.element_center(grid.element_at(row, column).unwrap())
}

/// Open 3x3 grid, mover at the center cell, click on the far corner cell:
/// the path starts at the mover's literal feet coordinate and ends at the
/// corner cell's center, covering exactly the center-to-center distance.
#[test]
fn test_open_grid_click_reaches_corner_center() {
    let mut grid = walled_grid(3, 3, &[]);
    let feet = center(&grid, 1, 1);
    let corner = center(&grid, 0, 0);
    // Click slightly off the corner center, still inside its diamond.
    let click = Point::new(corner.x + 4.0, corner.y + 2.0);

    let path = grid
        .construct_path(PathEndpoint::Feet(feet), PathEndpoint::Feet(click))
        .expect("query failed");

    assert!(!path.is_empty());
    assert_eq!(path.points()[0], feet);
    // The end-side clip is not applied: the path stops at the cell center,
    // not at the click point.
    assert_eq!(path.destination().unwrap(), corner);
    assert!((path.total_distance() - feet.distance_to(corner)).abs() < 1e-6);
    // (0, 0) sits diagonally up the grid from (1, 1), which is screen North.
    assert!(path
        .steps()
        .iter()
        .all(|step| step.direction == Direction::North));
}

/// Same grid with the two cardinal approaches to the corner walled off: the
/// diagonal adjacency still connects (1,1) to (0,0) directly.
#[test]
fn test_walled_approaches_leave_direct_diagonal() {
    let mut grid = walled_grid(3, 3, &[(0, 1), (1, 0)]);
    let feet = center(&grid, 1, 1);
    let corner = center(&grid, 0, 0);

    let path = grid
        .construct_path(PathEndpoint::Feet(feet), PathEndpoint::Feet(corner))
        .expect("query failed");

    assert!(!path.is_empty());
    assert!((path.total_distance() - feet.distance_to(corner)).abs() < 1e-6);
}

/// Fencing the corner off entirely yields the empty "no movement" path.
#[test]
fn test_fenced_corner_yields_empty_path() {
    let mut grid = walled_grid(3, 3, &[(0, 1), (1, 0), (1, 1)]);
    let feet = center(&grid, 2, 2);
    let corner = center(&grid, 0, 0);

    let path = grid
        .construct_path(PathEndpoint::Feet(feet), PathEndpoint::Feet(corner))
        .expect("query failed");
    assert!(path.is_empty());
}

/// A mover standing off its cell's center gets the exact feet coordinate
/// spliced in as the path's first point.
#[test]
fn test_off_center_feet_are_spliced_into_path() {
    let mut grid = walled_grid(3, 3, &[]);
    let cell = center(&grid, 1, 1);
    let feet = Point::new(cell.x + 5.0, cell.y - 3.0);
    let goal = center(&grid, 1, 2);

    let path = grid
        .construct_path(PathEndpoint::Feet(feet), PathEndpoint::Feet(goal))
        .expect("query failed");

    assert!(!path.is_empty());
    assert_eq!(path.points()[0], feet);
    assert_eq!(path.destination().unwrap(), goal);
}

/// Longer route: a wall line with a single gap forces every path through
/// the gap cell.
#[test]
fn test_route_funnels_through_gap() {
    // Row 2 is walled except column 3.
    let walls: Vec<(usize, usize)> = (0..5).filter(|&c| c != 3).map(|c| (2usize, c)).collect();
    let mut grid = walled_grid(5, 5, &walls);
    let feet = center(&grid, 4, 0);
    let goal = center(&grid, 0, 0);

    let path = grid
        .construct_path(PathEndpoint::Feet(feet), PathEndpoint::Feet(goal))
        .expect("query failed");

    assert!(!path.is_empty());
    let gap = center(&grid, 2, 3);
    assert!(
        path.points().iter().any(|p| p.approx_eq(gap)),
        "path must pass through the only gap"
    );
}

struct Monster {
    rect: Rect,
}

impl LevelObject for Monster {
    fn bounding_rect(&self) -> Rect {
        self.rect
    }

    fn map_to_scene(&self, p: Point) -> Point {
        p
    }

    fn can_be_attacked(&self) -> bool {
        true
    }
}

/// A click target that is a scene object, not a pillar, resolves through
/// its approximate foot position.
#[test]
fn test_object_target_resolves_by_feet() {
    let mut grid = walled_grid(3, 3, &[]);
    let lair = center(&grid, 2, 2);
    // A 40x80 monster whose feet land on the (2,2) cell center.
    let monster = Monster {
        rect: Rect::new(lair.x - 20.0, lair.y + 20.0 - 80.0, 40.0, 80.0),
    };
    assert!(monster.feet_scene_point().approx_eq(lair));

    let feet = center(&grid, 0, 0);
    let path = grid
        .construct_path(PathEndpoint::Feet(feet), PathEndpoint::for_object(&monster))
        .expect("query failed");

    assert!(!path.is_empty());
    assert_eq!(path.destination().unwrap(), lair);
}

/// Point lookup is stable: the same click always resolves to the same cell.
#[test]
fn test_point_lookup_is_idempotent() {
    let grid = walled_grid(4, 4, &[]);
    for row in 0..4 {
        for column in 0..4 {
            let c = center(&grid, row, column);
            let probe = Point::new(c.x - 2.0, c.y + 1.0);
            let first = grid.find_grid_element(probe);
            assert!(first.is_some());
            assert_eq!(grid.find_grid_element(probe), first);
        }
    }
}
