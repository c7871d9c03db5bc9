//! # Grid Module
//!
//! The isometric world grid and its click-to-path engine.
//!
//! A [`Grid`] owns one [`GridElement`] per cell of a rows x columns diamond
//! tessellation, wires their 8-way adjacency at construction, binds terrain
//! pillars to the cells whose boxes they match, and spatially indexes the
//! cells for point lookup. [`Grid::construct_path`] answers a click with an
//! ordered sequence of (direction, distance) steps: a reverse weighted
//! breadth-first search assigns distance-from-destination weights, a greedy
//! lowest-weight descent extracts the cell chain, and the first segment is
//! clipped to the mover's exact feet coordinate.
//!
//! The grid is immutable after construction apart from blocking-object
//! occupancy and the highlight bookkeeping kept for visual path feedback.

pub mod element;
pub mod node;
pub mod path;

pub use element::{ElementId, GridElement};
pub use node::{NodeId, PathNode, SearchArena};
pub use path::{PathStep, TravelPath};

use crate::config::{DEFAULT_CELL_HEIGHT, DEFAULT_CELL_WIDTH};
use crate::direction::Compass8;
use crate::geometry::{Point, Rect};
use crate::scene::{LevelObject, NoopSceneHooks, PillarId, PillarSeed, SceneHooks};
use crate::{DuskholdError, DuskholdResult};
use log::{debug, trace};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Shape of the grid in cells and of the cells in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GridConfig {
    pub rows: usize,
    pub columns: usize,
    /// Cell bounding-box width; conventionally twice the height.
    pub cell_width: f64,
    /// Cell bounding-box height.
    pub cell_height: f64,
    /// Scene position of the (0, 0) cell's center.
    pub origin: Point,
}

impl GridConfig {
    /// A grid of the given dimensions with the default cell metrics.
    pub fn new(rows: usize, columns: usize) -> Self {
        Self {
            rows,
            columns,
            cell_width: DEFAULT_CELL_WIDTH,
            cell_height: DEFAULT_CELL_HEIGHT,
            origin: Point::new(0.0, 0.0),
        }
    }

    /// Scene coordinates of a cell's center.
    ///
    /// Columns advance toward screen southeast and rows toward screen
    /// southwest, producing the diamond tessellation.
    pub fn cell_center(&self, row: usize, column: usize) -> Point {
        let half_w = self.cell_width / 2.0;
        let half_h = self.cell_height / 2.0;
        Point::new(
            self.origin.x + (column as f64 - row as f64) * half_w,
            self.origin.y + (column as f64 + row as f64) * half_h,
        )
    }
}

/// One endpoint of a path query.
///
/// Pillar endpoints resolve through the pillar map; feet endpoints carry the
/// exact scene coordinate (a mover's feet or a click position) and resolve
/// through spatial point lookup.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PathEndpoint {
    Pillar(PillarId),
    Feet(Point),
}

impl PathEndpoint {
    /// The endpoint for a clickable object: its pillar identity when it is
    /// terrain, otherwise its approximate foot position.
    pub fn for_object(object: &dyn LevelObject) -> Self {
        match object.pillar_id() {
            Some(pillar) => PathEndpoint::Pillar(pillar),
            None => PathEndpoint::Feet(object.feet_scene_point()),
        }
    }
}

/// Terrain data the grid keeps per registered pillar.
#[derive(Debug, Clone, Copy)]
struct PillarData {
    passable: bool,
}

/// The isometric world grid for one level.
pub struct Grid {
    config: GridConfig,
    elements: Vec<GridElement>,
    pillars: Vec<PillarData>,
    pillar_to_element: Vec<ElementId>,
    x_bands: Vec<f64>,
    y_bands: Vec<f64>,
    buckets: Vec<Vec<ElementId>>,
    highlighted: Vec<PillarId>,
    hooks: Box<dyn SceneHooks>,
}

impl std::fmt::Debug for Grid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Grid")
            .field("config", &self.config)
            .field("elements", &self.elements.len())
            .field("pillars", &self.pillars.len())
            .finish()
    }
}

/// Quantizes a scene coordinate for exact-edge matching of pillar boxes to
/// cell boxes.
fn quantize(v: f64) -> i64 {
    (v * 256.0).round() as i64
}

impl Grid {
    /// Builds the grid for a level from its pillar list, routing highlight
    /// and draw-order side effects through `hooks`.
    ///
    /// Every pillar must match exactly one cell by left/right/bottom edges;
    /// an unmatched pillar is a construction error. Cells without a pillar
    /// stay open area, which the pathfinder treats as impassable.
    pub fn new(
        config: GridConfig,
        seeds: &[PillarSeed],
        mut hooks: Box<dyn SceneHooks>,
    ) -> DuskholdResult<Self> {
        if config.rows == 0 || config.columns == 0 {
            return Err(DuskholdError::InvalidGrid(
                "grid must have at least one row and one column".to_string(),
            ));
        }
        if config.cell_width <= 0.0 || config.cell_height <= 0.0 {
            return Err(DuskholdError::InvalidGrid(
                "cell dimensions must be positive".to_string(),
            ));
        }

        let half_w = config.cell_width / 2.0;
        let half_h = config.cell_height / 2.0;

        // Allocate all elements up front; they live as long as the grid.
        let mut elements = Vec::with_capacity(config.rows * config.columns);
        let mut edge_index = HashMap::new();
        for row in 0..config.rows {
            for column in 0..config.columns {
                let center = config.cell_center(row, column);
                let bounding_box = Rect::new(
                    center.x - half_w,
                    center.y - half_h,
                    config.cell_width,
                    config.cell_height,
                );
                // Painter's order: cells farther down the screen draw later.
                let z = (row + column) as i32;
                let id = ElementId(elements.len());
                elements.push(GridElement::new(bounding_box, z));
                edge_index.insert(
                    (
                        quantize(bounding_box.left()),
                        quantize(bounding_box.right()),
                        quantize(bounding_box.bottom()),
                    ),
                    id,
                );
            }
        }

        // Wire 8-way adjacency; covering every direction from every cell
        // makes it symmetric by construction.
        for row in 0..config.rows {
            for column in 0..config.columns {
                let id = row * config.columns + column;
                for direction in Compass8::ALL {
                    let (dr, dc) = direction.grid_delta();
                    let nr = row as i32 + dr;
                    let nc = column as i32 + dc;
                    let neighbor = if nr >= 0
                        && nc >= 0
                        && (nr as usize) < config.rows
                        && (nc as usize) < config.columns
                    {
                        Some(ElementId(nr as usize * config.columns + nc as usize))
                    } else {
                        None
                    };
                    elements[id].set_adjacent(direction, neighbor);
                }
            }
        }

        // Bind pillars to the cells whose boxes they stand on and push the
        // cell-driven draw order out to the scene.
        let mut pillars = Vec::with_capacity(seeds.len());
        let mut pillar_to_element = Vec::with_capacity(seeds.len());
        for (index, seed) in seeds.iter().enumerate() {
            let pillar = PillarId(index);
            let key = (
                quantize(seed.bounding_box.left()),
                quantize(seed.bounding_box.right()),
                quantize(seed.bounding_box.bottom()),
            );
            let element_id = *edge_index.get(&key).ok_or_else(|| {
                DuskholdError::InvalidGrid(format!(
                    "pillar {index} at {:?} matches no grid cell",
                    seed.bounding_box
                ))
            })?;
            let element = &mut elements[element_id.0];
            if element.pillar().is_some() {
                return Err(DuskholdError::InvalidGrid(format!(
                    "two pillars claim the cell at {:?}",
                    element.bounding_box()
                )));
            }
            element.set_pillar(pillar);
            hooks.pillar_z_assigned(pillar, element.z());
            pillars.push(PillarData {
                passable: seed.passable,
            });
            pillar_to_element.push(element_id);
        }

        let mut grid = Self {
            config,
            elements,
            pillars,
            pillar_to_element,
            x_bands: Vec::new(),
            y_bands: Vec::new(),
            buckets: Vec::new(),
            highlighted: Vec::new(),
            hooks,
        };
        grid.build_spatial_index();

        debug!(
            "built {}x{} grid: {} elements, {} pillars",
            grid.config.rows,
            grid.config.columns,
            grid.elements.len(),
            grid.pillars.len()
        );
        Ok(grid)
    }

    /// Builds a grid with no scene attached; highlight and draw-order
    /// notifications go nowhere.
    pub fn headless(config: GridConfig, seeds: &[PillarSeed]) -> DuskholdResult<Self> {
        Self::new(config, seeds, Box::new(NoopSceneHooks))
    }

    /// Builds the coarse band index: sorted x/y band boundaries at half-cell
    /// granularity, with each cell registered in every bucket its bounding
    /// box overlaps.
    fn build_spatial_index(&mut self) {
        let mut min_x = f64::INFINITY;
        let mut max_x = f64::NEG_INFINITY;
        let mut min_y = f64::INFINITY;
        let mut max_y = f64::NEG_INFINITY;
        for element in &self.elements {
            let b = element.bounding_box();
            min_x = min_x.min(b.left());
            max_x = max_x.max(b.right());
            min_y = min_y.min(b.top());
            max_y = max_y.max(b.bottom());
        }

        let band_w = self.config.cell_width / 2.0;
        let band_h = self.config.cell_height / 2.0;
        self.x_bands = band_boundaries(min_x, max_x, band_w);
        self.y_bands = band_boundaries(min_y, max_y, band_h);

        let nx = self.x_bands.len() - 1;
        let ny = self.y_bands.len() - 1;
        self.buckets = vec![Vec::new(); nx * ny];
        for (index, element) in self.elements.iter().enumerate() {
            let b = element.bounding_box();
            let bx0 = band_of(&self.x_bands, b.left()).unwrap_or(0);
            let bx1 = band_of(&self.x_bands, b.right()).unwrap_or(nx - 1);
            let by0 = band_of(&self.y_bands, b.top()).unwrap_or(0);
            let by1 = band_of(&self.y_bands, b.bottom()).unwrap_or(ny - 1);
            for bx in bx0..=bx1 {
                for by in by0..=by1 {
                    self.buckets[by * nx + bx].push(ElementId(index));
                }
            }
        }
    }

    pub fn config(&self) -> &GridConfig {
        &self.config
    }

    pub fn rows(&self) -> usize {
        self.config.rows
    }

    pub fn columns(&self) -> usize {
        self.config.columns
    }

    /// The element at a grid position, if in range.
    pub fn element_at(&self, row: usize, column: usize) -> Option<ElementId> {
        if row < self.config.rows && column < self.config.columns {
            Some(ElementId(row * self.config.columns + column))
        } else {
            None
        }
    }

    pub fn element(&self, id: ElementId) -> &GridElement {
        &self.elements[id.0]
    }

    /// Mutable element access, used by the scene layer for blocking-object
    /// occupancy.
    pub fn element_mut(&mut self, id: ElementId) -> &mut GridElement {
        &mut self.elements[id.0]
    }

    /// Scene coordinates of an element's center.
    pub fn element_center(&self, id: ElementId) -> Point {
        self.elements[id.0].center()
    }

    /// The element a registered pillar stands on.
    pub fn element_of_pillar(&self, pillar: PillarId) -> Option<ElementId> {
        self.pillar_to_element.get(pillar.0).copied()
    }

    /// Whether an element carries a passable pillar. Open area (no pillar)
    /// is impassable.
    pub fn is_passable(&self, id: ElementId) -> bool {
        self.elements[id.0]
            .pillar()
            .map(|p| self.pillars[p.0].passable)
            .unwrap_or(false)
    }

    /// Locates the element whose diamond contains the point.
    ///
    /// Binary-searches the coordinate band arrays for the coarse bucket,
    /// then scans the bucket's candidate list with exact diamond containment
    /// tests. Returns `None` for points outside the level, making an
    /// off-grid click a "no movement" answer further up.
    pub fn find_grid_element(&self, p: Point) -> Option<ElementId> {
        let bx = band_of(&self.x_bands, p.x)?;
        let by = band_of(&self.y_bands, p.y)?;
        let nx = self.x_bands.len() - 1;
        self.buckets[by * nx + bx]
            .iter()
            .copied()
            .find(|id| self.elements[id.0].contains_point(p))
    }

    /// Computes a travel path between two endpoints.
    ///
    /// Returns the empty path when either endpoint fails to resolve to a
    /// cell or when no chain of passable pillars connects them. As a side
    /// effect, the pillars along the previous path are unhighlighted and the
    /// new path's pillars highlighted.
    pub fn construct_path(
        &mut self,
        from: PathEndpoint,
        to: PathEndpoint,
    ) -> DuskholdResult<TravelPath> {
        self.clear_highlights();

        let (Some(start), Some(end)) = (self.resolve_endpoint(from), self.resolve_endpoint(to))
        else {
            debug!("path query with unresolvable endpoint: {from:?} -> {to:?}");
            return Ok(TravelPath::empty());
        };
        let feet = match from {
            PathEndpoint::Feet(p) => p,
            PathEndpoint::Pillar(_) => self.element_center(start),
        };

        let chain = match self.shortest_element_chain(start, end)? {
            Some(chain) => chain,
            None => {
                debug!("no passable route between {start:?} and {end:?}");
                return Ok(TravelPath::empty());
            }
        };

        self.highlight_chain(&chain);

        let mut points: Vec<Point> = chain.iter().map(|&id| self.element_center(id)).collect();
        path::clip_start(feet, &mut points);
        // The symmetric end-side clip is deliberately not applied: paths
        // stop at the destination cell's center.
        let path = TravelPath::from_points(points);
        debug!(
            "path {start:?} -> {end:?}: {} steps, {:.1}px",
            path.steps().len(),
            path.total_distance()
        );
        Ok(path)
    }

    fn resolve_endpoint(&self, endpoint: PathEndpoint) -> Option<ElementId> {
        match endpoint {
            PathEndpoint::Pillar(pillar) => self.element_of_pillar(pillar),
            PathEndpoint::Feet(p) => self.find_grid_element(p),
        }
    }

    /// Reverse weighted breadth-first search from `end`, then greedy
    /// lowest-weight descent from `start` back to it.
    ///
    /// The frontier is a plain insertion-order list, not a priority queue;
    /// weights are hop counts, so insertion order already visits them
    /// non-decreasingly. Expansion stops early once `start` itself comes up
    /// for expansion. `Ok(None)` means the search exhausted with no route.
    fn shortest_element_chain(
        &self,
        start: ElementId,
        end: ElementId,
    ) -> DuskholdResult<Option<Vec<ElementId>>> {
        let mut arena = SearchArena::new();
        // The destination seeds the search regardless of its own
        // passability, so clicking a wall still resolves to its cell.
        arena.add(end, 0);

        let mut start_node = None;
        let mut current = 0;
        while current < arena.len() {
            let current_id = NodeId(current);
            let current_element = arena.node(current_id).element();
            if current_element == start {
                start_node = Some(current_id);
                break;
            }
            let weight = arena.node(current_id).weight().unwrap_or(0);
            for direction in Compass8::ALL {
                let Some(neighbor) = self.elements[current_element.0].adjacent(direction) else {
                    continue;
                };
                if arena.visited(neighbor) {
                    continue;
                }
                if !self.is_passable(neighbor) {
                    continue;
                }
                let neighbor_id = arena.add(neighbor, weight + 1);
                arena.link(current_id, direction, neighbor_id);
                trace!("expanded {neighbor:?} at weight {}", weight + 1);
            }
            current += 1;
        }

        let Some(start_node) = start_node else {
            return Ok(None);
        };

        // Greedy descent by weight; the iteration cap turns any cycle into
        // a hard error instead of a hang.
        let mut chain = vec![start];
        let mut node = start_node;
        let mut remaining = arena.len();
        while arena.node(node).element() != end {
            if remaining == 0 {
                return Err(DuskholdError::PathStalled(arena.node(node).element()));
            }
            remaining -= 1;
            let (next, _direction) = arena.lowest_weight_neighbor(node)?;
            node = next;
            chain.push(arena.node(node).element());
        }
        Ok(Some(chain))
    }

    fn highlight_chain(&mut self, chain: &[ElementId]) {
        for &id in chain {
            if let Some(pillar) = self.elements[id.0].pillar() {
                self.hooks.pillar_highlighted(pillar, true);
                self.highlighted.push(pillar);
            }
        }
    }

    fn clear_highlights(&mut self) {
        for pillar in std::mem::take(&mut self.highlighted) {
            self.hooks.pillar_highlighted(pillar, false);
        }
    }

    /// Pillars currently highlighted for the most recent path.
    pub fn highlighted_pillars(&self) -> &[PillarId] {
        &self.highlighted
    }
}

/// Sorted band boundaries covering `[min, max]` at the given granularity.
fn band_boundaries(min: f64, max: f64, step: f64) -> Vec<f64> {
    let mut bounds = Vec::new();
    let mut v = min;
    while v < max {
        bounds.push(v);
        v += step;
    }
    bounds.push(max);
    bounds
}

/// Index of the band containing `v`, by binary search over the boundary
/// array. `None` when `v` is outside the covered range.
fn band_of(bands: &[f64], v: f64) -> Option<usize> {
    if bands.len() < 2 || v < bands[0] || v > bands[bands.len() - 1] {
        return None;
    }
    let upper = bands.partition_point(|&b| b <= v);
    Some(upper.saturating_sub(1).min(bands.len() - 2))
}
