//! # Path Node Module
//!
//! Transient search-graph nodes for a single path query. Each node wraps one
//! grid element, carries the "distance from destination" relaxation weight,
//! and links to the neighbor nodes discovered during expansion.
//!
//! Nodes live in a [`SearchArena`] created fresh per query and discarded
//! once the path has been extracted; the arena also tracks which elements
//! have been visited so each element gets at most one node per search.

use crate::direction::Compass8;
use crate::grid::ElementId;
use crate::{DuskholdError, DuskholdResult};
use std::collections::HashMap;

/// Index of a [`PathNode`] within its search arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub usize);

/// One node of the transient search graph.
#[derive(Debug, Clone)]
pub struct PathNode {
    element: ElementId,
    weight: Option<u32>,
    adjacent: [Option<NodeId>; 8],
}

impl PathNode {
    /// Creates a node for the given element with its weight still unset.
    pub fn new(element: ElementId) -> Self {
        Self {
            element,
            weight: None,
            adjacent: [None; 8],
        }
    }

    pub fn element(&self) -> ElementId {
        self.element
    }

    /// The relaxation weight: hops from the destination, monotonically
    /// non-decreasing in discovery order. `None` until assigned.
    pub fn weight(&self) -> Option<u32> {
        self.weight
    }

    pub fn set_weight(&mut self, weight: u32) {
        self.weight = Some(weight);
    }

    /// The neighbor node discovered in the given direction, if any.
    pub fn adjacent(&self, direction: Compass8) -> Option<NodeId> {
        self.adjacent[direction.index()]
    }

    fn set_adjacent(&mut self, direction: Compass8, node: NodeId) {
        self.adjacent[direction.index()] = Some(node);
    }
}

/// Per-query arena of path nodes, expanded in insertion order by the grid's
/// weighted breadth-first search.
#[derive(Debug, Default)]
pub struct SearchArena {
    nodes: Vec<PathNode>,
    visited: HashMap<ElementId, NodeId>,
}

impl SearchArena {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of nodes discovered so far.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Creates a node for `element` with the given weight and marks the
    /// element visited. Elements are only ever added once per search.
    pub fn add(&mut self, element: ElementId, weight: u32) -> NodeId {
        debug_assert!(!self.visited.contains_key(&element));
        let id = NodeId(self.nodes.len());
        let mut node = PathNode::new(element);
        node.set_weight(weight);
        self.nodes.push(node);
        self.visited.insert(element, id);
        id
    }

    pub fn node(&self, id: NodeId) -> &PathNode {
        &self.nodes[id.0]
    }

    /// Whether the element already has a node in this search.
    pub fn visited(&self, element: ElementId) -> bool {
        self.visited.contains_key(&element)
    }

    /// Records the edge `from --direction--> to` and its mirror, keeping the
    /// discovered graph undirected.
    pub fn link(&mut self, from: NodeId, direction: Compass8, to: NodeId) {
        self.nodes[from.0].set_adjacent(direction, to);
        self.nodes[to.0].set_adjacent(direction.opposite(), from);
    }

    /// The neighbor of `id` with the smallest weight, scanning directions in
    /// the fixed order of [`Compass8::SCAN_ORDER`] so ties resolve to the
    /// first direction encountered.
    ///
    /// The original client dereferenced a null here when a node had no
    /// neighbors; that case is an explicit error instead.
    pub fn lowest_weight_neighbor(&self, id: NodeId) -> DuskholdResult<(NodeId, Compass8)> {
        let node = &self.nodes[id.0];
        let mut best: Option<(NodeId, Compass8, u32)> = None;
        for direction in Compass8::SCAN_ORDER {
            if let Some(neighbor_id) = node.adjacent(direction) {
                let weight = self.nodes[neighbor_id.0].weight().unwrap_or(u32::MAX);
                match best {
                    Some((_, _, best_weight)) if weight >= best_weight => {}
                    _ => best = Some((neighbor_id, direction, weight)),
                }
            }
        }
        best.map(|(n, d, _)| (n, d))
            .ok_or(DuskholdError::PathStalled(node.element()))
    }
}
