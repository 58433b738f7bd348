//! Broadphase data and logic module.
//!
//! The quadtree is rebuilt from scratch every frame over a borrowed body list.
//! Nodes hold `BodyId`s, never bodies.
//!
//! Placement is sticky: once a node fills up and subdivides, the bodies it
//! already holds stay at that level for the life of the tree, and only later
//! arrivals are pushed down into the quadrants.

pub mod square;

use crate::{error::IndexError, narrow::{Body, BodyId}};
use square::Square;
use tracing::{error, trace, warn};

/// Direct holdings a leaf may have before it subdivides.
pub const CAPACITY: usize = 3;
/// Nodes at this depth never subdivide, and keep accepting bodies past capacity.
pub const MAX_DEPTH: u32 = 32;

/// Traversal counters for a range query.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct QueryStats {
    /// Nodes entered, including those pruned on entry.
    pub visited: usize,
}

#[derive(Debug, Clone)]
pub struct Node {
    bounds: Square,
    depth: u32,
    holdings: Vec<BodyId>,
    /// NW, NE, SW, SE
    children: Option<Box<[Node; 4]>>,
}

impl Node {
    fn new(bounds: Square, depth: u32) -> Node {
        Node { bounds, depth, holdings: Vec::new(), children: None }
    }

    #[inline]
    pub fn bounds(&self) -> Square {
        self.bounds
    }
    #[inline]
    pub fn depth(&self) -> u32 {
        self.depth
    }
    /// Bodies stored at this node rather than pushed into its children.
    #[inline]
    pub fn holdings(&self) -> &[BodyId] {
        &self.holdings
    }
    #[inline]
    pub fn children(&self) -> Option<&[Node; 4]> {
        self.children.as_deref()
    }
    #[inline]
    pub fn is_leaf(&self) -> bool {
        self.children.is_none()
    }

    fn subdivide(&mut self, max_depth: u32) -> bool {
        //! Creates the four quadrants if they don't exist yet. Existing holdings are left in place.
        //! Returns whether the node has children afterward.
        if self.children.is_some() {
            return true;
        }
        if self.depth >= max_depth {
            return false;
        }
        match self.bounds.quadrants() {
            Some(quads) => {
                let depth = self.depth + 1;
                self.children = Some(Box::new(quads.map(|q| Node::new(q, depth))));
                trace!(depth = self.depth, half = %self.bounds.half, "subdivided");
                true
            }
            None => false,
        }
    }

    fn insert(&mut self, id: BodyId, body: &Body, limits: &mut Limits) -> Result<bool, IndexError> {
        if !self.bounds.circle_test(body) {
            return Ok(false);
        }

        if self.children.is_none() {
            if self.holdings.len() < limits.capacity {
                self.holdings.push(id);
                return Ok(true);
            }
            if !self.subdivide(limits.max_depth) {
                if !limits.saturated {
                    warn!(depth = self.depth, "quadtree saturated, holding bodies past capacity");
                    limits.saturated = true;
                }
                self.holdings.push(id);
                return Ok(true);
            }
        }

        if let Some(children) = self.children.as_mut() {
            for child in children.iter_mut() {
                if child.insert(id, body, limits)? {
                    return Ok(true);
                }
            }
        }

        // no quadrant took a body this node accepted; keep it here rather than lose it
        self.holdings.push(id);
        error!(body = id.index(), depth = self.depth, "quadrants failed to cover their parent");
        Err(IndexError::Unplaced { body: id, depth: self.depth })
    }

    fn query(&self, bodies: &[Body], range: &Square, out: &mut Vec<BodyId>, stats: &mut QueryStats) {
        stats.visited += 1;
        if !self.bounds.square_test(range) {
            return;
        }

        out.extend(self.holdings.iter().copied().filter(|id| range.circle_test(&bodies[id.index()])));

        if let Some(children) = self.children.as_deref() {
            for child in children {
                child.query(bodies, range, out, stats);
            }
        }
    }

    fn visit<'n>(&'n self, f: &mut impl FnMut(&'n Node)) {
        f(self);
        if let Some(children) = self.children.as_deref() {
            for child in children {
                child.visit(f);
            }
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct Limits {
    capacity: usize,
    max_depth: u32,
    saturated: bool,
}

/// A region quadtree over a borrowed body list.
#[derive(Debug, Clone)]
pub struct QuadTree<'a> {
    bodies: &'a [Body],
    root: Node,
    limits: Limits,
}

impl<'a> QuadTree<'a> {
    pub fn new(bounds: Square, bodies: &'a [Body]) -> QuadTree<'a> {
        QuadTree::with_limits(bounds, bodies, CAPACITY, MAX_DEPTH)
    }
    pub fn with_limits(bounds: Square, bodies: &'a [Body], capacity: usize, max_depth: u32) -> QuadTree<'a> {
        //! `capacity` must be at least 1.
        assert!(capacity > 0, "quadtree capacity must be at least 1");
        QuadTree {
            bodies,
            root: Node::new(bounds, 0),
            limits: Limits { capacity, max_depth, saturated: false },
        }
    }

    #[inline]
    pub fn root(&self) -> &Node {
        &self.root
    }
    #[inline]
    pub fn bounds(&self) -> Square {
        self.root.bounds
    }
    #[inline]
    pub fn capacity(&self) -> usize {
        self.limits.capacity
    }

    pub fn insert(&mut self, id: BodyId) -> Result<bool, IndexError> {
        //! Places the body with handle `id`, returning `Ok(false)` if it lies outside the tree.
        //! `Err` flags a geometry defect; the body is still placed and remains queryable.
        //!
        //! When several quadrants overlap the body, the first in NW, NE, SW, SE order wins.
        //!
        //! Panics if `id` is out of range of the body list.
        let bodies = self.bodies;
        self.root.insert(id, &bodies[id.index()], &mut self.limits)
    }

    pub fn subdivide(&mut self) {
        //! Splits the root, if it hasn't been already.
        self.root.subdivide(self.limits.max_depth);
    }

    pub fn query(&self, range: &Square) -> Vec<BodyId> {
        let mut out = Vec::new();
        self.query_with_stats(range, &mut out, &mut QueryStats::default());
        out
    }

    pub fn query_with_stats(&self, range: &Square, out: &mut Vec<BodyId>, stats: &mut QueryStats) {
        //! Appends every held body whose bounding box overlaps `range` to `out`.
        //! A node's own matches precede its children's, which are visited NW, NE, SW, SE.
        self.root.query(self.bodies, range, out, stats);
    }

    /// Squares of every leaf node, depth first in NW, NE, SW, SE order.
    pub fn leaves(&self) -> Vec<Square> {
        let mut leaves = Vec::new();
        self.root.visit(&mut |n| {
            if n.is_leaf() {
                leaves.push(n.bounds);
            }
        });
        leaves
    }

    /// Number of bodies held across all nodes.
    pub fn len(&self) -> usize {
        let mut len = 0;
        self.root.visit(&mut |n| len += n.holdings.len());
        len
    }
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn node_count(&self) -> usize {
        let mut count = 0;
        self.root.visit(&mut |_| count += 1);
        count
    }

    /// Depth of the deepest node. The root alone has depth 0.
    pub fn depth(&self) -> u32 {
        let mut depth = 0;
        self.root.visit(&mut |n| depth = depth.max(n.depth));
        depth
    }

    /// Whether some node hit the depth limit and held bodies past capacity.
    pub fn saturated(&self) -> bool {
        self.limits.saturated
    }
}
