//! QuadTree for spatial indexing.
//!
//! Each node holds up to `capacity` points. Inserting past that splits the node
//! into four equal quadrants and moves its points down; nodes never merge back.

use geometry::{Point, Rect};
use tracing::{trace, warn};

use crate::error::SpatialError;

/// Depth limit used by [`QuadTree::new`].
pub const DEFAULT_MAX_DEPTH: u32 = 32;

/// One of the four children of a subdivided node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Quadrant {
    NorthWest = 0,
    NorthEast = 1,
    SouthWest = 2,
    SouthEast = 3,
}

impl Quadrant {
    /// Child visiting order for every operation.
    pub const ALL: [Self; 4] = [
        Quadrant::NorthWest,
        Quadrant::NorthEast,
        Quadrant::SouthWest,
        Quadrant::SouthEast,
    ];

    #[inline]
    fn index(self) -> usize {
        self as usize
    }
}

#[derive(Debug, Clone, Copy)]
struct Limits {
    capacity: usize,
    max_depth: u32,
}

#[derive(Debug, Clone)]
struct Node {
    boundary: Rect,
    /// Direct points, in insertion order. Empty on interior nodes except for
    /// points no quadrant would take.
    points: Vec<Point>,
    /// Indexed by [`Quadrant`]. `Some` once subdivided, never reset.
    children: Option<Box<[Node; 4]>>,
}

impl Node {
    fn new(boundary: Rect) -> Self {
        Self {
            boundary,
            points: Vec::new(),
            children: None,
        }
    }

    fn insert(&mut self, p: Point, limits: Limits, depth: u32) -> bool {
        if !self.boundary.contains(p) {
            return false;
        }

        if self.children.is_none() {
            if self.points.len() < limits.capacity || depth >= limits.max_depth {
                self.points.push(p);
                return true;
            }
            self.subdivide(limits, depth);
        }

        self.insert_into_children(p, limits, depth)
    }

    fn insert_into_children(&mut self, p: Point, limits: Limits, depth: u32) -> bool {
        match &mut self.children {
            Some(children) => children
                .iter_mut()
                .any(|child| child.insert(p, limits, depth + 1)),
            None => false,
        }
    }

    fn subdivide(&mut self, limits: Limits, depth: u32) {
        let children = self.boundary.quadrants().map(Node::new);
        self.children = Some(Box::new(children));

        let held = std::mem::take(&mut self.points);
        trace!(depth, points = held.len(), boundary = ?self.boundary, "Subdividing node");

        for p in held {
            if !self.insert_into_children(p, limits, depth) {
                // Rounding at the split line left no quadrant covering `p`.
                warn!(x = p.x, y = p.y, depth, "No quadrant accepts point, keeping it on the parent");
                self.points.push(p);
            }
        }
    }

    fn search(&self, p: Point) -> bool {
        if !self.boundary.contains(p) {
            return false;
        }

        if self.points.contains(&p) {
            return true;
        }

        self.children
            .as_ref()
            .is_some_and(|children| children.iter().any(|child| child.search(p)))
    }

    fn query(&self, range: &Rect, found: &mut Vec<Point>) {
        if !self.boundary.intersects(range) {
            return;
        }

        found.extend(self.points.iter().copied().filter(|p| range.contains(*p)));

        if let Some(children) = &self.children {
            for child in children.iter() {
                child.query(range, found);
            }
        }
    }

    fn delete(&mut self, p: Point) -> bool {
        if !self.boundary.contains(p) {
            return false;
        }

        if let Some(idx) = self.points.iter().position(|q| *q == p) {
            self.points.remove(idx);
            return true;
        }

        match &mut self.children {
            Some(children) => children.iter_mut().any(|child| child.delete(p)),
            None => false,
        }
    }

    fn collect(&self, out: &mut Vec<Point>) {
        out.extend_from_slice(&self.points);
        if let Some(children) = &self.children {
            for child in children.iter() {
                child.collect(out);
            }
        }
    }

    fn node_count(&self) -> usize {
        1 + self
            .children
            .as_ref()
            .map_or(0, |children| children.iter().map(Node::node_count).sum())
    }

    fn depth(&self) -> u32 {
        self.children.as_ref().map_or(0, |children| {
            1 + children.iter().map(Node::depth).max().unwrap_or(0)
        })
    }
}

/// Point quadtree over a fixed rectangular boundary.
///
/// Points are compared by exact coordinate equality and duplicates are kept
/// as separate entries. Deleting never shrinks the tree; use
/// [`QuadTree::rebuilt`] to compact it.
///
/// There is no internal locking. Mutation takes `&mut self`, so sharing a tree
/// across threads needs an external lock.
#[derive(Clone)]
pub struct QuadTree {
    root: Node,
    limits: Limits,
    /// Number of stored points.
    len: usize,
}

impl QuadTree {
    /// Create an empty tree over `boundary` with the default depth limit.
    pub fn new(boundary: Rect, capacity: usize) -> Result<Self, SpatialError> {
        Self::with_max_depth(boundary, capacity, DEFAULT_MAX_DEPTH)
    }

    /// Create an empty tree whose nodes stop subdividing at `max_depth`.
    ///
    /// Leaves at the depth limit keep accepting points past `capacity`, which
    /// bounds the recursion when many points share one coordinate.
    pub fn with_max_depth(
        boundary: Rect,
        capacity: usize,
        max_depth: u32,
    ) -> Result<Self, SpatialError> {
        if capacity == 0 {
            return Err(SpatialError::InvalidCapacity);
        }
        if !boundary.is_well_formed() {
            return Err(SpatialError::InvalidBoundary(boundary));
        }

        Ok(Self {
            root: Node::new(boundary),
            limits: Limits { capacity, max_depth },
            len: 0,
        })
    }

    /// Insert a point. Returns false if it lies outside the boundary.
    pub fn insert(&mut self, p: Point) -> bool {
        let inserted = self.root.insert(p, self.limits, 0);
        if inserted {
            self.len += 1;
        }
        inserted
    }

    /// Check whether a point equal to `p` is stored.
    pub fn search(&self, p: Point) -> bool {
        self.root.search(p)
    }

    /// Find all points inside `range` (half-open).
    ///
    /// Results come in pre-order: a node's own points, then its quadrants in
    /// [`Quadrant::ALL`] order.
    pub fn query(&self, range: &Rect) -> Vec<Point> {
        let mut found = Vec::new();
        self.root.query(range, &mut found);
        found
    }

    /// Remove the first stored point equal to `p`.
    pub fn delete(&mut self, p: Point) -> bool {
        let deleted = self.root.delete(p);
        if deleted {
            self.len -= 1;
        }
        deleted
    }

    /// Build a fresh tree holding the same points, dropping empty subtrees.
    pub fn rebuilt(&self) -> Self {
        let mut tree = Self {
            root: Node::new(self.root.boundary),
            limits: self.limits,
            len: 0,
        };

        for p in self.points() {
            if !tree.insert(p) {
                // Only reachable for points stranded on a split line.
                tree.root.points.push(p);
                tree.len += 1;
            }
        }

        tree
    }

    /// All stored points.
    pub fn points(&self) -> Vec<Point> {
        let mut out = Vec::with_capacity(self.len);
        self.root.collect(&mut out);
        out
    }

    /// All points under one quadrant of the root, or `None` before the root
    /// has subdivided.
    pub fn quadrant_points(&self, quadrant: Quadrant) -> Option<Vec<Point>> {
        let children = self.root.children.as_ref()?;
        let mut out = Vec::new();
        children[quadrant.index()].collect(&mut out);
        Some(out)
    }

    #[inline]
    pub fn boundary(&self) -> Rect {
        self.root.boundary
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.limits.capacity
    }

    #[inline]
    pub fn max_depth(&self) -> u32 {
        self.limits.max_depth
    }

    /// Get the number of points.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Check if empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Whether the root has split into quadrants.
    #[inline]
    pub fn is_subdivided(&self) -> bool {
        self.root.children.is_some()
    }

    /// Total number of nodes, root included.
    pub fn node_count(&self) -> usize {
        self.root.node_count()
    }

    /// Depth of the deepest node, root being 0.
    pub fn depth(&self) -> u32 {
        self.root.depth()
    }
}

impl std::fmt::Debug for QuadTree {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QuadTree")
            .field("points", &self.len)
            .field("boundary", &self.root.boundary)
            .field("capacity", &self.limits.capacity)
            .field("nodes", &self.node_count())
            .finish()
    }
}
