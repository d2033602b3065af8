//! Spatial octree for approximating gravitational forces using the Barnes-Hut algorithm.

mod node;

pub use node::OctreeNode;

use crate::physics::body::Body;
use crate::physics::bound::Bound;
use crate::physics::math::{Scalar, Vector};

pub const DEFAULT_LEAF_CAPACITY: usize = 1;
/// Deepest level any tree subdivides to; larger requests are clamped.
///
/// A domain of half-width 10 still has a normal half-width at this depth, and
/// recursion through the tree stays within a default thread stack.
pub const MAX_TREE_DEPTH: usize = 1000;
pub const DEFAULT_MAX_DEPTH: usize = MAX_TREE_DEPTH;

/// Copy of the body fields the tree needs, taken when the body is inserted.
///
/// The tree never refers back into the simulation's body store, so the
/// store can be mutated while the tree answers force queries.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OctreeBody {
    pub id: u32,
    pub position: Vector,
    pub mass: Scalar,
}

impl From<&Body> for OctreeBody {
    fn from(body: &Body) -> Self {
        Self {
            id: body.id,
            position: body.position,
            mass: body.mass,
        }
    }
}

/// Subdivision limits shared by every node of one tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NodeLimits {
    /// Bodies a leaf holds before it subdivides
    pub leaf_capacity: usize,
    /// Depth at which leaves stop subdividing and absorb extra bodies
    pub max_depth: usize,
}

impl Default for NodeLimits {
    fn default() -> Self {
        Self {
            leaf_capacity: DEFAULT_LEAF_CAPACITY,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

/// Inputs to a force query.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ForceParameters {
    /// Opening angle; nodes with `size / distance < theta` are collapsed.
    ///
    /// A node whose bound contains the query position is always opened, so
    /// above `2 / sqrt(3)` (about 1.15) raising theta no longer collapses the
    /// nodes enclosing the body.
    pub theta: Scalar,
    pub gravity: Scalar,
    pub softening: Scalar,
    /// Optional second threshold that also collapses a node when
    /// `size / distance` falls below it
    pub cutoff: Option<Scalar>,
}

impl ForceParameters {
    pub fn new(theta: Scalar, gravity: Scalar, softening: Scalar) -> Self {
        Self {
            theta,
            gravity,
            softening,
            cutoff: None,
        }
    }

    pub fn with_cutoff(mut self, cutoff: Option<Scalar>) -> Self {
        self.cutoff = cutoff;
        self
    }

    #[inline]
    pub fn should_collapse(&self, ratio: Scalar) -> bool {
        ratio < self.theta || self.cutoff.is_some_and(|cutoff| ratio < cutoff)
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct OctreeStats {
    pub node_count: usize,
    pub leaf_count: usize,
    pub max_depth: usize,
    pub body_count: usize,
    pub dropped_count: usize,
    pub total_mass: Scalar,
    pub center_of_mass: Vector,
}

/// Root holder for one step's octree.
///
/// Built from scratch each step: insert bodies, aggregate once, then answer
/// any number of read-only force queries.
#[derive(Debug)]
pub struct Octree {
    root: OctreeNode,
    bodies: Vec<OctreeBody>,
    limits: NodeLimits,
    dropped_count: usize,
}

impl Octree {
    pub fn new(bound: Bound) -> Self {
        Self {
            root: OctreeNode::new(bound, 0),
            bodies: Vec::new(),
            limits: NodeLimits::default(),
            dropped_count: 0,
        }
    }

    /// Leaf capacity below one is treated as one.
    pub fn with_leaf_capacity(mut self, leaf_capacity: usize) -> Self {
        self.limits.leaf_capacity = leaf_capacity.max(1);
        self
    }

    /// Depths above [`MAX_TREE_DEPTH`] are treated as [`MAX_TREE_DEPTH`].
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.limits.max_depth = max_depth.min(MAX_TREE_DEPTH);
        self
    }

    pub fn with_body_capacity(mut self, capacity: usize) -> Self {
        self.bodies.reserve(capacity);
        self
    }

    #[inline]
    pub fn root(&self) -> &OctreeNode {
        &self.root
    }

    #[inline]
    pub fn bound(&self) -> Bound {
        self.root.bound()
    }

    #[inline]
    pub fn limits(&self) -> NodeLimits {
        self.limits
    }

    /// Every body accepted so far, indexed the way leaves refer to them.
    #[inline]
    pub fn bodies(&self) -> &[OctreeBody] {
        &self.bodies
    }

    #[inline]
    pub fn dropped_count(&self) -> usize {
        self.dropped_count
    }

    /// Inserts a body; bodies outside the root bound are dropped and counted.
    pub fn insert(&mut self, body: OctreeBody) -> bool {
        let index = self.bodies.len();
        self.bodies.push(body);

        if self.root.insert(index, &self.bodies, self.limits) {
            true
        } else {
            self.bodies.pop();
            self.dropped_count += 1;
            false
        }
    }

    pub fn calculate_center_of_mass(&mut self) {
        self.root.calculate_center_of_mass(&self.bodies);
    }

    /// Inserts every body and aggregates, returning how many were accepted.
    pub fn build(&mut self, bodies: impl IntoIterator<Item = OctreeBody>) -> usize {
        let accepted = bodies.into_iter().filter(|body| self.insert(*body)).count();
        self.calculate_center_of_mass();
        accepted
    }

    pub fn calculate_force(&self, body: &OctreeBody, parameters: &ForceParameters) -> Vector {
        self.root.calculate_force(body, &self.bodies, parameters)
    }

    pub fn stats(&self) -> OctreeStats {
        let mut stats = OctreeStats {
            dropped_count: self.dropped_count,
            total_mass: self.root.total_mass(),
            center_of_mass: self.root.center_of_mass(),
            ..Default::default()
        };
        self.root.accumulate_stats(&mut stats);
        stats
    }
}
