use super::{ForceParameters, NodeLimits, OctreeBody, OctreeStats};
use crate::physics::bound::Bound;
use crate::physics::gravity::force_from_point;
use crate::physics::math::{Scalar, Vector};

#[derive(Debug)]
enum NodeContents {
    /// Indices into the tree's body snapshot
    Leaf(Vec<usize>),
    Internal(Box<[OctreeNode; 8]>),
}

/// One cube of the octree.
///
/// A node starts as a leaf and becomes internal exactly once, when it is
/// asked to hold more bodies than its capacity allows and it sits above the
/// depth cap. Children are owned through a boxed array and dropped with the
/// parent.
#[derive(Debug)]
pub struct OctreeNode {
    bound: Bound,
    depth: usize,
    center_of_mass: Vector,
    total_mass: Scalar,
    contents: NodeContents,
}

impl OctreeNode {
    pub fn new(bound: Bound, depth: usize) -> Self {
        Self {
            bound,
            depth,
            center_of_mass: Vector::ZERO,
            total_mass: 0.0,
            contents: NodeContents::Leaf(Vec::new()),
        }
    }

    #[inline]
    pub fn bound(&self) -> Bound {
        self.bound
    }

    #[inline]
    pub fn depth(&self) -> usize {
        self.depth
    }

    #[inline]
    pub fn is_leaf(&self) -> bool {
        matches!(self.contents, NodeContents::Leaf(_))
    }

    #[inline]
    pub fn center_of_mass(&self) -> Vector {
        self.center_of_mass
    }

    #[inline]
    pub fn total_mass(&self) -> Scalar {
        self.total_mass
    }

    pub fn children(&self) -> Option<&[OctreeNode; 8]> {
        match &self.contents {
            NodeContents::Internal(children) => Some(&**children),
            NodeContents::Leaf(_) => None,
        }
    }

    /// Snapshot indices held directly by this node (always empty once internal).
    pub fn held(&self) -> &[usize] {
        match &self.contents {
            NodeContents::Leaf(held) => held.as_slice(),
            NodeContents::Internal(_) => &[],
        }
    }

    /// Inserts the snapshot body at `index`.
    ///
    /// Returns `false` without touching the node when the body lies outside
    /// this node's bound.
    pub fn insert(&mut self, index: usize, bodies: &[OctreeBody], limits: NodeLimits) -> bool {
        if !self.bound.contains(bodies[index].position) {
            return false;
        }

        self.insert_contained(index, bodies, limits);
        true
    }

    fn insert_contained(&mut self, index: usize, bodies: &[OctreeBody], limits: NodeLimits) {
        if let NodeContents::Leaf(held) = &mut self.contents {
            // Past the depth cap a leaf absorbs everything so coincident
            // bodies cannot recurse forever.
            if held.len() < limits.leaf_capacity || self.depth >= limits.max_depth {
                held.push(index);
                return;
            }

            self.subdivide(bodies, limits);
        }

        if let NodeContents::Internal(children) = &mut self.contents {
            let slot = child_slot(&self.bound, children, bodies[index].position);
            children[slot].insert_contained(index, bodies, limits);
        }
    }

    /// Splits a leaf into eight octants and hands its bodies down.
    ///
    /// Does nothing on an internal node.
    pub fn subdivide(&mut self, bodies: &[OctreeBody], limits: NodeLimits) {
        let held = match &mut self.contents {
            NodeContents::Leaf(held) => core::mem::take(held),
            NodeContents::Internal(_) => return,
        };

        let depth = self.depth + 1;
        let mut children = Box::new(self.bound.octants().map(|bound| OctreeNode::new(bound, depth)));

        for index in held {
            let slot = child_slot(&self.bound, &children, bodies[index].position);
            children[slot].insert_contained(index, bodies, limits);
        }

        self.contents = NodeContents::Internal(children);
    }

    /// Recomputes total mass and center of mass for this subtree, bottom-up.
    pub fn calculate_center_of_mass(&mut self, bodies: &[OctreeBody]) {
        let (weighted_sum, total_mass) = match &mut self.contents {
            NodeContents::Internal(children) => {
                children
                    .iter_mut()
                    .fold((Vector::ZERO, 0.0), |(weighted_acc, mass_acc), child| {
                        child.calculate_center_of_mass(bodies);
                        (
                            weighted_acc + child.center_of_mass * child.total_mass,
                            mass_acc + child.total_mass,
                        )
                    })
            }
            NodeContents::Leaf(held) => {
                held.iter()
                    .map(|&index| &bodies[index])
                    .fold((Vector::ZERO, 0.0), |(weighted_acc, mass_acc), body| {
                        (weighted_acc + body.position * body.mass, mass_acc + body.mass)
                    })
            }
        };

        self.total_mass = total_mass;
        self.center_of_mass = if total_mass > 0.0 && total_mass.is_finite() {
            weighted_sum / total_mass
        } else {
            Vector::ZERO
        };
    }

    /// Net force this subtree exerts on `body`.
    ///
    /// Requires [`OctreeNode::calculate_center_of_mass`] to have run since the
    /// last insertion.
    pub fn calculate_force(
        &self,
        body: &OctreeBody,
        bodies: &[OctreeBody],
        parameters: &ForceParameters,
    ) -> Vector {
        if self.total_mass <= 0.0 {
            return Vector::ZERO;
        }

        let distance = body.position.distance(self.bound.center);
        let ratio = self.bound.size() / distance;

        // A node enclosing the body is never collapsed, otherwise the body
        // would feel its own mass.
        if !self.bound.contains(body.position) && parameters.should_collapse(ratio) {
            return force_from_point(
                body.position,
                body.mass,
                self.center_of_mass,
                self.total_mass,
                parameters.gravity,
                parameters.softening,
            );
        }

        match &self.contents {
            NodeContents::Internal(children) => children
                .iter()
                .map(|child| child.calculate_force(body, bodies, parameters))
                .sum(),
            NodeContents::Leaf(held) => held
                .iter()
                .map(|&index| &bodies[index])
                .filter(|other| other.id != body.id)
                .map(|other| {
                    force_from_point(
                        body.position,
                        body.mass,
                        other.position,
                        other.mass,
                        parameters.gravity,
                        parameters.softening,
                    )
                })
                .sum(),
        }
    }

    /// Visits every leaf of the subtree in octant order.
    pub fn for_each_leaf<'a>(&'a self, visit: &mut impl FnMut(&'a OctreeNode)) {
        match &self.contents {
            NodeContents::Leaf(_) => visit(self),
            NodeContents::Internal(children) => {
                for child in children.iter() {
                    child.for_each_leaf(visit);
                }
            }
        }
    }

    pub(super) fn accumulate_stats(&self, stats: &mut OctreeStats) {
        stats.node_count += 1;
        stats.max_depth = stats.max_depth.max(self.depth);

        match &self.contents {
            NodeContents::Leaf(held) => {
                stats.leaf_count += 1;
                stats.body_count += held.len();
            }
            NodeContents::Internal(children) => {
                for child in children.iter() {
                    child.accumulate_stats(stats);
                }
            }
        }
    }
}

/// Picks the single child that receives a position the parent contains.
///
/// The first child in octant order whose closed bound contains the position
/// wins, so a body on a shared face goes to exactly one child. Rounding in
/// very deep trees can leave a sliver no child covers; the center comparison
/// decides then.
fn child_slot(parent: &Bound, children: &[OctreeNode; 8], position: Vector) -> usize {
    children
        .iter()
        .position(|child| child.bound.contains(position))
        .unwrap_or_else(|| parent.octant_index(position))
}
