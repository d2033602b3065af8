//! Core N-body physics: bodies, the Barnes-Hut octree, gravity and integration.

pub mod body;
pub mod bound;
pub mod execution;
pub mod gravity;
pub mod integrators;
pub mod math;
pub mod octree;

pub use body::{Body, BodyVertex};
pub use bound::Bound;
pub use execution::ExecutionStrategy;
pub use octree::{ForceParameters, Octree, OctreeBody, OctreeStats};
