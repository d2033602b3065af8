//! Gravitree prelude module
//!
//! Re-exports the types most hosts need to embed the simulation.

pub use bevy::prelude::*;
pub use rand::Rng;

pub use crate::config::{RunnerConfig, SimulationConfig};
pub use crate::events::{SimulationCommand, SimulationStepped};
pub use crate::physics::execution::ExecutionStrategy;
pub use crate::physics::integrators::{Integrator, IntegratorRegistry};
pub use crate::physics::math::{Scalar, Vector};
pub use crate::physics::octree::{ForceParameters, Octree, OctreeBody};
pub use crate::physics::{Body, BodyVertex, Bound};
pub use crate::plugins::{SimulationDiagnosticsPlugin, SimulationPlugin};
pub use crate::resources::{RenderingRng, SharedRng};
pub use crate::simulation::{Simulation, SimulationParameters, SpawnDistribution, StepReport};
