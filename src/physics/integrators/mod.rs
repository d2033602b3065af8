//! Time integration schemes for advancing body state

use crate::physics::math::{Scalar, Vector};

pub mod explicit_euler;
pub mod registry;
pub mod symplectic_euler;
pub mod velocity_verlet;

pub use explicit_euler::ExplicitEuler;
pub use registry::IntegratorRegistry;
pub use symplectic_euler::SymplecticEuler;
pub use velocity_verlet::VelocityVerlet;

/// Name of the scheme a fresh simulation uses.
pub const DEFAULT_INTEGRATOR: &str = "velocity_verlet";

/// Single-step integrator driven by the acceleration computed for this step.
///
/// Forces are evaluated once per step by the octree, so integrators receive
/// the acceleration rather than a field they can sample again.
pub trait Integrator: Send + Sync {
    /// Clone into a new boxed trait object
    fn clone_box(&self) -> Box<dyn Integrator>;

    /// Advance position and velocity by `dt`
    fn step(&self, position: &mut Vector, velocity: &mut Vector, acceleration: Vector, dt: Scalar);

    /// Global order of accuracy for a fixed acceleration field
    fn convergence_order(&self) -> usize;

    /// Canonical name used in configuration
    fn name(&self) -> &'static str;

    /// Alternative names accepted by the registry
    fn aliases(&self) -> Vec<&'static str> {
        Vec::new()
    }
}

impl Clone for Box<dyn Integrator> {
    fn clone(&self) -> Self {
        self.clone_box()
    }
}

impl std::fmt::Debug for dyn Integrator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("Integrator").field(&self.name()).finish()
    }
}
