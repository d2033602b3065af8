//! Explicit (forward) Euler integration method

use super::Integrator;
use crate::physics::math::{Scalar, Vector};

/// Explicit Euler integrator
///
/// Moves the body with the velocity it had at the start of the step, then
/// updates the velocity:
///
/// ```text
/// x(t+dt) = x(t) + v(t)*dt
/// v(t+dt) = v(t) + a(t)*dt
/// ```
///
/// Not symplectic; orbits drift outward over long runs. Kept for comparison.
#[derive(Debug, Copy, Clone, Default)]
pub struct ExplicitEuler;

impl Integrator for ExplicitEuler {
    fn clone_box(&self) -> Box<dyn Integrator> {
        Box::new(*self)
    }

    fn step(&self, position: &mut Vector, velocity: &mut Vector, acceleration: Vector, dt: Scalar) {
        *position += *velocity * dt;
        *velocity += acceleration * dt;
    }

    fn convergence_order(&self) -> usize {
        1
    }

    fn name(&self) -> &'static str {
        "explicit_euler"
    }

    fn aliases(&self) -> Vec<&'static str> {
        vec!["euler", "forward_euler"]
    }
}
