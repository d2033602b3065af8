//! Velocity Verlet integration method

use super::Integrator;
use crate::physics::math::{Scalar, Vector};

/// Velocity Verlet integrator, the default scheme
///
/// Uses the acceleration computed at the start of the step for both halves:
///
/// ```text
/// x(t+dt) = x(t) + v(t)*dt + 0.5*a(t)*dt²
/// v(t+dt) = v(t) + a(t)*dt
/// ```
///
/// Forces are evaluated once per step, so the velocity half uses a(t) rather
/// than the average of a(t) and a(t+dt). The position update is second order
/// locally, but the velocity update limits the global order to one.
#[derive(Debug, Copy, Clone, Default)]
pub struct VelocityVerlet;

impl Integrator for VelocityVerlet {
    fn clone_box(&self) -> Box<dyn Integrator> {
        Box::new(*self)
    }

    fn step(&self, position: &mut Vector, velocity: &mut Vector, acceleration: Vector, dt: Scalar) {
        *position += *velocity * dt + acceleration * (0.5 * dt * dt);
        *velocity += acceleration * dt;
    }

    fn convergence_order(&self) -> usize {
        1
    }

    fn name(&self) -> &'static str {
        "velocity_verlet"
    }

    fn aliases(&self) -> Vec<&'static str> {
        vec!["verlet", "vv"]
    }
}
