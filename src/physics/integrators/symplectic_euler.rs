//! Symplectic Euler integration method

use super::Integrator;
use crate::physics::math::{Scalar, Vector};

/// Symplectic Euler integrator (also known as semi-implicit Euler)
///
/// Updates velocity first, then moves the body with the new velocity:
///
/// ```text
/// v(t+dt) = v(t) + a(t)*dt
/// x(t+dt) = x(t) + v(t+dt)*dt
/// ```
///
/// First order, with bounded energy error on conservative systems.
#[derive(Debug, Copy, Clone, Default)]
pub struct SymplecticEuler;

impl Integrator for SymplecticEuler {
    fn clone_box(&self) -> Box<dyn Integrator> {
        Box::new(*self)
    }

    fn step(&self, position: &mut Vector, velocity: &mut Vector, acceleration: Vector, dt: Scalar) {
        *velocity += acceleration * dt;
        *position += *velocity * dt;
    }

    fn convergence_order(&self) -> usize {
        1
    }

    fn name(&self) -> &'static str {
        "symplectic_euler"
    }

    fn aliases(&self) -> Vec<&'static str> {
        vec!["semi_implicit_euler", "euler_cromer"]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_position_uses_updated_velocity() {
        let mut position = Vector::ZERO;
        let mut velocity = Vector::new(1.0, 0.0, 0.0);

        SymplecticEuler.step(&mut position, &mut velocity, Vector::new(2.0, 0.0, 0.0), 0.5);

        assert_eq!(velocity, Vector::new(2.0, 0.0, 0.0));
        assert_eq!(position, Vector::new(1.0, 0.0, 0.0));
    }

    #[test]
    fn test_circular_orbit_stays_near_radius() {
        // Unit circular orbit around a unit mass at the origin
        let mut position = Vector::new(1.0, 0.0, 0.0);
        let mut velocity = Vector::new(0.0, 1.0, 0.0);
        let dt = 0.001;

        for _ in 0..6283 {
            let r = position.length();
            let acceleration = -position / (r * r * r);
            SymplecticEuler.step(&mut position, &mut velocity, acceleration, dt);
        }

        assert!((position.length() - 1.0).abs() < 0.01, "radius {}", position.length());
    }
}
