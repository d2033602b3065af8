//! Softened Newtonian gravity shared by exact and approximate interactions.

use crate::physics::math::{Scalar, Vector};

/// Force on a body of mass `mass` at `position` exerted by a point mass
/// `source_mass` at `source_position`.
///
/// Magnitude is `gravity * mass * source_mass / (r² + softening²)`, directed
/// from `position` toward `source_position`. Coincident or non-finite
/// separations produce no force, as does a non-finite result.
#[inline]
pub fn force_from_point(
    position: Vector,
    mass: Scalar,
    source_position: Vector,
    source_mass: Scalar,
    gravity: Scalar,
    softening: Scalar,
) -> Vector {
    let direction = source_position - position;
    let distance_squared = direction.length_squared();

    if distance_squared <= 0.0 || !distance_squared.is_finite() {
        return Vector::ZERO;
    }

    let distance = distance_squared.sqrt();
    let magnitude = gravity * mass * source_mass / (distance_squared + softening * softening);
    let force = direction * (magnitude / distance);

    if force.is_finite() { force } else { Vector::ZERO }
}
