use rand::Rng;

/// Scalar type for physics calculations (f64 for precision)
pub type Scalar = f64;

/// 3D vector type for positions, velocities, and forces
pub type Vector = bevy::math::DVec3;

/// Uniformly distributed direction on the unit sphere.
pub fn random_unit_vector<R: Rng + ?Sized>(rng: &mut R) -> Vector {
    let theta = rng.random_range(0.0..=2.0 * core::f64::consts::PI);
    let phi = libm::acos(rng.random_range(-1.0..=1.0));

    Vector::new(
        libm::sin(phi) * libm::cos(theta),
        libm::sin(phi) * libm::sin(theta),
        libm::cos(phi),
    )
}

/// Point uniformly distributed inside a ball of the given radius.
///
/// The cube root on the radial sample keeps the density constant per volume
/// instead of clustering points near the center.
pub fn random_point_in_ball<R: Rng + ?Sized>(rng: &mut R, radius: Scalar) -> Vector {
    let direction = random_unit_vector(rng);
    let u: Scalar = rng.random();
    direction * (radius * libm::cbrt(u))
}
