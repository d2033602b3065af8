use crate::physics::math::{Scalar, Vector};

/// A point mass owned by the simulation's body store.
#[derive(Debug, Clone, PartialEq)]
pub struct Body {
    /// Stable identity, used to exclude self-interaction.
    pub id: u32,
    pub position: Vector,
    pub velocity: Vector,
    /// Force accumulated during the current step; zero between steps.
    pub force: Vector,
    pub mass: Scalar,
    pub color: [f32; 3],
}

impl Body {
    pub fn new(id: u32) -> Self {
        Self {
            id,
            position: Vector::ZERO,
            velocity: Vector::ZERO,
            force: Vector::ZERO,
            mass: 1.0,
            color: [1.0, 1.0, 1.0],
        }
    }

    pub fn with_position(mut self, position: Vector) -> Self {
        self.position = position;
        self
    }

    pub fn with_velocity(mut self, velocity: Vector) -> Self {
        self.velocity = velocity;
        self
    }

    pub fn with_mass(mut self, mass: Scalar) -> Self {
        self.mass = mass;
        self
    }

    /// Current acceleration from the accumulated force.
    ///
    /// Massless (or non-finite mass) bodies do not accelerate.
    #[inline]
    pub fn acceleration(&self) -> Vector {
        if self.mass > 0.0 && self.mass.is_finite() {
            self.force / self.mass
        } else {
            Vector::ZERO
        }
    }

    #[inline]
    pub fn kinetic_energy(&self) -> Scalar {
        0.5 * self.mass * self.velocity.length_squared()
    }
}

/// Per-vertex data for the renderer, laid out for direct buffer upload.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BodyVertex {
    pub position: [f32; 3],
    pub velocity: [f32; 3],
    pub color: [f32; 3],
}

impl From<&Body> for BodyVertex {
    fn from(body: &Body) -> Self {
        Self {
            position: body.position.as_vec3().to_array(),
            velocity: body.velocity.as_vec3().to_array(),
            color: body.color,
        }
    }
}
