use crate::physics::math::{Scalar, Vector};

/// Axis-aligned cube described by its center and half of its side length.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bound {
    pub center: Vector,
    pub half_width: Scalar,
}

impl Bound {
    pub fn new(center: Vector, half_width: Scalar) -> Self {
        Self { center, half_width }
    }

    /// Cube of the given half-width centered on the origin.
    pub fn centered(half_width: Scalar) -> Self {
        Self::new(Vector::ZERO, half_width)
    }

    /// Closed-interval containment on all three axes.
    ///
    /// NaN coordinates are never contained.
    #[inline]
    pub fn contains(&self, position: Vector) -> bool {
        let min = self.min();
        let max = self.max();

        position.x >= min.x
            && position.x <= max.x
            && position.y >= min.y
            && position.y <= max.y
            && position.z >= min.z
            && position.z <= max.z
    }

    #[inline]
    pub fn min(&self) -> Vector {
        self.center - Vector::splat(self.half_width)
    }

    #[inline]
    pub fn max(&self) -> Vector {
        self.center + Vector::splat(self.half_width)
    }

    /// Full side length of the cube.
    #[inline]
    pub fn size(&self) -> Scalar {
        self.half_width * 2.0
    }

    /// Octant a position falls into relative to the center.
    ///
    /// Bit 0 selects +x, bit 1 selects +y and bit 2 selects +z, matching the
    /// order of [`Bound::octants`].
    #[inline]
    pub fn octant_index(&self, position: Vector) -> usize {
        ((position.x > self.center.x) as usize)
            | (((position.y > self.center.y) as usize) << 1)
            | (((position.z > self.center.z) as usize) << 2)
    }

    /// The eight child cubes that exactly partition this one.
    pub fn octants(&self) -> [Bound; 8] {
        let half_width = self.half_width / 2.0;

        core::array::from_fn(|index| {
            let sign = |bit: usize| if index & bit != 0 { 1.0 } else { -1.0 };
            let offset = Vector::new(sign(1), sign(2), sign(4)) * half_width;
            Bound::new(self.center + offset, half_width)
        })
    }
}
