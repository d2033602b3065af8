use crate::physics::math::{Scalar, Vector};
use crate::physics::octree::{
    DEFAULT_LEAF_CAPACITY, DEFAULT_MAX_DEPTH, ForceParameters, MAX_TREE_DEPTH,
};
use crate::utils::color::ColorScheme;
use serde::{Deserialize, Serialize};

/// Largest body count the driver accepts; larger requests are clamped.
pub const MAX_BODY_COUNT: usize = 10_000_000;

/// Where freshly spawned bodies are placed relative to the spawn sphere.
#[derive(
    Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq, clap::ValueEnum,
)]
#[serde(rename_all = "snake_case")]
pub enum SpawnDistribution {
    /// On the sphere's surface
    #[default]
    Surface,
    /// Uniformly inside the sphere
    Volume,
}

/// Simulation-wide tunables, editable between steps.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct SimulationParameters {
    pub gravity: Scalar,
    pub softening: Scalar,
    /// Opening angle; zero disables approximation
    pub theta: Scalar,
    /// Extra collapse threshold checked alongside `theta`
    pub cutoff: Option<Scalar>,
    /// Fraction of bodies, taken in id order, that act as gravity sources
    pub interaction_percentage: Scalar,
    /// Velocity multiplier applied after every step
    pub damping: Scalar,
    pub body_mass: Scalar,
    pub spawn_radius: Scalar,
    pub spawn_position: Vector,
    pub spawn_distribution: SpawnDistribution,
    pub color_scheme: ColorScheme,
    /// Half-width of the cube, centered on the origin, that bounds the octree
    pub domain_half_width: Scalar,
    pub leaf_capacity: usize,
    pub max_depth: usize,
}

impl Default for SimulationParameters {
    fn default() -> Self {
        Self {
            gravity: 1.0,
            softening: 10.0,
            theta: 1.0,
            cutoff: None,
            interaction_percentage: 1.0,
            damping: 0.995,
            body_mass: 1.5,
            spawn_radius: 3.0,
            spawn_position: Vector::ZERO,
            spawn_distribution: SpawnDistribution::default(),
            color_scheme: ColorScheme::default(),
            domain_half_width: 10.0,
            leaf_capacity: DEFAULT_LEAF_CAPACITY,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl SimulationParameters {
    /// Copy with every field forced into its valid range.
    ///
    /// Non-finite values fall back to their defaults.
    pub fn sanitized(&self) -> Self {
        let defaults = Self::default();
        let finite_or = |value: Scalar, fallback: Scalar| {
            if value.is_finite() { value } else { fallback }
        };

        let domain_half_width = finite_or(self.domain_half_width, defaults.domain_half_width);

        Self {
            gravity: finite_or(self.gravity, defaults.gravity),
            softening: finite_or(self.softening, defaults.softening).max(0.0),
            theta: finite_or(self.theta, defaults.theta).max(0.0),
            cutoff: self
                .cutoff
                .filter(|cutoff| cutoff.is_finite())
                .map(|cutoff| cutoff.max(0.0)),
            interaction_percentage: finite_or(
                self.interaction_percentage,
                defaults.interaction_percentage,
            )
            .clamp(0.0, 1.0),
            damping: finite_or(self.damping, defaults.damping).clamp(0.0, 1.0),
            body_mass: finite_or(self.body_mass, defaults.body_mass).max(0.0),
            spawn_radius: finite_or(self.spawn_radius, defaults.spawn_radius).max(0.0),
            spawn_position: if self.spawn_position.is_finite() {
                self.spawn_position
            } else {
                defaults.spawn_position
            },
            spawn_distribution: self.spawn_distribution,
            color_scheme: self.color_scheme,
            domain_half_width: if domain_half_width > 0.0 {
                domain_half_width
            } else {
                defaults.domain_half_width
            },
            leaf_capacity: self.leaf_capacity.max(1),
            max_depth: self.max_depth.min(MAX_TREE_DEPTH),
        }
    }

    pub fn force_parameters(&self) -> ForceParameters {
        ForceParameters::new(self.theta, self.gravity, self.softening).with_cutoff(self.cutoff)
    }

    /// Number of leading bodies inserted into the tree out of `body_count`.
    pub fn interacting_count(&self, body_count: usize) -> usize {
        let fraction = self.interaction_percentage.clamp(0.0, 1.0);
        if fraction.is_nan() {
            return body_count;
        }
        ((body_count as Scalar * fraction).floor() as usize).min(body_count)
    }
}
