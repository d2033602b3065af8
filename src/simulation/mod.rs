//! The N-body driver: body store, spawning and the per-step loop.

mod parameters;

pub use parameters::{MAX_BODY_COUNT, SimulationParameters, SpawnDistribution};

use crate::physics::body::{Body, BodyVertex};
use crate::physics::bound::Bound;
use crate::physics::execution::ExecutionStrategy;
use crate::physics::integrators::{Integrator, VelocityVerlet};
use crate::physics::math::{Scalar, Vector, random_point_in_ball, random_unit_vector};
use crate::physics::octree::{Octree, OctreeBody, OctreeStats};
use crate::resources::{RenderingRng, SharedRng};
use bevy::prelude::*;
use std::time::{Duration, Instant};

/// Summary of one completed step.
#[derive(Debug, Clone, PartialEq)]
pub struct StepReport {
    /// Steps completed since the last reset, including this one
    pub step: u64,
    pub dt: Scalar,
    pub body_count: usize,
    /// Bodies inserted into the tree as gravity sources
    pub interacting_count: usize,
    pub tree: OctreeStats,
    pub duration: Duration,
}

impl StepReport {
    /// Sources that fell outside the domain this step.
    pub fn dropped_count(&self) -> usize {
        self.tree.dropped_count
    }
}

#[derive(Resource)]
pub struct Simulation {
    bodies: Vec<Body>,
    parameters: SimulationParameters,
    integrator: Box<dyn Integrator>,
    execution: ExecutionStrategy,
    physics_rng: SharedRng,
    rendering_rng: RenderingRng,
    paused: bool,
    steps: u64,
    last_report: Option<StepReport>,
}

impl Default for Simulation {
    fn default() -> Self {
        Self::new(SimulationParameters::default())
    }
}

impl Simulation {
    /// Empty simulation with entropy-seeded RNGs and the default integrator.
    pub fn new(parameters: SimulationParameters) -> Self {
        Self {
            bodies: Vec::new(),
            parameters: parameters.sanitized(),
            integrator: Box::new(VelocityVerlet),
            execution: ExecutionStrategy::default(),
            physics_rng: SharedRng::default(),
            rendering_rng: RenderingRng::default(),
            paused: false,
            steps: 0,
            last_report: None,
        }
    }

    /// Reseeds both RNGs so spawning becomes reproducible.
    ///
    /// Call before [`Simulation::set_body_count`]; bodies already spawned keep
    /// their state.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.physics_rng = SharedRng::from_seed(seed);
        self.rendering_rng = RenderingRng::from_seed(seed);
        self
    }

    pub fn with_body_count(mut self, body_count: usize) -> Self {
        self.set_body_count(body_count);
        self
    }

    pub fn with_integrator(mut self, integrator: Box<dyn Integrator>) -> Self {
        self.set_integrator(integrator);
        self
    }

    pub fn with_execution_strategy(mut self, execution: ExecutionStrategy) -> Self {
        self.execution = execution;
        self
    }

    pub fn body_count(&self) -> usize {
        self.bodies.len()
    }

    /// Replaces every body with `body_count` fresh ones (ids `0..body_count`)
    /// and randomizes them.
    pub fn set_body_count(&mut self, body_count: usize) {
        let clamped = body_count.min(MAX_BODY_COUNT);
        if clamped != body_count {
            warn!("Requested {body_count} bodies, clamping to {MAX_BODY_COUNT}");
        }

        self.bodies.clear();
        self.bodies.extend((0..clamped as u32).map(Body::new));
        self.randomize();

        info!("Simulation reconfigured with {} bodies", clamped);
    }

    /// Re-randomizes every body without changing the count.
    pub fn reset(&mut self) {
        self.randomize();
        info!("Simulation reset ({} bodies)", self.bodies.len());
    }

    /// Places bodies around the spawn position and restarts the step count.
    pub fn randomize(&mut self) {
        self.parameters = self.parameters.sanitized();
        let parameters = &self.parameters;

        for body in &mut self.bodies {
            let rng = &mut *self.physics_rng;
            let offset = match parameters.spawn_distribution {
                SpawnDistribution::Surface => random_unit_vector(rng) * parameters.spawn_radius,
                SpawnDistribution::Volume => random_point_in_ball(rng, parameters.spawn_radius),
            };

            body.position = parameters.spawn_position + offset;
            body.velocity = Vector::ZERO;
            body.force = Vector::ZERO;
            body.mass = parameters.body_mass;
            body.color = parameters.color_scheme.sample(&mut self.rendering_rng);
        }

        self.steps = 0;
        self.last_report = None;
    }

    pub fn bodies(&self) -> &[Body] {
        &self.bodies
    }

    /// Direct access for hosts that place bodies themselves.
    pub fn bodies_mut(&mut self) -> &mut [Body] {
        &mut self.bodies
    }

    pub fn parameters(&self) -> &SimulationParameters {
        &self.parameters
    }

    /// Edits take effect on the next step, after clamping.
    pub fn parameters_mut(&mut self) -> &mut SimulationParameters {
        &mut self.parameters
    }

    pub fn set_integrator(&mut self, integrator: Box<dyn Integrator>) {
        debug!("Using integrator {}", integrator.name());
        self.integrator = integrator;
    }

    pub fn integrator(&self) -> &dyn Integrator {
        self.integrator.as_ref()
    }

    pub fn set_execution_strategy(&mut self, execution: ExecutionStrategy) {
        self.execution = execution;
    }

    pub fn execution_strategy(&self) -> ExecutionStrategy {
        self.execution
    }

    pub fn set_paused(&mut self, paused: bool) {
        self.paused = paused;
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn toggle_pause(&mut self) {
        self.paused = !self.paused;
        info!(
            "Simulation {}",
            if self.paused { "paused" } else { "resumed" }
        );
    }

    /// Steps completed since the last reset.
    pub fn steps(&self) -> u64 {
        self.steps
    }

    pub fn last_report(&self) -> Option<&StepReport> {
        self.last_report.as_ref()
    }

    /// Advances every body by `dt`.
    ///
    /// Builds a fresh octree from the leading interacting bodies, then for
    /// each body queries the net force, integrates, damps the velocity and
    /// clears the force. Returns `None` when paused or when `dt` is not
    /// finite.
    pub fn step(&mut self, dt: Scalar) -> Option<StepReport> {
        if self.paused {
            return None;
        }

        if !dt.is_finite() {
            warn!("Skipping step with non-finite dt {dt}");
            return None;
        }

        let started = Instant::now();
        self.parameters = self.parameters.sanitized();
        let parameters = &self.parameters;

        let interacting_count = parameters.interacting_count(self.bodies.len());
        let mut octree = Octree::new(Bound::centered(parameters.domain_half_width))
            .with_leaf_capacity(parameters.leaf_capacity)
            .with_max_depth(parameters.max_depth)
            .with_body_capacity(interacting_count);
        octree.build(self.bodies[..interacting_count].iter().map(OctreeBody::from));

        if octree.dropped_count() > 0 {
            trace!(
                "{} bodies outside the domain were left out of the tree",
                octree.dropped_count()
            );
        }

        let force_parameters = parameters.force_parameters();
        let damping = parameters.damping;
        let integrator = self.integrator.as_ref();
        let tree = &octree;

        self.execution.for_each_mut(&mut self.bodies, |body| {
            body.force += tree.calculate_force(&OctreeBody::from(&*body), &force_parameters);

            let acceleration = body.acceleration();
            integrator.step(&mut body.position, &mut body.velocity, acceleration, dt);
            body.velocity *= damping;
            body.force = Vector::ZERO;
        });

        self.steps += 1;
        let report = StepReport {
            step: self.steps,
            dt,
            body_count: self.bodies.len(),
            interacting_count,
            tree: octree.stats(),
            duration: started.elapsed(),
        };

        debug!(
            "Step {}: {} bodies, {} nodes, depth {}, {:?}",
            report.step,
            report.body_count,
            report.tree.node_count,
            report.tree.max_depth,
            report.duration
        );

        self.last_report = Some(report.clone());
        Some(report)
    }

    pub fn total_mass(&self) -> Scalar {
        self.bodies.iter().map(|body| body.mass).sum()
    }

    /// Mass-weighted mean position, or `None` without positive total mass.
    pub fn barycenter(&self) -> Option<Vector> {
        let (weighted_sum, total_mass) = self
            .bodies
            .iter()
            .fold((Vector::ZERO, 0.0), |(weighted_acc, mass_acc), body| {
                (weighted_acc + body.position * body.mass, mass_acc + body.mass)
            });

        if total_mass > 0.0 {
            let barycenter = weighted_sum / total_mass;
            barycenter.is_finite().then_some(barycenter)
        } else {
            None
        }
    }

    pub fn kinetic_energy(&self) -> Scalar {
        self.bodies.iter().map(Body::kinetic_energy).sum()
    }

    /// Single-precision copies of position, velocity and color for upload.
    pub fn render_vertices(&self) -> Vec<BodyVertex> {
        self.bodies.iter().map(BodyVertex::from).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_body_count_assigns_sequential_ids() {
        let simulation = Simulation::default().with_seed(1).with_body_count(5);

        let ids: Vec<u32> = simulation.bodies().iter().map(|body| body.id).collect();
        assert_eq!(ids, vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn test_surface_spawn_lies_on_sphere() {
        let parameters = SimulationParameters {
            spawn_radius: 3.0,
            spawn_position: Vector::new(1.0, -1.0, 2.0),
            ..Default::default()
        };
        let simulation = Simulation::new(parameters).with_seed(9).with_body_count(200);

        for body in simulation.bodies() {
            let radius = (body.position - Vector::new(1.0, -1.0, 2.0)).length();
            assert!((radius - 3.0).abs() < 1e-9, "radius {radius}");
            assert_eq!(body.velocity, Vector::ZERO);
            assert_eq!(body.mass, 1.5);
        }
    }

    #[test]
    fn test_volume_spawn_stays_inside_sphere() {
        let parameters = SimulationParameters {
            spawn_distribution: SpawnDistribution::Volume,
            spawn_radius: 2.0,
            ..Default::default()
        };
        let simulation = Simulation::new(parameters).with_seed(3).with_body_count(500);

        assert!(simulation.bodies().iter().all(|body| body.position.length() <= 2.0 + 1e-12));
    }

    #[test]
    fn test_paused_step_is_a_no_op() {
        let mut simulation = Simulation::default().with_seed(4).with_body_count(10);
        let before = simulation.bodies().to_vec();

        simulation.set_paused(true);
        assert!(simulation.step(0.1).is_none());
        assert_eq!(simulation.bodies(), before.as_slice());
        assert_eq!(simulation.steps(), 0);
    }

    #[test]
    fn test_step_clears_forces_and_reports() {
        let mut simulation = Simulation::default().with_seed(5).with_body_count(20);

        let report = simulation.step(0.01).expect("not paused");
        assert_eq!(report.step, 1);
        assert_eq!(report.body_count, 20);
        assert_eq!(report.interacting_count, 20);
        assert_eq!(report.tree.body_count, 20);
        assert!(simulation.bodies().iter().all(|body| body.force == Vector::ZERO));
        assert_eq!(simulation.last_report(), Some(&report));
    }

    #[test]
    fn test_reset_keeps_count_and_restarts_steps() {
        let mut simulation = Simulation::default().with_seed(6).with_body_count(8);
        simulation.step(0.01);
        simulation.reset();

        assert_eq!(simulation.body_count(), 8);
        assert_eq!(simulation.steps(), 0);
        assert!(simulation.last_report().is_none());
    }

    #[test]
    fn test_barycenter_of_empty_simulation_is_none() {
        let simulation = Simulation::default();
        assert_eq!(simulation.barycenter(), None);
        assert_eq!(simulation.total_mass(), 0.0);
    }

    #[test]
    fn test_render_vertices_follow_bodies() {
        let simulation = Simulation::default().with_seed(2).with_body_count(3);
        let vertices = simulation.render_vertices();

        assert_eq!(vertices.len(), 3);
        for (vertex, body) in vertices.iter().zip(simulation.bodies()) {
            assert_eq!(vertex.color, body.color);
            assert_eq!(vertex.position, body.position.as_vec3().to_array());
        }
    }

    #[test]
    fn test_non_finite_dt_is_skipped() {
        let mut simulation = Simulation::default().with_seed(8).with_body_count(4);
        assert!(simulation.step(Scalar::NAN).is_none());
        assert_eq!(simulation.steps(), 0);
    }
}
