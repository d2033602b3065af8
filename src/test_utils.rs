//! Fixtures shared by unit tests, integration tests and benches

use bevy::prelude::*;

use crate::config::SimulationConfig;
use crate::physics::body::Body;
use crate::physics::math::{Scalar, Vector};
use crate::plugins::SimulationPlugin;
use crate::simulation::{Simulation, SimulationParameters};

/// Seeded configuration with a handful of bodies and no step limit.
pub fn small_config(body_count: usize) -> SimulationConfig {
    let mut config = SimulationConfig::default();
    config.runner.body_count = body_count;
    config.runner.seed = Some(42);
    config.runner.dt = 0.01;
    config
}

/// Creates a minimal headless app with the simulation plugin installed.
///
/// `config` is inserted before the plugin so the user's configuration file
/// is never read.
pub fn create_simulation_app(config: SimulationConfig) -> App {
    let mut app = App::new();

    app.add_plugins((MinimalPlugins, bevy::diagnostic::DiagnosticsPlugin));
    app.insert_resource(config);
    app.add_plugins(SimulationPlugin);

    app
}

/// Unit gravity, exact summation (`theta = 0`) and no damping.
pub fn exact_parameters(softening: Scalar) -> SimulationParameters {
    SimulationParameters {
        gravity: 1.0,
        softening,
        theta: 0.0,
        damping: 1.0,
        ..Default::default()
    }
}

/// Two unit masses at `(-separation / 2, 0, 0)` and `(separation / 2, 0, 0)`.
pub fn two_body_simulation(parameters: SimulationParameters, separation: Scalar) -> Simulation {
    let mut simulation = Simulation::new(parameters).with_seed(0).with_body_count(2);

    let half = separation / 2.0;
    let bodies = simulation.bodies_mut();
    bodies[0] = Body::new(0).with_position(Vector::new(-half, 0.0, 0.0));
    bodies[1] = Body::new(1).with_position(Vector::new(half, 0.0, 0.0));

    simulation
}

/// Seeded simulation of `body_count` bodies spread through a ball.
pub fn seeded_simulation(body_count: usize, seed: u64) -> Simulation {
    let parameters = SimulationParameters {
        spawn_radius: 8.0,
        spawn_distribution: crate::simulation::SpawnDistribution::Volume,
        ..Default::default()
    };

    Simulation::new(parameters)
        .with_seed(seed)
        .with_body_count(body_count)
}
