//! Simulation plugin
//!
//! Owns the [`Simulation`] resource, advances it once per `Update` with the
//! configured time step, reacts to [`SimulationCommand`] events and, when a
//! step budget is configured, exits the app once it is spent.

use crate::config::SimulationConfig;
use crate::events::{SimulationCommand, SimulationStepped};
use crate::physics::integrators::IntegratorRegistry;
use crate::simulation::Simulation;
use bevy::prelude::*;

mod actions;

use actions::handle_simulation_commands;

#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum SimulationSet {
    Commands,
    Step,
    Budget,
}

/// Steps taken since the last reconfiguration, against an optional limit.
#[derive(Resource, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StepBudget {
    pub limit: Option<u64>,
    pub taken: u64,
}

impl StepBudget {
    pub fn is_spent(&self) -> bool {
        self.limit.is_some_and(|limit| self.taken >= limit)
    }
}

/// Adds the simulation to an app.
///
/// Uses the [`SimulationConfig`] resource when one is already present,
/// otherwise loads the user configuration.
#[derive(Default)]
pub struct SimulationPlugin;

impl SimulationPlugin {
    pub fn build_simulation(config: &SimulationConfig, registry: &IntegratorRegistry) -> Simulation {
        let mut simulation = Simulation::new(config.physics.clone())
            .with_execution_strategy(config.runner.execution);

        if let Some(seed) = config.runner.seed {
            simulation = simulation.with_seed(seed);
        }

        match registry.create(&config.runner.integrator) {
            Ok(integrator) => simulation.set_integrator(integrator),
            Err(err) => error!("{err}. Keeping {}.", simulation.integrator().name()),
        }

        simulation.set_body_count(config.runner.body_count);
        simulation.set_paused(config.runner.start_paused);
        simulation
    }
}

impl Plugin for SimulationPlugin {
    fn build(&self, app: &mut App) {
        let config = app
            .world()
            .get_resource::<SimulationConfig>()
            .cloned()
            .unwrap_or_else(SimulationConfig::load_from_user_config);

        match config.to_toml_string() {
            Ok(toml_string) => {
                info!("=== Current Configuration (TOML) ===\n{}", toml_string);
                info!("=== End Configuration ===");
            }
            Err(e) => {
                error!("Failed to serialize configuration to TOML: {}", e);
            }
        }

        let registry = IntegratorRegistry::default();
        let simulation = Self::build_simulation(&config, &registry);

        app.insert_resource(StepBudget {
            limit: config.runner.steps,
            taken: 0,
        });
        app.insert_resource(simulation);
        app.insert_resource(registry);
        app.insert_resource(config);

        app.add_event::<SimulationCommand>();
        app.add_event::<SimulationStepped>();

        app.configure_sets(
            Update,
            (
                SimulationSet::Commands,
                SimulationSet::Step,
                SimulationSet::Budget,
            )
                .chain(),
        );

        app.add_systems(
            Update,
            (
                handle_simulation_commands.in_set(SimulationSet::Commands),
                step_simulation.in_set(SimulationSet::Step),
                exit_when_budget_spent.in_set(SimulationSet::Budget),
            ),
        );
    }
}

pub fn step_simulation(
    mut simulation: ResMut<Simulation>,
    mut budget: ResMut<StepBudget>,
    config: Res<SimulationConfig>,
    mut stepped: EventWriter<SimulationStepped>,
) {
    if budget.is_spent() {
        return;
    }

    if let Some(report) = simulation.step(config.runner.dt) {
        budget.taken += 1;
        stepped.write(SimulationStepped(report));
    }
}

pub fn exit_when_budget_spent(
    budget: Res<StepBudget>,
    simulation: Res<Simulation>,
    mut exit: EventWriter<AppExit>,
) {
    if budget.is_changed() && budget.is_spent() {
        info!(
            "Finished {} steps; kinetic energy {:.6e}",
            budget.taken,
            simulation.kinetic_energy()
        );
        exit.write(AppExit::Success);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{create_simulation_app, small_config};

    #[test]
    fn test_plugin_steps_every_update() {
        let mut app = create_simulation_app(small_config(16));

        app.update();
        app.update();
        app.update();

        let simulation = app.world().resource::<Simulation>();
        assert_eq!(simulation.body_count(), 16);
        assert_eq!(simulation.steps(), 3);
    }

    #[test]
    fn test_start_paused_does_not_step() {
        let mut config = small_config(4);
        config.runner.start_paused = true;
        let mut app = create_simulation_app(config);

        app.update();

        assert_eq!(app.world().resource::<Simulation>().steps(), 0);
        assert_eq!(app.world().resource::<StepBudget>().taken, 0);
    }

    #[test]
    fn test_budget_stops_stepping_and_requests_exit() {
        let mut config = small_config(4);
        config.runner.steps = Some(2);
        let mut app = create_simulation_app(config);

        for _ in 0..5 {
            app.update();
        }

        assert_eq!(app.world().resource::<Simulation>().steps(), 2);
        assert!(app.world().resource::<StepBudget>().is_spent());
        assert!(app.should_exit().is_some());
    }

    #[test]
    fn test_unknown_integrator_falls_back_to_default() {
        let mut config = small_config(2);
        config.runner.integrator = "does_not_exist".to_string();

        let simulation = SimulationPlugin::build_simulation(&config, &IntegratorRegistry::default());
        assert_eq!(simulation.integrator().name(), "velocity_verlet");
    }

    #[test]
    fn test_configured_integrator_alias_is_used() {
        let mut config = small_config(2);
        config.runner.integrator = "semi_implicit_euler".to_string();

        let simulation = SimulationPlugin::build_simulation(&config, &IntegratorRegistry::default());
        assert_eq!(simulation.integrator().name(), "symplectic_euler");
    }
}
