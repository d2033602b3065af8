//! Handlers for `SimulationCommand` events

use super::StepBudget;
use crate::events::SimulationCommand;
use crate::simulation::Simulation;
use bevy::prelude::*;

pub fn handle_simulation_commands(
    mut commands_reader: EventReader<SimulationCommand>,
    mut simulation: ResMut<Simulation>,
    mut budget: ResMut<StepBudget>,
) {
    for command in commands_reader.read() {
        match *command {
            SimulationCommand::Reset => {
                simulation.reset();
                budget.taken = 0;
            }
            SimulationCommand::TogglePause => simulation.toggle_pause(),
            SimulationCommand::SetBodyCount(body_count) => {
                simulation.set_body_count(body_count);
                budget.taken = 0;
            }
        }
    }
}
