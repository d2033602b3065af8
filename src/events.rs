//! Events exchanged between the simulation plugin and its host.

use crate::simulation::StepReport;
use bevy::prelude::*;

/// Requests that change the running simulation.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SimulationCommand {
    /// Re-randomize bodies without changing their count
    Reset,
    TogglePause,
    /// Replace every body with this many fresh ones
    SetBodyCount(usize),
}

/// Sent after every completed step.
#[derive(Event, Debug, Clone)]
pub struct SimulationStepped(pub StepReport);
