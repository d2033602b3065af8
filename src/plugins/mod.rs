pub mod diagnostics;
pub mod simulation;

pub use diagnostics::SimulationDiagnosticsPlugin;
pub use simulation::{SimulationPlugin, SimulationSet, StepBudget};
