//! Simulation diagnostics.
//!
//! Records per-step measurements into Bevy's diagnostics store so they show
//! up in `LogDiagnosticsPlugin` output or any other diagnostics consumer:
//!
//! - barycenter position (x, y, z)
//! - wall-clock step time
//! - octree node count and depth
//! - bodies left out of the tree because they escaped the domain
//! - total kinetic energy

use crate::events::SimulationStepped;
use crate::simulation::Simulation;
use bevy::diagnostic::{
    DEFAULT_MAX_HISTORY_LENGTH, Diagnostic, DiagnosticPath, Diagnostics, RegisterDiagnostic,
};
use bevy::prelude::*;

pub struct SimulationDiagnosticsPlugin {
    max_history_length: usize,
    smoothing_factor: f64,
}

impl Default for SimulationDiagnosticsPlugin {
    fn default() -> Self {
        Self {
            max_history_length: DEFAULT_MAX_HISTORY_LENGTH,
            smoothing_factor: 0.1,
        }
    }
}

impl SimulationDiagnosticsPlugin {
    pub const BARYCENTER_X_PATH: DiagnosticPath = DiagnosticPath::const_new("barycenter/x");
    pub const BARYCENTER_Y_PATH: DiagnosticPath = DiagnosticPath::const_new("barycenter/y");
    pub const BARYCENTER_Z_PATH: DiagnosticPath = DiagnosticPath::const_new("barycenter/z");

    pub const STEP_TIME_PATH: DiagnosticPath = DiagnosticPath::const_new("simulation/step_time");
    pub const KINETIC_ENERGY_PATH: DiagnosticPath =
        DiagnosticPath::const_new("simulation/kinetic_energy");

    pub const OCTREE_NODES_PATH: DiagnosticPath = DiagnosticPath::const_new("octree/nodes");
    pub const OCTREE_DEPTH_PATH: DiagnosticPath = DiagnosticPath::const_new("octree/depth");
    pub const OCTREE_DROPPED_PATH: DiagnosticPath = DiagnosticPath::const_new("octree/dropped");

    const DIAGNOSTIC_PATHS: &'static [DiagnosticPath] = &[
        Self::BARYCENTER_X_PATH,
        Self::BARYCENTER_Y_PATH,
        Self::BARYCENTER_Z_PATH,
        Self::STEP_TIME_PATH,
        Self::KINETIC_ENERGY_PATH,
        Self::OCTREE_NODES_PATH,
        Self::OCTREE_DEPTH_PATH,
        Self::OCTREE_DROPPED_PATH,
    ];

    pub fn with_smoothing_factor(mut self, smoothing_factor: f64) -> Self {
        self.smoothing_factor = smoothing_factor;
        self
    }

    fn register_diagnostics(&self, app: &mut App) {
        for path in Self::DIAGNOSTIC_PATHS {
            let diagnostic = Diagnostic::new(path.clone())
                .with_max_history_length(self.max_history_length)
                .with_smoothing_factor(self.smoothing_factor);

            let diagnostic = if *path == Self::STEP_TIME_PATH {
                diagnostic.with_suffix("ms")
            } else {
                diagnostic
            };

            app.register_diagnostic(diagnostic);
        }
    }

    fn record_step_diagnostics(
        mut stepped: EventReader<SimulationStepped>,
        simulation: Res<Simulation>,
        mut diagnostics: Diagnostics,
    ) {
        let Some(SimulationStepped(report)) = stepped.read().last() else {
            return;
        };

        diagnostics.add_measurement(&Self::STEP_TIME_PATH, || {
            report.duration.as_secs_f64() * 1000.0
        });
        diagnostics.add_measurement(&Self::OCTREE_NODES_PATH, || report.tree.node_count as f64);
        diagnostics.add_measurement(&Self::OCTREE_DEPTH_PATH, || report.tree.max_depth as f64);
        diagnostics.add_measurement(&Self::OCTREE_DROPPED_PATH, || {
            report.dropped_count() as f64
        });
        diagnostics.add_measurement(&Self::KINETIC_ENERGY_PATH, || simulation.kinetic_energy());

        if let Some(barycenter) = simulation.barycenter() {
            diagnostics.add_measurement(&Self::BARYCENTER_X_PATH, || barycenter.x);
            diagnostics.add_measurement(&Self::BARYCENTER_Y_PATH, || barycenter.y);
            diagnostics.add_measurement(&Self::BARYCENTER_Z_PATH, || barycenter.z);
        }
    }
}

impl Plugin for SimulationDiagnosticsPlugin {
    fn build(&self, app: &mut App) {
        self.register_diagnostics(app);

        app.add_systems(
            Update,
            Self::record_step_diagnostics.after(crate::plugins::simulation::SimulationSet::Step),
        );
    }
}
