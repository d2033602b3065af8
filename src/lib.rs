//! Gravitree library
//!
//! Barnes-Hut octree N-body engine, its Bevy plugins and the configuration
//! and CLI layers used by the headless runner.

pub mod cli;
pub mod config;
pub mod events;
pub mod physics;
pub mod plugins;
pub mod prelude;
pub mod resources;
pub mod simulation;
pub mod utils;

// Test utilities are public for integration tests
pub mod test_utils;
