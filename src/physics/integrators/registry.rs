//! Name-based lookup for integrators
//!
//! Each integrator describes itself (canonical name, aliases, order) and the
//! registry indexes it under every one of those names. Integrators are
//! stateless, so handing one out is a `clone_box`.

use super::Integrator;
use bevy::prelude::*;
use std::collections::{BTreeSet, HashMap};

#[derive(Resource)]
pub struct IntegratorRegistry {
    /// Canonical names and aliases, all mapped to an instance
    integrators: HashMap<String, Box<dyn Integrator>>,
}

impl IntegratorRegistry {
    /// Registry with nothing registered.
    pub fn new() -> Self {
        Self {
            integrators: HashMap::new(),
        }
    }

    /// Registers every integrator the crate ships with.
    pub fn with_standard_integrators(mut self) -> Self {
        use super::{ExplicitEuler, SymplecticEuler, VelocityVerlet};

        self.register_integrator(Box::new(VelocityVerlet));
        self.register_integrator(Box::new(SymplecticEuler));
        self.register_integrator(Box::new(ExplicitEuler));

        self
    }

    pub fn with_integrator(mut self, integrator: Box<dyn Integrator>) -> Self {
        self.register_integrator(integrator);
        self
    }

    /// Later registrations win when a name or alias collides.
    pub fn register_integrator(&mut self, integrator: Box<dyn Integrator>) {
        for alias in integrator.aliases() {
            self.integrators
                .insert(alias.to_string(), integrator.clone_box());
        }

        self.integrators
            .insert(integrator.name().to_string(), integrator);
    }

    pub fn create(&self, name: &str) -> Result<Box<dyn Integrator>, String> {
        self.integrators
            .get(name)
            .map(|integrator| integrator.clone_box())
            .ok_or_else(|| {
                let alias_names: Vec<String> = self
                    .list_aliases()
                    .into_iter()
                    .map(|(alias, _)| alias)
                    .collect();
                format!(
                    "Unknown integrator: '{}'. Available integrators: {}. Aliases: {}",
                    name,
                    self.list_available().join(", "),
                    alias_names.join(", ")
                )
            })
    }

    /// Sorted canonical names.
    pub fn list_available(&self) -> Vec<String> {
        self.integrators
            .values()
            .map(|integrator| integrator.name().to_string())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// `(alias, canonical)` pairs sorted by alias.
    pub fn list_aliases(&self) -> Vec<(String, String)> {
        let mut aliases: Vec<(String, String)> = self
            .integrators
            .iter()
            .filter(|(key, integrator)| key.as_str() != integrator.name())
            .map(|(key, integrator)| (key.clone(), integrator.name().to_string()))
            .collect();

        aliases.sort();
        aliases
    }
}

impl Default for IntegratorRegistry {
    fn default() -> Self {
        Self::new().with_standard_integrators()
    }
}
