use bevy::prelude::*;

use crate::resources::{EnvironmentConfig, EnvironmentModel, PhysicsConfig};
use crate::systems::{aero_force_system, control_surface_system, rigid_body_integrator_system};

/// Physics simulation stages
#[derive(Debug, Hash, PartialEq, Eq, Clone, SystemSet)]
pub enum PhysicsSet {
    Controls,
    Aerodynamics,
    Integration,
}

/// Fixed-timestep flight dynamics: control surface deflection, aerodynamic
/// force aggregation, and rigid-body integration, chained in that order.
pub struct AircraftPhysicsPlugin {
    pub physics: PhysicsConfig,
    pub environment: EnvironmentConfig,
}

impl Default for AircraftPhysicsPlugin {
    fn default() -> Self {
        Self {
            physics: PhysicsConfig::default(),
            environment: EnvironmentConfig::default(),
        }
    }
}

impl Plugin for AircraftPhysicsPlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(Time::<Fixed>::from_seconds(self.physics.timestep));
        app.insert_resource(self.physics.clone());
        app.insert_resource(EnvironmentModel::new(&self.environment));

        app.configure_sets(
            FixedUpdate,
            (
                PhysicsSet::Controls,
                PhysicsSet::Aerodynamics,
                PhysicsSet::Integration,
            )
                .chain(),
        );

        app.add_systems(
            FixedUpdate,
            (
                control_surface_system.in_set(PhysicsSet::Controls),
                aero_force_system.in_set(PhysicsSet::Aerodynamics),
                rigid_body_integrator_system.in_set(PhysicsSet::Integration),
            ),
        );
    }
}
