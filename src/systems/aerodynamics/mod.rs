mod aggregator;
mod surface_model;

pub use aggregator::{aggregate_forces, aggregate_forces_recording};
pub use surface_model::surface_forces;

use bevy::prelude::*;
use nalgebra::Vector3;

use crate::components::{AirframeComponent, ForceTorque, RigidBodyComponent, SpatialComponent};
use crate::resources::{EnvironmentModel, PhysicsConfig};
use crate::systems::physics::integrate_step;

/// Computes each airframe's predictor-corrected aerodynamic pair and applies
/// it, together with thrust, to the rigid body's accumulators.
///
/// Gravity is handled by the integrator; it still enters the velocity
/// prediction inside [`integrate_step`] because the half-step must see every
/// acceleration acting on the body.
pub fn aero_force_system(
    mut query: Query<(
        &mut AirframeComponent,
        &SpatialComponent,
        &mut RigidBodyComponent,
    )>,
    physics: Res<PhysicsConfig>,
    environment: Res<EnvironmentModel>,
) {
    for (mut airframe, spatial, mut body) in query.iter_mut() {
        let wind = environment.wind_at(&spatial.position);
        let thrust_world = spatial.attitude * (Vector3::x() * airframe.current_thrust());

        let applied = integrate_step(
            &mut airframe.surfaces,
            spatial,
            &body,
            &wind,
            environment.air_density(),
            &thrust_world,
            &physics.gravity,
            physics.timestep,
        );

        // extreme states can push the model into degenerate numerics; report
        // and drop the pair rather than feeding NaN into the rigid body
        let applied = if applied.is_finite() {
            applied
        } else {
            warn!(
                "non-finite aerodynamic forces on '{}', clamping to zero",
                airframe.name
            );
            ForceTorque::zero()
        };

        body.apply_force(applied.force);
        body.apply_torque(applied.torque);
        body.apply_force(thrust_world);
    }
}
