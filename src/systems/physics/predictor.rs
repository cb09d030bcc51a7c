use nalgebra::Vector3;

use crate::components::{AeroSurface, ForceTorque, RigidBodyComponent, SpatialComponent};
use crate::systems::aerodynamics::{aggregate_forces, aggregate_forces_recording};
use crate::utils::PREDICTION_TIMESTEP_FRACTION;

/// Half-step velocity prediction under the given net force (aerodynamic plus
/// thrust and gravity).
pub fn predict_velocity(
    spatial: &SpatialComponent,
    net_force: &Vector3<f64>,
    mass: f64,
    dt: f64,
) -> Vector3<f64> {
    spatial.velocity + dt * PREDICTION_TIMESTEP_FRACTION * net_force / mass
}

/// Half-step angular velocity prediction.
///
/// The torque is rotated into the principal-axis frame, divided by the
/// principal moments, and rotated back. The current attitude's inertia frame
/// is reused for the predicted state; the prediction is first-order anyway.
pub fn predict_angular_velocity(
    spatial: &SpatialComponent,
    body: &RigidBodyComponent,
    torque: &Vector3<f64>,
    dt: f64,
) -> Vector3<f64> {
    let inertia_frame = body.inertia_frame(spatial);
    let torque_principal = inertia_frame.inverse_transform_vector(torque);
    let angular_acceleration_principal = Vector3::new(
        torque_principal.x / body.inertia.x,
        torque_principal.y / body.inertia.y,
        torque_principal.z / body.inertia.z,
    );

    spatial.angular_velocity
        + dt * PREDICTION_TIMESTEP_FRACTION * (inertia_frame * angular_acceleration_principal)
}

/// One tick's worth of aerodynamic force and torque, stabilized with a
/// midpoint predictor-corrector.
///
/// Aerodynamic damping depends on velocity, so a single explicit evaluation
/// amplifies error at discrete timesteps. Forces are evaluated at the current
/// state, a half-step velocity/angular-velocity is predicted (including
/// thrust and gravity, which the caller applies separately), forces are
/// re-evaluated there, and the two evaluations are averaged.
///
/// Per-surface diagnostics are recorded from the current-state pass.
pub fn integrate_step(
    surfaces: &mut [AeroSurface],
    spatial: &SpatialComponent,
    body: &RigidBodyComponent,
    wind: &Vector3<f64>,
    air_density: f64,
    thrust_world: &Vector3<f64>,
    gravity: &Vector3<f64>,
    dt: f64,
) -> ForceTorque {
    let center_of_mass = body.world_center_of_mass(spatial);

    let now = aggregate_forces_recording(surfaces, spatial, wind, air_density, &center_of_mass);

    let external = thrust_world + gravity * body.mass;
    let mut predicted = spatial.clone();
    predicted.velocity = predict_velocity(spatial, &(now.force + external), body.mass, dt);
    predicted.angular_velocity = predict_angular_velocity(spatial, body, &now.torque, dt);

    let ahead = aggregate_forces(surfaces, &predicted, wind, air_density, &center_of_mass);

    ForceTorque {
        force: 0.5 * (now.force + ahead.force),
        torque: 0.5 * (now.torque + ahead.torque),
    }
}
