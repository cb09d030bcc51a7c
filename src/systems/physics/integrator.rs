use bevy::prelude::*;
use nalgebra::{UnitQuaternion, Vector3};

use crate::components::{RigidBodyComponent, SpatialComponent};
use crate::resources::PhysicsConfig;

/// Advance a rigid body's kinematic state by one timestep from the
/// accumulated applied force and torque.
///
/// Semi-implicit: velocity is updated first and the new velocity advances the
/// position, which keeps the scheme stable for the velocity-dependent forces
/// this crate produces. Gravity is added here, not by the force systems.
pub fn advance_state(
    body: &RigidBodyComponent,
    spatial: &mut SpatialComponent,
    gravity: &Vector3<f64>,
    dt: f64,
) {
    let acceleration = body.applied_force / body.mass + gravity;
    spatial.velocity += acceleration * dt;
    spatial.position += spatial.velocity * dt;

    let inertia_frame = body.inertia_frame(spatial);
    let torque_principal = inertia_frame.inverse_transform_vector(&body.applied_torque);
    let angular_acceleration = inertia_frame
        * Vector3::new(
            torque_principal.x / body.inertia.x,
            torque_principal.y / body.inertia.y,
            torque_principal.z / body.inertia.z,
        );
    spatial.angular_velocity += angular_acceleration * dt;

    let rotation = spatial.angular_velocity * dt;
    if rotation.norm_squared() > 0.0 {
        spatial.attitude = UnitQuaternion::from_scaled_axis(rotation) * spatial.attitude;
    }
}

/// System integrating every rigid body's state and clearing its force
/// accumulators for the next tick.
pub fn rigid_body_integrator_system(
    mut query: Query<(&mut RigidBodyComponent, &mut SpatialComponent)>,
    config: Res<PhysicsConfig>,
) {
    for (mut body, mut spatial) in query.iter_mut() {
        advance_state(&body, &mut spatial, &config.gravity, config.timestep);
        body.clear_applied();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_ballistic_drop() {
        let body = RigidBodyComponent::new(10.0, Vector3::new(1.0, 1.0, 1.0));
        let mut spatial = SpatialComponent::default();
        let gravity = Vector3::new(0.0, -9.81, 0.0);
        let dt = 0.01;

        for _ in 0..100 {
            advance_state(&body, &mut spatial, &gravity, dt);
        }

        // one second of free fall, semi-implicit scheme
        assert_relative_eq!(spatial.velocity.y, -9.81, epsilon = 1e-9);
        assert!(spatial.position.y < -4.85 && spatial.position.y > -4.96);
    }

    #[test]
    fn test_torque_spins_about_principal_axis() {
        let mut body = RigidBodyComponent::new(10.0, Vector3::new(2.0, 4.0, 8.0));
        body.apply_torque(Vector3::new(0.0, 0.0, 4.0));
        let mut spatial = SpatialComponent::default();

        advance_state(&body, &mut spatial, &Vector3::zeros(), 0.5);

        // alpha = tau / I_zz = 0.5 rad/s^2 over half a second
        assert_relative_eq!(spatial.angular_velocity.z, 0.25, epsilon = 1e-12);
        let (_, _, yaw) = spatial.attitude.euler_angles();
        assert_relative_eq!(yaw, 0.125, epsilon = 1e-9);
    }

    #[test]
    fn test_attitude_stays_normalized() {
        let mut body = RigidBodyComponent::new(5.0, Vector3::new(1.0, 2.0, 3.0));
        body.apply_torque(Vector3::new(0.3, -0.8, 0.5));
        let mut spatial = SpatialComponent {
            angular_velocity: Vector3::new(0.4, 0.1, -0.2),
            ..Default::default()
        };

        for _ in 0..1000 {
            advance_state(&body, &mut spatial, &Vector3::zeros(), 0.01);
        }

        assert_relative_eq!(spatial.attitude.as_ref().norm(), 1.0, epsilon = 1e-9);
        assert!(spatial.angular_velocity.iter().all(|v| v.is_finite()));
    }
}
