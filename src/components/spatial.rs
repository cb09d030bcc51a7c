use bevy::prelude::*;
use nalgebra::{UnitQuaternion, Vector3};
use serde::{Deserialize, Serialize};

/// Kinematic state of a rigid body.
///
/// Everything is expressed in world space (y up, x forward), including the
/// angular velocity. The integrator system owns mutation of this component;
/// the aerodynamic systems only read it.
#[derive(Component, Debug, Clone, Serialize, Deserialize)]
pub struct SpatialComponent {
    /// Position in world space [m]
    pub position: Vector3<f64>,

    /// Linear velocity in world space [m/s]
    pub velocity: Vector3<f64>,

    /// Attitude quaternion (rotation from body to world frame)
    pub attitude: UnitQuaternion<f64>,

    /// Angular velocity in world space [rad/s]
    pub angular_velocity: Vector3<f64>,
}

impl Default for SpatialComponent {
    fn default() -> Self {
        Self {
            position: Vector3::zeros(),
            velocity: Vector3::zeros(),
            attitude: UnitQuaternion::identity(),
            angular_velocity: Vector3::zeros(),
        }
    }
}

impl SpatialComponent {
    pub fn new(
        position: Vector3<f64>,
        velocity: Vector3<f64>,
        attitude: UnitQuaternion<f64>,
        angular_velocity: Vector3<f64>,
    ) -> Self {
        Self {
            position,
            velocity,
            attitude,
            angular_velocity,
        }
    }

    /// State moving at `velocity` from the world origin, level attitude.
    pub fn at_velocity(velocity: Vector3<f64>) -> Self {
        Self {
            velocity,
            ..Default::default()
        }
    }

    /// Velocity of a point rigidly attached to the body, given its world-space
    /// offset from the center of rotation.
    pub fn velocity_at_point(&self, relative_position: &Vector3<f64>) -> Vector3<f64> {
        self.velocity + self.angular_velocity.cross(relative_position)
    }
}
