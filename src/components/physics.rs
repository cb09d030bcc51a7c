use bevy::prelude::*;
use nalgebra::{UnitQuaternion, Vector3};
use serde::{Deserialize, Serialize};
use std::ops::Add;

use super::SpatialComponent;

/// A force/torque pair in world space about a stated reference point.
///
/// Recomputed every tick and never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ForceTorque {
    pub force: Vector3<f64>,
    pub torque: Vector3<f64>,
}

impl ForceTorque {
    pub fn zero() -> Self {
        Self {
            force: Vector3::zeros(),
            torque: Vector3::zeros(),
        }
    }

    pub fn is_finite(&self) -> bool {
        self.force.iter().all(|v| v.is_finite()) && self.torque.iter().all(|v| v.is_finite())
    }

    /// Point through which the net force acts, relative to the reference
    /// point the pair was computed about. `None` when the force magnitude is
    /// too small for the division to be meaningful.
    pub fn center_of_pressure(&self) -> Option<Vector3<f64>> {
        let force_squared = self.force.norm_squared();
        if force_squared < 1e-9 {
            return None;
        }
        Some(self.force.cross(&self.torque) / force_squared)
    }
}

impl Default for ForceTorque {
    fn default() -> Self {
        Self::zero()
    }
}

impl Add for ForceTorque {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self {
            force: self.force + rhs.force,
            torque: self.torque + rhs.torque,
        }
    }
}

/// Mass and inertia properties of a rigid body, plus the force/torque
/// accumulators the integrator consumes.
///
/// The inertia tensor is stored as its three principal moments together with
/// the rotation from the principal-axis frame to the body frame.
#[derive(Component, Debug, Clone, Serialize, Deserialize)]
pub struct RigidBodyComponent {
    /// Mass [kg]
    pub mass: f64,

    /// Principal moments of inertia [kg m^2]
    pub inertia: Vector3<f64>,

    /// Rotation from the principal-axis (diagonal inertia) frame to the body frame
    pub inertia_tensor_rotation: UnitQuaternion<f64>,

    /// Center of mass in the body frame [m]
    pub center_of_mass: Vector3<f64>,

    /// Force accumulated this tick, world space [N]
    pub applied_force: Vector3<f64>,

    /// Torque accumulated this tick, world space [N m]
    pub applied_torque: Vector3<f64>,
}

impl RigidBodyComponent {
    pub fn new(mass: f64, inertia: Vector3<f64>) -> Self {
        Self {
            mass,
            inertia,
            inertia_tensor_rotation: UnitQuaternion::identity(),
            center_of_mass: Vector3::zeros(),
            applied_force: Vector3::zeros(),
            applied_torque: Vector3::zeros(),
        }
    }

    /// Center of mass in world space for the given kinematic state.
    pub fn world_center_of_mass(&self, spatial: &SpatialComponent) -> Vector3<f64> {
        spatial.position + spatial.attitude * self.center_of_mass
    }

    /// Rotation from the principal-axis frame to world space.
    pub fn inertia_frame(&self, spatial: &SpatialComponent) -> UnitQuaternion<f64> {
        spatial.attitude * self.inertia_tensor_rotation
    }

    pub fn apply_force(&mut self, force: Vector3<f64>) {
        self.applied_force += force;
    }

    pub fn apply_torque(&mut self, torque: Vector3<f64>) {
        self.applied_torque += torque;
    }

    /// Reset the accumulators after the integrator has consumed them.
    pub fn clear_applied(&mut self) {
        self.applied_force = Vector3::zeros();
        self.applied_torque = Vector3::zeros();
    }
}
