use bevy::prelude::*;
use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

use crate::utils::{SEA_LEVEL_AIR_DENSITY, STANDARD_GRAVITY};

/// Fixed-timestep physics settings.
#[derive(Resource, Debug, Clone, Serialize, Deserialize)]
pub struct PhysicsConfig {
    /// Fixed timestep duration [s]
    pub timestep: f64,

    /// Gravitational acceleration in world space [m/s^2]
    pub gravity: Vector3<f64>,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            timestep: 1.0 / 120.0, // 120 Hz physics rate
            gravity: Vector3::new(0.0, -STANDARD_GRAVITY, 0.0),
        }
    }
}

/// Ambient wind field, sampled at the body position each tick.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum WindConfig {
    Constant {
        velocity: Vector3<f64>,
    },
    /// Boundary-layer log profile over height
    Logarithmic {
        d: f64,
        z0: f64,
        u_star: f64,
        bearing: f64,
    },
    /// Power-law profile referenced to a speed at a given height
    PowerLaw {
        u_r: f64,
        z_r: f64,
        bearing: f64,
        alpha: f64,
    },
}

/// Atmospheric environment: wind model plus air density.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnvironmentConfig {
    pub wind: WindConfig,
    pub air_density: f64,
}

impl Default for EnvironmentConfig {
    fn default() -> Self {
        Self {
            wind: WindConfig::Constant {
                velocity: Vector3::zeros(),
            },
            air_density: SEA_LEVEL_AIR_DENSITY,
        }
    }
}
