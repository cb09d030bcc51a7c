use bevy::prelude::*;
use serde::{Deserialize, Serialize};

/// Pilot or agent control commands, normalized to [-1, 1] per axis
/// ([0, 1] for flaps), together with the per-axis deflection sensitivities.
///
/// The control-mapping system converts these into per-surface flap angles;
/// the aerodynamic core only ever sees the resulting deflections.
#[derive(Component, Debug, Clone, Serialize, Deserialize)]
pub struct ControlInputs {
    pub pitch: f64,
    pub roll: f64,
    pub yaw: f64,
    pub flap: f64,

    /// Full-scale pitch command deflection [rad]
    pub pitch_sensitivity: f64,

    /// Full-scale roll command deflection [rad]
    pub roll_sensitivity: f64,

    /// Full-scale yaw command deflection [rad]
    pub yaw_sensitivity: f64,
}

impl Default for ControlInputs {
    fn default() -> Self {
        Self {
            pitch: 0.0,
            roll: 0.0,
            yaw: 0.0,
            flap: 0.0,
            pitch_sensitivity: 0.2,
            roll_sensitivity: 0.2,
            yaw_sensitivity: 0.2,
        }
    }
}
