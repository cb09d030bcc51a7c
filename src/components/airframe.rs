use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use super::AeroSurface;

/// The set of lifting surfaces mounted on a rigid body, plus its thrust
/// setting.
///
/// Ownership is explicit: the body holds an ordered `Vec` of surfaces whose
/// attachment poses are plain body-frame data. There is no scene-graph
/// traversal at force-computation time.
#[derive(Component, Debug, Clone, Serialize, Deserialize)]
pub struct AirframeComponent {
    pub name: String,
    pub surfaces: Vec<AeroSurface>,

    /// Maximum thrust along the body x axis [N]
    pub thrust: f64,

    /// Commanded thrust fraction in [0, 1]
    thrust_percent: f64,
}

impl AirframeComponent {
    pub fn new(name: impl Into<String>, surfaces: Vec<AeroSurface>, thrust: f64) -> Self {
        Self {
            name: name.into(),
            surfaces,
            thrust,
            thrust_percent: 0.0,
        }
    }

    pub fn set_thrust_percent(&mut self, percent: f64) {
        self.thrust_percent = percent.clamp(0.0, 1.0);
    }

    pub fn thrust_percent(&self) -> f64 {
        self.thrust_percent
    }

    /// Current thrust magnitude [N]
    pub fn current_thrust(&self) -> f64 {
        self.thrust * self.thrust_percent
    }
}
