use nalgebra::{UnitQuaternion, Vector3};
use serde::{Deserialize, Serialize};

use crate::utils::{deg_to_rad, MAX_FLAP_DEFLECTION};

/// Static aerodynamic configuration of a single lifting surface.
///
/// All angles are stored in radians. Configurations are validated when loaded
/// (see `crate::config`); the force model assumes the invariants hold:
/// `stall_angle_high >= 0 >= stall_angle_low`, `flap_fraction` in [0, 0.4],
/// `lift_slope`, `aspect_ratio`, `chord` and `span` strictly positive.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SurfaceConfig {
    /// 2D lift-curve slope [1/rad]
    pub lift_slope: f64,

    /// Flat-plate skin friction drag coefficient
    pub skin_friction: f64,

    /// Angle of attack producing zero lift [rad]
    pub zero_lift_aoa: f64,

    /// Positive-side stall onset angle [rad], >= 0
    pub stall_angle_high: f64,

    /// Negative-side stall onset angle [rad], <= 0
    pub stall_angle_low: f64,

    /// Chord length [m]
    pub chord: f64,

    /// Span [m]
    pub span: f64,

    /// Fraction of the chord taken by the flap, in [0, 0.4]
    pub flap_fraction: f64,

    /// Span^2 / planform area (span/chord for a rectangular surface)
    pub aspect_ratio: f64,
}

impl Default for SurfaceConfig {
    fn default() -> Self {
        Self {
            lift_slope: 6.28,
            skin_friction: 0.02,
            zero_lift_aoa: 0.0,
            stall_angle_high: deg_to_rad(15.0),
            stall_angle_low: deg_to_rad(-15.0),
            chord: 1.0,
            span: 1.0,
            flap_fraction: 0.0,
            aspect_ratio: 1.0,
        }
    }
}

impl SurfaceConfig {
    /// Planform area [m^2]
    pub fn area(&self) -> f64 {
        self.chord * self.span
    }
}

/// Which control channel drives a control surface's flap angle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ControlInputType {
    Pitch,
    Yaw,
    Roll,
    Flap,
}

/// Forces computed for a single surface during the last evaluation.
///
/// Purely diagnostic: telemetry and tests may read these, the simulation
/// never feeds them back into the model.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SurfaceForces {
    /// Net force (lift + drag) in world space [N]
    pub force: Vector3<f64>,

    /// Torque about the center of mass, including the pitching moment [N m]
    pub torque: Vector3<f64>,

    /// Lift component in world space [N]
    pub lift: Vector3<f64>,

    /// Drag component in world space [N]
    pub drag: Vector3<f64>,

    /// Angle of attack seen by the surface [rad]
    pub angle_of_attack: f64,

    /// True when the angle of attack lies outside the attached-flow band
    pub stalled: bool,
}

impl SurfaceForces {
    pub fn zero() -> Self {
        Self {
            force: Vector3::zeros(),
            torque: Vector3::zeros(),
            lift: Vector3::zeros(),
            drag: Vector3::zeros(),
            angle_of_attack: 0.0,
            stalled: false,
        }
    }
}

impl Default for SurfaceForces {
    fn default() -> Self {
        Self::zero()
    }
}

/// A lifting surface attached to a rigid body.
///
/// The attachment pose is plain data in the body frame; the aggregator
/// resolves it against the body attitude once per tick. The surface's local
/// frame is x chordwise (flight direction), y lift normal, z spanwise.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AeroSurface {
    pub config: SurfaceConfig,

    /// Attachment point in the body frame [m]
    pub position: Vector3<f64>,

    /// Rotation from surface frame to body frame
    pub orientation: UnitQuaternion<f64>,

    /// Whether the control mapping may deflect this surface
    pub is_control_surface: bool,

    /// Control channel this surface listens to
    pub input_type: ControlInputType,

    /// Per-surface gain applied to the mapped control command
    pub input_gain: f64,

    /// Current flap deflection [rad], clamped to +/- 50 degrees
    flap_angle: f64,

    /// Diagnostics from the most recent force evaluation
    pub last_forces: SurfaceForces,
}

impl AeroSurface {
    pub fn new(config: SurfaceConfig) -> Self {
        Self {
            config,
            position: Vector3::zeros(),
            orientation: UnitQuaternion::identity(),
            is_control_surface: false,
            input_type: ControlInputType::Flap,
            input_gain: 1.0,
            flap_angle: 0.0,
            last_forces: SurfaceForces::zero(),
        }
    }

    /// Place the surface at a body-frame position with a given orientation.
    pub fn with_pose(mut self, position: Vector3<f64>, orientation: UnitQuaternion<f64>) -> Self {
        self.position = position;
        self.orientation = orientation;
        self
    }

    /// Mark the surface as a control surface on the given channel.
    pub fn with_control(mut self, input_type: ControlInputType, input_gain: f64) -> Self {
        self.is_control_surface = true;
        self.input_type = input_type;
        self.input_gain = input_gain;
        self
    }

    /// Set the flap deflection, clamped to +/- 50 degrees.
    pub fn set_flap_angle(&mut self, angle: f64) {
        self.flap_angle = angle.clamp(-MAX_FLAP_DEFLECTION, MAX_FLAP_DEFLECTION);
    }

    pub fn flap_angle(&self) -> f64 {
        self.flap_angle
    }
}
