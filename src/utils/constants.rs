use std::f64::consts::PI;

/// Sea-level air density [kg/m^3]
pub const SEA_LEVEL_AIR_DENSITY: f64 = 1.2;

/// Standard gravitational acceleration [m/s^2]
pub const STANDARD_GRAVITY: f64 = 9.81;

/// Von Karman constant, used by the logarithmic wind profile
pub const VON_KARMAN: f64 = 0.4;

/// Maximum flap deflection magnitude [rad]
pub const MAX_FLAP_DEFLECTION: f64 = 50.0 * PI / 180.0;

/// Fraction of the timestep used for the midpoint velocity prediction
pub const PREDICTION_TIMESTEP_FRACTION: f64 = 0.5;
