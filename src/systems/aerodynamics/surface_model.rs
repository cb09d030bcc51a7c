use nalgebra::{UnitQuaternion, Vector3};
use std::f64::consts::{FRAC_PI_2, PI};

use crate::components::{SurfaceConfig, SurfaceForces};
use crate::utils::{deg_to_rad, lerp, rad_to_deg};

/// Local airflow below this squared magnitude [m^2/s^2] produces no force;
/// the flow direction would be numerically meaningless.
const MIN_AIRFLOW_SQUARED: f64 = 1e-9;

/// Lift, drag and pitching-moment coefficients at one angle of attack.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Coefficients {
    lift: f64,
    drag: f64,
    torque: f64,
}

impl Coefficients {
    fn lerp(&self, other: &Coefficients, factor: f64) -> Coefficients {
        Coefficients {
            lift: lerp(self.lift, other.lift, factor),
            drag: lerp(self.drag, other.drag, factor),
            torque: lerp(self.torque, other.torque, factor),
        }
    }
}

/// Flap-corrected lift curve parameters, recomputed for every evaluation.
#[derive(Debug, Clone, Copy)]
struct LiftCurve {
    /// Finite-wing corrected lift slope [1/rad]
    corrected_lift_slope: f64,

    /// Zero-lift angle of attack shifted by the flap camber change [rad]
    zero_lift_aoa: f64,

    /// Stall onset angles adjusted for the flap deflection [rad]
    stall_angle_high: f64,
    stall_angle_low: f64,
}

impl LiftCurve {
    fn new(config: &SurfaceConfig, flap_angle: f64) -> Self {
        let aspect_ratio = config.aspect_ratio;

        // finite-wing tip-loss correction of the 2D lift slope
        let corrected_lift_slope = config.lift_slope * aspect_ratio
            / (aspect_ratio + 2.0 * (aspect_ratio + 4.0) / (aspect_ratio + 2.0));

        // Theodorsen flap effectiveness for the flap chord fraction
        let theta = (2.0 * config.flap_fraction - 1.0).acos();
        let flap_effectiveness = 1.0 - (theta - theta.sin()) / PI;
        let delta_lift = corrected_lift_slope
            * flap_effectiveness
            * flap_effectiveness_correction(flap_angle)
            * flap_angle;

        let zero_lift_aoa_base = config.zero_lift_aoa;
        let zero_lift_aoa = zero_lift_aoa_base - delta_lift / corrected_lift_slope;

        let cl_max_fraction = lift_coefficient_max_fraction(config.flap_fraction);
        let cl_max_high = corrected_lift_slope * (config.stall_angle_high - zero_lift_aoa_base)
            + delta_lift * cl_max_fraction;
        let cl_max_low = corrected_lift_slope * (config.stall_angle_low - zero_lift_aoa_base)
            + delta_lift * cl_max_fraction;

        Self {
            corrected_lift_slope,
            zero_lift_aoa,
            stall_angle_high: zero_lift_aoa + cl_max_high / corrected_lift_slope,
            stall_angle_low: zero_lift_aoa + cl_max_low / corrected_lift_slope,
        }
    }

    fn is_attached(&self, angle_of_attack: f64) -> bool {
        angle_of_attack < self.stall_angle_high && angle_of_attack > self.stall_angle_low
    }
}

/// Aerodynamic coefficients across the attached, stalled and blended
/// angle-of-attack regimes.
fn coefficients(
    config: &SurfaceConfig,
    flap_angle: f64,
    curve: &LiftCurve,
    angle_of_attack: f64,
) -> Coefficients {
    // stall smoothing band shrinks on the side the flap is deflected towards
    let padding_high = deg_to_rad(lerp(15.0, 5.0, (rad_to_deg(flap_angle) + 50.0) / 100.0));
    let padding_low = deg_to_rad(lerp(15.0, 5.0, (-rad_to_deg(flap_angle) + 50.0) / 100.0));
    let padded_stall_high = curve.stall_angle_high + padding_high;
    let padded_stall_low = curve.stall_angle_low - padding_low;

    if curve.is_attached(angle_of_attack) {
        attached_coefficients(config, curve, angle_of_attack)
    } else if angle_of_attack > padded_stall_high || angle_of_attack < padded_stall_low {
        stalled_coefficients(config, flap_angle, curve, angle_of_attack)
    } else if angle_of_attack > curve.stall_angle_high {
        let attached = attached_coefficients(config, curve, curve.stall_angle_high);
        let stalled = stalled_coefficients(config, flap_angle, curve, padded_stall_high);
        let factor = (angle_of_attack - curve.stall_angle_high)
            / (padded_stall_high - curve.stall_angle_high);
        attached.lerp(&stalled, factor)
    } else {
        let attached = attached_coefficients(config, curve, curve.stall_angle_low);
        let stalled = stalled_coefficients(config, flap_angle, curve, padded_stall_low);
        let factor =
            (angle_of_attack - curve.stall_angle_low) / (padded_stall_low - curve.stall_angle_low);
        attached.lerp(&stalled, factor)
    }
}

/// Thin-airfoil model with skin friction, valid below stall.
fn attached_coefficients(
    config: &SurfaceConfig,
    curve: &LiftCurve,
    angle_of_attack: f64,
) -> Coefficients {
    let lift = curve.corrected_lift_slope * (angle_of_attack - curve.zero_lift_aoa);
    let induced_angle = lift / (PI * config.aspect_ratio);
    let effective_angle = angle_of_attack - curve.zero_lift_aoa - induced_angle;

    let tangential = config.skin_friction * effective_angle.cos();
    let normal = (lift + effective_angle.sin() * tangential) / effective_angle.cos();

    Coefficients {
        lift,
        drag: normal * effective_angle.sin() + tangential * effective_angle.cos(),
        torque: -normal * torque_coefficient_proportion(effective_angle),
    }
}

/// Flat-plate cross-flow model beyond stall.
fn stalled_coefficients(
    config: &SurfaceConfig,
    flap_angle: f64,
    curve: &LiftCurve,
    angle_of_attack: f64,
) -> Coefficients {
    let lift_at_stall = if angle_of_attack > curve.stall_angle_high {
        curve.corrected_lift_slope * (curve.stall_angle_high - curve.zero_lift_aoa)
    } else {
        curve.corrected_lift_slope * (curve.stall_angle_low - curve.zero_lift_aoa)
    };

    // the induced-angle correction fades out towards +/- 90 degrees
    let fade = if angle_of_attack > curve.stall_angle_high {
        (FRAC_PI_2 - angle_of_attack.clamp(-FRAC_PI_2, FRAC_PI_2))
            / (FRAC_PI_2 - curve.stall_angle_high)
    } else {
        (-FRAC_PI_2 - angle_of_attack.clamp(-FRAC_PI_2, FRAC_PI_2))
            / (-FRAC_PI_2 - curve.stall_angle_low)
    };
    let induced_angle = lerp(0.0, lift_at_stall / (PI * config.aspect_ratio), fade);
    let effective_angle = angle_of_attack - curve.zero_lift_aoa - induced_angle;

    let normal = friction_at_90_deg(flap_angle)
        * effective_angle.sin()
        * (1.0 / (0.56 + 0.44 * effective_angle.sin().abs())
            - 0.41 * (1.0 - (-17.0 / config.aspect_ratio).exp()));
    let tangential = 0.5 * config.skin_friction * effective_angle.cos();

    Coefficients {
        lift: normal * effective_angle.cos() - tangential * effective_angle.sin(),
        drag: normal * effective_angle.sin() + tangential * effective_angle.cos(),
        torque: -normal * torque_coefficient_proportion(effective_angle),
    }
}

/// Chordwise location of the center of pressure as a fraction of the chord,
/// moving aft from quarter-chord towards mid-chord with flow angle.
fn torque_coefficient_proportion(effective_angle: f64) -> f64 {
    0.25 - 0.175 * (1.0 - 2.0 * effective_angle.abs() / PI)
}

/// Normal-force coefficient of a flat plate at 90 degrees, as a function of
/// flap deflection [rad].
fn friction_at_90_deg(flap_angle: f64) -> f64 {
    1.98 - 4.26e-2 * flap_angle * flap_angle + 2.1e-1 * flap_angle
}

/// Empirical loss of flap authority with deflection: 0.8 at 10 degrees down
/// to 0.4 at 60 degrees.
fn flap_effectiveness_correction(flap_angle: f64) -> f64 {
    lerp(0.8, 0.4, (rad_to_deg(flap_angle.abs()) - 10.0) / 50.0)
}

/// Fraction of the flap lift increment that survives at the stall boundary.
fn lift_coefficient_max_fraction(flap_fraction: f64) -> f64 {
    (1.0 - 0.5 * (flap_fraction - 0.1) / 0.3).clamp(0.0, 1.0)
}

/// Aerodynamic force and torque of one surface for a given relative airflow.
///
/// `world_air_velocity` is the air velocity relative to the surface in world
/// space, `relative_position` the surface position relative to the body's
/// center of mass, `orientation` the rotation from the surface frame to world
/// space. The returned torque is taken about the center of mass.
///
/// Pure: no state is read beyond the arguments, and near-zero airflow yields
/// the zero pair as a defined no-op.
pub fn surface_forces(
    config: &SurfaceConfig,
    flap_angle: f64,
    world_air_velocity: &Vector3<f64>,
    air_density: f64,
    relative_position: &Vector3<f64>,
    orientation: &UnitQuaternion<f64>,
) -> SurfaceForces {
    let curve = LiftCurve::new(config, flap_angle);

    // project the airflow onto the chordwise/normal plane; the spanwise
    // component carries no strip lift
    let mut local_velocity = orientation.inverse_transform_vector(world_air_velocity);
    local_velocity.z = 0.0;

    if local_velocity.norm_squared() < MIN_AIRFLOW_SQUARED {
        return SurfaceForces::zero();
    }

    let drag_direction = orientation * local_velocity.normalize();
    let span_axis = orientation * Vector3::z();
    let lift_direction = drag_direction.cross(&span_axis);

    let dynamic_pressure = 0.5 * air_density * local_velocity.norm_squared();
    let angle_of_attack = local_velocity.y.atan2(-local_velocity.x);

    let coefficients = coefficients(config, flap_angle, &curve, angle_of_attack);

    let area = config.area();
    let lift = lift_direction * (coefficients.lift * dynamic_pressure * area);
    let drag = drag_direction * (coefficients.drag * dynamic_pressure * area);
    let pitching_torque = -span_axis * (coefficients.torque * dynamic_pressure * area * config.chord);

    let force = lift + drag;
    SurfaceForces {
        force,
        torque: relative_position.cross(&force) + pitching_torque,
        lift,
        drag,
        angle_of_attack,
        stalled: !curve.is_attached(angle_of_attack),
    }
}
