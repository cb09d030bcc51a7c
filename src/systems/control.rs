use bevy::prelude::*;

use crate::components::{AirframeComponent, ControlInputType, ControlInputs};

/// Map normalized control commands onto per-surface flap deflections.
///
/// Each control surface listens to one channel; the command is scaled by the
/// axis sensitivity and the surface's own gain, then clamped by
/// `set_flap_angle`. Fixed surfaces are never touched.
pub fn apply_control_inputs(inputs: &ControlInputs, airframe: &mut AirframeComponent) {
    for surface in airframe.surfaces.iter_mut() {
        if !surface.is_control_surface {
            continue;
        }
        let command = match surface.input_type {
            ControlInputType::Pitch => inputs.pitch * inputs.pitch_sensitivity,
            ControlInputType::Roll => inputs.roll * inputs.roll_sensitivity,
            ControlInputType::Yaw => inputs.yaw * inputs.yaw_sensitivity,
            ControlInputType::Flap => inputs.flap,
        };
        let gain = surface.input_gain;
        surface.set_flap_angle(command * gain);
    }
}

/// System driving [`apply_control_inputs`] once per control tick.
pub fn control_surface_system(mut query: Query<(&ControlInputs, &mut AirframeComponent)>) {
    for (inputs, mut airframe) in query.iter_mut() {
        apply_control_inputs(inputs, &mut airframe);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::{AeroSurface, SurfaceConfig};
    use approx::assert_relative_eq;

    fn test_airframe() -> AirframeComponent {
        let elevator = AeroSurface::new(SurfaceConfig::default())
            .with_control(ControlInputType::Pitch, -1.0);
        let aileron =
            AeroSurface::new(SurfaceConfig::default()).with_control(ControlInputType::Roll, 1.0);
        let flap =
            AeroSurface::new(SurfaceConfig::default()).with_control(ControlInputType::Flap, 1.0);
        let fixed_fin = AeroSurface::new(SurfaceConfig::default());
        AirframeComponent::new("test", vec![elevator, aileron, flap, fixed_fin], 0.0)
    }

    #[test]
    fn test_channel_mapping_and_gain() {
        let mut airframe = test_airframe();
        let inputs = ControlInputs {
            pitch: 0.5,
            roll: -1.0,
            flap: 0.3,
            ..Default::default()
        };

        apply_control_inputs(&inputs, &mut airframe);

        // elevator has an inverted gain
        assert_relative_eq!(airframe.surfaces[0].flap_angle(), -0.5 * 0.2);
        assert_relative_eq!(airframe.surfaces[1].flap_angle(), -1.0 * 0.2);
        // the flap channel bypasses the axis sensitivities
        assert_relative_eq!(airframe.surfaces[2].flap_angle(), 0.3);
        // the fixed fin never moves
        assert_relative_eq!(airframe.surfaces[3].flap_angle(), 0.0);
    }

    #[test]
    fn test_extreme_command_clamped() {
        let mut airframe = test_airframe();
        let inputs = ControlInputs {
            pitch: 1.0,
            pitch_sensitivity: 10.0, // absurd sensitivity
            ..Default::default()
        };

        apply_control_inputs(&inputs, &mut airframe);

        assert!(airframe.surfaces[0].flap_angle().abs() <= crate::utils::MAX_FLAP_DEFLECTION);
    }
}
