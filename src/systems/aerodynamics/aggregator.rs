use nalgebra::Vector3;
use rayon::prelude::*;

use crate::components::{AeroSurface, ForceTorque, SpatialComponent, SurfaceForces};

use super::surface_model::surface_forces;

/// Resolve one surface's attachment pose against the body state and evaluate
/// the strip model for it.
fn resolve_surface(
    surface: &AeroSurface,
    spatial: &SpatialComponent,
    wind: &Vector3<f64>,
    air_density: f64,
    center_of_mass: &Vector3<f64>,
) -> SurfaceForces {
    let world_position = spatial.position + spatial.attitude * surface.position;
    let relative_position = world_position - center_of_mass;
    let orientation = spatial.attitude * surface.orientation;

    // the airflow seen by the surface: body translation plus the surface's
    // own velocity from the body rotation
    let air_velocity =
        wind - spatial.velocity - spatial.angular_velocity.cross(&relative_position);

    surface_forces(
        &surface.config,
        surface.flap_angle(),
        &air_velocity,
        air_density,
        &relative_position,
        &orientation,
    )
}

/// Sum the aerodynamic force/torque contributions of all surfaces about the
/// world-space center of mass.
///
/// Surfaces are independent, so they are evaluated in parallel; the summation
/// order is unspecified and results are tolerance-bound rather than
/// bit-reproducible across thread counts. Zero surfaces yield the zero pair.
pub fn aggregate_forces(
    surfaces: &[AeroSurface],
    spatial: &SpatialComponent,
    wind: &Vector3<f64>,
    air_density: f64,
    center_of_mass: &Vector3<f64>,
) -> ForceTorque {
    surfaces
        .par_iter()
        .map(|surface| {
            let out = resolve_surface(surface, spatial, wind, air_density, center_of_mass);
            ForceTorque {
                force: out.force,
                torque: out.torque,
            }
        })
        .reduce(ForceTorque::zero, |a, b| a + b)
}

/// Sequential variant of [`aggregate_forces`] that also stores each surface's
/// result in its `last_forces` diagnostics field.
pub fn aggregate_forces_recording(
    surfaces: &mut [AeroSurface],
    spatial: &SpatialComponent,
    wind: &Vector3<f64>,
    air_density: f64,
    center_of_mass: &Vector3<f64>,
) -> ForceTorque {
    let mut total = ForceTorque::zero();
    for surface in surfaces.iter_mut() {
        let out = resolve_surface(surface, spatial, wind, air_density, center_of_mass);
        surface.last_forces = out;
        total = total
            + ForceTorque {
                force: out.force,
                torque: out.torque,
            };
    }
    total
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::SurfaceConfig;
    use crate::utils::deg_to_rad;
    use approx::assert_relative_eq;
    use nalgebra::UnitQuaternion;

    fn wing_config() -> SurfaceConfig {
        SurfaceConfig {
            chord: 1.0,
            span: 4.0,
            aspect_ratio: 4.0,
            ..Default::default()
        }
    }

    fn wing_pair() -> Vec<AeroSurface> {
        vec![
            AeroSurface::new(wing_config())
                .with_pose(Vector3::new(0.0, 0.0, 2.0), UnitQuaternion::identity()),
            AeroSurface::new(wing_config())
                .with_pose(Vector3::new(0.0, 0.0, -2.0), UnitQuaternion::identity()),
        ]
    }

    #[test]
    fn test_no_surfaces_zero_pair() {
        let out = aggregate_forces(
            &[],
            &SpatialComponent::at_velocity(Vector3::new(50.0, 0.0, 0.0)),
            &Vector3::zeros(),
            1.2,
            &Vector3::zeros(),
        );
        assert_eq!(out, ForceTorque::zero());
    }

    #[test]
    fn test_symmetric_pair_cancels_roll_and_yaw() {
        let surfaces = wing_pair();
        // pitched-up flight: airflow meets the wings at a positive AoA
        let spatial = SpatialComponent {
            velocity: Vector3::new(50.0, -5.0, 0.0),
            ..Default::default()
        };

        let out = aggregate_forces(&surfaces, &spatial, &Vector3::zeros(), 1.2, &Vector3::zeros());

        assert!(out.force.y > 0.0, "both wings lift");
        assert!(out.force.x < 0.0, "net drag opposes flight");
        // mirror-image placement: spanwise force and roll/yaw torque cancel
        assert_relative_eq!(out.force.z, 0.0, epsilon = 1e-9);
        assert_relative_eq!(out.torque.x, 0.0, epsilon = 1e-9);
        assert_relative_eq!(out.torque.y, 0.0, epsilon = 1e-9);
    }

    #[test]
    fn test_rotation_induces_damping_torque() {
        let surfaces = wing_pair();
        // hovering forward flight with a rolling motion about x
        let spatial = SpatialComponent {
            velocity: Vector3::new(40.0, 0.0, 0.0),
            angular_velocity: Vector3::new(1.0, 0.0, 0.0),
            ..Default::default()
        };

        let out = aggregate_forces(&surfaces, &spatial, &Vector3::zeros(), 1.2, &Vector3::zeros());

        // the descending wing sees increased AoA and lifts harder,
        // opposing the roll
        assert!(
            out.torque.x < 0.0,
            "roll damping torque must oppose the roll rate, got {}",
            out.torque.x
        );
    }

    #[test]
    fn test_wind_shifts_relative_flow() {
        let surfaces = wing_pair();
        let spatial = SpatialComponent::at_velocity(Vector3::new(50.0, 0.0, 0.0));

        // a 5 m/s updraft is equivalent to pitching the flight path down
        let calm = aggregate_forces(&surfaces, &spatial, &Vector3::zeros(), 1.2, &Vector3::zeros());
        let updraft = aggregate_forces(
            &surfaces,
            &spatial,
            &Vector3::new(0.0, 5.0, 0.0),
            1.2,
            &Vector3::zeros(),
        );

        assert!(updraft.force.y > calm.force.y, "updraft increases lift");
    }

    #[test]
    fn test_parallel_and_recording_agree() {
        let mut surfaces = wing_pair();
        surfaces.push(
            AeroSurface::new(wing_config()).with_pose(
                Vector3::new(-4.0, 0.0, 0.0),
                UnitQuaternion::from_euler_angles(0.0, 0.0, deg_to_rad(-3.0)),
            ),
        );
        let spatial = SpatialComponent {
            velocity: Vector3::new(45.0, -3.0, 1.0),
            angular_velocity: Vector3::new(0.1, 0.02, -0.3),
            ..Default::default()
        };
        let com = Vector3::new(0.2, 0.0, 0.0);

        let parallel = aggregate_forces(&surfaces, &spatial, &Vector3::zeros(), 1.2, &com);
        let recorded = aggregate_forces_recording(
            &mut surfaces,
            &spatial,
            &Vector3::zeros(),
            1.2,
            &com,
        );

        assert_relative_eq!(parallel.force.x, recorded.force.x, epsilon = 1e-9);
        assert_relative_eq!(parallel.force.y, recorded.force.y, epsilon = 1e-9);
        assert_relative_eq!(parallel.torque.z, recorded.torque.z, epsilon = 1e-9);

        // diagnostics were stored for every surface
        assert!(surfaces
            .iter()
            .all(|s| s.last_forces.force.norm() > 0.0 || s.last_forces.stalled));
    }
}
