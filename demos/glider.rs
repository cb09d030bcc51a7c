//! Headless glider drop: builds a four-surface airframe and steps the flight
//! dynamics directly, printing telemetry once per simulated second.

use nalgebra::{UnitQuaternion, Vector3};

use airframe::components::{
    AeroSurface, AirframeComponent, ControlInputType, ControlInputs, RigidBodyComponent,
    SpatialComponent, SurfaceConfig,
};
use airframe::resources::{EnvironmentConfig, EnvironmentModel, PhysicsConfig};
use airframe::systems::{advance_state, apply_control_inputs, integrate_step};

fn build_glider() -> (AirframeComponent, RigidBodyComponent) {
    let wing = SurfaceConfig {
        chord: 1.2,
        span: 4.5,
        flap_fraction: 0.2,
        aspect_ratio: 4.5 / 1.2,
        ..Default::default()
    };
    let tail = SurfaceConfig {
        chord: 0.6,
        span: 2.4,
        flap_fraction: 0.35,
        aspect_ratio: 2.4 / 0.6,
        ..Default::default()
    };
    let fin = SurfaceConfig {
        chord: 0.6,
        span: 1.2,
        flap_fraction: 0.35,
        aspect_ratio: 1.2 / 0.6,
        ..Default::default()
    };

    // slight nose-down incidence on the tail keeps the glider pitch-stable
    let tail_incidence = UnitQuaternion::from_euler_angles(0.0, 0.0, -3.0_f64.to_radians());
    // fin rolled 90 degrees so its lift normal points spanwise
    let fin_pose = UnitQuaternion::from_euler_angles(std::f64::consts::FRAC_PI_2, 0.0, 0.0);

    let surfaces = vec![
        AeroSurface::new(wing.clone())
            .with_pose(Vector3::new(0.0, 0.0, 2.5), UnitQuaternion::identity())
            .with_control(ControlInputType::Roll, 1.0),
        AeroSurface::new(wing)
            .with_pose(Vector3::new(0.0, 0.0, -2.5), UnitQuaternion::identity())
            .with_control(ControlInputType::Roll, -1.0),
        AeroSurface::new(tail)
            .with_pose(Vector3::new(-4.0, 0.0, 0.0), tail_incidence)
            .with_control(ControlInputType::Pitch, -1.0),
        AeroSurface::new(fin)
            .with_pose(Vector3::new(-4.0, 0.3, 0.0), fin_pose)
            .with_control(ControlInputType::Yaw, -1.0),
    ];

    let airframe = AirframeComponent::new("glider", surfaces, 0.0);
    let body = RigidBodyComponent::new(260.0, Vector3::new(420.0, 950.0, 640.0));
    (airframe, body)
}

fn main() {
    let physics = PhysicsConfig::default();
    let environment = EnvironmentModel::new(&EnvironmentConfig::default());

    let (mut airframe, mut body) = build_glider();
    let mut spatial = SpatialComponent::new(
        Vector3::new(0.0, 300.0, 0.0),
        Vector3::new(25.0, 0.0, 0.0),
        UnitQuaternion::identity(),
        Vector3::zeros(),
    );

    let inputs = ControlInputs {
        pitch: 0.1,
        ..Default::default()
    };
    apply_control_inputs(&inputs, &mut airframe);

    let dt = physics.timestep;
    let steps_per_second = (1.0 / dt).round() as usize;

    println!("t [s]   altitude [m]   airspeed [m/s]   pitch [deg]");
    for step in 0..(60 * steps_per_second) {
        let wind = environment.wind_at(&spatial.position);
        let thrust_world = spatial.attitude * (Vector3::x() * airframe.current_thrust());

        let applied = integrate_step(
            &mut airframe.surfaces,
            &spatial,
            &body,
            &wind,
            environment.air_density(),
            &thrust_world,
            &physics.gravity,
            dt,
        );
        body.apply_force(applied.force);
        body.apply_torque(applied.torque);
        body.apply_force(thrust_world);

        advance_state(&body, &mut spatial, &physics.gravity, dt);
        body.clear_applied();

        if step % steps_per_second == 0 {
            let (_, _, pitch) = spatial.attitude.euler_angles();
            println!(
                "{:5.1}   {:12.2}   {:14.2}   {:11.2}",
                step as f64 * dt,
                spatial.position.y,
                spatial.velocity.norm(),
                pitch.to_degrees()
            );
        }
        if spatial.position.y <= 0.0 {
            println!("touched down after {:.1} s", step as f64 * dt);
            break;
        }
    }
}
