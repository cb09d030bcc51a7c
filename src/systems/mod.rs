pub mod aerodynamics;
pub mod control;
pub mod physics;

pub use aerodynamics::{
    aero_force_system, aggregate_forces, aggregate_forces_recording, surface_forces,
};
pub use control::{apply_control_inputs, control_surface_system};
pub use physics::{
    advance_state, integrate_step, predict_angular_velocity, predict_velocity,
    rigid_body_integrator_system,
};
