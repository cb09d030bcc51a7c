mod integrator;
mod predictor;

pub use integrator::{advance_state, rigid_body_integrator_system};
pub use predictor::{integrate_step, predict_angular_velocity, predict_velocity};
