pub mod components;
pub mod config;
pub mod plugins;
pub mod resources;
pub mod systems;
pub mod utils;

pub use components::{
    AeroSurface, AirframeComponent, ControlInputType, ControlInputs, ForceTorque,
    RigidBodyComponent, SpatialComponent, SurfaceConfig, SurfaceForces,
};
pub use config::{load_airframe, ConfigError};
pub use plugins::{AircraftPhysicsPlugin, PhysicsSet};
pub use resources::{EnvironmentConfig, EnvironmentModel, PhysicsConfig, WindConfig};
pub use systems::{
    advance_state, aggregate_forces, apply_control_inputs, integrate_step, surface_forces,
};
