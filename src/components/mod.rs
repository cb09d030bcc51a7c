pub mod airframe;
pub mod controller;
pub mod physics;
pub mod spatial;
pub mod surface;

pub use airframe::AirframeComponent;
pub use controller::ControlInputs;
pub use physics::{ForceTorque, RigidBodyComponent};
pub use spatial::SpatialComponent;
pub use surface::{AeroSurface, ControlInputType, SurfaceConfig, SurfaceForces};
