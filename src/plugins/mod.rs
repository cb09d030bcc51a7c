mod physics;

pub use physics::{AircraftPhysicsPlugin, PhysicsSet};
