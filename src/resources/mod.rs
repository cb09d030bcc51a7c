pub mod config;
pub mod environment;

pub use config::{EnvironmentConfig, PhysicsConfig, WindConfig};
pub use environment::EnvironmentModel;
