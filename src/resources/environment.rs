use bevy::prelude::*;
use nalgebra::Vector3;

use crate::utils::{deg_to_rad, VON_KARMAN};

use super::config::{EnvironmentConfig, WindConfig};

/// Samples wind and air density for the force systems.
#[derive(Resource, Debug, Clone)]
pub struct EnvironmentModel {
    config: EnvironmentConfig,
}

impl EnvironmentModel {
    pub fn new(config: &EnvironmentConfig) -> Self {
        Self {
            config: config.clone(),
        }
    }

    /// Wind velocity in world space at the given position.
    pub fn wind_at(&self, position: &Vector3<f64>) -> Vector3<f64> {
        match &self.config.wind {
            WindConfig::Constant { velocity } => *velocity,
            WindConfig::Logarithmic {
                d,
                z0,
                u_star,
                bearing,
            } => {
                let height = (position.y - d).max(*z0);
                let speed = u_star / VON_KARMAN * (height / z0).ln();
                bearing_direction(*bearing) * speed
            }
            WindConfig::PowerLaw {
                u_r,
                z_r,
                bearing,
                alpha,
            } => {
                let height = position.y.max(0.0);
                let speed = u_r * (height / z_r).powf(*alpha);
                bearing_direction(*bearing) * speed
            }
        }
    }

    pub fn air_density(&self) -> f64 {
        self.config.air_density
    }
}

impl Default for EnvironmentModel {
    fn default() -> Self {
        Self::new(&EnvironmentConfig::default())
    }
}

/// Horizontal unit vector for a wind bearing given in degrees.
fn bearing_direction(bearing: f64) -> Vector3<f64> {
    let bearing = deg_to_rad(bearing);
    Vector3::new(bearing.cos(), 0.0, bearing.sin())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_constant_wind() {
        let env = EnvironmentModel::new(&EnvironmentConfig {
            wind: WindConfig::Constant {
                velocity: Vector3::new(3.0, 0.0, -1.0),
            },
            ..Default::default()
        });

        let wind = env.wind_at(&Vector3::new(100.0, 500.0, -20.0));
        assert_relative_eq!(wind.x, 3.0);
        assert_relative_eq!(wind.z, -1.0);
    }

    #[test]
    fn test_power_law_grows_with_height() {
        let env = EnvironmentModel::new(&EnvironmentConfig {
            wind: WindConfig::PowerLaw {
                u_r: 10.0,
                z_r: 10.0,
                bearing: 0.0,
                alpha: 0.14,
            },
            ..Default::default()
        });

        let low = env.wind_at(&Vector3::new(0.0, 10.0, 0.0));
        let high = env.wind_at(&Vector3::new(0.0, 100.0, 0.0));

        assert_relative_eq!(low.x, 10.0, epsilon = 1e-12);
        assert!(high.x > low.x);
    }

    #[test]
    fn test_log_profile_zero_near_roughness_height() {
        let env = EnvironmentModel::new(&EnvironmentConfig {
            wind: WindConfig::Logarithmic {
                d: 0.0,
                z0: 0.1,
                u_star: 0.5,
                bearing: 90.0,
            },
            ..Default::default()
        });

        let at_roughness = env.wind_at(&Vector3::new(0.0, 0.1, 0.0));
        assert_relative_eq!(at_roughness.norm(), 0.0, epsilon = 1e-12);

        // bearing 90 degrees blows along +z
        let aloft = env.wind_at(&Vector3::new(0.0, 50.0, 0.0));
        assert!(aloft.z > 0.0);
        assert_relative_eq!(aloft.x, 0.0, epsilon = 1e-9);
    }

    #[test]
    fn test_default_density_is_sea_level() {
        let env = EnvironmentModel::default();
        assert_relative_eq!(env.air_density(), 1.2);
    }
}
