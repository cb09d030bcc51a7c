use nalgebra::{UnitQuaternion, Vector3};
use serde::Deserialize;
use std::path::Path;
use thiserror::Error;

use crate::components::{
    AeroSurface, AirframeComponent, ControlInputType, RigidBodyComponent, SurfaceConfig,
};
use crate::utils::deg_to_rad;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    FileError(#[from] std::io::Error),
    #[error("Failed to parse YAML: {0}")]
    YamlError(#[from] serde_yaml::Error),
    #[error("Invalid airframe configuration: {0}")]
    ValidationError(String),
}

/// On-disk surface record. Angles are authored in degrees.
#[derive(Debug, Clone, Deserialize)]
pub struct RawSurfaceConfig {
    #[serde(default = "default_lift_slope")]
    pub lift_slope: f64,
    #[serde(default = "default_skin_friction")]
    pub skin_friction: f64,
    #[serde(default)]
    pub zero_lift_aoa: f64,
    #[serde(default = "default_stall_angle_high")]
    pub stall_angle_high: f64,
    #[serde(default = "default_stall_angle_low")]
    pub stall_angle_low: f64,
    #[serde(default = "default_unit")]
    pub chord: f64,
    #[serde(default = "default_unit")]
    pub span: f64,
    #[serde(default)]
    pub flap_fraction: f64,
    /// When true, `aspect_ratio` is derived as span/chord
    #[serde(default = "default_true")]
    pub auto_aspect_ratio: bool,
    #[serde(default = "default_unit")]
    pub aspect_ratio: f64,
}

fn default_lift_slope() -> f64 {
    6.28
}
fn default_skin_friction() -> f64 {
    0.02
}
fn default_stall_angle_high() -> f64 {
    15.0
}
fn default_stall_angle_low() -> f64 {
    -15.0
}
fn default_unit() -> f64 {
    1.0
}
fn default_true() -> bool {
    true
}

/// One surface entry of an airframe file: aerodynamic record plus the
/// body-frame attachment pose and control wiring.
#[derive(Debug, Clone, Deserialize)]
pub struct RawSurfaceEntry {
    pub name: String,
    #[serde(flatten)]
    pub config: RawSurfaceConfig,
    /// Attachment point in the body frame [m]
    pub position: [f64; 3],
    /// Euler angles of the surface frame in the body frame [deg]
    #[serde(default)]
    pub rotation: [f64; 3],
    #[serde(default)]
    pub control: Option<RawControlEntry>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawControlEntry {
    pub input_type: ControlInputType,
    #[serde(default = "default_unit")]
    pub input_gain: f64,
}

/// Top-level airframe file.
#[derive(Debug, Clone, Deserialize)]
pub struct RawAirframeConfig {
    pub name: String,
    pub mass: f64,
    /// Principal moments of inertia [kg m^2]
    pub inertia: [f64; 3],
    #[serde(default)]
    pub center_of_mass: [f64; 3],
    #[serde(default)]
    pub thrust: f64,
    pub surfaces: Vec<RawSurfaceEntry>,
}

impl SurfaceConfig {
    /// Validate and convert a raw record: degrees become radians, the flap
    /// fraction and stall angles are clamped to their legal ranges, and the
    /// aspect ratio is optionally derived from the geometry.
    pub fn from_raw(raw: &RawSurfaceConfig) -> Result<Self, ConfigError> {
        if raw.chord <= 0.0 || raw.span <= 0.0 {
            return Err(ConfigError::ValidationError(format!(
                "chord and span must be positive (chord {}, span {})",
                raw.chord, raw.span
            )));
        }
        if raw.lift_slope <= 0.0 {
            return Err(ConfigError::ValidationError(format!(
                "lift_slope must be positive, got {}",
                raw.lift_slope
            )));
        }

        let aspect_ratio = if raw.auto_aspect_ratio {
            raw.span / raw.chord
        } else {
            raw.aspect_ratio
        };
        if aspect_ratio <= 0.0 {
            return Err(ConfigError::ValidationError(format!(
                "aspect_ratio must be positive, got {}",
                aspect_ratio
            )));
        }

        Ok(Self {
            lift_slope: raw.lift_slope,
            skin_friction: raw.skin_friction,
            zero_lift_aoa: deg_to_rad(raw.zero_lift_aoa),
            stall_angle_high: deg_to_rad(raw.stall_angle_high.max(0.0)),
            stall_angle_low: deg_to_rad(raw.stall_angle_low.min(0.0)),
            chord: raw.chord,
            span: raw.span,
            flap_fraction: raw.flap_fraction.clamp(0.0, 0.4),
            aspect_ratio,
        })
    }
}

impl AeroSurface {
    pub fn from_raw(entry: &RawSurfaceEntry) -> Result<Self, ConfigError> {
        let config = SurfaceConfig::from_raw(&entry.config)?;
        let [roll, pitch, yaw] = entry.rotation.map(deg_to_rad);
        let mut surface = AeroSurface::new(config).with_pose(
            Vector3::new(entry.position[0], entry.position[1], entry.position[2]),
            UnitQuaternion::from_euler_angles(roll, pitch, yaw),
        );
        if let Some(control) = &entry.control {
            surface = surface.with_control(control.input_type, control.input_gain);
        }
        Ok(surface)
    }
}

/// Build the airframe and rigid-body components from a parsed file.
pub fn build_airframe(
    raw: &RawAirframeConfig,
) -> Result<(AirframeComponent, RigidBodyComponent), ConfigError> {
    if raw.mass <= 0.0 {
        return Err(ConfigError::ValidationError(format!(
            "mass must be positive, got {}",
            raw.mass
        )));
    }
    if raw.inertia.iter().any(|&i| i <= 0.0) {
        return Err(ConfigError::ValidationError(format!(
            "principal moments of inertia must be positive, got {:?}",
            raw.inertia
        )));
    }

    let surfaces = raw
        .surfaces
        .iter()
        .map(AeroSurface::from_raw)
        .collect::<Result<Vec<_>, _>>()?;

    let airframe = AirframeComponent::new(raw.name.clone(), surfaces, raw.thrust);
    let mut body = RigidBodyComponent::new(
        raw.mass,
        Vector3::new(raw.inertia[0], raw.inertia[1], raw.inertia[2]),
    );
    body.center_of_mass = Vector3::new(
        raw.center_of_mass[0],
        raw.center_of_mass[1],
        raw.center_of_mass[2],
    );

    Ok((airframe, body))
}

/// Load an airframe description from a YAML file.
pub fn load_airframe(
    path: impl AsRef<Path>,
) -> Result<(AirframeComponent, RigidBodyComponent), ConfigError> {
    let contents = std::fs::read_to_string(path)?;
    let raw: RawAirframeConfig = serde_yaml::from_str(&contents)?;
    build_airframe(&raw)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use pretty_assertions::assert_eq;
    use std::io::Write;

    const GLIDER_YAML: &str = r#"
name: test_glider
mass: 250.0
inertia: [400.0, 800.0, 600.0]
center_of_mass: [0.1, 0.0, 0.0]
thrust: 0.0
surfaces:
  - name: wing_right
    chord: 1.2
    span: 4.0
    flap_fraction: 0.2
    position: [0.0, 0.0, 2.0]
  - name: elevator
    chord: 0.6
    span: 2.4
    flap_fraction: 0.3
    position: [-4.0, 0.0, 0.0]
    rotation: [0.0, 0.0, -2.0]
    control:
      input_type: Pitch
      input_gain: -1.0
"#;

    #[test]
    fn test_load_airframe_from_yaml() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(GLIDER_YAML.as_bytes()).unwrap();

        let (airframe, body) = load_airframe(file.path()).unwrap();

        assert_eq!(airframe.name, "test_glider");
        assert_eq!(airframe.surfaces.len(), 2);
        assert_relative_eq!(body.mass, 250.0);
        assert_relative_eq!(body.inertia.y, 800.0);
        assert_relative_eq!(body.center_of_mass.x, 0.1);

        let wing = &airframe.surfaces[0];
        assert!(!wing.is_control_surface);
        // auto aspect ratio: span / chord
        assert_relative_eq!(wing.config.aspect_ratio, 4.0 / 1.2, epsilon = 1e-12);
        // stall angles arrive in radians
        assert_relative_eq!(wing.config.stall_angle_high, deg_to_rad(15.0));

        let elevator = &airframe.surfaces[1];
        assert!(elevator.is_control_surface);
        assert_eq!(elevator.input_type, ControlInputType::Pitch);
        assert_relative_eq!(elevator.input_gain, -1.0);
    }

    #[test]
    fn test_out_of_range_fields_clamped() {
        let raw = RawSurfaceConfig {
            lift_slope: 6.28,
            skin_friction: 0.02,
            zero_lift_aoa: 0.0,
            stall_angle_high: -5.0, // wrong sign
            stall_angle_low: 10.0,  // wrong sign
            chord: 1.0,
            span: 2.0,
            flap_fraction: 0.9, // beyond the 0.4 limit
            auto_aspect_ratio: true,
            aspect_ratio: 0.0,
        };

        let config = SurfaceConfig::from_raw(&raw).unwrap();
        assert_relative_eq!(config.stall_angle_high, 0.0);
        assert_relative_eq!(config.stall_angle_low, 0.0);
        assert_relative_eq!(config.flap_fraction, 0.4);
        assert_relative_eq!(config.aspect_ratio, 2.0);
    }

    #[test]
    fn test_degenerate_geometry_rejected() {
        let mut raw = RawSurfaceConfig {
            lift_slope: 6.28,
            skin_friction: 0.02,
            zero_lift_aoa: 0.0,
            stall_angle_high: 15.0,
            stall_angle_low: -15.0,
            chord: 0.0,
            span: 2.0,
            flap_fraction: 0.0,
            auto_aspect_ratio: true,
            aspect_ratio: 1.0,
        };
        assert!(matches!(
            SurfaceConfig::from_raw(&raw),
            Err(ConfigError::ValidationError(_))
        ));

        raw.chord = 1.0;
        raw.auto_aspect_ratio = false;
        raw.aspect_ratio = -1.0;
        assert!(matches!(
            SurfaceConfig::from_raw(&raw),
            Err(ConfigError::ValidationError(_))
        ));

        raw.aspect_ratio = 2.0;
        raw.lift_slope = 0.0;
        assert!(matches!(
            SurfaceConfig::from_raw(&raw),
            Err(ConfigError::ValidationError(_))
        ));
    }

    #[test]
    fn test_invalid_mass_rejected() {
        let raw = RawAirframeConfig {
            name: "bad".to_string(),
            mass: -10.0,
            inertia: [1.0, 1.0, 1.0],
            center_of_mass: [0.0; 3],
            thrust: 0.0,
            surfaces: Vec::new(),
        };
        assert!(matches!(
            build_airframe(&raw),
            Err(ConfigError::ValidationError(_))
        ));
    }
}
