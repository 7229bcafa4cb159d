use crate::error::ConfigError;
use std::{fs, path::Path};

fn default_motor_torque() -> f32 {
    1500.0
}
fn default_max_steer_angle() -> f32 {
    30.0
}
fn default_brake_torque() -> f32 {
    4000.0
}
fn default_auto_brake_torque() -> f32 {
    800.0
}
fn default_auto_brake_speed_threshold() -> f32 {
    0.5
}
fn default_downforce_coefficient() -> f32 {
    50.0
}
fn default_center_of_mass_offset() -> [f32; 3] {
    [0.0, -0.4, 0.0]
}

/// Which axle receives motor torque.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Deserialize, serde::Serialize)]
pub enum DriveType {
    FrontWheel,
    #[default]
    RearWheel,
}

/// Tuning of a single vehicle, fixed for the whole session.
///
/// Torques are in newton-meters, speeds in units per second and the steering
/// limit in degrees. Nothing here is range-checked.
#[derive(Clone, Debug, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct VehicleConfig {
    #[serde(default = "default_motor_torque")]
    pub motor_torque: f32,
    #[serde(default = "default_max_steer_angle")]
    pub max_steer_angle: f32,
    #[serde(default = "default_brake_torque")]
    pub brake_torque: f32,
    #[serde(default = "default_auto_brake_torque")]
    pub auto_brake_torque: f32,
    #[serde(default = "default_auto_brake_speed_threshold")]
    pub auto_brake_speed_threshold: f32,
    #[serde(default = "default_downforce_coefficient")]
    pub downforce_coefficient: f32,
    #[serde(default = "default_center_of_mass_offset")]
    pub center_of_mass_offset: [f32; 3],
    #[serde(default)]
    pub drive_type: DriveType,
}

impl Default for VehicleConfig {
    fn default() -> Self {
        Self {
            motor_torque: default_motor_torque(),
            max_steer_angle: default_max_steer_angle(),
            brake_torque: default_brake_torque(),
            auto_brake_torque: default_auto_brake_torque(),
            auto_brake_speed_threshold: default_auto_brake_speed_threshold(),
            downforce_coefficient: default_downforce_coefficient(),
            center_of_mass_offset: default_center_of_mass_offset(),
            drive_type: DriveType::default(),
        }
    }
}

impl VehicleConfig {
    pub fn from_ron(text: &str) -> Result<Self, ron::error::SpannedError> {
        ron::de::from_str(text)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        load_ron(path.as_ref())
    }
}

/// Reads and parses any RON document.
pub fn load_ron<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T, ConfigError> {
    let bytes = fs::read(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    ron::de::from_bytes(&bytes).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

fn default_tick_rate() -> f32 {
    60.0
}

#[derive(Clone, Debug, serde::Deserialize)]
pub struct Chassis {
    pub half_extents: [f32; 3],
    pub mass: f32,
    pub spawn_pos: [f32; 3],
}

/// Wheel geometry shared by all four wheels. The chassis frame is
/// X forward, Y up, Z to the right.
#[derive(Clone, Debug, serde::Deserialize)]
pub struct Wheel {
    pub radius: f32,
    pub suspension_rest_length: f32,
    pub suspension_stiffness: f32,
    pub suspension_damping: f32,
    pub friction_slip: f32,
    /// Authored Euler rotation of the wheel mesh.
    #[serde(default)]
    pub mesh_rot: [f32; 3],
}

#[derive(Clone, Debug, serde::Deserialize)]
pub struct Body {
    pub chassis: Chassis,
    pub wheel: Wheel,
    /// Forward offsets of the front and rear axles.
    pub axle_xs: [f32; 2],
    /// Lateral offset of each wheel from the center line.
    pub half_track: f32,
    /// Height of the suspension mounts relative to the body.
    pub mount_y: f32,
}

#[derive(Clone, Debug, serde::Deserialize)]
pub struct Level {
    pub gravity: f32,
    pub ground_half_size: f32,
}

/// One leg of a scripted drive, held until `until` seconds.
#[derive(Clone, Copy, Debug, serde::Deserialize)]
pub struct DriveSegment {
    pub until: f32,
    #[serde(default)]
    pub steer: f32,
    #[serde(default)]
    pub throttle: f32,
    #[serde(default)]
    pub braking: bool,
}

#[derive(Clone, Debug, serde::Deserialize)]
pub struct Demo {
    #[serde(default = "default_tick_rate")]
    pub tick_rate: f32,
    pub level: Level,
    #[serde(default)]
    pub vehicle: VehicleConfig,
    pub body: Body,
    pub script: Vec<DriveSegment>,
}
