//! Per-tick actuation of a four-wheeled vehicle: player input is turned into
//! steering, drive and brake commands for each wheel, with a coasting
//! auto-brake, a full-stop clamp, speed-dependent downforce and wheel mesh
//! synchronization.
//!
//! The controller only talks to the capability traits in [`rig`]. The
//! [`engine`] module provides a rapier3d implementation of them.

pub mod brake;
pub mod config;
pub mod controller;
pub mod downforce;
pub mod drive;
pub mod engine;
pub mod error;
pub mod input;
pub mod rig;
pub mod visual;
pub mod wheels;

pub use config::{DriveType, VehicleConfig};
pub use controller::{StepReport, VehicleController};
pub use error::ConfigError;
pub use input::{InputAggregator, InputSample, InputSource, InputState};
pub use rig::{Chassis, Rig, WheelActuator, WheelVisual};
pub use wheels::{WheelSlot, Wheels};
