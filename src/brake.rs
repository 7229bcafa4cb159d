//! Manual brake, coasting auto-brake and the full-stop clamp.

use crate::config::VehicleConfig;

/// Throttle magnitude below which the vehicle is considered coasting.
pub const THROTTLE_DEADBAND: f32 = 0.05;
/// Speed at which the auto-brake reaches its full torque.
pub const AUTO_BRAKE_REFERENCE_SPEED: f32 = 10.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BrakeState {
    Manual,
    Coasting,
    /// Coasting below the stop threshold: velocities are zeroed.
    FullStop,
    Driving,
}

/// Brake output for one tick, identical on all four wheels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BrakeCommand {
    pub state: BrakeState,
    pub torque: f32,
}

impl BrakeCommand {
    pub fn full_stop(&self) -> bool {
        self.state == BrakeState::FullStop
    }
}

pub fn evaluate(config: &VehicleConfig, throttle: f32, braking: bool, speed: f32) -> BrakeCommand {
    if braking {
        return BrakeCommand {
            state: BrakeState::Manual,
            torque: config.brake_torque,
        };
    }
    if throttle.abs() >= THROTTLE_DEADBAND {
        return BrakeCommand {
            state: BrakeState::Driving,
            torque: 0.0,
        };
    }
    let torque = config.auto_brake_torque * (speed / AUTO_BRAKE_REFERENCE_SPEED).clamp(0.0, 1.0);
    let state = if speed < config.auto_brake_speed_threshold {
        BrakeState::FullStop
    } else {
        BrakeState::Coasting
    };
    BrakeCommand { state, torque }
}
