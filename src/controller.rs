use crate::{
    brake::{self, BrakeCommand, BrakeState},
    config::VehicleConfig,
    downforce, drive,
    input::{InputAggregator, InputState},
    rig::{Chassis, Rig},
    visual::WheelVisualSync,
    wheels::Wheels,
};
use nalgebra::Vector3;

/// What a single tick decided.
#[derive(Clone, Debug, PartialEq)]
pub struct StepReport {
    pub input: InputState,
    /// Chassis speed at the start of the tick.
    pub speed: f32,
    /// Steering angle of the front wheels, in degrees.
    pub steer_angle: f32,
    pub motor_torque: Wheels<f32>,
    pub brake: BrakeCommand,
    pub downforce: Vector3<f32>,
}

/// Per-tick actuation of a four-wheeled vehicle.
///
/// Lifecycle: [`awake`](Self::awake) once to shift the center of mass,
/// [`start`](Self::start) once the wheels and meshes are in place, then
/// [`step`](Self::step) on every fixed physics tick.
pub struct VehicleController {
    config: VehicleConfig,
    inputs: InputAggregator,
    center_of_mass_shifted: bool,
    visual_sync: Option<WheelVisualSync>,
    brake_state: Option<BrakeState>,
}

impl VehicleController {
    pub fn new(config: VehicleConfig, inputs: InputAggregator) -> Self {
        log::info!(
            "Vehicle controller: {:?}, {} input source(s)",
            config.drive_type,
            inputs.len()
        );
        Self {
            config,
            inputs,
            center_of_mass_shifted: false,
            visual_sync: None,
            brake_state: None,
        }
    }

    pub fn config(&self) -> &VehicleConfig {
        &self.config
    }

    pub fn inputs_mut(&mut self) -> &mut InputAggregator {
        &mut self.inputs
    }

    pub fn visual_sync(&self) -> Option<&WheelVisualSync> {
        self.visual_sync.as_ref()
    }

    /// Moves the chassis center of mass by the configured offset. Only the
    /// first call has an effect.
    pub fn awake(&mut self, chassis: &mut dyn Chassis) {
        if self.center_of_mass_shifted {
            log::debug!("Center of mass already shifted");
            return;
        }
        let center = chassis.center_of_mass() + Vector3::from(self.config.center_of_mass_offset);
        log::info!("Shifting center of mass to {:?}", center.coords);
        chassis.set_center_of_mass(center);
        self.center_of_mass_shifted = true;
    }

    /// Captures the wheel mesh offsets. Must run after the wheels have their
    /// initial pose and before the first tick.
    pub fn start(&mut self, rig: &Rig) {
        if self.visual_sync.is_some() {
            log::warn!("Wheel visual offsets are already captured, keeping them");
            return;
        }
        log::info!("Capturing wheel visual offsets");
        self.visual_sync = Some(WheelVisualSync::capture(&rig.actuators, &rig.visuals));
    }

    /// Polls the input sources and runs one tick.
    pub fn step(&mut self, rig: &mut Rig) -> StepReport {
        let input = self.inputs.read();
        self.step_with(input, rig)
    }

    /// Runs one tick with an already aggregated input.
    #[profiling::function]
    pub fn step_with(&mut self, input: InputState, rig: &mut Rig) -> StepReport {
        let config = &self.config;
        let speed = rig.chassis.linear_velocity().norm();

        let steer_angle = input.steer * config.max_steer_angle;
        let motor_torque = drive::distribute(input.throttle, config.motor_torque, config.drive_type);
        let brake = brake::evaluate(config, input.throttle, input.braking, speed);

        for (slot, actuator) in rig.actuators.iter_mut() {
            let Some(actuator) = actuator else {
                continue;
            };
            if slot.is_front() {
                actuator.set_steer_angle(steer_angle);
            }
            actuator.set_motor_torque(*motor_torque.get(slot));
            actuator.set_brake_torque(brake.torque);
        }

        if self.brake_state != Some(brake.state) {
            log::debug!("Brake state {:?} -> {:?}", self.brake_state, brake.state);
            self.brake_state = Some(brake.state);
        }
        if brake.full_stop() {
            rig.chassis.set_linear_velocity(Vector3::zeros());
            rig.chassis.set_angular_velocity(Vector3::zeros());
        }

        let downforce = downforce::force(config.downforce_coefficient, speed, &rig.chassis.up());
        rig.chassis.add_force(downforce);

        if let Some(ref sync) = self.visual_sync {
            sync.apply(&rig.actuators, &mut rig.visuals);
        }

        log::trace!(
            "speed {:.2}, steer {:.1}, throttle {:.2}, brake {:?} {:.0}",
            speed,
            steer_angle,
            input.throttle,
            brake.state,
            brake.torque
        );
        StepReport {
            input,
            speed,
            steer_angle,
            motor_torque,
            brake,
            downforce,
        }
    }
}
