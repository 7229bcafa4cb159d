//! Capabilities the controller drives. Implemented by the physics backend
//! (see `engine`) and by test fakes.

use crate::wheels::{WheelSlot, Wheels};
use nalgebra::{Isometry3, Point3, Unit, UnitQuaternion, Vector3};

/// One physical wheel: accepts actuation commands and reports its pose.
pub trait WheelActuator {
    /// Steering angle in degrees.
    fn set_steer_angle(&mut self, degrees: f32);
    /// Drive torque in newton-meters. Negative drives in reverse.
    fn set_motor_torque(&mut self, torque: f32);
    /// Brake torque in newton-meters.
    fn set_brake_torque(&mut self, torque: f32);
    fn world_pose(&self) -> Isometry3<f32>;
}

/// A scene node displaying one wheel.
pub trait WheelVisual {
    fn rotation(&self) -> UnitQuaternion<f32>;
    fn set_pose(&mut self, pose: Isometry3<f32>);
}

/// The vehicle's rigid body.
pub trait Chassis {
    fn linear_velocity(&self) -> Vector3<f32>;
    fn set_linear_velocity(&mut self, velocity: Vector3<f32>);
    fn set_angular_velocity(&mut self, velocity: Vector3<f32>);
    /// Accumulates a force for the next physics step.
    fn add_force(&mut self, force: Vector3<f32>);
    /// Center of mass in body-local coordinates.
    fn center_of_mass(&self) -> Point3<f32>;
    fn set_center_of_mass(&mut self, center: Point3<f32>);
    /// World-space up direction of the body.
    fn up(&self) -> Unit<Vector3<f32>>;
}

/// Borrowed view of everything a tick touches.
///
/// Every slot may be unbound; unbound slots are skipped.
pub struct Rig<'a> {
    pub chassis: &'a mut dyn Chassis,
    pub actuators: Wheels<Option<&'a mut dyn WheelActuator>>,
    pub visuals: Wheels<Option<&'a mut dyn WheelVisual>>,
}

impl<'a> Rig<'a> {
    pub fn new(chassis: &'a mut dyn Chassis) -> Self {
        Self {
            chassis,
            actuators: Wheels::default(),
            visuals: Wheels::default(),
        }
    }

    pub fn with_actuator(mut self, slot: WheelSlot, actuator: &'a mut dyn WheelActuator) -> Self {
        *self.actuators.get_mut(slot) = Some(actuator);
        self
    }

    pub fn with_visual(mut self, slot: WheelSlot, visual: &'a mut dyn WheelVisual) -> Self {
        *self.visuals.get_mut(slot) = Some(visual);
        self
    }
}
