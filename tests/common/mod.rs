#![allow(dead_code)]

use nalgebra::{Isometry3, Point3, Translation3, Unit, UnitQuaternion, Vector3};
use wheelhouse::{Chassis, Rig, WheelActuator, WheelSlot, WheelVisual, Wheels};

#[derive(Clone, Debug)]
pub struct FakeWheel {
    pub steer_angle: f32,
    pub motor_torque: f32,
    pub brake_torque: f32,
    pub pose: Isometry3<f32>,
}

impl Default for FakeWheel {
    fn default() -> Self {
        Self {
            steer_angle: 0.0,
            motor_torque: 0.0,
            brake_torque: 0.0,
            pose: Isometry3::identity(),
        }
    }
}

impl WheelActuator for FakeWheel {
    fn set_steer_angle(&mut self, degrees: f32) {
        self.steer_angle = degrees;
    }
    fn set_motor_torque(&mut self, torque: f32) {
        self.motor_torque = torque;
    }
    fn set_brake_torque(&mut self, torque: f32) {
        self.brake_torque = torque;
    }
    fn world_pose(&self) -> Isometry3<f32> {
        self.pose
    }
}

#[derive(Clone, Debug)]
pub struct FakeMesh {
    pub pose: Isometry3<f32>,
    pub writes: usize,
}

impl WheelVisual for FakeMesh {
    fn rotation(&self) -> UnitQuaternion<f32> {
        self.pose.rotation
    }
    fn set_pose(&mut self, pose: Isometry3<f32>) {
        self.pose = pose;
        self.writes += 1;
    }
}

#[derive(Clone, Debug)]
pub struct FakeChassis {
    pub linear_velocity: Vector3<f32>,
    pub angular_velocity: Vector3<f32>,
    pub forces: Vec<Vector3<f32>>,
    pub center_of_mass: Point3<f32>,
    pub up: Unit<Vector3<f32>>,
}

impl Default for FakeChassis {
    fn default() -> Self {
        Self {
            linear_velocity: Vector3::zeros(),
            angular_velocity: Vector3::zeros(),
            forces: Vec::new(),
            center_of_mass: Point3::origin(),
            up: Vector3::y_axis(),
        }
    }
}

impl Chassis for FakeChassis {
    fn linear_velocity(&self) -> Vector3<f32> {
        self.linear_velocity
    }
    fn set_linear_velocity(&mut self, velocity: Vector3<f32>) {
        self.linear_velocity = velocity;
    }
    fn set_angular_velocity(&mut self, velocity: Vector3<f32>) {
        self.angular_velocity = velocity;
    }
    fn add_force(&mut self, force: Vector3<f32>) {
        self.forces.push(force);
    }
    fn center_of_mass(&self) -> Point3<f32> {
        self.center_of_mass
    }
    fn set_center_of_mass(&mut self, center: Point3<f32>) {
        self.center_of_mass = center;
    }
    fn up(&self) -> Unit<Vector3<f32>> {
        self.up
    }
}

/// A vehicle made of fakes, with distinct wheel poses and mesh rotations.
pub struct Car {
    pub chassis: FakeChassis,
    pub wheels: Wheels<FakeWheel>,
    pub meshes: Wheels<FakeMesh>,
}

impl Car {
    pub fn new() -> Self {
        let wheels = Wheels::from_fn(|slot| {
            let (x, z) = match slot {
                WheelSlot::FrontLeft => (1.4, -0.8),
                WheelSlot::FrontRight => (1.4, 0.8),
                WheelSlot::RearLeft => (-1.3, -0.8),
                WheelSlot::RearRight => (-1.3, 0.8),
            };
            FakeWheel {
                pose: Isometry3::from_parts(
                    Translation3::new(x, 0.4, z),
                    UnitQuaternion::from_euler_angles(0.0, 0.1 * x, 0.0),
                ),
                ..Default::default()
            }
        });
        let meshes = Wheels::from_fn(|slot| FakeMesh {
            pose: Isometry3::from_parts(
                Translation3::identity(),
                UnitQuaternion::from_euler_angles(
                    std::f32::consts::FRAC_PI_2,
                    0.0,
                    if slot.is_front() { 0.3 } else { -0.3 },
                ),
            ),
            writes: 0,
        });
        Self {
            chassis: FakeChassis::default(),
            wheels,
            meshes,
        }
    }

    pub fn moving(mut self, velocity: Vector3<f32>) -> Self {
        self.chassis.linear_velocity = velocity;
        self.chassis.angular_velocity = Vector3::new(0.0, 0.2, 0.0);
        self
    }

    pub fn rig(&mut self) -> Rig<'_> {
        self.rig_without_visual(None)
    }

    pub fn rig_without_visual(&mut self, skip: Option<WheelSlot>) -> Rig<'_> {
        let mut rig = Rig::new(&mut self.chassis);
        for (slot, wheel) in self.wheels.iter_mut() {
            rig = rig.with_actuator(slot, wheel);
        }
        for (slot, mesh) in self.meshes.iter_mut() {
            if Some(slot) != skip {
                rig = rig.with_visual(slot, mesh);
            }
        }
        rig
    }
}
