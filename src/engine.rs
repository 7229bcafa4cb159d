//! rapier3d backend for the controller capabilities.

use crate::{
    config,
    rig::{Chassis, Rig, WheelActuator, WheelVisual},
    wheels::{WheelSlot, Wheels},
};
use nalgebra::{Isometry3, Point3, Translation3, Unit, UnitQuaternion, Vector3};
use rapier3d::control::{DynamicRayCastVehicleController, WheelTuning};

#[derive(Default)]
pub struct Physics {
    pub rigid_bodies: rapier3d::dynamics::RigidBodySet,
    integration_params: rapier3d::dynamics::IntegrationParameters,
    island_manager: rapier3d::dynamics::IslandManager,
    impulses: rapier3d::dynamics::ImpulseJointSet,
    joints: rapier3d::dynamics::MultibodyJointSet,
    solver: rapier3d::dynamics::CCDSolver,
    pub colliders: rapier3d::geometry::ColliderSet,
    broad_phase: rapier3d::geometry::BroadPhase,
    narrow_phase: rapier3d::geometry::NarrowPhase,
    gravity: rapier3d::math::Vector<f32>,
    pipeline: rapier3d::pipeline::PhysicsPipeline,
    query_pipeline: rapier3d::pipeline::QueryPipeline,
}

impl Physics {
    #[profiling::function]
    pub fn step(&mut self, dt: f32) {
        self.integration_params.dt = dt;
        let physics_hooks = ();
        let event_handler = ();
        self.pipeline.step(
            &self.gravity,
            &self.integration_params,
            &mut self.island_manager,
            &mut self.broad_phase,
            &mut self.narrow_phase,
            &mut self.rigid_bodies,
            &mut self.colliders,
            &mut self.impulses,
            &mut self.joints,
            &mut self.solver,
            Some(&mut self.query_pipeline),
            &physics_hooks,
            &event_handler,
        );
    }

    pub fn set_gravity(&mut self, force: f32) {
        self.gravity.y = -force;
    }

    /// Adds a flat static slab with its top face at `y = 0`.
    pub fn add_ground(&mut self, half_size: f32) {
        let collider = rapier3d::geometry::ColliderBuilder::cuboid(half_size, 0.1, half_size)
            .translation(Vector3::new(0.0, -0.1, 0.0))
            .build();
        self.colliders.insert(collider);
    }
}

/// Mass layout of the chassis. The chassis collider is massless, so these
/// values fully define the body's mass properties.
#[derive(Clone, Copy, Debug)]
struct MassLayout {
    mass: f32,
    principal_inertia: Vector3<f32>,
    center: Point3<f32>,
}

impl MassLayout {
    fn properties(&self) -> rapier3d::dynamics::MassProperties {
        rapier3d::dynamics::MassProperties::new(self.center, self.mass, self.principal_inertia)
    }
}

/// Longitudinal forces requested for one wheel, in newtons.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
struct WheelForces {
    motor: f32,
    brake: f32,
}

/// A ray-cast vehicle: chassis body plus four suspension rays.
pub struct Vehicle {
    pub body: rapier3d::dynamics::RigidBodyHandle,
    controller: DynamicRayCastVehicleController,
    mass: MassLayout,
    forces: Wheels<WheelForces>,
    updated: bool,
}

impl Vehicle {
    pub fn new(physics: &mut Physics, desc: &config::Body) -> Self {
        let [hx, hy, hz] = desc.chassis.half_extents;
        let m = desc.chassis.mass;
        let mass = MassLayout {
            mass: m,
            principal_inertia: Vector3::new(
                m * (hy * hy + hz * hz) / 3.0,
                m * (hx * hx + hz * hz) / 3.0,
                m * (hx * hx + hy * hy) / 3.0,
            ),
            center: Point3::origin(),
        };

        let rigid_body = rapier3d::dynamics::RigidBodyBuilder::dynamic()
            .translation(Vector3::from(desc.chassis.spawn_pos))
            .additional_mass_properties(mass.properties())
            .build();
        let body = physics.rigid_bodies.insert(rigid_body);
        let collider = rapier3d::geometry::ColliderBuilder::cuboid(hx, hy, hz)
            .density(0.0)
            .build();
        physics
            .colliders
            .insert_with_parent(collider, body, &mut physics.rigid_bodies);

        let tuning = WheelTuning {
            suspension_stiffness: desc.wheel.suspension_stiffness,
            suspension_damping: desc.wheel.suspension_damping,
            friction_slip: desc.wheel.friction_slip,
            ..WheelTuning::default()
        };
        let mut controller = DynamicRayCastVehicleController::new(body);
        let [front_x, rear_x] = desc.axle_xs;
        for slot in WheelSlot::ALL {
            let x = if slot.is_front() { front_x } else { rear_x };
            let z = match slot {
                WheelSlot::FrontLeft | WheelSlot::RearLeft => -desc.half_track,
                WheelSlot::FrontRight | WheelSlot::RearRight => desc.half_track,
            };
            controller.add_wheel(
                Point3::new(x, desc.mount_y, z),
                -Vector3::y(),
                Vector3::z(),
                desc.wheel.suspension_rest_length,
                desc.wheel.radius,
                &tuning,
            );
        }
        log::info!(
            "Vehicle of {} kg with {} wheels",
            m,
            controller.wheels().len()
        );

        Self {
            body,
            controller,
            mass,
            forces: Wheels::default(),
            updated: false,
        }
    }

    /// Applies the wheel commands to the chassis. Runs before `Physics::step`.
    ///
    /// rapier takes the brake as an impulse cap per update and ignores it on
    /// any wheel with a non-zero engine force, so a braking wheel is not driven.
    #[profiling::function]
    pub fn update(&mut self, physics: &mut Physics, dt: f32) {
        for (slot, wheel) in WheelSlot::ALL.into_iter().zip(self.controller.wheels_mut()) {
            let forces = self.forces.get(slot);
            if forces.brake != 0.0 {
                wheel.engine_force = 0.0;
                wheel.brake = forces.brake * dt;
            } else {
                wheel.engine_force = forces.motor;
                wheel.brake = 0.0;
            }
        }
        let filter = rapier3d::pipeline::QueryFilter::exclude_dynamic().exclude_rigid_body(self.body);
        self.controller.update_vehicle(
            dt,
            &mut physics.rigid_bodies,
            &physics.colliders,
            &physics.query_pipeline,
            filter,
        );
        self.updated = true;
    }

    /// Borrows the chassis and wheels as controller capabilities.
    ///
    /// User forces left on the chassis by the previous tick are cleared.
    pub fn parts<'a>(
        &'a mut self,
        bodies: &'a mut rapier3d::dynamics::RigidBodySet,
    ) -> Option<VehicleParts<'a>> {
        let body = bodies.get_mut(self.body)?;
        body.reset_forces(false);
        let chassis_pose = *body.position();

        let resting = !self.updated;
        let mut wheels = Wheels::default();
        let pairs = self.controller.wheels_mut().iter_mut().zip(self.forces.iter_mut());
        for (wheel, (slot, forces)) in pairs {
            *wheels.get_mut(slot) = Some(RayCastWheel {
                wheel,
                forces,
                chassis_pose,
                resting,
            });
        }
        Some(VehicleParts {
            chassis: ChassisBody {
                body,
                mass: &mut self.mass,
            },
            wheels,
        })
    }
}

pub struct VehicleParts<'a> {
    pub chassis: ChassisBody<'a>,
    pub wheels: Wheels<Option<RayCastWheel<'a>>>,
}

impl VehicleParts<'_> {
    /// A rig with the chassis and every wheel bound, and no visuals.
    pub fn rig(&mut self) -> Rig<'_> {
        let mut rig = Rig::new(&mut self.chassis);
        for (slot, wheel) in self.wheels.iter_mut() {
            if let Some(wheel) = wheel {
                rig = rig.with_actuator(slot, wheel);
            }
        }
        rig
    }
}

pub struct ChassisBody<'a> {
    body: &'a mut rapier3d::dynamics::RigidBody,
    mass: &'a mut MassLayout,
}

impl Chassis for ChassisBody<'_> {
    fn linear_velocity(&self) -> Vector3<f32> {
        *self.body.linvel()
    }
    fn set_linear_velocity(&mut self, velocity: Vector3<f32>) {
        self.body.set_linvel(velocity, true);
    }
    fn set_angular_velocity(&mut self, velocity: Vector3<f32>) {
        self.body.set_angvel(velocity, true);
    }
    fn add_force(&mut self, force: Vector3<f32>) {
        self.body.add_force(force, true);
    }
    fn center_of_mass(&self) -> Point3<f32> {
        self.mass.center
    }
    fn set_center_of_mass(&mut self, center: Point3<f32>) {
        self.mass.center = center;
        self.body
            .set_additional_mass_properties(self.mass.properties(), true);
    }
    fn up(&self) -> Unit<Vector3<f32>> {
        self.body.position().rotation * Vector3::y_axis()
    }
}

pub struct RayCastWheel<'a> {
    wheel: &'a mut rapier3d::control::Wheel,
    forces: &'a mut WheelForces,
    chassis_pose: Isometry3<f32>,
    /// No ray has been cast yet, the wheel hangs at its rest length.
    resting: bool,
}

impl RayCastWheel<'_> {
    fn suspension_length(&self) -> f32 {
        if self.resting {
            self.wheel.suspension_rest_length
        } else {
            self.wheel.raycast_info().suspension_length
        }
    }
}

impl WheelActuator for RayCastWheel<'_> {
    fn set_steer_angle(&mut self, degrees: f32) {
        // rapier steers counter-clockwise around up, positive input steers right
        self.wheel.steering = -degrees.to_radians();
    }
    fn set_motor_torque(&mut self, torque: f32) {
        self.forces.motor = torque / self.wheel.radius;
    }
    fn set_brake_torque(&mut self, torque: f32) {
        self.forces.brake = torque / self.wheel.radius;
    }
    fn world_pose(&self) -> Isometry3<f32> {
        let up = Unit::new_normalize(-self.wheel.direction_cs);
        let axle = Unit::new_normalize(self.wheel.axle_cs);
        let local = UnitQuaternion::from_axis_angle(&up, self.wheel.steering)
            * UnitQuaternion::from_axis_angle(&axle, self.wheel.rotation);
        let center = self.wheel.chassis_connection_point_cs
            + self.wheel.direction_cs * self.suspension_length();
        Isometry3::from_parts(
            Translation3::from((self.chassis_pose * center).coords),
            self.chassis_pose.rotation * local,
        )
    }
}

/// A scene node holding one wheel mesh.
#[derive(Clone, Debug)]
pub struct WheelNode {
    pub name: String,
    pub pose: Isometry3<f32>,
}

impl WheelNode {
    pub fn new(name: impl Into<String>, rot: [f32; 3]) -> Self {
        Self {
            name: name.into(),
            pose: Isometry3::from_parts(
                Translation3::identity(),
                UnitQuaternion::from_euler_angles(rot[0], rot[1], rot[2]),
            ),
        }
    }
}

impl WheelVisual for WheelNode {
    fn rotation(&self) -> UnitQuaternion<f32> {
        self.pose.rotation
    }
    fn set_pose(&mut self, pose: Isometry3<f32>) {
        self.pose = pose;
    }
}
