use std::path::Path;
use wheelhouse::{
    config::{self, DriveSegment},
    engine, InputAggregator, InputSample, InputSource, VehicleController, Wheels,
};

/// Replays the configured drive plan, one poll per tick.
struct Script {
    segments: Vec<DriveSegment>,
    dt: f32,
    ticks: u32,
}

impl InputSource for Script {
    fn poll(&mut self) -> Option<InputSample> {
        let time = self.ticks as f32 * self.dt;
        self.ticks += 1;
        let segment = self.segments.iter().find(|segment| time < segment.until)?;
        Some(InputSample::full(
            segment.steer,
            segment.throttle,
            segment.braking,
        ))
    }
}

struct Simulation {
    physics: engine::Physics,
    vehicle: engine::Vehicle,
    wheel_nodes: Wheels<engine::WheelNode>,
    controller: VehicleController,
    dt: f32,
    duration: f32,
}

impl Simulation {
    fn new(config: config::Demo) -> Self {
        log::info!("Initializing");

        let mut physics = engine::Physics::default();
        physics.set_gravity(config.level.gravity);
        physics.add_ground(config.level.ground_half_size);

        let vehicle = engine::Vehicle::new(&mut physics, &config.body);
        let mesh_rot = config.body.wheel.mesh_rot;
        let wheel_nodes = Wheels::from_fn(|slot| engine::WheelNode::new(slot.name(), mesh_rot));

        let dt = 1.0 / config.tick_rate;
        let duration = config
            .script
            .last()
            .map_or(0.0, |segment| segment.until);
        let mut controller = VehicleController::new(config.vehicle, InputAggregator::new());
        controller.inputs_mut().push(Script {
            segments: config.script,
            dt,
            ticks: 0,
        });
        log::info!(
            "Motor {} N·m, brake {} N·m, auto-brake {} N·m",
            controller.config().motor_torque,
            controller.config().brake_torque,
            controller.config().auto_brake_torque,
        );

        let mut simulation = Self {
            physics,
            vehicle,
            wheel_nodes,
            controller,
            dt,
            duration,
        };
        simulation.start();
        simulation
    }

    fn start(&mut self) {
        let Some(mut parts) = self.vehicle.parts(&mut self.physics.rigid_bodies) else {
            log::error!("Vehicle body is missing");
            return;
        };
        self.controller.awake(&mut parts.chassis);
        let mut rig = parts.rig();
        for (slot, node) in self.wheel_nodes.iter_mut() {
            rig = rig.with_visual(slot, node);
        }
        self.controller.start(&rig);
    }

    fn run(&mut self) {
        let ticks = (self.duration / self.dt).round() as u32;
        let report_every = (1.0 / self.dt).round().max(1.0) as u32;
        log::info!("Running {} ticks of {:.4} s", ticks, self.dt);

        for tick in 0..ticks {
            let report = {
                let Some(mut parts) = self.vehicle.parts(&mut self.physics.rigid_bodies) else {
                    log::error!("Vehicle body is missing");
                    return;
                };
                let mut rig = parts.rig();
                for (slot, node) in self.wheel_nodes.iter_mut() {
                    rig = rig.with_visual(slot, node);
                }
                self.controller.step(&mut rig)
            };
            self.vehicle.update(&mut self.physics, self.dt);
            self.physics.step(self.dt);

            if tick % report_every == 0 {
                let node = &self.wheel_nodes.front_left;
                log::info!(
                    "t={:5.2}s speed {:6.2} throttle {:5.2} steer {:5.1} brake {:?} ({:.0}) {} at {:?}",
                    tick as f32 * self.dt,
                    report.speed,
                    report.input.throttle,
                    report.steer_angle,
                    report.brake.state,
                    report.brake.torque,
                    node.name,
                    node.pose.translation.vector.as_slice(),
                );
            }
        }
    }
}

fn main() {
    env_logger::init();

    let config: config::Demo =
        config::load_ron(Path::new("data/config.ron")).expect("Unable to load the config");
    let mut simulation = Simulation::new(config);
    simulation.run();
    log::info!("Done");
}
