//! Keeps wheel meshes glued to the physical wheels.
//!
//! The authored rotation of a mesh rarely matches the frame of the physics
//! wheel. The difference is captured once, before the first tick, and then
//! re-applied on top of the physical rotation every tick. Capturing it again
//! later would fold any physical spin or steering into the offset.

use crate::{
    rig::{WheelActuator, WheelVisual},
    wheels::{WheelSlot, Wheels},
};
use nalgebra::{Isometry3, UnitQuaternion};

pub struct WheelVisualSync {
    offsets: Wheels<Option<UnitQuaternion<f32>>>,
}

impl WheelVisualSync {
    pub fn capture(
        actuators: &Wheels<Option<&mut dyn WheelActuator>>,
        visuals: &Wheels<Option<&mut dyn WheelVisual>>,
    ) -> Self {
        let offsets = Wheels::from_fn(|slot| {
            match (actuators.get(slot), visuals.get(slot)) {
                (Some(actuator), Some(visual)) => {
                    let wheel_rotation = actuator.world_pose().rotation;
                    Some(wheel_rotation.inverse() * visual.rotation())
                }
                (actuator, visual) => {
                    log::warn!(
                        "Wheel {} is not synced: actuator {}, visual {}",
                        slot.name(),
                        if actuator.is_some() { "bound" } else { "missing" },
                        if visual.is_some() { "bound" } else { "missing" },
                    );
                    None
                }
            }
        });
        Self { offsets }
    }

    pub fn offset(&self, slot: WheelSlot) -> Option<UnitQuaternion<f32>> {
        *self.offsets.get(slot)
    }

    #[profiling::function]
    pub fn apply(
        &self,
        actuators: &Wheels<Option<&mut dyn WheelActuator>>,
        visuals: &mut Wheels<Option<&mut dyn WheelVisual>>,
    ) {
        for slot in WheelSlot::ALL {
            let (Some(offset), Some(actuator), Some(visual)) = (
                self.offsets.get(slot),
                actuators.get(slot),
                visuals.get_mut(slot),
            ) else {
                continue;
            };
            let pose = actuator.world_pose();
            visual.set_pose(Isometry3::from_parts(pose.translation, pose.rotation * *offset));
        }
    }
}
