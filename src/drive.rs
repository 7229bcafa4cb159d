use crate::{config::DriveType, wheels::Wheels};

/// Motor torque for each wheel: the driven axle gets `throttle * motor_torque`,
/// the other axle gets nothing. Reverse torque passes through unchanged.
pub fn distribute(throttle: f32, motor_torque: f32, drive_type: DriveType) -> Wheels<f32> {
    let torque = throttle * motor_torque;
    let (front, rear) = match drive_type {
        DriveType::FrontWheel => (torque, 0.0),
        DriveType::RearWheel => (0.0, torque),
    };
    Wheels {
        front_left: front,
        front_right: front,
        rear_left: rear,
        rear_right: rear,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rear_wheel_drive_full_throttle() {
        let torque = distribute(1.0, 1500.0, DriveType::RearWheel);
        assert_eq!(torque.rear_left, 1500.0);
        assert_eq!(torque.rear_right, 1500.0);
        assert_eq!(torque.front_left, 0.0);
        assert_eq!(torque.front_right, 0.0);
    }

    #[test]
    fn front_wheel_drive_mirrors_assignment() {
        let torque = distribute(0.5, 1000.0, DriveType::FrontWheel);
        assert_eq!(torque.front_left, 500.0);
        assert_eq!(torque.front_right, 500.0);
        assert_eq!(torque.rear_left, 0.0);
        assert_eq!(torque.rear_right, 0.0);
    }

    #[test]
    fn exactly_two_wheels_driven() {
        for drive_type in [DriveType::FrontWheel, DriveType::RearWheel] {
            for step in -4..=4 {
                let throttle = step as f32 / 4.0;
                let torque = distribute(throttle, 1200.0, drive_type);
                let driven = torque
                    .iter()
                    .filter(|(slot, _)| slot.is_front() == (drive_type == DriveType::FrontWheel))
                    .all(|(_, &t)| t == throttle * 1200.0);
                let idle = torque
                    .iter()
                    .filter(|(slot, _)| slot.is_front() != (drive_type == DriveType::FrontWheel))
                    .all(|(_, &t)| t == 0.0);
                assert!(driven && idle, "{drive_type:?} at {throttle}");
            }
        }
    }

    #[test]
    fn reverse_passes_through() {
        let torque = distribute(-1.0, 1500.0, DriveType::RearWheel);
        assert_eq!(torque.rear_left, -1500.0);
    }
}
