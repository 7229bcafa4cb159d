//! Fixed four-wheel topology.

/// One of the four wheel positions of the vehicle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum WheelSlot {
    FrontLeft,
    FrontRight,
    RearLeft,
    RearRight,
}

impl WheelSlot {
    pub const ALL: [Self; 4] = [
        Self::FrontLeft,
        Self::FrontRight,
        Self::RearLeft,
        Self::RearRight,
    ];

    pub fn is_front(self) -> bool {
        matches!(self, Self::FrontLeft | Self::FrontRight)
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::FrontLeft => "front-left",
            Self::FrontRight => "front-right",
            Self::RearLeft => "rear-left",
            Self::RearRight => "rear-right",
        }
    }
}

/// One value per wheel slot.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Wheels<T> {
    pub front_left: T,
    pub front_right: T,
    pub rear_left: T,
    pub rear_right: T,
}

impl<T> Wheels<T> {
    pub fn from_fn(mut fun: impl FnMut(WheelSlot) -> T) -> Self {
        Self {
            front_left: fun(WheelSlot::FrontLeft),
            front_right: fun(WheelSlot::FrontRight),
            rear_left: fun(WheelSlot::RearLeft),
            rear_right: fun(WheelSlot::RearRight),
        }
    }

    pub fn splat(value: T) -> Self
    where
        T: Clone,
    {
        Self::from_fn(|_| value.clone())
    }

    pub fn get(&self, slot: WheelSlot) -> &T {
        match slot {
            WheelSlot::FrontLeft => &self.front_left,
            WheelSlot::FrontRight => &self.front_right,
            WheelSlot::RearLeft => &self.rear_left,
            WheelSlot::RearRight => &self.rear_right,
        }
    }

    pub fn get_mut(&mut self, slot: WheelSlot) -> &mut T {
        match slot {
            WheelSlot::FrontLeft => &mut self.front_left,
            WheelSlot::FrontRight => &mut self.front_right,
            WheelSlot::RearLeft => &mut self.rear_left,
            WheelSlot::RearRight => &mut self.rear_right,
        }
    }

    pub fn map<U>(self, mut fun: impl FnMut(WheelSlot, T) -> U) -> Wheels<U> {
        Wheels {
            front_left: fun(WheelSlot::FrontLeft, self.front_left),
            front_right: fun(WheelSlot::FrontRight, self.front_right),
            rear_left: fun(WheelSlot::RearLeft, self.rear_left),
            rear_right: fun(WheelSlot::RearRight, self.rear_right),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (WheelSlot, &T)> {
        [
            (WheelSlot::FrontLeft, &self.front_left),
            (WheelSlot::FrontRight, &self.front_right),
            (WheelSlot::RearLeft, &self.rear_left),
            (WheelSlot::RearRight, &self.rear_right),
        ]
        .into_iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = (WheelSlot, &mut T)> {
        [
            (WheelSlot::FrontLeft, &mut self.front_left),
            (WheelSlot::FrontRight, &mut self.front_right),
            (WheelSlot::RearLeft, &mut self.rear_left),
            (WheelSlot::RearRight, &mut self.rear_right),
        ]
        .into_iter()
    }
}
