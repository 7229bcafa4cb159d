//! Player intent: device states, input sources and their priority merge.

use winit::event::{ElementState, VirtualKeyCode};

/// Normalized driver intent for one tick.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct InputState {
    /// Steering in `[-1, 1]`, positive to the right.
    pub steer: f32,
    /// Throttle in `[-1, 1]`, negative for reverse.
    pub throttle: f32,
    pub braking: bool,
}

/// What one source reports for a tick. `None` leaves the value of an
/// earlier source in place.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct InputSample {
    pub steer: Option<f32>,
    pub throttle: Option<f32>,
    pub braking: Option<bool>,
}

impl InputSample {
    pub fn full(steer: f32, throttle: f32, braking: bool) -> Self {
        Self {
            steer: Some(steer),
            throttle: Some(throttle),
            braking: Some(braking),
        }
    }
}

pub trait InputSource {
    /// Returns `None` when the device is absent.
    fn poll(&mut self) -> Option<InputSample>;
}

impl<F: FnMut() -> Option<InputSample>> InputSource for F {
    fn poll(&mut self) -> Option<InputSample> {
        self()
    }
}

fn axis(positive: bool, negative: bool) -> f32 {
    (if positive { 1.0 } else { 0.0 }) - (if negative { 1.0 } else { 0.0 })
}

/// Digital key state, fed from window events.
#[derive(Clone, Copy, Debug, Default)]
pub struct KeyboardState {
    pub left: bool,
    pub right: bool,
    pub forward: bool,
    pub back: bool,
    pub brake: bool,
}

impl KeyboardState {
    /// Returns `false` if the key is not bound to anything.
    pub fn handle_key(&mut self, key: VirtualKeyCode, state: ElementState) -> bool {
        let pressed = state == ElementState::Pressed;
        let target = match key {
            VirtualKeyCode::A | VirtualKeyCode::Left => &mut self.left,
            VirtualKeyCode::D | VirtualKeyCode::Right => &mut self.right,
            VirtualKeyCode::W | VirtualKeyCode::Up => &mut self.forward,
            VirtualKeyCode::S | VirtualKeyCode::Down => &mut self.back,
            VirtualKeyCode::Space => &mut self.brake,
            _ => return false,
        };
        *target = pressed;
        true
    }

    pub fn sample(&self) -> InputSample {
        InputSample::full(
            axis(self.right, self.left),
            axis(self.forward, self.back),
            self.brake,
        )
    }
}

/// Analog controller state. Triggers are unidirectional in `[0, 1]`.
#[derive(Clone, Copy, Debug, Default)]
pub struct GamepadState {
    pub stick_x: f32,
    pub accelerator: f32,
    pub reverse: f32,
    pub brake: bool,
}

impl GamepadState {
    pub fn sample(&self) -> InputSample {
        InputSample::full(self.stick_x, self.accelerator - self.reverse, self.brake)
    }
}

/// Keyboard source. A disconnected keyboard reports nothing.
#[derive(Debug, Default)]
pub struct Keyboard {
    pub state: Option<KeyboardState>,
}

impl InputSource for Keyboard {
    fn poll(&mut self) -> Option<InputSample> {
        self.state.as_ref().map(KeyboardState::sample)
    }
}

/// Gamepad source. A disconnected gamepad reports nothing.
#[derive(Debug, Default)]
pub struct Gamepad {
    pub state: Option<GamepadState>,
}

impl InputSource for Gamepad {
    fn poll(&mut self) -> Option<InputSample> {
        self.state.as_ref().map(GamepadState::sample)
    }
}

/// Merges sources in a fixed order; later sources win.
#[derive(Default)]
pub struct InputAggregator {
    sources: Vec<Box<dyn InputSource>>,
}

impl InputAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    /// The usual device order: the gamepad overrides the keyboard.
    pub fn with_devices(keyboard: Keyboard, gamepad: Gamepad) -> Self {
        let mut aggregator = Self::new();
        aggregator.push(keyboard).push(gamepad);
        aggregator
    }

    /// Appends a source with higher priority than all current ones.
    pub fn push(&mut self, source: impl InputSource + 'static) -> &mut Self {
        self.sources.push(Box::new(source));
        self
    }

    pub fn len(&self) -> usize {
        self.sources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }

    pub fn read(&mut self) -> InputState {
        let mut state = InputState::default();
        for sample in self.sources.iter_mut().filter_map(|source| source.poll()) {
            if let Some(steer) = sample.steer {
                state.steer = steer;
            }
            if let Some(throttle) = sample.throttle {
                state.throttle = throttle;
            }
            if let Some(braking) = sample.braking {
                state.braking = braking;
            }
        }
        state.steer = state.steer.clamp(-1.0, 1.0);
        state.throttle = state.throttle.clamp(-1.0, 1.0);
        state
    }
}
