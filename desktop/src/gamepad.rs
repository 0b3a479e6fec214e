use gilrs::{Axis, Button, EventType, Gilrs};
use log::{info, warn};
use omni_core::input::{InputEvent, PadButton};

/// Stick and d-pad axes closer to rest than this are not reported.
const AXIS_THRESHOLD: f32 = 0.5;

fn map_button(button: Button) -> PadButton {
    match button {
        Button::South => PadButton::South,
        Button::East => PadButton::East,
        Button::North => PadButton::North,
        Button::West => PadButton::West,
        Button::DPadUp => PadButton::DPadUp,
        Button::DPadDown => PadButton::DPadDown,
        Button::DPadLeft => PadButton::DPadLeft,
        Button::DPadRight => PadButton::DPadRight,
        Button::Start => PadButton::Start,
        Button::Select => PadButton::Select,
        _ => PadButton::Other,
    }
}

fn axis_index(axis: Axis) -> u8 {
    match axis {
        Axis::LeftStickX => 0,
        Axis::LeftStickY => 1,
        Axis::LeftZ => 2,
        Axis::RightStickX => 3,
        Axis::RightStickY => 4,
        Axis::RightZ => 5,
        _ => u8::MAX,
    }
}

fn direction(value: f32) -> i8 {
    if value >= AXIS_THRESHOLD {
        1
    } else if value <= -AXIS_THRESHOLD {
        -1
    } else {
        0
    }
}

/// Translates one gilrs event into the launcher's input vocabulary.
pub fn map_event(event: EventType) -> Option<InputEvent> {
    match event {
        EventType::ButtonPressed(button, _) => Some(InputEvent::PadButton(map_button(button))),
        // Hats report as d-pad axes on some backends; y grows upwards.
        EventType::AxisChanged(Axis::DPadX, value, _) => match direction(value) {
            0 => None,
            x => Some(InputEvent::PadHat { x, y: 0 }),
        },
        EventType::AxisChanged(Axis::DPadY, value, _) => match direction(value) {
            0 => None,
            y => Some(InputEvent::PadHat { x: 0, y }),
        },
        EventType::AxisChanged(axis, value, _) if value.abs() >= AXIS_THRESHOLD => {
            Some(InputEvent::PadAxis {
                axis: axis_index(axis),
                value,
            })
        }
        _ => None,
    }
}

/// Controller input; absent when gilrs cannot start on this system.
pub struct Gamepad {
    gilrs: Option<Gilrs>,
}

impl Gamepad {
    pub fn new() -> Self {
        let gilrs = match Gilrs::new() {
            Ok(gilrs) => {
                for (_id, pad) in gilrs.gamepads() {
                    info!("Controller connected: {}", pad.name());
                }
                Some(gilrs)
            }
            Err(err) => {
                warn!("Controller support unavailable: {}", err);
                None
            }
        };
        Self { gilrs }
    }

    pub fn poll(&mut self, events: &mut Vec<InputEvent>) {
        let Some(gilrs) = self.gilrs.as_mut() else {
            return;
        };
        while let Some(gilrs::Event { id, event, .. }) = gilrs.next_event() {
            match event {
                EventType::Connected => info!("Controller connected: {}", gilrs.gamepad(id).name()),
                EventType::Disconnected => info!("Controller {:?} disconnected", id),
                _ => events.extend(map_event(event)),
            }
        }
    }
}
