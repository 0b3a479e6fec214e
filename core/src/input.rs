use embedded_graphics::prelude::Point;
use log::debug;

/// Minimum time between two changes of the authoritative input source.
pub const MODALITY_DWELL_MS: u64 = 200;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Modality {
    Pointer,
    Keyboard,
    Controller,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Key {
    Up,
    Down,
    Left,
    Right,
    Space,
    Enter,
    Escape,
    F11,
    Other,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PadButton {
    /// A on Xbox layouts, cross on PlayStation.
    South,
    East,
    North,
    West,
    DPadUp,
    DPadDown,
    DPadLeft,
    DPadRight,
    Start,
    Select,
    Other,
}

/// Raw input as polled from the window and the controller. Pointer
/// positions are in window coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum InputEvent {
    PointerMoved(Point),
    PointerPressed(Point),
    KeyDown { key: Key, alt: bool },
    PadButton(PadButton),
    PadHat { x: i8, y: i8 },
    PadAxis { axis: u8, value: f32 },
    CloseRequested,
}

/// What a keyboard or controller event asks the menu to do.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Intent {
    Prev,
    Next,
    /// Left or right; flips the dialog choice.
    Toggle,
    Confirm,
}

impl InputEvent {
    pub fn modality(&self) -> Option<Modality> {
        match self {
            InputEvent::PointerMoved(_) | InputEvent::PointerPressed(_) => Some(Modality::Pointer),
            InputEvent::KeyDown { .. } => Some(Modality::Keyboard),
            InputEvent::PadButton(_) | InputEvent::PadHat { .. } | InputEvent::PadAxis { .. } => {
                Some(Modality::Controller)
            }
            InputEvent::CloseRequested => None,
        }
    }

    pub fn intent(&self) -> Option<Intent> {
        match *self {
            InputEvent::KeyDown { key, alt } => match key {
                Key::Up => Some(Intent::Prev),
                Key::Down => Some(Intent::Next),
                Key::Left | Key::Right => Some(Intent::Toggle),
                Key::Space => Some(Intent::Confirm),
                // Alt+Enter is the fullscreen hotkey.
                Key::Enter if !alt => Some(Intent::Confirm),
                _ => None,
            },
            InputEvent::PadButton(button) => match button {
                PadButton::DPadUp => Some(Intent::Prev),
                PadButton::DPadDown => Some(Intent::Next),
                PadButton::DPadLeft | PadButton::DPadRight => Some(Intent::Toggle),
                PadButton::South => Some(Intent::Confirm),
                _ => None,
            },
            InputEvent::PadHat { x, y } => match (x, y) {
                (0, 1) => Some(Intent::Prev),
                (0, -1) => Some(Intent::Next),
                (-1, 0) | (1, 0) => Some(Intent::Toggle),
                _ => None,
            },
            _ => None,
        }
    }
}

/// Decides which input source currently drives the menu.
#[derive(Clone, Debug)]
pub struct InputArbiter {
    active: Modality,
    last_switch_ms: Option<u64>,
}

impl InputArbiter {
    pub fn new() -> Self {
        Self {
            active: Modality::Controller,
            last_switch_ms: None,
        }
    }

    pub fn active(&self) -> Modality {
        self.active
    }

    /// Feeds one polled event. Returns `true` if the authoritative modality
    /// changed.
    pub fn on_raw_event(&mut self, event: &InputEvent, now_ms: u64) -> bool {
        let Some(modality) = event.modality() else {
            return false;
        };
        if modality == self.active {
            return false;
        }
        if let Some(last) = self.last_switch_ms {
            if now_ms.saturating_sub(last) < MODALITY_DWELL_MS {
                return false;
            }
        }

        debug!("Switched input from {:?} to {:?}", self.active, modality);
        self.active = modality;
        self.last_switch_ms = Some(now_ms);
        true
    }

    /// Whether the event comes from the authoritative modality.
    pub fn accepts(&self, event: &InputEvent) -> bool {
        event.modality() == Some(self.active)
    }
}

impl Default for InputArbiter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const KEY_DOWN: InputEvent = InputEvent::KeyDown {
        key: Key::Down,
        alt: false,
    };

    #[test]
    fn starts_on_controller() {
        let arbiter = InputArbiter::new();
        assert_eq!(arbiter.active(), Modality::Controller);
        assert!(arbiter.accepts(&InputEvent::PadButton(PadButton::South)));
        assert!(!arbiter.accepts(&KEY_DOWN));
    }

    #[test]
    fn first_switch_is_immediate() {
        let mut arbiter = InputArbiter::new();
        assert!(arbiter.on_raw_event(&KEY_DOWN, 0));
        assert_eq!(arbiter.active(), Modality::Keyboard);
    }

    #[test]
    fn switches_within_dwell_are_ignored() {
        let mut arbiter = InputArbiter::new();
        assert!(arbiter.on_raw_event(&KEY_DOWN, 1_000));
        assert!(!arbiter.on_raw_event(&InputEvent::PointerMoved(Point::new(4, 4)), 1_199));
        assert_eq!(arbiter.active(), Modality::Keyboard);
        assert!(arbiter.on_raw_event(&InputEvent::PointerMoved(Point::new(5, 4)), 1_200));
        assert_eq!(arbiter.active(), Modality::Pointer);
    }

    #[test]
    fn same_family_never_restamps() {
        let mut arbiter = InputArbiter::new();
        arbiter.on_raw_event(&KEY_DOWN, 1_000);
        assert!(!arbiter.on_raw_event(&KEY_DOWN, 1_150));
        // Dwell is still measured from the switch, not from the last key.
        assert!(arbiter.on_raw_event(&InputEvent::PadHat { x: 0, y: 1 }, 1_200));
    }

    #[test]
    fn pointer_needs_authority_to_be_accepted() {
        let mut arbiter = InputArbiter::new();
        arbiter.on_raw_event(&KEY_DOWN, 1_000);
        let moved = InputEvent::PointerMoved(Point::new(7, 9));
        assert!(!arbiter.on_raw_event(&moved, 1_010));
        assert!(!arbiter.accepts(&moved));
        assert!(arbiter.on_raw_event(&moved, 1_200));
        assert!(arbiter.accepts(&moved));
    }

    #[test]
    fn close_request_belongs_to_no_modality() {
        let mut arbiter = InputArbiter::new();
        assert!(!arbiter.on_raw_event(&InputEvent::CloseRequested, 5_000));
        assert_eq!(arbiter.active(), Modality::Controller);
    }

    #[test]
    fn intents_follow_each_device() {
        assert_eq!(KEY_DOWN.intent(), Some(Intent::Next));
        assert_eq!(
            InputEvent::KeyDown { key: Key::Enter, alt: true }.intent(),
            None
        );
        assert_eq!(InputEvent::PadHat { x: 0, y: 1 }.intent(), Some(Intent::Prev));
        assert_eq!(InputEvent::PadHat { x: 1, y: 0 }.intent(), Some(Intent::Toggle));
        assert_eq!(InputEvent::PadHat { x: 1, y: 1 }.intent(), None);
        assert_eq!(
            InputEvent::PadButton(PadButton::South).intent(),
            Some(Intent::Confirm)
        );
        assert_eq!(InputEvent::PadAxis { axis: 0, value: 1.0 }.intent(), None);
    }
}
