use embedded_graphics::{
    prelude::{Point, Size},
    primitives::{ContainsPoint, Rectangle},
};
use log::debug;

use crate::catalog::ITEM_COUNT;
use crate::geometry::Layout;
use crate::host::{Cue, CuePlayer};

/// How long a button shows its pressed face before settling on active.
pub const PRESS_DWELL_MS: u64 = 200;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ButtonState {
    Inactive,
    Hovered,
    Pressed,
    Active,
    /// The game is not installed. Only the availability policy sets or
    /// clears this.
    Deactivated,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    Prev,
    Next,
}

impl Direction {
    fn step(self) -> usize {
        match self {
            Direction::Prev => ITEM_COUNT - 1,
            Direction::Next => 1,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MenuButton {
    pub state: ButtonState,
    /// Canvas-local bounds, refreshed every frame.
    pub bounds: Rectangle,
    pub hovered: bool,
}

impl MenuButton {
    fn new() -> Self {
        Self {
            state: ButtonState::Inactive,
            bounds: Rectangle::new(Point::zero(), Size::new(500, 122)),
            hovered: false,
        }
    }

    pub fn is_deactivated(&self) -> bool {
        self.state == ButtonState::Deactivated
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct Press {
    index: usize,
    since_ms: u64,
}

/// The seven game buttons and the one selection cursor every input source
/// shares.
#[derive(Clone, Debug)]
pub struct ButtonGrid {
    buttons: [MenuButton; ITEM_COUNT],
    selected: usize,
    activated: Option<usize>,
    pressed: Option<Press>,
    last_pointer_hover: usize,
}

impl ButtonGrid {
    pub fn new() -> Self {
        Self {
            buttons: [MenuButton::new(); ITEM_COUNT],
            selected: 0,
            activated: None,
            pressed: None,
            last_pointer_hover: 0,
        }
    }

    pub fn buttons(&self) -> &[MenuButton; ITEM_COUNT] {
        &self.buttons
    }

    pub fn state(&self, index: usize) -> Option<ButtonState> {
        self.buttons.get(index).map(|button| button.state)
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    pub fn activated(&self) -> Option<usize> {
        self.activated
    }

    pub fn set_bounds(&mut self, layout: &Layout) {
        for (index, button) in self.buttons.iter_mut().enumerate() {
            button.bounds = layout.button_rect(index);
        }
    }

    /// Moves the selection to the nearest installed game in `direction`,
    /// wrapping around. Returns `true` if the selection changed.
    pub fn navigate(&mut self, direction: Direction, cues: &mut impl CuePlayer) -> bool {
        let mut candidate = self.selected;
        let mut landed = None;
        for _ in 0..ITEM_COUNT {
            candidate = (candidate + direction.step()) % ITEM_COUNT;
            if !self.buttons[candidate].is_deactivated() {
                landed = Some(candidate);
                break;
            }
        }

        let changed = match landed {
            Some(index) if index != self.selected => {
                self.selected = index;
                cues.play(Cue::Select);
                debug!("Selected button {} ({:?})", index, direction);
                true
            }
            _ => false,
        };
        self.refresh_hover();
        changed
    }

    /// Hovers the selected button, and only that one, then brings every
    /// button's state in line with the selection.
    pub fn refresh_hover(&mut self) {
        for (index, button) in self.buttons.iter_mut().enumerate() {
            button.hovered = !button.is_deactivated() && index == self.selected;
        }
        self.sync_states();
    }

    fn sync_states(&mut self) {
        let pressed = self.pressed.map(|press| press.index);
        for (index, button) in self.buttons.iter_mut().enumerate() {
            if button.is_deactivated() {
                continue;
            }
            button.state = if pressed == Some(index) {
                ButtonState::Pressed
            } else if self.activated == Some(index) {
                ButtonState::Active
            } else if index == self.selected && button.hovered {
                ButtonState::Hovered
            } else {
                ButtonState::Inactive
            };
        }
    }

    /// Button under a canvas-local point, deactivated ones included.
    pub fn hit_test(&self, point: Point) -> Option<usize> {
        self.buttons
            .iter()
            .position(|button| button.bounds.contains(point))
    }

    /// Pointer hover. A point over empty space keeps the current selection.
    pub fn pointer_moved(&mut self, point: Point, cues: &mut impl CuePlayer) {
        if let Some(index) = self.hit_test(point) {
            if !self.buttons[index].is_deactivated() {
                if self.last_pointer_hover != index {
                    cues.play(Cue::Select);
                    self.last_pointer_hover = index;
                    debug!("Pointer hovered button {}", index);
                }
                self.selected = index;
            }
        }
        self.refresh_hover();
    }

    /// Pointer click. Returns the button to activate, if any.
    pub fn pointer_pressed(&mut self, point: Point, cues: &mut impl CuePlayer) -> Option<usize> {
        let index = self.hit_test(point)?;
        if self.buttons[index].is_deactivated() {
            cues.play(Cue::Denied);
            return None;
        }
        self.pointer_moved(point, cues);
        self.activatable(index).then_some(index)
    }

    /// Confirm key or button on the current selection. Returns the button to
    /// activate, if any.
    pub fn confirm_selected(&mut self, cues: &mut impl CuePlayer) -> Option<usize> {
        if self.buttons[self.selected].is_deactivated() {
            cues.play(Cue::Denied);
            return None;
        }
        self.refresh_hover();
        self.activatable(self.selected).then_some(self.selected)
    }

    fn activatable(&self, index: usize) -> bool {
        matches!(
            self.buttons[index].state,
            ButtonState::Hovered | ButtonState::Active
        )
    }

    /// Presses a hovered or active button. The caller is responsible for
    /// opening the confirmation dialog when this returns `true`.
    pub fn activate(&mut self, index: usize, now_ms: u64, cues: &mut impl CuePlayer) -> bool {
        if index >= ITEM_COUNT || !self.activatable(index) {
            debug!("Ignoring activation of button {}", index);
            return false;
        }

        if let Some(previous) = self.pressed.take() {
            if previous.index != index && !self.buttons[previous.index].is_deactivated() {
                self.buttons[previous.index].state = ButtonState::Inactive;
            }
        }
        self.activated = Some(index);
        self.pressed = Some(Press {
            index,
            since_ms: now_ms,
        });
        for (i, button) in self.buttons.iter_mut().enumerate() {
            if button.is_deactivated() {
                continue;
            }
            button.state = if i == index {
                ButtonState::Pressed
            } else {
                ButtonState::Inactive
            };
        }

        cues.play(Cue::Confirm);
        debug!("Activated button {}", index);
        true
    }

    /// Settles a pressed button on its active face once the press dwell has
    /// passed.
    pub fn expire_pressed(&mut self, now_ms: u64) {
        let Some(press) = self.pressed else {
            return;
        };
        if now_ms.saturating_sub(press.since_ms) < PRESS_DWELL_MS {
            return;
        }
        self.pressed = None;
        let button = &mut self.buttons[press.index];
        if !button.is_deactivated() {
            button.state = ButtonState::Active;
            debug!("Button {} is now active", press.index);
        }
    }

    /// Returns an activated button to rest after its dialog closed.
    pub fn release(&mut self, index: usize) {
        if self.activated == Some(index) {
            self.activated = None;
        }
        if self.pressed.is_some_and(|press| press.index == index) {
            self.pressed = None;
        }
        if let Some(button) = self.buttons.get_mut(index) {
            if !button.is_deactivated() {
                button.state = ButtonState::Inactive;
            }
        }
    }

    pub(crate) fn set_deactivated(&mut self, index: usize, deactivated: bool) {
        let button = &mut self.buttons[index];
        if deactivated {
            button.state = ButtonState::Deactivated;
            button.hovered = false;
        } else if button.is_deactivated() {
            button.state = ButtonState::Inactive;
        }
    }
}

impl Default for ButtonGrid {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid_with_layout() -> ButtonGrid {
        let mut grid = ButtonGrid::new();
        grid.set_bounds(&Layout::new(Size::new(1920, 1080)));
        grid
    }

    fn centre(grid: &ButtonGrid, index: usize) -> Point {
        grid.buttons()[index].bounds.center()
    }

    #[test]
    fn navigation_wraps_both_ways() {
        let mut grid = ButtonGrid::new();
        let mut cues = Vec::new();
        assert!(grid.navigate(Direction::Prev, &mut cues));
        assert_eq!(grid.selected(), ITEM_COUNT - 1);
        assert!(grid.navigate(Direction::Next, &mut cues));
        assert_eq!(grid.selected(), 0);
        assert_eq!(cues, [Cue::Select, Cue::Select]);
    }

    #[test]
    fn navigation_skips_deactivated() {
        let mut grid = ButtonGrid::new();
        for index in 1..=3 {
            grid.set_deactivated(index, true);
        }
        let mut cues = Vec::new();
        grid.navigate(Direction::Next, &mut cues);
        assert_eq!(grid.selected(), 4);
        grid.navigate(Direction::Prev, &mut cues);
        assert_eq!(grid.selected(), 0);
    }

    #[test]
    fn navigation_with_everything_deactivated_is_silent() {
        let mut grid = ButtonGrid::new();
        grid.navigate(Direction::Next, &mut Vec::new());
        for index in 0..ITEM_COUNT {
            grid.set_deactivated(index, true);
        }
        let mut cues = Vec::new();
        assert!(!grid.navigate(Direction::Next, &mut cues));
        assert!(!grid.navigate(Direction::Prev, &mut cues));
        assert_eq!(grid.selected(), 1);
        assert!(cues.is_empty());
    }

    #[test]
    fn hover_follows_selection_only() {
        let mut grid = ButtonGrid::new();
        grid.set_deactivated(3, true);
        grid.navigate(Direction::Next, &mut Vec::new());
        for (index, button) in grid.buttons().iter().enumerate() {
            assert_eq!(button.hovered, index == 1);
        }
        assert_eq!(grid.state(1), Some(ButtonState::Hovered));
        assert_eq!(grid.state(0), Some(ButtonState::Inactive));
        assert_eq!(grid.state(3), Some(ButtonState::Deactivated));
    }

    #[test]
    fn pointer_hover_selects_and_cues_once() {
        let mut grid = grid_with_layout();
        let mut cues = Vec::new();
        let point = centre(&grid, 5);
        grid.pointer_moved(point, &mut cues);
        grid.pointer_moved(point + Point::new(1, 0), &mut cues);
        assert_eq!(grid.selected(), 5);
        assert_eq!(grid.state(5), Some(ButtonState::Hovered));
        assert_eq!(cues, [Cue::Select]);
    }

    #[test]
    fn pointer_over_empty_space_keeps_selection() {
        let mut grid = grid_with_layout();
        grid.pointer_moved(centre(&grid, 2), &mut Vec::new());
        grid.pointer_moved(Point::new(1900, 10), &mut Vec::new());
        assert_eq!(grid.selected(), 2);
        assert!(grid.buttons()[2].hovered);
    }

    #[test]
    fn pointer_ignores_deactivated_buttons() {
        let mut grid = grid_with_layout();
        grid.set_deactivated(4, true);
        let mut cues = Vec::new();
        grid.pointer_moved(centre(&grid, 4), &mut cues);
        assert_eq!(grid.selected(), 0);
        assert!(!grid.buttons()[4].hovered);
        assert!(cues.is_empty());
    }

    #[test]
    fn clicking_deactivated_is_denied() {
        let mut grid = grid_with_layout();
        grid.set_deactivated(6, true);
        let mut cues = Vec::new();
        assert_eq!(grid.pointer_pressed(centre(&grid, 6), &mut cues), None);
        assert_eq!(cues, [Cue::Denied]);
        assert_eq!(grid.state(6), Some(ButtonState::Deactivated));
    }

    #[test]
    fn clicking_a_button_offers_it_for_activation() {
        let mut grid = grid_with_layout();
        assert_eq!(grid.pointer_pressed(centre(&grid, 3), &mut Vec::new()), Some(3));
        assert_eq!(grid.pointer_pressed(Point::new(1900, 10), &mut Vec::new()), None);
    }

    #[test]
    fn activation_requires_hover() {
        let mut grid = ButtonGrid::new();
        let mut cues = Vec::new();
        assert!(!grid.activate(2, 0, &mut cues));
        assert!(cues.is_empty());

        grid.navigate(Direction::Next, &mut cues);
        grid.navigate(Direction::Next, &mut cues);
        assert!(grid.activate(2, 0, &mut cues));
        assert_eq!(grid.state(2), Some(ButtonState::Pressed));
        assert_eq!(cues.last(), Some(&Cue::Confirm));
    }

    #[test]
    fn pressed_settles_after_dwell() {
        let mut grid = ButtonGrid::new();
        grid.refresh_hover();
        assert!(grid.activate(0, 1_000, &mut Vec::new()));
        grid.expire_pressed(1_199);
        assert_eq!(grid.state(0), Some(ButtonState::Pressed));
        grid.expire_pressed(1_200);
        assert_eq!(grid.state(0), Some(ButtonState::Active));
    }

    #[test]
    fn activating_another_button_resets_the_pressed_one() {
        let mut grid = ButtonGrid::new();
        grid.refresh_hover();
        grid.activate(0, 0, &mut Vec::new());
        grid.navigate(Direction::Next, &mut Vec::new());
        assert_eq!(grid.state(0), Some(ButtonState::Pressed));
        assert!(grid.activate(1, 10, &mut Vec::new()));
        assert_eq!(grid.state(0), Some(ButtonState::Inactive));
        assert_eq!(grid.state(1), Some(ButtonState::Pressed));
    }

    #[test]
    fn release_returns_button_to_rest() {
        let mut grid = ButtonGrid::new();
        grid.refresh_hover();
        grid.activate(0, 0, &mut Vec::new());
        grid.expire_pressed(500);
        grid.release(0);
        assert_eq!(grid.state(0), Some(ButtonState::Inactive));
        assert_eq!(grid.activated(), None);

        // The next input event hovers it again.
        grid.refresh_hover();
        assert_eq!(grid.state(0), Some(ButtonState::Hovered));
    }

    #[test]
    fn confirm_on_deactivated_selection_is_denied() {
        let mut grid = ButtonGrid::new();
        grid.set_deactivated(0, true);
        let mut cues = Vec::new();
        assert_eq!(grid.confirm_selected(&mut cues), None);
        assert_eq!(cues, [Cue::Denied]);
    }
}
