use embedded_graphics::{prelude::Point, primitives::ContainsPoint};
use log::debug;

use crate::geometry::Layout;
use crate::host::{Cue, CuePlayer};

/// Scale units per second while opening.
pub const OPEN_RATE: f32 = 3.0;
/// Scale units per second while closing.
pub const CLOSE_RATE: f32 = 8.0;
/// Opacity of the black overlay behind the dialog.
pub const OVERLAY_ALPHA: u8 = 200;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Closed,
    Opening,
    Open,
    Closing,
}

impl Phase {
    /// The only phase reachable from `self`.
    pub fn next(self) -> Phase {
        match self {
            Phase::Closed => Phase::Opening,
            Phase::Opening => Phase::Open,
            Phase::Open => Phase::Closing,
            Phase::Closing => Phase::Closed,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Choice {
    Yes,
    No,
}

impl Choice {
    pub fn toggled(self) -> Choice {
        match self {
            Choice::Yes => Choice::No,
            Choice::No => Choice::Yes,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DialogOutcome {
    /// Nothing was decided.
    Pending,
    /// The user declined; the dialog is closing.
    Cancelled,
    /// The user accepted; the item should be launched now.
    Launch(usize),
}

/// "Launch this game?" modal with a yes/no choice.
#[derive(Clone, Debug)]
pub struct ConfirmDialog {
    phase: Phase,
    scale: f32,
    choice: Choice,
    item: Option<usize>,
}

impl ConfirmDialog {
    pub fn new() -> Self {
        Self {
            phase: Phase::Closed,
            scale: 0.0,
            choice: Choice::Yes,
            item: None,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn scale(&self) -> f32 {
        self.scale
    }

    pub fn choice(&self) -> Choice {
        self.choice
    }

    pub fn item(&self) -> Option<usize> {
        self.item
    }

    pub fn is_closed(&self) -> bool {
        self.phase == Phase::Closed
    }

    pub fn is_open(&self) -> bool {
        self.phase == Phase::Open
    }

    fn advance(&mut self) {
        let next = self.phase.next();
        debug!("Confirm dialog {:?} -> {:?}", self.phase, next);
        self.phase = next;
    }

    /// Starts opening for `item`. Ignored unless closed.
    pub fn open(&mut self, item: usize) -> bool {
        if self.phase != Phase::Closed {
            return false;
        }
        self.advance();
        self.scale = 0.0;
        self.choice = Choice::Yes;
        self.item = Some(item);
        true
    }

    /// Advances the open/close animation. Returns the item whose dialog
    /// finished closing during this tick.
    pub fn tick(&mut self, dt_secs: f32, cues: &mut impl CuePlayer) -> Option<usize> {
        match self.phase {
            Phase::Opening => {
                self.scale += OPEN_RATE * dt_secs;
                if self.scale >= 1.0 {
                    self.scale = 1.0;
                    cues.play(Cue::Open);
                    self.advance();
                }
                None
            }
            Phase::Closing => {
                self.scale -= CLOSE_RATE * dt_secs;
                if self.scale <= 0.0 {
                    self.scale = 0.0;
                    self.advance();
                    return self.item.take();
                }
                None
            }
            Phase::Closed | Phase::Open => None,
        }
    }

    pub fn toggle(&mut self, cues: &mut impl CuePlayer) {
        if !self.is_open() {
            return;
        }
        self.choice = self.choice.toggled();
        cues.play(Cue::Select);
    }

    /// Pointer hovering one of the two buttons.
    pub fn hover(&mut self, choice: Choice, cues: &mut impl CuePlayer) {
        if !self.is_open() || self.choice == choice {
            return;
        }
        self.choice = choice;
        cues.play(Cue::Select);
    }

    /// Acts on the current choice.
    pub fn confirm(&mut self, cues: &mut impl CuePlayer) -> DialogOutcome {
        if !self.is_open() {
            return DialogOutcome::Pending;
        }
        match (self.choice, self.item) {
            (Choice::Yes, Some(item)) => {
                cues.play(Cue::Confirm);
                DialogOutcome::Launch(item)
            }
            (Choice::Yes, None) => {
                cues.play(Cue::Denied);
                self.advance();
                DialogOutcome::Cancelled
            }
            (Choice::No, _) => {
                cues.play(Cue::Close);
                self.advance();
                DialogOutcome::Cancelled
            }
        }
    }

    /// Pointer click straight on a button, whatever was chosen before.
    pub fn press(&mut self, choice: Choice, cues: &mut impl CuePlayer) -> DialogOutcome {
        if !self.is_open() {
            return DialogOutcome::Pending;
        }
        self.choice = choice;
        self.confirm(cues)
    }

    /// The launcher could not start the game; close without exiting.
    pub fn launch_failed(&mut self, cues: &mut impl CuePlayer) {
        if !self.is_open() {
            return;
        }
        cues.play(Cue::Denied);
        self.advance();
    }

    /// Which button a canvas-local point is over.
    pub fn hit_test(layout: &Layout, point: Point) -> Option<Choice> {
        [Choice::Yes, Choice::No]
            .into_iter()
            .find(|choice| layout.choice_hit_rect(*choice).contains(point))
    }
}

impl Default for ConfirmDialog {
    fn default() -> Self {
        Self::new()
    }
}
