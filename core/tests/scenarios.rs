//! End-to-end runs of the frame loop with recording fakes for the audio and
//! launcher collaborators.

use embedded_graphics::prelude::{Point, Size};
use omni_core::{
    application::{Application, Exit},
    availability::{self, Availability, InstallState},
    catalog::Collection,
    dialog::{Choice, Phase},
    host::{Cue, GameLauncher},
    input::{InputEvent, Key, PadButton},
    menu::{ButtonGrid, ButtonState, Direction, PRESS_DWELL_MS},
};

const WINDOW: Size = Size::new(1920, 1080);

struct ScriptedLauncher {
    result: bool,
    calls: Vec<usize>,
}

impl ScriptedLauncher {
    fn failing() -> Self {
        Self {
            result: false,
            calls: Vec::new(),
        }
    }
}

impl GameLauncher for ScriptedLauncher {
    fn launch(&mut self, item: usize) -> bool {
        self.calls.push(item);
        self.result
    }
}

fn key(key: Key) -> InputEvent {
    InputEvent::KeyDown { key, alt: false }
}

fn remix_skipped() -> Availability {
    let mut availability = Availability::new();
    availability.set(Collection::Remix, InstallState::NotInstalled);
    availability
}

#[test]
fn scenario_a_navigation_skips_skipped_collection() {
    let mut grid = ButtonGrid::new();
    availability::apply(&mut grid, &remix_skipped());
    for index in 0..4 {
        assert_eq!(grid.state(index), Some(ButtonState::Deactivated));
    }

    let mut cues = Vec::new();
    assert!(grid.navigate(Direction::Next, &mut cues));
    assert_eq!(grid.selected(), 4);
    assert_eq!(cues, [Cue::Select]);
}

#[test]
fn scenario_b_dialog_opens_after_one_second() {
    let mut app = Application::new(Availability::new());
    let mut cues = Vec::new();
    let mut launcher = ScriptedLauncher::failing();
    app.update(WINDOW, &[], 0, &mut cues, &mut launcher);

    app.navigate(Direction::Next, &mut cues);
    app.navigate(Direction::Next, &mut cues);
    assert_eq!(app.grid().state(2), Some(ButtonState::Hovered));

    assert!(app.activate(2, 0, &mut cues));
    assert_eq!(app.dialog().phase(), Phase::Opening);

    app.update(WINDOW, &[], 1_000, &mut cues, &mut launcher);
    assert_eq!(app.dialog().phase(), Phase::Open);
    assert_eq!(app.dialog().choice(), Choice::Yes);
    assert_eq!(app.dialog().item(), Some(2));
}

#[test]
fn scenario_c_failed_launch_returns_item_to_rest() {
    let mut app = Application::new(Availability::new());
    let mut cues = Vec::new();
    let mut launcher = ScriptedLauncher::failing();
    app.update(WINDOW, &[], 0, &mut cues, &mut launcher);
    app.navigate(Direction::Next, &mut cues);
    app.navigate(Direction::Next, &mut cues);
    app.activate(2, 0, &mut cues);
    app.update(WINDOW, &[], 1_000, &mut cues, &mut launcher);
    assert!(app.dialog().is_open());
    cues.clear();

    let confirm = InputEvent::PadButton(PadButton::South);
    let exit = app.update(WINDOW, &[confirm], 1_016, &mut cues, &mut launcher);
    assert_eq!(exit, None);
    assert_eq!(launcher.calls, [2]);
    assert_eq!(app.dialog().phase(), Phase::Closing);

    let mut now = 1_016;
    while !app.dialog().is_closed() {
        now += 16;
        app.update(WINDOW, &[], now, &mut cues, &mut launcher);
        assert!(now < 2_000, "dialog never closed");
    }
    assert_eq!(app.grid().state(2), Some(ButtonState::Inactive));
    assert_eq!(cues, [Cue::Confirm, Cue::Denied]);
}

#[test]
fn pointer_drives_menu_and_dialog_after_dwell() {
    let mut app = Application::new(Availability::new());
    let mut cues = Vec::new();
    let mut launcher = ScriptedLauncher::failing();
    app.update(WINDOW, &[], 0, &mut cues, &mut launcher);

    let target = app.layout().button_rect(5).center();
    app.update(
        WINDOW,
        &[InputEvent::PointerMoved(target)],
        10,
        &mut cues,
        &mut launcher,
    );
    assert_eq!(app.grid().selected(), 5);

    app.update(
        WINDOW,
        &[InputEvent::PointerPressed(target)],
        20,
        &mut cues,
        &mut launcher,
    );
    assert_eq!(app.dialog().phase(), Phase::Opening);
    app.update(WINDOW, &[], 500, &mut cues, &mut launcher);

    let no = app.layout().choice_hit_rect(Choice::No).center();
    app.update(
        WINDOW,
        &[InputEvent::PointerPressed(no)],
        510,
        &mut cues,
        &mut launcher,
    );
    assert_eq!(app.dialog().phase(), Phase::Closing);
    assert!(launcher.calls.is_empty());
    assert_eq!(cues.last(), Some(&Cue::Close));
}

#[test]
fn pointer_is_ignored_within_dwell_of_keyboard() {
    let mut app = Application::new(Availability::new());
    let mut cues = Vec::new();
    let mut launcher = ScriptedLauncher::failing();
    app.update(WINDOW, &[key(Key::Down)], 1_000, &mut cues, &mut launcher);
    assert_eq!(app.grid().selected(), 1);

    let target = app.layout().button_rect(6).center();
    app.update(
        WINDOW,
        &[InputEvent::PointerMoved(target)],
        1_100,
        &mut cues,
        &mut launcher,
    );
    assert_eq!(app.grid().selected(), 1);

    app.update(
        WINDOW,
        &[InputEvent::PointerMoved(target + Point::new(1, 0))],
        1_250,
        &mut cues,
        &mut launcher,
    );
    assert_eq!(app.grid().selected(), 6);
}

#[test]
fn pressed_button_settles_without_further_input() {
    let mut app = Application::new(Availability::new());
    let mut cues = Vec::new();
    let mut launcher = ScriptedLauncher::failing();
    app.update(
        WINDOW,
        &[InputEvent::PadButton(PadButton::South)],
        5_000,
        &mut cues,
        &mut launcher,
    );
    assert_eq!(app.grid().state(0), Some(ButtonState::Pressed));
    app.update(WINDOW, &[], 5_000 + PRESS_DWELL_MS, &mut cues, &mut launcher);
    assert_eq!(app.grid().state(0), Some(ButtonState::Active));
}

#[test]
fn accepted_launch_stops_the_loop() {
    let mut app = Application::new(remix_skipped());
    let mut cues = Vec::new();
    let mut launcher = ScriptedLauncher {
        result: true,
        calls: Vec::new(),
    };
    let down = InputEvent::PadHat { x: 0, y: -1 };
    let confirm = InputEvent::PadButton(PadButton::South);
    app.update(WINDOW, &[down, confirm], 0, &mut cues, &mut launcher);
    app.update(WINDOW, &[], 400, &mut cues, &mut launcher);
    let exit = app.update(WINDOW, &[confirm, confirm], 420, &mut cues, &mut launcher);
    assert_eq!(exit, Some(Exit::Launched(4)));
    assert_eq!(launcher.calls, [4]);
}
