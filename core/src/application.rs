use embedded_graphics::{
    pixelcolor::Rgb888,
    prelude::{Point, RgbColor, Size},
    primitives::Rectangle,
};

use crate::{
    availability::{self, Availability},
    catalog,
    dialog::{ConfirmDialog, DialogOutcome},
    display::Canvas,
    geometry::{self, Layout},
    host::{CuePlayer, GameLauncher},
    input::{InputArbiter, InputEvent, Intent, Key},
    menu::{ButtonGrid, Direction},
    ui::{self, UiContext},
};

/// Why the frame loop should stop.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Exit {
    Quit,
    /// The game behind this item was started; the launcher exits with it.
    Launched(usize),
}

/// The whole launcher screen: menu, dialog and the input source in charge.
pub struct Application {
    grid: ButtonGrid,
    dialog: ConfirmDialog,
    arbiter: InputArbiter,
    availability: Availability,
    window: Size,
    canvas_rect: Rectangle,
    layout: Layout,
    last_tick_ms: Option<u64>,
    fullscreen_toggle: bool,
}

impl Application {
    pub fn new(availability: Availability) -> Self {
        let mut app = Application {
            grid: ButtonGrid::new(),
            dialog: ConfirmDialog::new(),
            arbiter: InputArbiter::new(),
            availability,
            window: Size::zero(),
            canvas_rect: Rectangle::new(Point::zero(), Size::zero()),
            layout: Layout::new(Size::zero()),
            last_tick_ms: None,
            fullscreen_toggle: false,
        };
        app.grid.refresh_hover();
        availability::apply(&mut app.grid, &app.availability);
        app
    }

    pub fn grid(&self) -> &ButtonGrid {
        &self.grid
    }

    pub fn dialog(&self) -> &ConfirmDialog {
        &self.dialog
    }

    pub fn canvas_rect(&self) -> Rectangle {
        self.canvas_rect
    }

    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    /// Recomputes the 16:9 canvas for a window size and moves the buttons.
    pub fn resize(&mut self, window: Size) {
        if window == self.window {
            return;
        }
        self.window = window;
        self.canvas_rect = geometry::fit_canvas(window.width, window.height);
        self.layout = Layout::new(self.canvas_rect.size);
        self.grid.set_bounds(&self.layout);
        log::debug!(
            "Window {}x{} -> canvas {:?}",
            window.width,
            window.height,
            self.canvas_rect
        );
    }

    /// Menu navigation; ignored while the dialog is up.
    pub fn navigate(&mut self, direction: Direction, cues: &mut impl CuePlayer) -> bool {
        if !self.dialog.is_closed() {
            return false;
        }
        let moved = self.grid.navigate(direction, cues);
        availability::apply(&mut self.grid, &self.availability);
        moved
    }

    /// Presses a button and opens the confirmation dialog for it.
    pub fn activate(&mut self, index: usize, now_ms: u64, cues: &mut impl CuePlayer) -> bool {
        if !self.dialog.is_closed() {
            return false;
        }
        if !self.grid.activate(index, now_ms, cues) {
            return false;
        }
        if let Some(game) = catalog::game(index) {
            log::info!("Asking to launch {}", game.name);
        }
        self.dialog.open(index)
    }

    /// Set when a fullscreen hotkey was seen; cleared by reading it.
    pub fn take_fullscreen_toggle(&mut self) -> bool {
        let value = self.fullscreen_toggle;
        self.fullscreen_toggle = false;
        value
    }

    /// Runs one frame of the loop. Returns `Some` when the launcher should
    /// stop.
    pub fn update(
        &mut self,
        window: Size,
        events: &[InputEvent],
        now_ms: u64,
        cues: &mut impl CuePlayer,
        launcher: &mut impl GameLauncher,
    ) -> Option<Exit> {
        self.resize(window);

        for event in events {
            if let Some(exit) = self.handle_event(event, now_ms, cues, launcher) {
                return Some(exit);
            }
            availability::apply(&mut self.grid, &self.availability);
        }

        let dt_secs = self
            .last_tick_ms
            .map_or(0.0, |last| now_ms.saturating_sub(last) as f32 / 1000.0);
        self.last_tick_ms = Some(now_ms);
        if let Some(item) = self.dialog.tick(dt_secs, cues) {
            self.grid.release(item);
        }

        self.grid.expire_pressed(now_ms);
        availability::apply(&mut self.grid, &self.availability);
        None
    }

    fn handle_event(
        &mut self,
        event: &InputEvent,
        now_ms: u64,
        cues: &mut impl CuePlayer,
        launcher: &mut impl GameLauncher,
    ) -> Option<Exit> {
        match *event {
            InputEvent::CloseRequested
            | InputEvent::KeyDown {
                key: Key::Escape, ..
            } => {
                log::info!("Quit requested");
                return Some(Exit::Quit);
            }
            InputEvent::KeyDown { key: Key::F11, .. }
            | InputEvent::KeyDown {
                key: Key::Enter,
                alt: true,
            } => self.fullscreen_toggle = !self.fullscreen_toggle,
            _ => {}
        }

        self.arbiter.on_raw_event(event, now_ms);
        if !self.arbiter.accepts(event) {
            return None;
        }

        if self.dialog.is_closed() {
            self.menu_event(event, now_ms, cues);
            None
        } else {
            self.dialog_event(event, cues, launcher)
        }
    }

    fn menu_event(&mut self, event: &InputEvent, now_ms: u64, cues: &mut impl CuePlayer) {
        match *event {
            InputEvent::PointerMoved(point) => {
                let local = geometry::to_canvas_local(point, &self.canvas_rect);
                self.grid.pointer_moved(local, cues);
            }
            InputEvent::PointerPressed(point) => {
                let local = geometry::to_canvas_local(point, &self.canvas_rect);
                if let Some(index) = self.grid.pointer_pressed(local, cues) {
                    self.activate(index, now_ms, cues);
                }
            }
            _ => match event.intent() {
                Some(Intent::Prev) => {
                    self.navigate(Direction::Prev, cues);
                }
                Some(Intent::Next) => {
                    self.navigate(Direction::Next, cues);
                }
                Some(Intent::Confirm) => {
                    if let Some(index) = self.grid.confirm_selected(cues) {
                        self.activate(index, now_ms, cues);
                    }
                }
                Some(Intent::Toggle) | None => self.grid.refresh_hover(),
            },
        }
    }

    fn dialog_event(
        &mut self,
        event: &InputEvent,
        cues: &mut impl CuePlayer,
        launcher: &mut impl GameLauncher,
    ) -> Option<Exit> {
        let outcome = match *event {
            InputEvent::PointerMoved(point) => {
                let local = geometry::to_canvas_local(point, &self.canvas_rect);
                if let Some(choice) = ConfirmDialog::hit_test(&self.layout, local) {
                    self.dialog.hover(choice, cues);
                }
                DialogOutcome::Pending
            }
            InputEvent::PointerPressed(point) => {
                let local = geometry::to_canvas_local(point, &self.canvas_rect);
                match ConfirmDialog::hit_test(&self.layout, local) {
                    Some(choice) => self.dialog.press(choice, cues),
                    None => DialogOutcome::Pending,
                }
            }
            _ => match event.intent() {
                Some(Intent::Toggle) => {
                    self.dialog.toggle(cues);
                    DialogOutcome::Pending
                }
                Some(Intent::Confirm) => self.dialog.confirm(cues),
                _ => DialogOutcome::Pending,
            },
        };

        match outcome {
            DialogOutcome::Launch(item) => {
                if launcher.launch(item) {
                    log::info!("Launched item {}", item);
                    Some(Exit::Launched(item))
                } else {
                    log::warn!("Launch of item {} failed, returning to menu", item);
                    self.dialog.launch_failed(cues);
                    None
                }
            }
            DialogOutcome::Cancelled => {
                log::debug!("Launch declined");
                None
            }
            DialogOutcome::Pending => None,
        }
    }

    /// Renders the scene onto `canvas`, which covers the whole window.
    pub fn draw(&self, canvas: &mut impl Canvas, elapsed_secs: f32) {
        canvas.clear(Rgb888::BLACK);
        let mut ctx = UiContext {
            canvas,
            area: self.canvas_rect,
            layout: self.layout,
            elapsed_secs,
        };
        ui::draw_menu(&mut ctx, &self.grid);
        ui::draw_dialog(&mut ctx, &self.dialog);
        ctx.letterbox();
    }
}
