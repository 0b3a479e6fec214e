use embedded_graphics::{
    prelude::{Point, Size},
    primitives::Rectangle,
};

use crate::catalog::ITEM_COUNT;
use crate::dialog::Choice;

/// Native resolution the artwork was drawn for.
pub const ASSET_WIDTH: u32 = 1920;
pub const ASSET_HEIGHT: u32 = 1080;

const ASPECT_W: u64 = 16;
const ASPECT_H: u64 = 9;

const BUTTON_SIZE: Size = Size::new(500, 122);
const BUTTON_MARGIN_X: f32 = 0.026;

const LOGO_X: f32 = 0.3932;
const LOGO_Y: f32 = 0.1935;
/// Fraction of the canvas height the logo drifts up and down.
const LOGO_FLOAT_AMPLITUDE: f32 = 0.01;
const LOGO_FLOAT_SPEED: f32 = 2.0;

const DIALOG_BOX_SIZE: Size = Size::new(700, 240);
const DIALOG_BUTTON_SIZE: Size = Size::new(178, 42);
const DIALOG_HIT_SIZE: Size = Size::new(177, 41);
const DIALOG_CURSOR_SIZE: Size = Size::new(63, 45);
const DIALOG_YES_X: f32 = 0.3984;
const DIALOG_NO_X: f32 = 0.5089;
const DIALOG_BUTTON_Y: f32 = 0.5528;
const DIALOG_CURSOR_YES_X: f32 = 0.3740;
const DIALOG_CURSOR_NO_X: f32 = 0.4844;
const DIALOG_CURSOR_Y: f32 = 0.5546;

/// Largest 16:9 rectangle centred inside a window of the given size.
pub fn fit_canvas(window_width: u32, window_height: u32) -> Rectangle {
    if window_width == 0 || window_height == 0 {
        return Rectangle::new(Point::zero(), Size::zero());
    }
    let (w, h) = (window_width as u64, window_height as u64);
    let (canvas_w, canvas_h) = if w * ASPECT_H > h * ASPECT_W {
        // Wider than 16:9, height is the constraint.
        (h * ASPECT_W / ASPECT_H, h)
    } else {
        (w, w * ASPECT_H / ASPECT_W)
    };
    Rectangle::new(
        Point::new(((w - canvas_w) / 2) as i32, ((h - canvas_h) / 2) as i32),
        Size::new(canvas_w as u32, canvas_h as u32),
    )
}

/// Maps a window-space point into the canvas' local coordinates.
pub fn to_canvas_local(point: Point, canvas: &Rectangle) -> Point {
    point - canvas.top_left
}

/// Screen layout for one canvas size. Every rectangle is canvas-local.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Layout {
    canvas: Size,
    scale_factor: f32,
}

impl Layout {
    pub fn new(canvas: Size) -> Self {
        Self {
            canvas,
            scale_factor: canvas.width as f32 / ASSET_WIDTH as f32,
        }
    }

    pub fn canvas(&self) -> Size {
        self.canvas
    }

    /// Scales a size given in native asset pixels.
    pub fn scaled(&self, native: Size) -> Size {
        Size::new(
            (native.width as f32 * self.scale_factor) as u32,
            (native.height as f32 * self.scale_factor) as u32,
        )
    }

    pub fn bounds(&self) -> Rectangle {
        Rectangle::new(Point::zero(), self.canvas)
    }

    pub fn button_rect(&self, index: usize) -> Rectangle {
        let size = self.scaled(BUTTON_SIZE);
        let spacing = self.canvas.height as f32 / (ITEM_COUNT + 1) as f32;
        let x = fraction(self.canvas.width, BUTTON_MARGIN_X);
        let y = (spacing * (index + 1) as f32) as i32 - (size.height / 2) as i32;
        Rectangle::new(Point::new(x, y), size)
    }

    /// Top-left of a logo floating on a sine wave over time.
    pub fn logo_origin(&self, elapsed_secs: f32) -> Point {
        let drift = (elapsed_secs * LOGO_FLOAT_SPEED).sin()
            * (self.canvas.height as f32 * LOGO_FLOAT_AMPLITUDE);
        Point::new(
            fraction(self.canvas.width, LOGO_X),
            (self.canvas.height as f32 * LOGO_Y + drift) as i32,
        )
    }

    /// Dialog box at the given animation scale, centred on the canvas.
    pub fn dialog_box(&self, scale: f32) -> Rectangle {
        let full = self.scaled(DIALOG_BOX_SIZE);
        let size = Size::new(
            (full.width as f32 * scale) as u32,
            (full.height as f32 * scale) as u32,
        );
        Rectangle::new(
            Point::new(
                (self.canvas.width as i32 - size.width as i32) / 2,
                (self.canvas.height as i32 - size.height as i32) / 2,
            ),
            size,
        )
    }

    /// Pointer target for a dialog choice. Unaffected by the open/close
    /// animation.
    pub fn choice_hit_rect(&self, choice: Choice) -> Rectangle {
        let size = Size::new(
            (DIALOG_HIT_SIZE.width as f32 * self.canvas.width as f32 / ASSET_WIDTH as f32) as u32,
            (DIALOG_HIT_SIZE.height as f32 * self.canvas.height as f32 / ASSET_HEIGHT as f32)
                as u32,
        );
        Rectangle::new(self.choice_origin(choice), size)
    }

    pub fn choice_button_rect(&self, choice: Choice) -> Rectangle {
        Rectangle::new(self.choice_origin(choice), self.scaled(DIALOG_BUTTON_SIZE))
    }

    pub fn cursor_rect(&self, choice: Choice) -> Rectangle {
        let x = match choice {
            Choice::Yes => DIALOG_CURSOR_YES_X,
            Choice::No => DIALOG_CURSOR_NO_X,
        };
        Rectangle::new(
            Point::new(
                fraction(self.canvas.width, x),
                fraction(self.canvas.height, DIALOG_CURSOR_Y),
            ),
            self.scaled(DIALOG_CURSOR_SIZE),
        )
    }

    fn choice_origin(&self, choice: Choice) -> Point {
        let x = match choice {
            Choice::Yes => DIALOG_YES_X,
            Choice::No => DIALOG_NO_X,
        };
        Point::new(
            fraction(self.canvas.width, x),
            fraction(self.canvas.height, DIALOG_BUTTON_Y),
        )
    }
}

fn fraction(length: u32, ratio: f32) -> i32 {
    (length as f32 * ratio) as i32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn native_window_is_filled_exactly() {
        let canvas = fit_canvas(1920, 1080);
        assert_eq!(canvas, Rectangle::new(Point::zero(), Size::new(1920, 1080)));
    }

    #[test]
    fn wide_window_is_pillarboxed() {
        let canvas = fit_canvas(2560, 1080);
        assert_eq!(canvas.size, Size::new(1920, 1080));
        assert_eq!(canvas.top_left, Point::new(320, 0));
    }

    #[test]
    fn tall_window_is_letterboxed() {
        let canvas = fit_canvas(1000, 2000);
        assert_eq!(canvas.size, Size::new(1000, 562));
        assert_eq!(canvas.top_left, Point::new(0, 719));
    }

    #[test]
    fn zero_window_yields_empty_canvas() {
        assert_eq!(fit_canvas(0, 720).size, Size::zero());
        assert_eq!(fit_canvas(1280, 0).size, Size::zero());
    }

    #[test]
    fn pointer_is_mapped_relative_to_canvas() {
        let canvas = fit_canvas(2560, 1080);
        assert_eq!(
            to_canvas_local(Point::new(330, 15), &canvas),
            Point::new(10, 15)
        );
    }

    #[test]
    fn buttons_scale_with_canvas() {
        let layout = Layout::new(Size::new(1280, 720));
        let first = layout.button_rect(0);
        assert_eq!(first.size, Size::new(333, 81));
        assert_eq!(first.top_left.x, 33);
        assert_eq!(first.top_left.y, 90 - 40);

        let last = layout.button_rect(ITEM_COUNT - 1);
        assert!(last.top_left.y > first.top_left.y);
    }

    #[test]
    fn dialog_box_shrinks_around_centre() {
        let layout = Layout::new(Size::new(1920, 1080));
        let full = layout.dialog_box(1.0);
        assert_eq!(full.size, Size::new(700, 240));
        assert_eq!(full.top_left, Point::new(610, 420));

        let closed = layout.dialog_box(0.0);
        assert_eq!(closed.size, Size::zero());
        assert_eq!(closed.top_left, Point::new(960, 540));
    }

    #[test]
    fn choice_targets_do_not_overlap() {
        let layout = Layout::new(Size::new(1920, 1080));
        let yes = layout.choice_hit_rect(Choice::Yes);
        let no = layout.choice_hit_rect(Choice::No);
        assert!(yes.top_left.x + (yes.size.width as i32) < no.top_left.x);
        assert_eq!(yes.top_left.y, no.top_left.y);
    }
}
