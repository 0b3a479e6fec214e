mod dialog_view;
mod menu_view;

use std::f32::consts::PI;

use embedded_graphics::{
    pixelcolor::Rgb888,
    prelude::{Point, RgbColor, Size},
    primitives::Rectangle,
};

use crate::display::{Canvas, Sprite};
use crate::geometry::Layout;

pub use dialog_view::draw_dialog;
pub use menu_view::draw_menu;

/// Opacity of a pulsing highlight. Shared by the menu glow and the dialog
/// glow so both breathe in step.
pub fn pulse_alpha(elapsed_secs: f32) -> u8 {
    (((elapsed_secs * PI).sin() + 1.0) * 127.5) as u8
}

/// Artwork that follows the current selection.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Visuals {
    pub background: Sprite,
    pub logo: Sprite,
}

pub fn visuals_for(selected: usize) -> Visuals {
    Visuals {
        background: Sprite::Background(selected),
        logo: Sprite::Logo(selected),
    }
}

/// One frame being drawn: the target canvas plus where the 16:9 area sits
/// inside the window.
pub struct UiContext<'a, C: Canvas> {
    pub canvas: &'a mut C,
    pub area: Rectangle,
    pub layout: Layout,
    pub elapsed_secs: f32,
}

impl<C: Canvas> UiContext<'_, C> {
    /// Draws a sprite given in canvas-local coordinates.
    pub fn sprite(&mut self, sprite: Sprite, rect: Rectangle, alpha: u8) {
        if rect.size.width == 0 || rect.size.height == 0 {
            return;
        }
        let rect = Rectangle::new(rect.top_left + self.area.top_left, rect.size);
        self.canvas.draw_sprite(sprite, rect, alpha);
    }

    pub fn fill(&mut self, rect: Rectangle, color: Rgb888, alpha: u8) {
        let rect = Rectangle::new(rect.top_left + self.area.top_left, rect.size);
        self.canvas.fill_rect(rect, color, alpha);
    }

    /// Blacks out everything outside the canvas area, hiding anything that
    /// spilled over its edges.
    pub fn letterbox(&mut self) {
        let window = self.canvas.size();
        let area = self.area;
        let left = area.top_left.x.max(0) as u32;
        let top = area.top_left.y.max(0) as u32;
        let right = left + area.size.width;
        let bottom = top + area.size.height;
        let bars = [
            Rectangle::new(Point::zero(), Size::new(left, window.height)),
            Rectangle::new(
                Point::new(right as i32, 0),
                Size::new(window.width.saturating_sub(right), window.height),
            ),
            Rectangle::new(Point::zero(), Size::new(window.width, top)),
            Rectangle::new(
                Point::new(0, bottom as i32),
                Size::new(window.width, window.height.saturating_sub(bottom)),
            ),
        ];
        for bar in bars {
            if bar.size.width > 0 && bar.size.height > 0 {
                self.canvas.fill_rect(bar, Rgb888::BLACK, u8::MAX);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pulse_spans_full_range() {
        assert_eq!(pulse_alpha(0.0), 127);
        assert!(pulse_alpha(0.5) >= 254);
        assert_eq!(pulse_alpha(1.5), 0);
    }

    #[test]
    fn visuals_track_selection() {
        let visuals = visuals_for(4);
        assert_eq!(visuals.background, Sprite::Background(4));
        assert_eq!(visuals.logo, Sprite::Logo(4));
    }
}
