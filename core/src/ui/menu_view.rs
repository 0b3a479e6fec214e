use embedded_graphics::primitives::Rectangle;

use crate::display::{ButtonFace, Canvas, Sprite};
use crate::menu::{ButtonGrid, ButtonState};

use super::{UiContext, pulse_alpha, visuals_for};

/// Background, the seven buttons and the floating logo of the selected game.
pub fn draw_menu<C: Canvas>(ctx: &mut UiContext<'_, C>, grid: &ButtonGrid) {
    let visuals = visuals_for(grid.selected());
    let bounds = ctx.layout.bounds();
    ctx.sprite(visuals.background, bounds, u8::MAX);

    let glow = pulse_alpha(ctx.elapsed_secs);
    for (index, button) in grid.buttons().iter().enumerate() {
        let rect = button.bounds;
        ctx.sprite(Sprite::Button(ButtonFace::for_state(button.state)), rect, u8::MAX);

        let title = if button.is_deactivated() {
            Sprite::NoTitle
        } else {
            Sprite::Title(index)
        };
        ctx.sprite(title, rect, u8::MAX);

        if button.hovered {
            let highlight = if button.state == ButtonState::Active {
                Sprite::ButtonGlowActive
            } else {
                Sprite::ButtonGlow
            };
            ctx.sprite(highlight, rect, glow);
        }
    }

    if let Some(native) = ctx.canvas.sprite_size(visuals.logo) {
        let size = ctx.layout.scaled(native);
        let origin = ctx.layout.logo_origin(ctx.elapsed_secs);
        ctx.sprite(visuals.logo, Rectangle::new(origin, size), u8::MAX);
    }
}
