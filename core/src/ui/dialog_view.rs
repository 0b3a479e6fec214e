use embedded_graphics::{pixelcolor::Rgb888, prelude::RgbColor};

use crate::dialog::{Choice, ConfirmDialog, OVERLAY_ALPHA, Phase};
use crate::display::{Canvas, Sprite};

use super::{UiContext, pulse_alpha};

/// Overlay and dialog box. Buttons, glow and cursor only appear once the
/// box is fully open.
pub fn draw_dialog<C: Canvas>(ctx: &mut UiContext<'_, C>, dialog: &ConfirmDialog) {
    if dialog.phase() == Phase::Closed {
        return;
    }

    let bounds = ctx.layout.bounds();
    ctx.fill(bounds, Rgb888::BLACK, OVERLAY_ALPHA);

    if dialog.scale() <= 0.0 {
        return;
    }
    let dialog_box = ctx.layout.dialog_box(dialog.scale());
    ctx.sprite(Sprite::ConfirmBox, dialog_box, u8::MAX);

    if dialog.is_open() {
        for choice in [Choice::Yes, Choice::No] {
            let face = if dialog.choice() == choice {
                Sprite::ConfirmButtonActive
            } else {
                Sprite::ConfirmButtonInactive
            };
            let rect = ctx.layout.choice_button_rect(choice);
            ctx.sprite(face, rect, u8::MAX);
        }

        let chosen = dialog.choice();
        let glow = pulse_alpha(ctx.elapsed_secs);
        let rect = ctx.layout.choice_button_rect(chosen);
        ctx.sprite(Sprite::ConfirmGlow, rect, glow);
        let cursor = ctx.layout.cursor_rect(chosen);
        ctx.sprite(Sprite::ConfirmCursor, cursor, u8::MAX);
    }

    ctx.sprite(Sprite::ConfirmText, dialog_box, u8::MAX);
}
