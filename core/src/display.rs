use embedded_graphics::{pixelcolor::Rgb888, prelude::Size, primitives::Rectangle};

use crate::catalog::GAMES;
use crate::menu::ButtonState;

/// Button artwork for each state.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ButtonFace {
    Idle,
    Pressed,
    Active,
}

impl ButtonFace {
    pub fn for_state(state: ButtonState) -> Self {
        match state {
            ButtonState::Pressed | ButtonState::Deactivated => ButtonFace::Pressed,
            ButtonState::Active => ButtonFace::Active,
            ButtonState::Inactive | ButtonState::Hovered => ButtonFace::Idle,
        }
    }
}

/// Logical name of a piece of artwork. The desktop shell maps these to
/// files and caches the decoded pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Sprite {
    Background(usize),
    Logo(usize),
    Title(usize),
    NoTitle,
    Button(ButtonFace),
    /// Pulsing highlight over a hovered button.
    ButtonGlow,
    /// Pulsing highlight over a hovered button that is also active.
    ButtonGlowActive,
    ConfirmBox,
    ConfirmText,
    ConfirmCursor,
    ConfirmGlow,
    ConfirmButtonActive,
    ConfirmButtonInactive,
}

impl Sprite {
    pub fn file_name(&self) -> String {
        let asset_key = |item: usize| GAMES.get(item).map_or("kh1", |game| game.asset_key);
        match *self {
            Sprite::Background(item) => format!("{}-bg.png", asset_key(item)),
            Sprite::Logo(item) => format!("{}-logo.png", asset_key(item)),
            Sprite::Title(item) => format!("{}-title.png", asset_key(item)),
            Sprite::NoTitle => "no-title.png".into(),
            Sprite::Button(ButtonFace::Idle) => "button-0.png".into(),
            Sprite::Button(ButtonFace::Active) => "button-1.png".into(),
            Sprite::Button(ButtonFace::Pressed) => "button-2.png".into(),
            Sprite::ButtonGlowActive => "button-3.png".into(),
            Sprite::ButtonGlow => "button-3b.png".into(),
            Sprite::ConfirmBox => "confirm-box.png".into(),
            Sprite::ConfirmText => "confirm-text.png".into(),
            Sprite::ConfirmCursor => "confirm-cursor.png".into(),
            Sprite::ConfirmGlow => "confirm-button-glow.png".into(),
            Sprite::ConfirmButtonActive => "confirm-button-active.png".into(),
            Sprite::ConfirmButtonInactive => "confirm-button-inactive.png".into(),
        }
    }
}

/// Drawing surface the scene is rendered onto. Rectangles are in window
/// coordinates.
pub trait Canvas {
    fn size(&self) -> Size;
    fn clear(&mut self, color: Rgb888);
    fn fill_rect(&mut self, rect: Rectangle, color: Rgb888, alpha: u8);
    /// Draws `sprite` stretched to `rect`. Missing artwork draws nothing.
    fn draw_sprite(&mut self, sprite: Sprite, rect: Rectangle, alpha: u8);
    /// Native pixel size of the artwork, if it could be loaded.
    fn sprite_size(&mut self, sprite: Sprite) -> Option<Size>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn item_artwork_uses_game_prefix() {
        assert_eq!(Sprite::Background(1).file_name(), "com-bg.png");
        assert_eq!(Sprite::Logo(5).file_name(), "afp-logo.png");
        assert_eq!(Sprite::Title(6).file_name(), "kh3-title.png");
    }

    #[test]
    fn deactivated_buttons_share_pressed_face() {
        assert_eq!(
            ButtonFace::for_state(ButtonState::Deactivated),
            ButtonFace::for_state(ButtonState::Pressed)
        );
        assert_eq!(ButtonFace::for_state(ButtonState::Hovered), ButtonFace::Idle);
    }
}
