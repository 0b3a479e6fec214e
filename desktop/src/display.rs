use embedded_graphics::{
    pixelcolor::Rgb888,
    prelude::{DrawTarget, Point, Size},
    primitives::Rectangle,
};
use log::{debug, info};
use minifb::{Key as FbKey, KeyRepeat, MouseButton, MouseMode, Window, WindowOptions};
use omni_core::{
    display::{Canvas, Sprite},
    input::{InputEvent, Key},
};

use crate::{assets::AssetCache, framebuffer::FrameBuffer};

pub const TITLE: &str = "KINGDOM HEARTS Omni Lite Launcher";
pub const WINDOWED_SIZE: (usize, usize) = (1280, 720);
pub const FULLSCREEN_SIZE: (usize, usize) = (1920, 1080);

fn map_key(key: FbKey) -> Key {
    match key {
        FbKey::Up => Key::Up,
        FbKey::Down => Key::Down,
        FbKey::Left => Key::Left,
        FbKey::Right => Key::Right,
        FbKey::Space => Key::Space,
        FbKey::Enter | FbKey::NumPadEnter => Key::Enter,
        FbKey::Escape => Key::Escape,
        FbKey::F11 => Key::F11,
        _ => Key::Other,
    }
}

fn open_window(fullscreen: bool) -> Result<Window, minifb::Error> {
    let (width, height) = if fullscreen {
        FULLSCREEN_SIZE
    } else {
        WINDOWED_SIZE
    };
    let options = WindowOptions {
        resize: !fullscreen,
        borderless: fullscreen,
        topmost: fullscreen,
        ..WindowOptions::default()
    };
    let mut window = Window::new(TITLE, width, height, options)?;
    window.set_target_fps(60);
    Ok(window)
}

/// The launcher window. Fullscreen is a borderless window at the fullscreen
/// size; switching modes recreates the window.
pub struct MinifbDisplay {
    window: Window,
    fullscreen: bool,
    frame: FrameBuffer,
    last_mouse: Option<(i32, i32)>,
    mouse_down: bool,
}

impl MinifbDisplay {
    pub fn open(fullscreen: bool) -> Result<Self, minifb::Error> {
        let window = open_window(fullscreen)?;
        let (width, height) = window.get_size();
        Ok(Self {
            window,
            fullscreen,
            frame: FrameBuffer::new(width, height),
            last_mouse: None,
            mouse_down: false,
        })
    }

    pub fn size(&self) -> Size {
        let (width, height) = self.window.get_size();
        Size::new(width as u32, height as u32)
    }

    pub fn toggle_fullscreen(&mut self) -> Result<(), minifb::Error> {
        let fullscreen = !self.fullscreen;
        self.window = open_window(fullscreen)?;
        self.fullscreen = fullscreen;
        self.last_mouse = None;
        info!("Fullscreen {}", if fullscreen { "on" } else { "off" });
        Ok(())
    }

    /// Input gathered since the previous frame, in window coordinates.
    pub fn poll_events(&mut self, events: &mut Vec<InputEvent>) {
        if !self.window.is_open() {
            events.push(InputEvent::CloseRequested);
            return;
        }

        let alt = self.window.is_key_down(FbKey::LeftAlt) || self.window.is_key_down(FbKey::RightAlt);
        for key in self.window.get_keys_pressed(KeyRepeat::No) {
            events.push(InputEvent::KeyDown {
                key: map_key(key),
                alt,
            });
        }

        if let Some((x, y)) = self.window.get_mouse_pos(MouseMode::Discard) {
            let position = (x as i32, y as i32);
            if self.last_mouse != Some(position) {
                // The first sample only establishes where the pointer rests.
                if self.last_mouse.is_some() {
                    events.push(InputEvent::PointerMoved(Point::new(position.0, position.1)));
                }
                self.last_mouse = Some(position);
            }
            let down = self.window.get_mouse_down(MouseButton::Left);
            if down && !self.mouse_down {
                events.push(InputEvent::PointerPressed(Point::new(position.0, position.1)));
            }
            self.mouse_down = down;
        }
    }

    /// Sizes the frame to the window and hands it out for drawing.
    pub fn canvas<'a>(&'a mut self, assets: &'a mut AssetCache) -> FrameCanvas<'a> {
        let (width, height) = self.window.get_size();
        self.frame.resize(width, height);
        FrameCanvas {
            frame: &mut self.frame,
            assets,
        }
    }

    pub fn present(&mut self) -> Result<(), minifb::Error> {
        if self.frame.width() == 0 || self.frame.height() == 0 {
            self.window.update();
            return Ok(());
        }
        self.window
            .update_with_buffer(self.frame.pixels(), self.frame.width(), self.frame.height())
    }
}

/// The frame buffer plus artwork, seen through the scene's drawing seam.
pub struct FrameCanvas<'a> {
    frame: &'a mut FrameBuffer,
    assets: &'a mut AssetCache,
}

impl Canvas for FrameCanvas<'_> {
    fn size(&self) -> Size {
        Size::new(self.frame.width() as u32, self.frame.height() as u32)
    }

    fn clear(&mut self, color: Rgb888) {
        self.frame.clear(color).ok();
    }

    fn fill_rect(&mut self, rect: Rectangle, color: Rgb888, alpha: u8) {
        if alpha == u8::MAX {
            self.frame.fill_solid(&rect, color).ok();
        } else {
            self.frame.blend_rect(rect, color, alpha);
        }
    }

    fn draw_sprite(&mut self, sprite: Sprite, rect: Rectangle, alpha: u8) {
        match self.assets.scaled(sprite, rect.size) {
            Some(image) => self.frame.blit_rgba(image, rect.top_left, alpha),
            None => debug!("Skipping {:?}", sprite),
        }
    }

    fn sprite_size(&mut self, sprite: Sprite) -> Option<Size> {
        self.assets.native_size(sprite)
    }
}
