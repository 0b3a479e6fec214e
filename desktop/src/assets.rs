use std::collections::{HashMap, VecDeque};
use std::path::{Path, PathBuf};

use embedded_graphics::prelude::Size;
use image::{RgbaImage, imageops::FilterType};
use log::{debug, warn};
use omni_core::display::Sprite;

/// Scaled variants kept before the oldest is dropped. Enough for every
/// sprite of one frame at one window size, plus a resize in flight.
const SCALED_CACHE_LIMIT: usize = 96;

/// Folder holding artwork and sounds: `assets/` beside the executable, or
/// `assets/` in the working directory when that one is missing.
pub fn asset_dir() -> PathBuf {
    let beside_exe = std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(|dir| dir.join("assets")));
    match beside_exe {
        Some(dir) if dir.is_dir() => dir,
        _ => PathBuf::from("assets"),
    }
}

/// Decodes every sprite once and keeps recently used scaled copies.
pub struct AssetCache {
    dir: PathBuf,
    originals: HashMap<Sprite, Option<RgbaImage>>,
    scaled: HashMap<(Sprite, u32, u32), RgbaImage>,
    order: VecDeque<(Sprite, u32, u32)>,
}

impl AssetCache {
    pub fn new<P: AsRef<Path>>(dir: P) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
            originals: HashMap::new(),
            scaled: HashMap::new(),
            order: VecDeque::new(),
        }
    }

    fn original(&mut self, sprite: Sprite) -> Option<&RgbaImage> {
        let dir = &self.dir;
        self.originals
            .entry(sprite)
            .or_insert_with(|| {
                let path = dir.join(sprite.file_name());
                match image::open(&path) {
                    Ok(image) => {
                        debug!("Loaded {}", path.display());
                        Some(image.to_rgba8())
                    }
                    Err(err) => {
                        warn!("Unable to load {}: {}", path.display(), err);
                        None
                    }
                }
            })
            .as_ref()
    }

    /// Pixel size the artwork was drawn at.
    pub fn native_size(&mut self, sprite: Sprite) -> Option<Size> {
        self.original(sprite)
            .map(|image| Size::new(image.width(), image.height()))
    }

    /// The sprite stretched to `size`.
    pub fn scaled(&mut self, sprite: Sprite, size: Size) -> Option<&RgbaImage> {
        if size.width == 0 || size.height == 0 {
            return None;
        }
        let key = (sprite, size.width, size.height);
        if !self.scaled.contains_key(&key) {
            let original = self.original(sprite)?;
            let resized = if original.width() == size.width && original.height() == size.height {
                original.clone()
            } else {
                image::imageops::resize(original, size.width, size.height, FilterType::Triangle)
            };
            while self.order.len() >= SCALED_CACHE_LIMIT {
                if let Some(oldest) = self.order.pop_front() {
                    self.scaled.remove(&oldest);
                }
            }
            self.scaled.insert(key, resized);
            self.order.push_back(key);
        }
        self.scaled.get(&key)
    }

    #[cfg(test)]
    fn scaled_len(&self) -> usize {
        self.scaled.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;
    use omni_core::display::ButtonFace;

    fn cache_with_button() -> (tempfile::TempDir, AssetCache) {
        let dir = tempfile::tempdir().unwrap();
        let image = RgbaImage::from_pixel(10, 4, Rgba([255, 0, 0, 255]));
        image
            .save(dir.path().join(Sprite::Button(ButtonFace::Idle).file_name()))
            .unwrap();
        let cache = AssetCache::new(dir.path());
        (dir, cache)
    }

    #[test]
    fn missing_artwork_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let mut cache = AssetCache::new(dir.path());
        assert_eq!(cache.native_size(Sprite::NoTitle), None);
        assert!(cache.scaled(Sprite::NoTitle, Size::new(5, 5)).is_none());
    }

    #[test]
    fn scales_and_reuses() {
        let (_dir, mut cache) = cache_with_button();
        let sprite = Sprite::Button(ButtonFace::Idle);
        assert_eq!(cache.native_size(sprite), Some(Size::new(10, 4)));
        let scaled = cache.scaled(sprite, Size::new(5, 2)).unwrap();
        assert_eq!(scaled.dimensions(), (5, 2));
        cache.scaled(sprite, Size::new(5, 2));
        assert_eq!(cache.scaled_len(), 1);
    }

    #[test]
    fn scaled_cache_is_bounded() {
        let (_dir, mut cache) = cache_with_button();
        let sprite = Sprite::Button(ButtonFace::Idle);
        for width in 1..=(SCALED_CACHE_LIMIT as u32 + 10) {
            cache.scaled(sprite, Size::new(width, 1));
        }
        assert_eq!(cache.scaled_len(), SCALED_CACHE_LIMIT);
    }
}
