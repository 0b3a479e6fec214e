use embedded_graphics::{
    Pixel,
    pixelcolor::{Rgb888, RgbColor},
    prelude::{DrawTarget, OriginDimensions, Point, Size},
    primitives::Rectangle,
};
use image::RgbaImage;

/// Window-sized 0RGB pixel buffer handed to minifb every frame.
pub struct FrameBuffer {
    width: usize,
    height: usize,
    pixels: Vec<u32>,
}

fn pack(color: Rgb888) -> u32 {
    ((color.r() as u32) << 16) | ((color.g() as u32) << 8) | color.b() as u32
}

fn blend_channel(dst: u32, src: u32, alpha: u32) -> u32 {
    (src * alpha + dst * (255 - alpha)) / 255
}

fn blend(dst: u32, src: u32, alpha: u32) -> u32 {
    if alpha >= 255 {
        return src;
    }
    if alpha == 0 {
        return dst;
    }
    let r = blend_channel((dst >> 16) & 0xFF, (src >> 16) & 0xFF, alpha);
    let g = blend_channel((dst >> 8) & 0xFF, (src >> 8) & 0xFF, alpha);
    let b = blend_channel(dst & 0xFF, src & 0xFF, alpha);
    (r << 16) | (g << 8) | b
}

impl FrameBuffer {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            pixels: vec![0; width * height],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn pixels(&self) -> &[u32] {
        &self.pixels
    }

    pub fn resize(&mut self, width: usize, height: usize) {
        if width == self.width && height == self.height {
            return;
        }
        self.width = width;
        self.height = height;
        self.pixels.clear();
        self.pixels.resize(width * height, 0);
    }

    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 || x as usize >= self.width || y as usize >= self.height {
            return None;
        }
        Some(y as usize * self.width + x as usize)
    }

    pub fn set_pixel(&mut self, x: i32, y: i32, color: Rgb888) {
        if let Some(index) = self.index(x, y) {
            self.pixels[index] = pack(color);
        }
    }

    /// Blends `color` over the clipped rectangle.
    pub fn blend_rect(&mut self, rect: Rectangle, color: Rgb888, alpha: u8) {
        let Some(area) = self.clip(rect) else {
            return;
        };
        let src = pack(color);
        for y in area.top_left.y..area.top_left.y + area.size.height as i32 {
            let row = y as usize * self.width;
            for x in area.top_left.x..area.top_left.x + area.size.width as i32 {
                let pixel = &mut self.pixels[row + x as usize];
                *pixel = blend(*pixel, src, alpha as u32);
            }
        }
    }

    /// Draws an RGBA image with its top-left corner at `origin`, multiplying
    /// its own alpha by `alpha`.
    pub fn blit_rgba(&mut self, image: &RgbaImage, origin: Point, alpha: u8) {
        if alpha == 0 {
            return;
        }
        let rect = Rectangle::new(origin, Size::new(image.width(), image.height()));
        let Some(area) = self.clip(rect) else {
            return;
        };
        for y in area.top_left.y..area.top_left.y + area.size.height as i32 {
            let row = y as usize * self.width;
            let src_y = (y - origin.y) as u32;
            for x in area.top_left.x..area.top_left.x + area.size.width as i32 {
                let [r, g, b, a] = image.get_pixel((x - origin.x) as u32, src_y).0;
                let a = a as u32 * alpha as u32 / 255;
                let src = ((r as u32) << 16) | ((g as u32) << 8) | b as u32;
                let pixel = &mut self.pixels[row + x as usize];
                *pixel = blend(*pixel, src, a);
            }
        }
    }

    fn clip(&self, rect: Rectangle) -> Option<Rectangle> {
        let bounds = Rectangle::new(Point::zero(), self.size());
        let area = rect.intersection(&bounds);
        (area.size.width > 0 && area.size.height > 0).then_some(area)
    }
}

impl OriginDimensions for FrameBuffer {
    fn size(&self) -> Size {
        Size::new(self.width as u32, self.height as u32)
    }
}

impl DrawTarget for FrameBuffer {
    type Color = Rgb888;
    type Error = core::convert::Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(coord, color) in pixels {
            self.set_pixel(coord.x, coord.y, color);
        }
        Ok(())
    }

    fn fill_solid(&mut self, area: &Rectangle, color: Self::Color) -> Result<(), Self::Error> {
        self.blend_rect(*area, color, u8::MAX);
        Ok(())
    }

    fn clear(&mut self, color: Self::Color) -> Result<(), Self::Error> {
        self.pixels.fill(pack(color));
        Ok(())
    }
}
