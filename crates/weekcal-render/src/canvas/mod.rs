//! Raster surface the calendar is painted onto.

use std::ops::Range;

use crate::layout::Rect;
use crate::palette::Rgba;

mod target;

/// Color of a pixel on the canvas.
///
/// The canvas is always opaque, so a pixel only carries RGB channels.
/// Translucent colors are blended into it with [`Canvas::blend_pixel`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PixelColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

/// A pixel on the canvas with its coordinates and color.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Pixel {
    pub x: u32,
    pub y: u32,
    pub color: PixelColor,
}

pub mod colors {
    use super::PixelColor;

    pub const WHITE: PixelColor = PixelColor {
        r: 255,
        g: 255,
        b: 255,
    };
    pub const BLACK: PixelColor = PixelColor { r: 0, g: 0, b: 0 };
}

/// Canvas state
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Canvas {
    width: u32,
    height: u32,
    // Pixel data stored as a flat array.
    // Cell (x, y) is at index (y * width + x)
    data: Box<[PixelColor]>,
}

impl Canvas {
    /// Create a new white canvas with the given width and height.
    pub fn new(width: u32, height: u32) -> Self {
        let data = vec![colors::WHITE; (width as usize) * (height as usize)].into_boxed_slice();
        Self {
            width,
            height,
            data,
        }
    }

    fn index(&self, x: u32, y: u32) -> Option<usize> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some((y as usize) * (self.width as usize) + (x as usize))
    }

    /// Get the pixel color at the given coordinates.
    pub fn get_pixel(&self, x: u32, y: u32) -> Option<PixelColor> {
        self.index(x, y).map(|index| self.data[index])
    }

    /// Set the pixel color at the given coordinates.
    ///
    /// Returns Err(()) if the coordinates are out of bounds.
    pub fn set_pixel(&mut self, x: u32, y: u32, color: PixelColor) -> Result<(), ()> {
        let index = self.index(x, y).ok_or(())?;
        self.data[index] = color;
        Ok(())
    }

    /// Blend a translucent color over the pixel at the given coordinates.
    ///
    /// Each channel becomes `src * alpha + dst * (1 - alpha)`.
    /// Out of bounds coordinates are ignored.
    pub fn blend_pixel(&mut self, x: u32, y: u32, color: Rgba) {
        let Some(index) = self.index(x, y) else {
            return;
        };
        let dst = self.data[index];
        self.data[index] = PixelColor {
            r: blend_channel(dst.r, color.r, color.a),
            g: blend_channel(dst.g, color.g, color.a),
            b: blend_channel(dst.b, color.b, color.a),
        };
    }

    /// Blend a translucent color over every pixel whose center lies inside `rect`.
    ///
    /// A rectangle with a negative width or height covers the span between
    /// its two edges. The part of the rectangle outside the canvas is clipped.
    pub fn blend_rect(&mut self, rect: &Rect, color: Rgba) {
        let columns = covered_span(rect.x, rect.x + rect.width, self.width);
        let rows = covered_span(rect.y, rect.y + rect.height, self.height);
        for y in rows {
            for x in columns.clone() {
                self.blend_pixel(x, y, color);
            }
        }
    }

    /// Get the width of the canvas.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Get the height of the canvas.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Get an iterator over all pixels in the canvas, row by row.
    pub fn pixels<'a>(&'a self) -> CanvasPixelIter<'a> {
        CanvasPixelIter::new(self)
    }
}

fn blend_channel(dst: u8, src: f64, alpha: f64) -> u8 {
    let out = src * 255.0 * alpha + f64::from(dst) * (1.0 - alpha);
    out.round().clamp(0.0, 255.0) as u8
}

/// Pixel indices along one axis whose centers fall in `[start, end)`, clipped to `0..limit`.
fn covered_span(start: f64, end: f64, limit: u32) -> Range<u32> {
    let (low, high) = if start <= end {
        (start, end)
    } else {
        (end, start)
    };
    let first = (low - 0.5).ceil().max(0.0);
    let last = (high - 0.5).ceil().min(f64::from(limit));
    if first >= last {
        return 0..0;
    }
    first as u32..last as u32
}

impl<'a> IntoIterator for &'a Canvas {
    type Item = Pixel;
    type IntoIter = CanvasPixelIter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        CanvasPixelIter::new(self)
    }
}

pub struct CanvasPixelIter<'a> {
    canvas: &'a Canvas,
    x: u32,
    y: u32,
}

impl<'a> CanvasPixelIter<'a> {
    fn new(canvas: &'a Canvas) -> Self {
        Self { canvas, x: 0, y: 0 }
    }
}

impl<'a> Iterator for CanvasPixelIter<'a> {
    type Item = Pixel;

    fn next(&mut self) -> Option<Self::Item> {
        if self.y >= self.canvas.height {
            return None;
        }

        let pixel = Pixel {
            x: self.x,
            y: self.y,
            color: self.canvas.get_pixel(self.x, self.y)?,
        };

        self.x += 1;
        if self.x >= self.canvas.width {
            self.x = 0;
            self.y += 1;
        }

        Some(pixel)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.len();
        (len, Some(len))
    }
}

impl<'a> ExactSizeIterator for CanvasPixelIter<'a> {
    fn len(&self) -> usize {
        if self.y >= self.canvas.height {
            return 0;
        }
        (self.canvas.width as usize * self.canvas.height as usize)
            - (self.y as usize * self.canvas.width as usize + self.x as usize)
    }
}
