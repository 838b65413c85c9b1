//! `embedded-graphics` integration, so lines and bitmap text can be drawn onto a [`Canvas`].

use std::convert::Infallible;

use embedded_graphics::{pixelcolor::Rgb888, prelude::*};

use super::{Canvas, PixelColor};

impl From<Rgb888> for PixelColor {
    fn from(color: Rgb888) -> Self {
        PixelColor {
            r: color.r(),
            g: color.g(),
            b: color.b(),
        }
    }
}

impl DrawTarget for Canvas {
    type Color = Rgb888;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = embedded_graphics::Pixel<Self::Color>>,
    {
        for embedded_graphics::Pixel(Point { x, y }, color) in pixels {
            if x < 0 || y < 0 {
                continue;
            }
            // Anything past the right or bottom edge is dropped by set_pixel.
            let _ = self.set_pixel(x as u32, y as u32, color.into());
        }
        Ok(())
    }
}

impl OriginDimensions for Canvas {
    fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }
}

#[cfg(test)]
mod tests {
    use embedded_graphics::primitives::{Line, PrimitiveStyle};

    use super::*;
    use crate::canvas::colors;

    #[test]
    fn test_line_is_drawn_and_clipped() {
        let mut canvas = Canvas::new(5, 5);
        Line::new(Point::new(-3, 2), Point::new(10, 2))
            .into_styled(PrimitiveStyle::with_stroke(Rgb888::BLACK, 1))
            .draw(&mut canvas)
            .ok();

        for x in 0..5 {
            assert_eq!(canvas.get_pixel(x, 2), Some(colors::BLACK));
        }
        assert_eq!(canvas.get_pixel(0, 1), Some(colors::WHITE));
    }

    #[test]
    fn test_reports_canvas_size() {
        let canvas = Canvas::new(1000, 600);
        assert_eq!(canvas.size(), Size::new(1000, 600));
    }
}
