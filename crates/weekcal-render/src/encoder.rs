//! PNG serialization of a finished canvas.

use image::{ColorType, ImageEncoder, codecs::png::PngEncoder};

use crate::{canvas::Canvas, error::Result};

/// Encode the canvas as an 8-bit RGB PNG.
///
/// The output only depends on the pixels: no timestamp or other metadata is written.
pub fn encode_png(canvas: &Canvas) -> Result<Vec<u8>> {
    let mut raw = Vec::with_capacity(canvas.pixels().len() * 3);
    for pixel in canvas {
        raw.extend_from_slice(&[pixel.color.r, pixel.color.g, pixel.color.b]);
    }

    let mut out = Vec::new();
    PngEncoder::new(&mut out).write_image(&raw, canvas.width(), canvas.height(), ColorType::Rgb8)?;
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::{PixelColor, colors};

    #[test]
    fn encodes_decodable_png() {
        let mut canvas = Canvas::new(8, 4);
        let red = PixelColor { r: 255, g: 0, b: 0 };
        canvas.set_pixel(3, 2, red).unwrap();

        let png = encode_png(&canvas).unwrap();
        assert_eq!(&png[..8], b"\x89PNG\r\n\x1a\n");

        let decoded = image::load_from_memory(&png).unwrap().to_rgb8();
        assert_eq!(decoded.dimensions(), (8, 4));
        assert_eq!(decoded.get_pixel(3, 2).0, [255, 0, 0]);
        assert_eq!(decoded.get_pixel(0, 0).0, [colors::WHITE.r; 3]);
    }
}
