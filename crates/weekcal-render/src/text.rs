//! Bitmap text drawing and word wrapping.

use std::mem;

use embedded_graphics::{
    mono_font::{MonoFont, MonoTextStyle, ascii::FONT_6X10},
    pixelcolor::Rgb888,
    prelude::*,
    text::{Alignment, Baseline, Text, TextStyleBuilder},
};

use crate::canvas::Canvas;

pub const FONT: &MonoFont<'static> = &FONT_6X10;

/// Distance between wrapped lines, relative to the font height.
pub const LINE_SPACING: f64 = 1.5;

/// Round a real coordinate to the pixel grid.
pub fn to_px(value: f64) -> i32 {
    value.round() as i32
}

/// Width in pixels of a single line of text.
pub fn text_width(text: &str) -> f64 {
    let advance = FONT.character_size.width + FONT.character_spacing;
    (text.chars().count() as u32 * advance) as f64
}

/// Greedy word wrap so that every line fits in `max_width` pixels.
///
/// Newlines always break. A word wider than `max_width` is kept whole on its own line.
pub fn wrap_lines(text: &str, max_width: f64) -> Vec<String> {
    let mut lines = Vec::new();
    for paragraph in text.split('\n') {
        let mut line = String::new();
        for word in paragraph.split_whitespace() {
            if line.is_empty() {
                line.push_str(word);
                continue;
            }
            let candidate = text_width(&line) + text_width(" ") + text_width(word);
            if candidate > max_width {
                lines.push(mem::take(&mut line));
                line.push_str(word);
            } else {
                line.push(' ');
                line.push_str(word);
            }
        }
        lines.push(line);
    }
    lines
}

/// Draw a single line of black text anchored at `position`.
pub fn draw_label(
    canvas: &mut Canvas,
    text: &str,
    position: Point,
    alignment: Alignment,
    baseline: Baseline,
) {
    let character_style = MonoTextStyle::new(FONT, Rgb888::BLACK);
    let text_style = TextStyleBuilder::new()
        .alignment(alignment)
        .baseline(baseline)
        .build();
    Text::with_text_style(text, position, character_style, text_style)
        .draw(canvas)
        .ok();
}

/// Draw black, left-aligned, word-wrapped text whose first line's top-left corner is `(x, y)`.
pub fn draw_wrapped(canvas: &mut Canvas, text: &str, x: f64, y: f64, max_width: f64) {
    let line_advance = f64::from(FONT.character_size.height) * LINE_SPACING;
    for (i, line) in wrap_lines(text, max_width).iter().enumerate() {
        if line.is_empty() {
            continue;
        }
        let top = y + i as f64 * line_advance;
        draw_label(
            canvas,
            line,
            Point::new(to_px(x), to_px(top)),
            Alignment::Left,
            Baseline::Top,
        );
    }
}
