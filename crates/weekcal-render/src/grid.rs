//! Static part of the calendar: hour and day gridlines with their labels.

use embedded_graphics::{
    pixelcolor::Rgb888,
    prelude::*,
    primitives::{Line, PrimitiveStyle},
    text::{Alignment, Baseline},
};

use crate::{
    canvas::Canvas,
    layout::{GridLayout, HOURS},
    text::{draw_label, to_px},
};

/// Gap between a label and the line it annotates.
const LABEL_GAP: f64 = 5.0;
/// Height of the day labels' baseline above the grid.
const DAY_LABEL_RISE: f64 = 10.0;

/// Draw the hour rows, the day columns and their labels.
pub fn draw_grid(canvas: &mut Canvas, layout: &GridLayout, day_labels: &[&str]) {
    let style = PrimitiveStyle::with_stroke(Rgb888::BLACK, 1);
    let left = f64::from(layout.margin.x);
    let top = f64::from(layout.margin.y);
    let right = f64::from(layout.width);
    let bottom = top + layout.grid_height();

    for hour in 0..=HOURS {
        let y = clamp_px(to_px(layout.hour_y(f64::from(hour))), canvas.height());
        Line::new(Point::new(to_px(left), y), Point::new(to_px(right), y))
            .into_styled(style)
            .draw(canvas)
            .ok();

        draw_label(
            canvas,
            &format!("{hour}:00"),
            Point::new(to_px(left - LABEL_GAP), to_px(f64::from(y) - LABEL_GAP)),
            Alignment::Right,
            Baseline::Top,
        );
    }

    for (i, day) in day_labels.iter().enumerate() {
        let x = clamp_px(to_px(layout.day_x(i as i64)), canvas.width());
        Line::new(
            Point::new(x, to_px(top)),
            Point::new(x, clamp_px(to_px(bottom), canvas.height())),
        )
        .into_styled(style)
        .draw(canvas)
        .ok();

        let center = layout.day_x(i as i64) + layout.day_width() / 2.0;
        draw_label(
            canvas,
            day,
            Point::new(to_px(center), to_px(top - DAY_LABEL_RISE)),
            Alignment::Center,
            Baseline::Alphabetic,
        );
    }

    log::debug!(
        "Drew grid: {} hour lines, {} day columns",
        HOURS + 1,
        day_labels.len()
    );
}

/// Pull a coordinate sitting exactly on the far edge back onto the last pixel.
fn clamp_px(value: i32, limit: u32) -> i32 {
    let last = limit as i32 - 1;
    if value == limit as i32 { last } else { value }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        canvas::colors,
        layout::{CANVAS_HEIGHT, CANVAS_WIDTH, DAYS_OF_WEEK},
    };

    fn drawn_grid() -> Canvas {
        let mut canvas = Canvas::new(CANVAS_WIDTH, CANVAS_HEIGHT);
        draw_grid(&mut canvas, &GridLayout::default(), &DAYS_OF_WEEK);
        canvas
    }

    #[test]
    fn hour_lines_cross_the_grid() {
        let canvas = drawn_grid();
        // 9:00 sits at y = 240.625, drawn on row 241.
        for x in [60, 500, 999] {
            assert_eq!(canvas.get_pixel(x, 241), Some(colors::BLACK));
        }
        // The 0:00 and 24:00 lines bound the grid.
        assert_eq!(canvas.get_pixel(700, 25), Some(colors::BLACK));
        assert_eq!(canvas.get_pixel(700, 599), Some(colors::BLACK));
        // Nothing between two hour lines inside a column.
        assert_eq!(canvas.get_pixel(120, 250), Some(colors::WHITE));
    }

    #[test]
    fn day_lines_start_at_margin() {
        let canvas = drawn_grid();
        // Columns are 950 / 7 wide starting at x = 50.
        for x in [50, 186, 321] {
            assert_eq!(canvas.get_pixel(x, 300), Some(colors::BLACK), "x = {x}");
        }
        // No closing line at the right edge.
        assert_eq!(canvas.get_pixel(999, 300), Some(colors::WHITE));
        // Day lines do not extend into the top margin.
        assert_eq!(canvas.get_pixel(186, 20), Some(colors::WHITE));
    }

    #[test]
    fn labels_are_drawn_in_margins() {
        let canvas = drawn_grid();
        let inked_in = |xs: std::ops::Range<u32>, ys: std::ops::Range<u32>| {
            canvas
                .pixels()
                .filter(|p| xs.contains(&p.x) && ys.contains(&p.y))
                .any(|p| p.color == colors::BLACK)
        };
        // Hour labels sit left of the grid, starting 5 px above their line.
        // The 9:00 line is on row 241, so its label begins at row 236.
        assert!(inked_in(0..45, 236..246));
        assert!(!inked_in(0..45, 225..236));
        // "Sun" is centered over the first column, above the grid.
        assert!(inked_in(100..135, 5..16));
        // The corner above the 0:00 label stays clear.
        assert!(!inked_in(0..45, 0..5));
    }
}
