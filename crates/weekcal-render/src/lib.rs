//! weekcal-render: draws a week of timed events as a PNG calendar.
//!
//! A render paints a fixed 1000x600 canvas in three steps: the static hour
//! and day grid, then every event as a translucent block with its wrapped
//! title, then PNG encoding. Each call owns its canvas, so renders are
//! independent and can run in parallel.

pub mod canvas;
pub mod encoder;
pub mod error;
pub mod event;
pub mod grid;
pub mod layout;
pub mod palette;
pub mod projector;
pub mod text;

pub use error::{RenderError, Result};
pub use event::Event;
pub use palette::PaletteColor;

use canvas::Canvas;
use layout::{DAYS_OF_WEEK, GridLayout};

/// Render the events on a fresh week grid and return the PNG bytes.
///
/// Fails on the first event with an unknown color or a malformed time.
pub fn render_calendar(events: &[Event]) -> Result<Vec<u8>> {
    let layout = GridLayout::default();
    let mut canvas = Canvas::new(layout.width, layout.height);

    grid::draw_grid(&mut canvas, &layout, &DAYS_OF_WEEK);
    projector::draw_events(&mut canvas, &layout, events)?;

    let png = encoder::encode_png(&canvas)?;
    log::debug!(
        "Rendered {} events into {} PNG bytes",
        events.len(),
        png.len()
    );
    Ok(png)
}
