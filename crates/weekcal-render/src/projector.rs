//! Projects events onto the grid as translucent, labeled blocks.

use log::{debug, warn};

use crate::{
    canvas::Canvas,
    error::{RenderError, Result},
    event::{Event, parse_wall_time},
    layout::{GridLayout, Rect},
    palette::PaletteColor,
    text::draw_wrapped,
};

/// Inset of the title from the block's top-left corner, on each side.
const TITLE_PADDING: f64 = 5.0;

/// An event that passed validation, ready to be painted.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ProjectedEvent {
    pub rect: Rect,
    pub color: PaletteColor,
}

/// Validate an event and compute where it lands on the grid.
///
/// The color is checked before the times are parsed.
pub fn project(layout: &GridLayout, event: &Event) -> Result<ProjectedEvent> {
    let color: PaletteColor = event
        .color
        .parse()
        .map_err(|_| RenderError::UnknownColor {
            title: event.title.clone(),
        })?;

    let start = parse_wall_time(&event.start_time)?;
    let end = parse_wall_time(&event.end_time)?;

    if !(0..layout.days as i64).contains(&event.day) {
        warn!(
            "Event {:?} has day {} outside the {}-day grid",
            event.title, event.day, layout.days
        );
    }
    if end < start {
        warn!(
            "Event {:?} ends at {} before it starts at {}",
            event.title, event.end_time, event.start_time
        );
    }

    Ok(ProjectedEvent {
        rect: layout.event_rect(event.day, start, end),
        color,
    })
}

/// Paint every event in order, later events on top of earlier ones.
///
/// Stops at the first invalid event. Events painted before it stay on the canvas.
pub fn draw_events(canvas: &mut Canvas, layout: &GridLayout, events: &[Event]) -> Result<()> {
    for event in events {
        let projected = project(layout, event)?;
        let rect = projected.rect;

        if !overlaps_canvas(&rect, canvas) {
            debug!(
                "Skipped event {:?} on day {}, it lies outside the canvas",
                event.title, event.day
            );
            continue;
        }

        canvas.blend_rect(&rect, projected.color.rgba());
        draw_wrapped(
            canvas,
            &event.title,
            rect.x + TITLE_PADDING,
            rect.y + TITLE_PADDING,
            rect.width - 2.0 * TITLE_PADDING,
        );

        debug!(
            "Drew {} event {:?} on day {} at y {:.3}..{:.3}",
            projected.color,
            event.title,
            event.day,
            rect.y,
            rect.y + rect.height
        );
    }

    Ok(())
}

/// Whether any part of `rect` lands on the canvas.
fn overlaps_canvas(rect: &Rect, canvas: &Canvas) -> bool {
    let (left, right) = ordered(rect.x, rect.x + rect.width);
    let (top, bottom) = ordered(rect.y, rect.y + rect.height);
    right > 0.0 && bottom > 0.0 && left < f64::from(canvas.width()) && top < f64::from(canvas.height())
}

fn ordered(a: f64, b: f64) -> (f64, f64) {
    if a <= b { (a, b) } else { (b, a) }
}
