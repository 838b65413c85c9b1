//! Pixel geometry of the weekly grid.
//!
//! The canvas is split into a label margin along the top and left edges and a
//! grid area of 24 hour rows by 7 day columns. All positions are real-valued;
//! rounding to pixels happens when drawing.

use chrono::NaiveTime;

use crate::event::fractional_hours;

pub const CANVAS_WIDTH: u32 = 1000;
pub const CANVAS_HEIGHT: u32 = 600;
pub const MARGIN: Margin = Margin { x: 50, y: 25 };
pub const HOURS: u32 = 24;
pub const DAYS_OF_WEEK: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

/// Pixel border reserved for axis labels.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Margin {
    pub x: u32,
    pub y: u32,
}

/// Axis-aligned rectangle in canvas coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

/// Geometry of a grid drawn on a canvas of a given size.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GridLayout {
    pub width: u32,
    pub height: u32,
    pub margin: Margin,
    pub days: usize,
}

impl Default for GridLayout {
    fn default() -> Self {
        Self::new(CANVAS_WIDTH, CANVAS_HEIGHT, MARGIN, DAYS_OF_WEEK.len())
    }
}

impl GridLayout {
    pub fn new(width: u32, height: u32, margin: Margin, days: usize) -> Self {
        debug_assert!(days > 0, "Grid must have at least one day column");
        GridLayout {
            width,
            height,
            margin,
            days,
        }
    }

    pub fn grid_width(&self) -> f64 {
        f64::from(self.width) - f64::from(self.margin.x)
    }

    pub fn grid_height(&self) -> f64 {
        f64::from(self.height) - f64::from(self.margin.y)
    }

    pub fn day_width(&self) -> f64 {
        self.grid_width() / self.days as f64
    }

    /// Y coordinate of a position in the day, given in fractional hours.
    pub fn hour_y(&self, hours: f64) -> f64 {
        hours * self.grid_height() / f64::from(HOURS) + f64::from(self.margin.y)
    }

    pub fn time_y(&self, time: NaiveTime) -> f64 {
        self.hour_y(fractional_hours(time))
    }

    /// Left edge of a day column. Indices outside the week are not clamped.
    pub fn day_x(&self, day: i64) -> f64 {
        day as f64 * self.day_width() + f64::from(self.margin.x)
    }

    /// Rectangle covering one day column between two wall times.
    ///
    /// An end before the start gives a negative height.
    pub fn event_rect(&self, day: i64, start: NaiveTime, end: NaiveTime) -> Rect {
        let start_y = self.time_y(start);
        let end_y = self.time_y(end);
        Rect {
            x: self.day_x(day),
            y: start_y,
            width: self.day_width(),
            height: end_y - start_y,
        }
    }
}
