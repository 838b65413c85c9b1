//! weekcal-service: HTTP front end rendering weekly calendars as PNG images.

pub mod http;
pub mod limit;
