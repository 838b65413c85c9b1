//! Error types for calendar rendering

use thiserror::Error;

/// Result type alias for rendering operations
pub type Result<T> = std::result::Result<T, RenderError>;

/// Errors that can occur while rendering a calendar
#[derive(Error, Debug)]
pub enum RenderError {
    /// An event names a color outside the palette
    #[error(
        "the color for the {title} event is not in the palette. the choices are red, blue, green, and yellow"
    )]
    UnknownColor { title: String },

    /// A start or end time is not a `HH:MM` 24-hour wall time
    #[error("invalid time {value:?}, expected HH:MM in 24-hour format")]
    InvalidTimeFormat { value: String },

    /// The finished canvas could not be encoded
    #[error("failed to encode calendar image: {0}")]
    Encoding(#[from] image::ImageError),
}

impl RenderError {
    /// Whether the error was caused by the submitted events rather than by the renderer.
    pub fn is_client_error(&self) -> bool {
        match self {
            RenderError::UnknownColor { .. } | RenderError::InvalidTimeFormat { .. } => true,
            RenderError::Encoding(_) => false,
        }
    }
}
