//! Display sink error types

use thiserror::Error;

/// Errors that can occur while opening or presenting to a display
#[derive(Error, Debug)]
pub enum DisplayError {
    /// The display surface could not be opened
    #[error("Display unavailable: {0}")]
    Unavailable(String),

    /// The frame did not match the surface dimensions
    #[error("Frame size mismatch: surface={surface_width}x{surface_height}, frame={frame_width}x{frame_height}")]
    SizeMismatch {
        surface_width: usize,
        surface_height: usize,
        frame_width: usize,
        frame_height: usize,
    },

    /// Presenting a frame failed
    #[error("Failed to present frame: {0}")]
    Present(String),

    /// The surface was closed by the user or the window system
    #[error("Display closed")]
    Closed,
}

/// Result type for display operations
pub type DisplayResult<T> = Result<T, DisplayError>;
