//! Error types for nc-widgets.

use thiserror::Error;

/// Result type alias for form and widget operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur in form and widget operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// An invalid argument was passed to a function.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// A window position is out of bounds.
    #[error("position ({y}, {x}) out of bounds (max: {max_y}, {max_x})")]
    OutOfBounds {
        /// The requested Y coordinate.
        y: i32,
        /// The requested X coordinate.
        x: i32,
        /// The maximum Y coordinate.
        max_y: i32,
        /// The maximum X coordinate.
        max_x: i32,
    },

    /// The form is already posted.
    #[error("form already posted")]
    Posted,

    /// The form is not posted.
    #[error("form not posted")]
    NotPosted,

    /// The form has no fields connected to it.
    #[error("form has no fields")]
    NotConnected,

    /// The form driver refused the request (edge of field, read-only field).
    #[error("request denied")]
    RequestDenied,

    /// The form driver does not know the request code.
    #[error("unknown request: {0:#x}")]
    UnknownRequest(i32),

    /// A widget handle no longer refers to a live widget of its kind.
    #[error("unknown widget")]
    UnknownWidget,
}
