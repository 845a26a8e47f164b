use thiserror::Error;

use crate::point::Point;

/// Things that can go wrong while setting up a game. Once a session is running, nothing can.
#[derive(Debug, Error)]
pub enum LibraryError {
    #[error("pattern `{pattern}` lists the star {point} more than once")]
    DuplicatePoint { pattern: String, point: Point },
    #[error("pattern `{pattern}` has the star {point} at a negative coordinate")]
    NegativePoint { pattern: String, point: Point },
    #[error("pattern `{pattern}` has the star {point} outside the grid")]
    OffGrid { pattern: String, point: Point },
    #[error("more than one pattern is named `{0}`")]
    DuplicateName(String),
    #[error("no pattern named `{0}`")]
    UnknownPattern(String),
    #[error("invalid grid layout: {0}")]
    InvalidLayout(&'static str),
    #[error("couldn't read pattern library")]
    Io(#[from] std::io::Error),
    #[error("couldn't parse pattern library")]
    Json(#[from] serde_json::Error),
}
