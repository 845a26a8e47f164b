use std::fmt;

use serde::{Deserialize, Serialize};

/// A cell on the grid. Compared by value, so two points with the same coordinates are the same star.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// This point moved by `(dx, dy)`.
    pub const fn offset(self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }
}

impl From<(i32, i32)> for Point {
    fn from((x, y): (i32, i32)) -> Self {
        Self { x, y }
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn offset_moves_both_axes() {
        assert_eq!(Point::new(1, 3).offset(2, -1), Point::new(3, 2));
    }

    #[test]
    fn json_shape() {
        let point: Point = serde_json::from_str(r#"{ "x": 4, "y": 2 }"#).unwrap();
        assert_eq!(point, Point::from((4, 2)));
        assert_eq!(point.to_string(), "(4, 2)");
    }
}
