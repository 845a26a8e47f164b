//! # Grid layout
//!
//! Where the stars sit on screen, and which star (if any) a pointer is over. Only used to turn pointer coordinates into [Point]s; matching never looks at it.

use macroquad::math::{vec2, Vec2};
use serde::{Deserialize, Serialize};

use crate::error::LibraryError;
use crate::point::Point;

/// An `grid_size`×`grid_size` square of stars.
///
/// The star for cell `(i, j)` is drawn at `(i * spacing + spacing, j * spacing + spacing)`, so there's one `spacing` of margin on every side.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridLayout {
    /// Number of stars along each side.
    pub grid_size: usize,
    /// Radius of a star as drawn, in pixels.
    pub dot_radius: f32,
    /// Distance between neighbouring stars, in pixels.
    pub spacing: f32,
}

impl Default for GridLayout {
    fn default() -> Self {
        Self {
            grid_size: 8,
            dot_radius: 12.0,
            spacing: 70.0,
        }
    }
}

impl GridLayout {
    pub fn new(grid_size: usize, dot_radius: f32, spacing: f32) -> Result<Self, LibraryError> {
        let layout = Self {
            grid_size,
            dot_radius,
            spacing,
        };
        layout.validate()?;
        Ok(layout)
    }

    /// Checks the layout can actually tell stars apart.
    pub fn validate(&self) -> Result<(), LibraryError> {
        if self.grid_size == 0 {
            return Err(LibraryError::InvalidLayout("grid has no stars"));
        }
        if !(self.spacing.is_finite() && self.spacing > 0.0) {
            return Err(LibraryError::InvalidLayout("spacing must be positive"));
        }
        if !(self.dot_radius.is_finite() && self.dot_radius > 0.0) {
            return Err(LibraryError::InvalidLayout("dot radius must be positive"));
        }
        // neighbouring capture circles must not touch
        if self.capture_radius() >= self.spacing / 2.0 {
            return Err(LibraryError::InvalidLayout(
                "capture radius overlaps neighbouring stars",
            ));
        }
        Ok(())
    }

    /// How close the pointer has to be to a star to grab it.
    pub fn capture_radius(&self) -> f32 {
        self.dot_radius * 2.0
    }

    /// Width and height of the area the grid is drawn in.
    pub fn canvas_size(&self) -> f32 {
        self.grid_size as f32 * self.spacing + self.spacing
    }

    /// If `point` is one of the cells on this grid.
    pub fn contains(&self, point: Point) -> bool {
        let size = self.grid_size as i64;
        (0..size).contains(&(point.x as i64)) && (0..size).contains(&(point.y as i64))
    }

    pub fn cell_center(&self, point: Point) -> Vec2 {
        vec2(
            point.x as f32 * self.spacing + self.spacing,
            point.y as f32 * self.spacing + self.spacing,
        )
    }

    /// Every cell, column by column.
    pub fn cells(&self) -> impl Iterator<Item = Point> {
        let size = self.grid_size as i32;
        (0..size).flat_map(move |x| (0..size).map(move |y| Point::new(x, y)))
    }

    /// The star under `pos`, if `pos` is strictly inside its capture radius.
    pub fn resolve_point(&self, pos: Vec2) -> Option<Point> {
        let size = self.grid_size as f32;
        let i = ((pos.x - self.spacing) / self.spacing).round();
        let j = ((pos.y - self.spacing) / self.spacing).round();
        if !(0.0..size).contains(&i) || !(0.0..size).contains(&j) {
            return None;
        }

        let point = Point::new(i as i32, j as i32);
        if self.cell_center(point).distance(pos) < self.capture_radius() {
            Some(point)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn centers_resolve_to_their_cells() {
        let layout = GridLayout::default();
        for cell in layout.cells() {
            assert_eq!(layout.resolve_point(layout.cell_center(cell)), Some(cell));
        }
        assert_eq!(layout.cells().count(), 64);
    }

    #[test]
    fn capture_radius_is_strict() {
        let layout = GridLayout::default();
        let center = layout.cell_center(Point::new(3, 4));
        assert_eq!(
            layout.resolve_point(center + vec2(23.9, 0.0)),
            Some(Point::new(3, 4))
        );
        assert_eq!(layout.resolve_point(center + vec2(24.0, 0.0)), None);
        assert_eq!(layout.resolve_point(center + vec2(0.0, -30.0)), None);
        // 17^2 + 17^2 > 24^2
        assert_eq!(layout.resolve_point(center + vec2(17.0, 17.0)), None);
    }

    #[test]
    fn off_canvas_is_nothing() {
        let layout = GridLayout::default();
        assert_eq!(layout.resolve_point(vec2(0.0, 0.0)), None);
        assert_eq!(layout.resolve_point(vec2(-70.0, 70.0)), None);
        assert_eq!(layout.resolve_point(vec2(630.0, 70.0)), None);
        assert_eq!(layout.resolve_point(vec2(f32::NAN, 70.0)), None);
        assert_eq!(layout.resolve_point(vec2(560.0, 560.0)), Some(Point::new(7, 7)));
    }

    #[test]
    fn any_size_grid() {
        let layout = GridLayout::new(3, 5.0, 40.0).unwrap();
        assert_eq!(layout.canvas_size(), 160.0);
        assert_eq!(layout.resolve_point(vec2(120.0, 42.0)), Some(Point::new(2, 0)));
        assert_eq!(layout.resolve_point(vec2(160.0, 40.0)), None);
        assert!(layout.contains(Point::new(2, 2)));
        assert!(!layout.contains(Point::new(3, 0)));
        assert!(!layout.contains(Point::new(-1, 0)));
    }

    #[test]
    fn rejects_ambiguous_layouts() {
        assert!(GridLayout::default().validate().is_ok());
        assert!(matches!(
            GridLayout::new(0, 12.0, 70.0),
            Err(LibraryError::InvalidLayout(_))
        ));
        assert!(matches!(
            GridLayout::new(8, 20.0, 70.0),
            Err(LibraryError::InvalidLayout(_))
        ));
        assert!(matches!(
            GridLayout::new(8, 12.0, -1.0),
            Err(LibraryError::InvalidLayout(_))
        ));
    }

    #[test]
    fn partial_config_falls_back_to_defaults() {
        let layout: GridLayout = serde_json::from_str(r#"{ "grid_size": 10 }"#).unwrap();
        assert_eq!(layout.grid_size, 10);
        assert_eq!(layout.spacing, 70.0);
    }
}
