//! Sprite-sheet geometry.
//!
//! Every role's sheet is a fixed grid of frames, but the source art comes in
//! arbitrary resolutions. Geometry is normalized so one frame is always
//! `base_frame_width` pixels wide on screen:
//!
//! ```text
//! scale        = base_frame_width / (natural_width / columns)
//! frame_height = (natural_height / rows) * scale
//! sheet        = natural size * scale
//! ```
//!
//! Frames are never cut out of the image. The whole scaled sheet is drawn
//! as a background behind a frame-sized viewport and shifted by
//! [`SpriteRenderConfig::background_offset`].
//!
//! ```
//! use pixeloffice_logic::sprite::{SpriteGrid, SpriteRenderConfig};
//!
//! let grid = SpriteGrid::default();
//! let geo = SpriteRenderConfig::resolve(2000, 3000, &grid, 220.0).unwrap();
//! assert!((geo.scale_factor - 0.44).abs() < 1e-6);
//! ```

use serde::{Deserialize, Serialize};

/// Semantic row roles within a sheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SpriteRow {
    WalkDown,
    WalkUp,
    /// Walking left reuses this row mirrored.
    WalkRight,
    Sitting,
    Actions,
}

/// Row indices for each [`SpriteRow`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RowMap {
    pub walk_down: u32,
    pub walk_up: u32,
    pub walk_right: u32,
    pub sitting: u32,
    pub actions: u32,
}

impl Default for RowMap {
    fn default() -> Self {
        Self {
            walk_down: 0,
            walk_up: 1,
            walk_right: 2,
            sitting: 3,
            actions: 4,
        }
    }
}

/// Logical layout of a sprite sheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpriteGrid {
    pub columns: u32,
    pub rows: u32,
    pub row_map: RowMap,
}

impl Default for SpriteGrid {
    /// 4 columns × 5 rows.
    fn default() -> Self {
        Self {
            columns: 4,
            rows: 5,
            row_map: RowMap::default(),
        }
    }
}

impl SpriteGrid {
    pub fn row_index(&self, row: SpriteRow) -> u32 {
        match row {
            SpriteRow::WalkDown => self.row_map.walk_down,
            SpriteRow::WalkUp => self.row_map.walk_up,
            SpriteRow::WalkRight => self.row_map.walk_right,
            SpriteRow::Sitting => self.row_map.sitting,
            SpriteRow::Actions => self.row_map.actions,
        }
    }
}

/// On-screen geometry for one role's sheet, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpriteRenderConfig {
    pub scale_factor: f32,
    pub frame_width: f32,
    pub frame_height: f32,
    pub sheet_width: f32,
    pub sheet_height: f32,
}

impl SpriteRenderConfig {
    /// Normalize a sheet of `natural_width × natural_height` pixels.
    ///
    /// Returns `None` while the dimensions are unknown (zero) or the grid is
    /// empty; the sheet is simply not renderable yet.
    pub fn resolve(
        natural_width: u32,
        natural_height: u32,
        grid: &SpriteGrid,
        base_frame_width: f32,
    ) -> Option<Self> {
        if natural_width == 0 || natural_height == 0 || grid.columns == 0 || grid.rows == 0 {
            return None;
        }
        let natural_frame_width = natural_width as f32 / grid.columns as f32;
        let natural_frame_height = natural_height as f32 / grid.rows as f32;
        let scale_factor = base_frame_width / natural_frame_width;

        Some(Self {
            scale_factor,
            frame_width: base_frame_width,
            frame_height: natural_frame_height * scale_factor,
            sheet_width: natural_width as f32 * scale_factor,
            sheet_height: natural_height as f32 * scale_factor,
        })
    }

    /// Background position that shows cell `(row_index, frame_index)`.
    pub fn background_offset(&self, row_index: u32, frame_index: u32) -> (f32, f32) {
        (
            -(frame_index as f32 * self.frame_width),
            -(row_index as f32 * self.frame_height),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalizes_to_base_width() {
        // 500×600 natural frames on a 4×5 grid.
        let geo = SpriteRenderConfig::resolve(2000, 3000, &SpriteGrid::default(), 220.0).unwrap();
        assert!((geo.scale_factor - 0.44).abs() < 1e-6);
        assert_eq!(geo.frame_width, 220.0);
        assert!((geo.frame_height - 264.0).abs() < 1e-3);
        assert!((geo.sheet_width - 880.0).abs() < 1e-3);
        assert!((geo.sheet_height - 1320.0).abs() < 1e-3);
    }

    #[test]
    fn background_offset_for_cell() {
        let geo = SpriteRenderConfig::resolve(2000, 3000, &SpriteGrid::default(), 220.0).unwrap();
        let (x, y) = geo.background_offset(2, 1);
        assert!((x + 220.0).abs() < 1e-3, "x={x}");
        assert!((y + 528.0).abs() < 1e-3, "y={y}");
        assert_eq!(geo.background_offset(0, 0), (-0.0, -0.0));
    }

    #[test]
    fn frame_width_is_uniform_across_resolutions() {
        let grid = SpriteGrid::default();
        let small = SpriteRenderConfig::resolve(128, 160, &grid, 220.0).unwrap();
        let large = SpriteRenderConfig::resolve(4096, 5120, &grid, 220.0).unwrap();
        assert_eq!(small.frame_width, large.frame_width);
        assert!((small.frame_height - large.frame_height).abs() < 1e-3);
    }

    #[test]
    fn unknown_dimensions_are_not_ready() {
        let grid = SpriteGrid::default();
        assert!(SpriteRenderConfig::resolve(0, 0, &grid, 220.0).is_none());
        assert!(SpriteRenderConfig::resolve(2000, 0, &grid, 220.0).is_none());
        let empty = SpriteGrid {
            columns: 0,
            ..grid
        };
        assert!(SpriteRenderConfig::resolve(2000, 3000, &empty, 220.0).is_none());
    }

    #[test]
    fn default_row_map() {
        let grid = SpriteGrid::default();
        assert_eq!(grid.row_index(SpriteRow::WalkDown), 0);
        assert_eq!(grid.row_index(SpriteRow::WalkRight), 2);
        assert_eq!(grid.row_index(SpriteRow::Actions), 4);
    }
}
