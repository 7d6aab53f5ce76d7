#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Camera-relative visibility culling for Tiny World.
//!
//! The camera is always the player, centred in the viewport. Each frame the
//! culling pass filters drawable candidates to those strictly inside the
//! squared render radius derived from the viewport dimensions, and converts
//! the survivors into screen-relative pixel offsets for the rendering
//! collaborator.

use std::{error::Error, fmt};

use tinyworld_core::{GridVector, VisualKind};

/// A draw request surviving the culling pass.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Sprite {
    /// Renderable kind to draw.
    pub kind: VisualKind,
    /// Offset of the sprite from the viewport origin, in pixels.
    pub offset: GridVector,
}

/// Fixed-size camera viewport measured in grid cells.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Viewport {
    view_size: GridVector,
    cell_size: i32,
}

impl Viewport {
    /// Creates a viewport from its cell dimensions and the pixel size of a
    /// single cell.
    ///
    /// Returns an error when either dimension or the cell size is not
    /// strictly positive.
    pub fn new(view_size: GridVector, cell_size: i32) -> Result<Self, ViewportError> {
        if view_size.x() <= 0 || view_size.y() <= 0 {
            return Err(ViewportError::InvalidViewSize { view_size });
        }
        if cell_size <= 0 {
            return Err(ViewportError::InvalidCellSize { cell_size });
        }

        Ok(Self {
            view_size,
            cell_size,
        })
    }

    /// Viewport dimensions measured in grid cells.
    #[must_use]
    pub const fn view_size(&self) -> GridVector {
        self.view_size
    }

    /// Side length of a square cell in pixels.
    #[must_use]
    pub const fn cell_size(&self) -> i32 {
        self.cell_size
    }

    /// Squared render radius; candidates at or beyond it are invisible.
    #[must_use]
    pub const fn max_render_radius_squared(&self) -> i64 {
        self.view_size.length_squared() / 4
    }

    /// Total viewport size in pixels, suitable for window creation.
    #[must_use]
    pub fn window_size_px(&self) -> (i32, i32) {
        (
            self.view_size.x() * self.cell_size,
            self.view_size.y() * self.cell_size,
        )
    }

    /// Pixel offset of the viewport centre, where the camera entity sits
    /// regardless of its world position.
    #[must_use]
    pub fn center_offset(&self) -> GridVector {
        GridVector::new(
            self.view_size.x() / 2 * self.cell_size,
            self.view_size.y() / 2 * self.cell_size,
        )
    }

    /// Screen offset for a world position, or `None` when it lies outside
    /// the render radius. The comparison is strict: a candidate exactly on
    /// the radius is culled.
    #[must_use]
    pub fn offset_for(&self, camera: GridVector, position: GridVector) -> Option<GridVector> {
        let relative = position - camera;
        if relative.length_squared() < self.max_render_radius_squared() {
            Some(self.center_offset() + relative * self.cell_size)
        } else {
            None
        }
    }

    /// Filters drawable candidates against the camera, lazily yielding a
    /// draw request for each visible one. The sequence is consumed once per
    /// frame and never retained.
    pub fn cull<'a, I>(
        &'a self,
        camera: GridVector,
        candidates: I,
    ) -> impl Iterator<Item = Sprite> + 'a
    where
        I: IntoIterator<Item = (VisualKind, GridVector)>,
        I::IntoIter: 'a,
    {
        candidates.into_iter().filter_map(move |(kind, position)| {
            self.offset_for(camera, position)
                .map(|offset| Sprite { kind, offset })
        })
    }
}

/// Errors that can occur when constructing a viewport.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ViewportError {
    /// Both viewport dimensions must be strictly positive.
    InvalidViewSize {
        /// Provided dimensions that failed validation.
        view_size: GridVector,
    },
    /// The pixel size of a cell must be strictly positive.
    InvalidCellSize {
        /// Provided cell size that failed validation.
        cell_size: i32,
    },
}

impl fmt::Display for ViewportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidViewSize { view_size } => {
                write!(
                    f,
                    "view size must be positive in both dimensions (received {} x {})",
                    view_size.x(),
                    view_size.y()
                )
            }
            Self::InvalidCellSize { cell_size } => {
                write!(f, "cell size must be positive (received {cell_size})")
            }
        }
    }
}

impl Error for ViewportError {}

#[cfg(test)]
mod tests {
    use super::*;

    fn reference_viewport() -> Viewport {
        Viewport::new(GridVector::new(30, 20), 32).expect("reference viewport is valid")
    }

    #[test]
    fn construction_rejects_degenerate_dimensions() {
        assert!(matches!(
            Viewport::new(GridVector::new(0, 20), 32),
            Err(ViewportError::InvalidViewSize { .. })
        ));
        assert!(matches!(
            Viewport::new(GridVector::new(30, 20), 0),
            Err(ViewportError::InvalidCellSize { cell_size: 0 })
        ));
    }

    #[test]
    fn radius_derives_from_the_view_size() {
        // sqlen((30, 20)) = 1300, quartered to 325.
        assert_eq!(reference_viewport().max_render_radius_squared(), 325);
    }

    #[test]
    fn visibility_threshold_is_strict() {
        let viewport = reference_viewport();
        let camera = GridVector::new(100, -40);

        // sqlen((18, 0)) = 324 < 325: visible.
        assert!(viewport
            .offset_for(camera, camera + GridVector::new(18, 0))
            .is_some());
        // sqlen((18, 1)) = 325: exactly on the radius, culled.
        assert!(viewport
            .offset_for(camera, camera + GridVector::new(18, 1))
            .is_none());
        // sqlen((17, 6)) = 325 via another decomposition, still culled.
        assert!(viewport
            .offset_for(camera, camera + GridVector::new(17, 6))
            .is_none());
    }

    #[test]
    fn visible_offsets_are_centre_anchored() {
        let viewport = reference_viewport();
        let camera = GridVector::new(7, 9);

        let offset = viewport
            .offset_for(camera, GridVector::new(9, 8))
            .expect("nearby cell is visible");

        // Centre (480, 320) plus rel (2, -1) scaled by 32.
        assert_eq!(offset, GridVector::new(544, 288));
    }

    #[test]
    fn centre_offset_is_independent_of_the_camera() {
        let viewport = reference_viewport();

        assert_eq!(viewport.center_offset(), GridVector::new(480, 320));
        for camera in [GridVector::new(0, 0), GridVector::new(-250, 999)] {
            assert_eq!(
                viewport.offset_for(camera, camera),
                Some(viewport.center_offset())
            );
        }
    }

    #[test]
    fn cull_keeps_only_candidates_inside_the_radius() {
        let viewport = reference_viewport();
        let camera = GridVector::new(5, 5);
        let candidates = vec![
            (VisualKind::Grass, GridVector::new(5, 6)),
            (VisualKind::Wood, GridVector::new(5, 5 + 19)),
            (VisualKind::Enemy, GridVector::new(6, 6)),
        ];

        let sprites: Vec<Sprite> = viewport.cull(camera, candidates).collect();

        assert_eq!(
            sprites,
            vec![
                Sprite {
                    kind: VisualKind::Grass,
                    offset: GridVector::new(480, 352),
                },
                Sprite {
                    kind: VisualKind::Enemy,
                    offset: GridVector::new(512, 352),
                },
            ]
        );
    }

    #[test]
    fn window_size_scales_cells_to_pixels() {
        assert_eq!(reference_viewport().window_size_px(), (960, 640));
    }
}
