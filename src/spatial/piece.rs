//! Puzzle pieces: an immutable pixel grid with four derived boundaries
//!
//! The image is shared read-only data; only the grid position ever mutates.
//! Boundary pixel sequences are extracted from the image rows and columns
//! once at construction and afterwards only follow the piece under
//! translation, so all four edges always sit exactly half a cell from the
//! centre.

use std::sync::Arc;

use ndarray::Array2;

use crate::io::error::{Result, SolverError};
use crate::spatial::boundary::{Boundary, Rgb};
use crate::spatial::position::{EdgePos, GridPos, Side};

/// Shared, immutable pixel grid backing a piece, indexed `(row, col)`
pub type PieceImage = Arc<Array2<Rgb>>;

/// One atomic puzzle tile
#[derive(Clone, Debug)]
pub struct Piece {
    name: String,
    image: PieceImage,
    position: GridPos,
    boundaries: [Boundary; 4],
}

impl Piece {
    /// Create a piece at the origin with boundaries derived from the image
    ///
    /// The image must be non-empty; loaders validate this before pieces are
    /// constructed.
    pub fn new(name: impl Into<String>, image: PieceImage) -> Self {
        let position = GridPos::ORIGIN;
        let boundaries = Side::ALL.map(|side| {
            Boundary::new(edge_pixels(&image, side), EdgePos::for_side(position, side))
        });

        Self {
            name: name.into(),
            image,
            position,
            boundaries,
        }
    }

    /// Unique label derived from the piece's source
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The piece's pixel grid
    pub fn image(&self) -> &Array2<Rgb> {
        &self.image
    }

    /// Current grid position of the piece centre
    pub const fn position(&self) -> GridPos {
        self.position
    }

    /// All four boundaries in [`Side`] storage order
    pub const fn boundaries(&self) -> &[Boundary; 4] {
        &self.boundaries
    }

    /// The boundary on one side of the piece
    pub const fn boundary(&self, side: Side) -> &Boundary {
        let [top, left, bottom, right] = &self.boundaries;
        match side {
            Side::Top => top,
            Side::Left => left,
            Side::Bottom => bottom,
            Side::Right => right,
        }
    }

    /// Move the piece and all four boundaries by the same delta
    ///
    /// The translation is atomic: either observation point (centre or any
    /// boundary) reflects the full move.
    pub fn translate_to(&mut self, target: GridPos) {
        let delta = self.position.delta_to(target);
        for boundary in &mut self.boundaries {
            boundary.translate(delta);
        }
        self.position = target;
    }

    /// Mutable access to the boundary array for seam flagging
    pub(crate) const fn boundaries_mut(&mut self) -> &mut [Boundary; 4] {
        &mut self.boundaries
    }
}

// Edge pixel order matches reading order: left-to-right for horizontal
// edges, top-to-bottom for vertical ones.
fn edge_pixels(image: &Array2<Rgb>, side: Side) -> Vec<Rgb> {
    let (rows, cols) = image.dim();
    let take = |row: usize, col: usize| image.get((row, col)).copied().unwrap_or([0, 0, 0]);

    match side {
        Side::Top => (0..cols).map(|col| take(0, col)).collect(),
        Side::Bottom => (0..cols)
            .map(|col| take(rows.saturating_sub(1), col))
            .collect(),
        Side::Left => (0..rows).map(|row| take(row, 0)).collect(),
        Side::Right => (0..rows)
            .map(|row| take(row, cols.saturating_sub(1)))
            .collect(),
    }
}

/// Cut a source pixel grid into uniform pieces named `r{row}c{col}`
///
/// The inverse of reassembly, used to shred known images into solvable
/// groups. Pieces are returned in row-major order of their source location,
/// each positioned at the origin as a freshly created piece.
///
/// # Errors
///
/// Returns an error if either piece dimension is zero or does not evenly
/// divide the source dimensions.
pub fn slice_into_pieces(
    source: &Array2<Rgb>,
    piece_rows: usize,
    piece_cols: usize,
) -> Result<Vec<Piece>> {
    let (rows, cols) = source.dim();

    if piece_rows == 0 || piece_cols == 0 {
        return Err(SolverError::InvalidPieceData {
            reason: "piece dimensions must be non-zero".to_string(),
        });
    }

    if rows == 0 || cols == 0 {
        return Err(SolverError::InvalidPieceData {
            reason: "source image is empty".to_string(),
        });
    }

    if rows % piece_rows != 0 || cols % piece_cols != 0 {
        return Err(SolverError::InvalidPieceData {
            reason: format!(
                "source {rows}x{cols} is not divisible into {piece_rows}x{piece_cols} pieces"
            ),
        });
    }

    let mut pieces = Vec::with_capacity((rows / piece_rows) * (cols / piece_cols));
    for tile_row in 0..rows / piece_rows {
        for tile_col in 0..cols / piece_cols {
            let tile = Array2::from_shape_fn((piece_rows, piece_cols), |(row, col)| {
                source
                    .get((tile_row * piece_rows + row, tile_col * piece_cols + col))
                    .copied()
                    .unwrap_or([0, 0, 0])
            });
            pieces.push(Piece::new(
                format!("r{tile_row}c{tile_col}"),
                Arc::new(tile),
            ));
        }
    }

    Ok(pieces)
}
