//! Oriented piece edges carrying pixel colours and a grid position
//!
//! A boundary is created once per piece side and never regenerated: the pixel
//! sequence is immutable and shared, while the position follows the owning
//! piece under translation and the internal flag flips true at most once,
//! when the edge becomes a seam shared with another piece.

use std::sync::Arc;

use crate::spatial::position::{EdgePos, GridDelta};

/// A single pixel colour as red, green, blue channels
pub type Rgb = [u8; 3];

/// One oriented edge of a piece
#[derive(Clone, Debug)]
pub struct Boundary {
    pixels: Arc<[Rgb]>,
    position: EdgePos,
    is_internal: bool,
}

impl Boundary {
    /// Create an external boundary from an edge pixel sequence
    pub fn new(pixels: Vec<Rgb>, position: EdgePos) -> Self {
        Self {
            pixels: pixels.into(),
            position,
            is_internal: false,
        }
    }

    /// Edge pixel colours, ordered along the edge
    pub fn pixels(&self) -> &[Rgb] {
        &self.pixels
    }

    /// Current edge position
    pub const fn position(&self) -> EdgePos {
        self.position
    }

    /// Whether this edge has been matched into a seam
    pub const fn is_internal(&self) -> bool {
        self.is_internal
    }

    /// Whether two edges have the same length and so could ever join
    pub fn is_compatible_with(&self, other: &Self) -> bool {
        self.pixels.len() == other.pixels.len()
    }

    /// Sum of squared per-channel differences across the edge
    ///
    /// A raw sum of squared errors, not normalised by pixel count; averaging
    /// over seams happens at the scoring layer. Callers must have checked
    /// [`Self::is_compatible_with`] first, as mismatched lengths compare only
    /// the overlapping prefix.
    pub fn difference_from(&self, other: &Self) -> u64 {
        self.pixels
            .iter()
            .zip(other.pixels.iter())
            .map(|(own, theirs)| {
                own.iter()
                    .zip(theirs.iter())
                    .map(|(&a, &b)| {
                        let diff = i64::from(a) - i64::from(b);
                        (diff * diff) as u64
                    })
                    .sum::<u64>()
            })
            .sum()
    }

    /// Move the edge by a whole-cell translation
    pub const fn translate(&mut self, delta: GridDelta) {
        self.position = self.position.translated(delta);
    }

    /// Flag the edge as matched into a seam; never reverts
    pub(crate) const fn mark_internal(&mut self) {
        self.is_internal = true;
    }
}
