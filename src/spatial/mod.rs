//! Spatial data model for pieces and their edges
//!
//! This module contains the leaf types of the reconstruction model:
//! - Grid coordinates and half-cell edge positions
//! - Oriented boundaries carrying edge pixel colours
//! - Pieces with four positionally consistent boundaries

/// Oriented edge pixels with position and seam state
pub mod boundary;
/// Pieces and source-image slicing
pub mod piece;
/// Grid coordinates, translations, and edge positions
pub mod position;

pub use boundary::{Boundary, Rgb};
pub use piece::{Piece, PieceImage};
pub use position::{EdgePos, GridDelta, GridPos, Side};
